//! One-shot simultaneous-move play: solve the matrix game of candidate
//! action pairs and sample from the resulting mixed strategy.

use anyhow::Result;
use rand::distr::{weighted::WeightedIndex, Distribution};
use rand::{prelude::*, rngs::StdRng};

use crate::core::{Action, Board, Side};

use super::{
    minimax::TERMINAL_SCORE,
    solver::{MatrixGameSolver, RegretMatching},
    strategy::{is_terminal, History, SelectAction},
};

/// Matrix size grows with the square of this
const CANDIDATES: usize = 15;

pub struct EquilibriumPayoff<S: MatrixGameSolver = RegretMatching> {
    board: Board,
    history: History,
    solver: S,
    rng: StdRng,
}

impl EquilibriumPayoff {
    pub fn new(board: Board, history: History, rng: StdRng) -> Self {
        Self::with_solver(board, history, RegretMatching::default(), rng)
    }
}

impl<S: MatrixGameSolver> EquilibriumPayoff<S> {
    pub fn with_solver(board: Board, history: History, solver: S, rng: StdRng) -> Self {
        Self { board, history, solver, rng }
    }

    /// Rows are Upper's candidates, columns Lower's, cells Upper-relative.
    /// Finished games score their outcome instead of the heuristic.
    fn payoff_matrix(&self, uppers: &[Action], lowers: &[Action]) -> Result<Vec<Vec<f64>>> {
        uppers
            .iter()
            .map(|upper| {
                lowers
                    .iter()
                    .map(|lower| {
                        let mut next = self.board.update_board(&upper.represent(), &lower.represent())?;
                        if is_terminal(&self.history, &mut next) {
                            if let Some(value) = next.utility.value() {
                                return Ok(value * TERMINAL_SCORE);
                            }
                        }
                        Ok(next.evaluate())
                    })
                    .collect::<Result<Vec<f64>>>()
            })
            .collect()
    }
}

impl<S: MatrixGameSolver> SelectAction for EquilibriumPayoff<S> {
    fn select_action(&mut self) -> Result<Option<Action>> {
        let side = self.board.side;
        let uppers = self.board.actions(Side::Upper, CANDIDATES);
        let lowers = self.board.actions(Side::Lower, CANDIDATES);

        let (own, other) = match side {
            Side::Upper => (&uppers, &lowers),
            Side::Lower => (&lowers, &uppers),
        };
        if own.is_empty() {
            return Ok(None);
        }
        if other.is_empty() {
            return Ok(own.first().copied());
        }

        let payoff = self.payoff_matrix(&uppers, &lowers)?;
        let solution = match side {
            Side::Upper => self.solver.solve(&payoff, true, false),
            Side::Lower => self.solver.solve(&transpose(&payoff), false, true),
        };
        log::debug!("equilibrium value {:.3} over {}x{}", solution.value, uppers.len(), lowers.len());

        let chosen = WeightedIndex::new(&solution.row_strategy)
            .ok()
            .map(|dist| own[dist.sample(&mut self.rng)])
            .or_else(|| own.first().copied());

        Ok(chosen)
    }
}

fn transpose(matrix: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let cols = matrix.first().map_or(0, |row| row.len());
    (0..cols)
        .map(|j| matrix.iter().map(|row| row[j]).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Coord, Token, TokenType};

    #[test]
    fn test_transpose() {
        let m = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
        assert_eq!(transpose(&m), vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]);
    }

    #[test]
    fn test_action_is_a_candidate() {
        for side in Side::all() {
            let mut board = Board::new(side);
            board.add_token(Token::new(TokenType::R, Side::Upper, Coord::new(2, 0)));
            board.add_token(Token::new(TokenType::S, Side::Lower, Coord::new(-2, 0)));

            let candidates = board.actions(side, CANDIDATES);
            let mut strategy = EquilibriumPayoff::new(board, History::new(), StdRng::seed_from_u64(3));
            let action = strategy.select_action().unwrap().unwrap();
            assert!(candidates.contains(&action));
        }
    }

    #[test]
    fn test_single_candidate_is_played() {
        let mut board = Board::new(Side::Upper);
        board.team_mut(Side::Upper).remaining_throws = 0;
        board.add_token(Token::new(TokenType::S, Side::Upper, Coord::new(1, -1)));
        board.add_token(Token::new(TokenType::P, Side::Lower, Coord::new(2, -1)));

        let mut strategy = EquilibriumPayoff::new(board, History::new(), StdRng::seed_from_u64(3));
        let action = strategy.select_action().unwrap().unwrap();
        assert_eq!(action.destination(), Coord::new(2, -1));
    }
}

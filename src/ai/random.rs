use anyhow::Result;
use rand::{prelude::*, rngs::StdRng};

use crate::core::{Action, Board};

use super::strategy::SelectAction;

/// Random play is cheap enough to look at almost everything
const ACTION_LIMIT: usize = 1000;

pub struct RandomStrategy {
    board: Board,
    rng: StdRng,
}

impl RandomStrategy {
    pub fn new(board: Board, rng: StdRng) -> Self {
        Self { board, rng }
    }
}

impl SelectAction for RandomStrategy {
    fn select_action(&mut self) -> Result<Option<Action>> {
        let actions = self.board.actions(self.board.side, ACTION_LIMIT);
        Ok(actions.choose(&mut self.rng).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Side, TokenType, Token, Coord};

    #[test]
    fn test_opening_is_a_valid_throw() {
        for side in Side::all() {
            let board = Board::new(side);
            let mut strategy = RandomStrategy::new(board, StdRng::seed_from_u64(7));
            let action = strategy.select_action().unwrap().unwrap();
            assert!(action.is_valid_throw(side, 9));
        }
    }

    #[test]
    fn test_no_action_without_material() {
        let mut board = Board::new(Side::Lower);
        board.team_mut(Side::Lower).remaining_throws = 0;
        board.add_token(Token::new(TokenType::R, Side::Upper, Coord::new(0, 0)));
        let mut strategy = RandomStrategy::new(board, StdRng::seed_from_u64(7));
        assert!(strategy.select_action().unwrap().is_none());
    }
}

//! Depth-limited alpha-beta search over single-side actions.
//!
//! Upper maximizes and Lower minimizes the Upper-relative score. Turns are
//! treated as alternating half-moves, Upper first.

use anyhow::Result;

use crate::core::{Action, Board, Side};

use super::strategy::{is_terminal, History, SelectAction};

const ROOT_ACTIONS: usize = 5;
const NODE_ACTIONS: usize = 10;

/// Terminal outcomes outrank any heuristic score
pub const TERMINAL_SCORE: f64 = 100.0;

pub struct AlphaBetaCutoff {
    board: Board,
    history: History,
    /// Ply budget in whole turns beyond the root
    depth: u32,
    nodes: u64,
}

impl AlphaBetaCutoff {
    pub fn new(board: Board, history: History, depth: u32) -> Self {
        Self {
            board,
            history,
            depth,
            nodes: 0,
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    fn cutoff(&mut self, board: &mut Board) -> Option<f64> {
        self.nodes += 1;

        if is_terminal(&self.history, board) {
            return board.utility.value().map(|v| v * TERMINAL_SCORE);
        }
        if board.half_moves() > self.board.half_moves() + 2 * self.depth {
            return Some(board.evaluate());
        }
        None
    }

    fn max_value(&mut self, mut board: Board, mut alpha: f64, beta: f64) -> Result<f64> {
        if let Some(value) = self.cutoff(&mut board) {
            return Ok(value);
        }

        let actions = board.actions(Side::Upper, NODE_ACTIONS);
        if actions.is_empty() {
            return Ok(board.evaluate());
        }

        let mut v = f64::NEG_INFINITY;
        for action in actions {
            let child = board.result(&action, Side::Upper)?;
            v = v.max(self.min_value(child, alpha, beta)?);
            if v >= beta {
                return Ok(v);
            }
            alpha = alpha.max(v);
        }
        Ok(v)
    }

    fn min_value(&mut self, mut board: Board, alpha: f64, mut beta: f64) -> Result<f64> {
        if let Some(value) = self.cutoff(&mut board) {
            return Ok(value);
        }

        let actions = board.actions(Side::Lower, NODE_ACTIONS);
        if actions.is_empty() {
            return Ok(board.evaluate());
        }

        let mut v = f64::INFINITY;
        for action in actions {
            let child = board.result(&action, Side::Lower)?;
            v = v.min(self.max_value(child, alpha, beta)?);
            if v <= alpha {
                return Ok(v);
            }
            beta = beta.min(v);
        }
        Ok(v)
    }
}

impl SelectAction for AlphaBetaCutoff {
    fn select_action(&mut self) -> Result<Option<Action>> {
        let side = self.board.side;
        let actions = self.board.actions(side, ROOT_ACTIONS);

        let mut alpha = f64::NEG_INFINITY;
        let mut beta = f64::INFINITY;
        let mut best: Option<(f64, Action)> = None;

        for action in actions {
            let child = self.board.result(&action, side)?;
            let value = match side {
                Side::Upper => {
                    let v = self.min_value(child, alpha, beta)?;
                    alpha = alpha.max(v);
                    v
                }
                Side::Lower => {
                    let v = self.max_value(child, alpha, beta)?;
                    beta = beta.min(v);
                    v
                }
            };

            let better = match best {
                None => true,
                Some((b, _)) => match side {
                    Side::Upper => value > b,
                    Side::Lower => value < b,
                },
            };
            if better {
                best = Some((value, action));
            }
        }

        if let Some((value, action)) = best {
            log::debug!("minimax chose {} value {:.3} nodes {}", action, value, self.nodes);
        }
        Ok(best.map(|(_, action)| action))
    }
}

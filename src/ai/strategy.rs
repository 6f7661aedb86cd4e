//! Common shape of every move-selection strategy

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Result};
use hashbag::HashBag;
use rand::rngs::StdRng;

use crate::core::{Action, Board, Utility};

use super::{
    equilibrium::EquilibriumPayoff,
    mcts::{MctsOptions, SmMcts},
    minimax::AlphaBetaCutoff,
    random::RandomStrategy,
};

/// Positions seen this many times are drawn
pub const REPETITION_LIMIT: usize = 3;

/// Picks one action for the board's own side
pub trait SelectAction {
    /// `None` only when the side has no legal action at all
    fn select_action(&mut self) -> Result<Option<Action>>;
}

/// How many times each position has occurred in the game
#[derive(Debug, Clone, Default)]
pub struct History {
    boards: HashBag<Board>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence, returning the new count
    pub fn record(&mut self, board: Board) -> usize {
        self.boards.insert(board) + 1
    }

    pub fn count(&self, board: &Board) -> usize {
        self.boards.contains(board)
    }

    pub fn is_repeated(&self, board: &Board) -> bool {
        self.count(board) >= REPETITION_LIMIT
    }
}

/// Goal test shared by every strategy: repetition first, then the rules
pub fn is_terminal(history: &History, board: &mut Board) -> bool {
    if history.is_repeated(board) {
        board.utility = Utility::Draw;
        return true;
    }
    board.goal_test()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Random,
    Minimax,
    Equilibrium,
    Mcts,
}

impl FromStr for StrategyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(StrategyKind::Random),
            "minimax" | "alphabeta" => Ok(StrategyKind::Minimax),
            "equilibrium" => Ok(StrategyKind::Equilibrium),
            "mcts" => Ok(StrategyKind::Mcts),
            _ => bail!("Unknown strategy: {}", s),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StrategyKind::Random => "random",
            StrategyKind::Minimax => "minimax",
            StrategyKind::Equilibrium => "equilibrium",
            StrategyKind::Mcts => "mcts",
        };
        write!(f, "{}", s)
    }
}

pub enum Strategy {
    Random(RandomStrategy),
    AlphaBeta(AlphaBetaCutoff),
    Equilibrium(EquilibriumPayoff),
    Mcts(SmMcts),
}

impl Strategy {
    /// `depth` is only read by minimax, `budget` only by MCTS
    pub fn new(
        kind: StrategyKind,
        board: Board,
        history: History,
        depth: u32,
        budget: Duration,
        rng: StdRng,
    ) -> Self {
        match kind {
            StrategyKind::Random => Strategy::Random(RandomStrategy::new(board, rng)),
            StrategyKind::Minimax => {
                Strategy::AlphaBeta(AlphaBetaCutoff::new(board, history, depth))
            }
            StrategyKind::Equilibrium => {
                Strategy::Equilibrium(EquilibriumPayoff::new(board, history, rng))
            }
            StrategyKind::Mcts => {
                let options = MctsOptions {
                    calculation_time: budget,
                    ..MctsOptions::default()
                };
                Strategy::Mcts(SmMcts::new(board, history, options, rng))
            }
        }
    }
}

impl SelectAction for Strategy {
    fn select_action(&mut self) -> Result<Option<Action>> {
        match self {
            Strategy::Random(s) => s.select_action(),
            Strategy::AlphaBeta(s) => s.select_action(),
            Strategy::Equilibrium(s) => s.select_action(),
            Strategy::Mcts(s) => s.select_action(),
        }
    }
}

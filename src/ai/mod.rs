//! Move selection strategies
pub mod equilibrium;
pub mod mcts;
pub mod minimax;
pub mod random;
pub mod solver;
pub mod strategy;

// Re-export key types
pub use equilibrium::EquilibriumPayoff;
pub use mcts::{MctsOptions, SearchResult, SmMcts};
pub use minimax::AlphaBetaCutoff;
pub use random::RandomStrategy;
pub use solver::{MatrixGameSolver, MatrixSolution, RegretMatching};
pub use strategy::{is_terminal, History, SelectAction, Strategy, StrategyKind};

//! Ropasci - Engine for the simultaneous-move hex game of rock, paper and scissors

pub mod ai;
pub mod core;
pub mod engine;
pub mod protocol;
pub mod utils;

// Re-export commonly used items
pub use crate::core::{Action, Board, Side, WireAction};
pub use engine::{EngineOptions, Player};

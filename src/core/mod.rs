//! Board geometry, game rules and state transitions

pub mod action;
pub mod board;
pub mod coord;
pub mod side;
pub mod team;
pub mod token;

pub use action::{Action, WireAction};
pub use board::{Board, Utility, MAX_TURNS};
pub use coord::{Coord, BOARD_SIDE, MAX_DIST};
pub use side::{Side, SideArray};
pub use team::{Team, INITIAL_THROWS};
pub use token::{Token, TokenType};

//! Line-oriented text protocol for driving a player from a referee

pub mod command;
pub mod handler;

pub use command::parse_command;
pub use handler::{handle_command, Flow, Session};

//! Actions and their wire representation

use anyhow::{bail, ensure, Context, Result};
use std::fmt::Display;
use std::str::FromStr;

use super::{
    coord::{Coord, BOARD_SIDE},
    side::Side,
    team::INITIAL_THROWS,
    token::{Token, TokenType},
};

/// A single side's move for one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Place a new token from off-board
    Throw { kind: TokenType, to: Coord },
    /// Move a token one hex
    Slide { token: Token, to: Coord },
    /// Move a token around an adjacent team-mate
    Swing { token: Token, to: Coord },
}

impl Action {
    pub fn throw(kind: TokenType, to: Coord) -> Result<Self> {
        ensure!(to.on_board(), "Throw destination {} is off the board", to);
        Ok(Action::Throw { kind, to })
    }

    pub fn slide(token: Token, to: Coord) -> Result<Self> {
        ensure!(to.on_board(), "Slide destination {} is off the board", to);
        ensure!(token.pos.is_adjacent(&to), "Slide from {} to {} is not one step", token.pos, to);
        Ok(Action::Slide { token, to })
    }

    pub fn swing(token: Token, to: Coord) -> Result<Self> {
        ensure!(to.on_board(), "Swing destination {} is off the board", to);
        ensure!(to != token.pos, "Swing cannot end where it started");
        Ok(Action::Swing { token, to })
    }

    pub fn destination(&self) -> Coord {
        match self {
            Action::Throw { to, .. } | Action::Slide { to, .. } | Action::Swing { to, .. } => *to,
        }
    }

    /// Type of the token that ends up on the destination hex
    pub fn token_type(&self) -> TokenType {
        match self {
            Action::Throw { kind, .. } => *kind,
            Action::Slide { token, .. } | Action::Swing { token, .. } => token.kind,
        }
    }

    pub fn is_throw(&self) -> bool {
        matches!(self, Action::Throw { .. })
    }

    /// Slides and swings only need an on-board destination
    pub fn is_valid_move(&self) -> bool {
        !self.is_throw() && self.destination().on_board()
    }

    /// Whether a throw lands inside the band unlocked for `side`. The throw
    /// budget itself is not checked here.
    pub fn is_valid_throw(&self, side: Side, remaining_throws: u32) -> bool {
        let Action::Throw { to, .. } = self else {
            return false;
        };

        to.on_board() && throw_band_contains(side, INITIAL_THROWS.saturating_sub(remaining_throws), to.x)
    }

    pub fn represent(&self) -> WireAction {
        match *self {
            Action::Throw { kind, to } => WireAction::Throw { kind, to },
            Action::Slide { token, to } => WireAction::Slide { from: token.pos, to },
            Action::Swing { token, to } => WireAction::Swing { from: token.pos, to },
        }
    }
}

/// Rows a side may throw into after `spent` throws
pub fn throw_band(side: Side, spent: u32) -> std::ops::RangeInclusive<i32> {
    let reach = (spent as i32).min(2 * BOARD_SIDE);
    match side {
        Side::Upper => BOARD_SIDE - reach..=BOARD_SIDE,
        Side::Lower => -BOARD_SIDE..=-BOARD_SIDE + reach,
    }
}

fn throw_band_contains(side: Side, spent: u32, row: i32) -> bool {
    throw_band(side, spent).contains(&row)
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Throw { kind, to } => write!(f, "throw {} to {}", kind.to_char(), to),
            Action::Slide { token, to } => write!(f, "slide {} to {}", token, to),
            Action::Swing { token, to } => write!(f, "swing {} to {}", token, to),
        }
    }
}

/// The minimal tuple exchanged with the referee, e.g.
/// `("THROW", "r", (4, -4))` or `("SLIDE", (0, 0), (1, 0))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireAction {
    Throw { kind: TokenType, to: Coord },
    Slide { from: Coord, to: Coord },
    Swing { from: Coord, to: Coord },
}

impl WireAction {
    pub fn destination(&self) -> Coord {
        match self {
            WireAction::Throw { to, .. }
            | WireAction::Slide { to, .. }
            | WireAction::Swing { to, .. } => *to,
        }
    }

    pub fn from_args(action_name: &str, args: &[&str]) -> Result<Self> {
        let coord = |x: &str, y: &str| -> Result<Coord> {
            Ok(Coord::new(
                x.parse().context("invalid x coordinate")?,
                y.parse().context("invalid y coordinate")?,
            ))
        };

        match action_name.to_ascii_uppercase().as_str() {
            "THROW" => {
                ensure!(args.len() == 3, "THROW requires a symbol and a hex");
                Ok(WireAction::Throw {
                    kind: args[0].parse()?,
                    to: coord(args[1], args[2])?,
                })
            }
            "SLIDE" | "SWING" => {
                ensure!(args.len() == 4, "{} requires two hexes", action_name);
                let from = coord(args[0], args[1])?;
                let to = coord(args[2], args[3])?;
                if action_name.eq_ignore_ascii_case("SLIDE") {
                    Ok(WireAction::Slide { from, to })
                } else {
                    Ok(WireAction::Swing { from, to })
                }
            }
            _ => bail!("Unknown action: {}", action_name),
        }
    }
}

impl FromStr for WireAction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let cleaned: String = s
            .chars()
            .map(|c| match c {
                '(' | ')' | '"' | '\'' | ',' => ' ',
                c => c,
            })
            .collect();
        let parts: Vec<&str> = cleaned.split_whitespace().collect();
        ensure!(!parts.is_empty(), "empty action");

        WireAction::from_args(parts[0], &parts[1..])
    }
}

impl Display for WireAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WireAction::Throw { kind, to } => {
                write!(f, "(\"THROW\", \"{}\", {})", kind.to_char(), to)
            }
            WireAction::Slide { from, to } => write!(f, "(\"SLIDE\", {}, {})", from, to),
            WireAction::Swing { from, to } => write!(f, "(\"SWING\", {}, {})", from, to),
        }
    }
}

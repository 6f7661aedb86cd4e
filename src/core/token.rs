//! Tokens and the rock-paper-scissors cycle

use anyhow::{bail, Result};
use colored::Colorize;
use std::fmt;
use std::str::FromStr;

use super::{action::Action, coord::Coord, side::Side};

/// Symbol carried by a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenType {
    R,
    P,
    S,
}

impl TokenType {
    pub const ALL: [TokenType; 3] = [TokenType::S, TokenType::R, TokenType::P];

    /// The type this one defeats
    pub const fn target(self) -> TokenType {
        match self {
            TokenType::R => TokenType::S,
            TokenType::S => TokenType::P,
            TokenType::P => TokenType::R,
        }
    }

    /// The type that defeats this one
    pub const fn enemy(self) -> TokenType {
        match self {
            TokenType::R => TokenType::P,
            TokenType::S => TokenType::R,
            TokenType::P => TokenType::S,
        }
    }

    pub fn beats(self, other: TokenType) -> bool {
        self.target() == other
    }

    pub fn to_char(self) -> char {
        match self {
            TokenType::R => 'r',
            TokenType::P => 'p',
            TokenType::S => 's',
        }
    }

    pub fn from_char(c: char) -> Result<Self> {
        match c.to_ascii_lowercase() {
            'r' => Ok(TokenType::R),
            'p' => Ok(TokenType::P),
            's' => Ok(TokenType::S),
            _ => bail!("Invalid token symbol: {}", c),
        }
    }
}

impl FromStr for TokenType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => TokenType::from_char(c),
            _ => bail!("Invalid token symbol: {}", s),
        }
    }
}

/// A piece on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub pos: Coord,
    pub side: Side,
    pub kind: TokenType,
}

impl Token {
    pub fn new(kind: TokenType, side: Side, pos: Coord) -> Self {
        Self { pos, side, kind }
    }

    pub fn dist(&self, other: &Token) -> i32 {
        self.pos.dist(&other.pos)
    }

    /// Display code: uppercase for Upper, lowercase for Lower
    pub fn symbol(&self) -> char {
        match self.side {
            Side::Upper => self.kind.to_char().to_ascii_uppercase(),
            Side::Lower => self.kind.to_char(),
        }
    }

    pub fn slide_destinations(&self) -> [Coord; 6] {
        self.pos.adjacent()
    }

    /// Hexes reachable by swinging around an adjacent team-mate. Hexes a slide
    /// already reaches and the token's own hex are left out.
    pub fn swing_destinations(&self, team: &[Token]) -> Vec<Coord> {
        let slides = self.slide_destinations();
        let mut swings: Vec<Coord> = Vec::new();

        for pivot in team.iter().filter(|t| slides.contains(&t.pos)) {
            for dest in pivot.pos.adjacent() {
                if dest != self.pos && !slides.contains(&dest) && !swings.contains(&dest) {
                    swings.push(dest);
                }
            }
        }

        swings
    }

    /// All legal slide and swing actions for this token
    pub fn move_actions(&self, team: &[Token]) -> Vec<Action> {
        let slides = self.slide_destinations()
            .into_iter()
            .map(|to| Action::Slide { token: *self, to });
        let swings = self.swing_destinations(team)
            .into_iter()
            .map(|to| Action::Swing { token: *self, to });

        slides.chain(swings)
            .filter(|action| action.is_valid_move())
            .collect()
    }

    pub fn nearest_target<'t>(&self, others: &'t [Token]) -> Option<&'t Token> {
        others.iter()
            .filter(|other| self.kind.beats(other.kind))
            .min_by_key(|other| self.dist(other))
    }

    /// Whether any of `others` is of the type that defeats this token
    pub fn threatened_by(&self, others: &[Token]) -> bool {
        others.iter().any(|other| other.kind == self.kind.enemy())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.symbol().to_string();

        let colored_symbol = match self.side {
            Side::Upper => symbol.bright_blue(),
            Side::Lower => symbol.bright_red(),
        };

        write!(f, "{}@{}", colored_symbol, self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle() {
        for kind in TokenType::ALL {
            assert_eq!(kind.target().enemy(), kind);
            assert_eq!(kind.enemy().target(), kind);
            assert_ne!(kind.target(), kind);
            assert_ne!(kind.target(), kind.enemy());
        }
        assert!(TokenType::R.beats(TokenType::S));
        assert!(TokenType::S.beats(TokenType::P));
        assert!(TokenType::P.beats(TokenType::R));
        assert!(!TokenType::R.beats(TokenType::P));
    }

    #[test]
    fn test_symbols() {
        assert_eq!("r".parse::<TokenType>().unwrap(), TokenType::R);
        assert_eq!(TokenType::from_char('S').unwrap(), TokenType::S);
        assert!("rp".parse::<TokenType>().is_err());
        assert!("x".parse::<TokenType>().is_err());

        let token = Token::new(TokenType::P, Side::Upper, Coord::new(0, 0));
        assert_eq!(token.symbol(), 'P');
        let token = Token::new(TokenType::P, Side::Lower, Coord::new(0, 0));
        assert_eq!(token.symbol(), 'p');
    }

    #[test]
    fn test_lone_token_slides_only() {
        let token = Token::new(TokenType::R, Side::Upper, Coord::new(0, 0));
        let actions = token.move_actions(&[token]);
        assert_eq!(actions.len(), 6);
        assert!(actions.iter().all(|a| matches!(a, Action::Slide { .. })));
    }

    #[test]
    fn test_edge_slides_filtered() {
        let token = Token::new(TokenType::R, Side::Upper, Coord::new(4, -4));
        let actions = token.move_actions(&[token]);
        assert_eq!(actions.len(), 3);
        assert!(actions.iter().all(|a| a.destination().on_board()));
    }

    #[test]
    fn test_swing_around_pivot() {
        let token = Token::new(TokenType::R, Side::Upper, Coord::new(0, 0));
        let pivot = Token::new(TokenType::S, Side::Upper, Coord::new(1, 0));
        let team = [token, pivot];

        let swings = token.swing_destinations(&team);
        // pivot neighbours minus own hex minus the two shared slide hexes
        assert_eq!(swings.len(), 3);
        assert!(swings.contains(&Coord::new(2, 0)));
        assert!(swings.contains(&Coord::new(2, -1)));
        assert!(swings.contains(&Coord::new(1, 1)));
        assert!(!swings.contains(&token.pos));

        let actions = token.move_actions(&team);
        assert_eq!(actions.len(), 9);
    }

    #[test]
    fn test_swing_union_deduplicated() {
        let token = Token::new(TokenType::R, Side::Upper, Coord::new(0, 0));
        let team = [
            token,
            Token::new(TokenType::S, Side::Upper, Coord::new(1, 0)),
            Token::new(TokenType::S, Side::Upper, Coord::new(1, -1)),
        ];

        let swings = token.swing_destinations(&team);
        let mut deduped = swings.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(swings.len(), deduped.len());
        assert!(swings.contains(&Coord::new(2, -1)));
    }

    #[test]
    fn test_nearest_target() {
        let token = Token::new(TokenType::R, Side::Upper, Coord::new(0, 0));
        let others = [
            Token::new(TokenType::S, Side::Lower, Coord::new(3, 0)),
            Token::new(TokenType::S, Side::Lower, Coord::new(1, 0)),
            Token::new(TokenType::P, Side::Lower, Coord::new(0, 1)),
        ];
        assert_eq!(token.nearest_target(&others).unwrap().pos, Coord::new(1, 0));
        assert!(token.threatened_by(&others));
        assert!(token.nearest_target(&others[2..]).is_none());
    }
}

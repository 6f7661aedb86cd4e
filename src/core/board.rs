//! Full game state, simultaneous move resolution and terminal detection

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use anyhow::Result;

use super::{
    action::{Action, WireAction},
    coord::Coord,
    side::{Side, SideArray},
    team::Team,
    token::{Token, TokenType},
};

/// Games running this many turns are drawn
pub const MAX_TURNS: u32 = 360;

/// Outcome of a board, always framed from Upper's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Utility {
    Win,
    Lose,
    Draw,
    #[default]
    Unassigned,
}

impl Utility {
    pub fn value(self) -> Option<f64> {
        match self {
            Utility::Win => Some(1.0),
            Utility::Lose => Some(-1.0),
            Utility::Draw => Some(0.0),
            Utility::Unassigned => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != Utility::Unassigned
    }
}

impl fmt::Display for Utility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Utility::Win => "win",
            Utility::Lose => "lose",
            Utility::Draw => "draw",
            Utility::Unassigned => "ongoing",
        };
        write!(f, "{}", s)
    }
}

/// A complete snapshot of both teams.
///
/// Identity (`Eq`/`Hash`) covers the teams only so that recurring positions
/// can be counted regardless of how deep in the game they occur.
#[derive(Debug, Clone)]
pub struct Board {
    pub teams: SideArray<Team>,
    /// The side this board is being played for
    pub side: Side,
    pub utility: Utility,
    /// One per single-side action, two per simultaneous turn
    half_moves: u32,
}

impl Board {
    pub fn new(side: Side) -> Self {
        Self {
            teams: SideArray::new(Team::new(Side::Upper), Team::new(Side::Lower)),
            side,
            utility: Utility::Unassigned,
            half_moves: 0,
        }
    }

    pub fn uppers(&self) -> &Team {
        &self.teams[Side::Upper]
    }

    pub fn lowers(&self) -> &Team {
        &self.teams[Side::Lower]
    }

    pub fn team(&self, side: Side) -> &Team {
        &self.teams[side]
    }

    pub fn team_mut(&mut self, side: Side) -> &mut Team {
        &mut self.teams[side]
    }

    /// Place a token directly, bypassing throw accounting
    pub fn add_token(&mut self, token: Token) {
        self.teams[token.side].tokens.push(token);
    }

    /// Turns played so far; single-side actions count as half a turn
    pub fn depth(&self) -> f32 {
        self.half_moves as f32 / 2.0
    }

    pub fn half_moves(&self) -> u32 {
        self.half_moves
    }

    /// Successor after one side acts alone
    pub fn result(&self, action: &Action, side: Side) -> Result<Board> {
        let mut board = self.clone();
        board.teams[side].update(&action.represent())?;
        board.resolve_collisions(&[action.destination()]);
        board.utility = Utility::Unassigned;
        board.half_moves += 1;
        Ok(board)
    }

    /// Successor after both sides act simultaneously
    pub fn update_board(&self, upper: &WireAction, lower: &WireAction) -> Result<Board> {
        let mut board = self.clone();
        board.teams[Side::Upper].update(upper)?;
        board.teams[Side::Lower].update(lower)?;

        let mut hexes = vec![upper.destination()];
        if lower.destination() != upper.destination() {
            hexes.push(lower.destination());
        }
        board.resolve_collisions(&hexes);

        board.utility = Utility::Unassigned;
        board.half_moves += 2;
        Ok(board)
    }

    /// Battle on each hex. Losers are collected first and removed at the end.
    pub fn resolve_collisions(&mut self, hexes: &[Coord]) {
        // (hex, destroyed type) where None means every token on the hex
        let mut destroyed: Vec<(Coord, Option<TokenType>)> = Vec::new();

        for &hex in hexes {
            let mut kinds: Vec<TokenType> = Vec::new();
            for team in self.teams.iter() {
                for token in team.tokens.iter().filter(|t| t.pos == hex) {
                    if !kinds.contains(&token.kind) {
                        kinds.push(token.kind);
                    }
                }
            }

            match kinds[..] {
                [a, b] => {
                    let loser = if a.beats(b) { b } else { a };
                    destroyed.push((hex, Some(loser)));
                }
                [_, _, _] => destroyed.push((hex, None)),
                _ => {}
            }
        }

        if destroyed.is_empty() {
            return;
        }

        log::trace!("collisions destroy {:?}", destroyed);
        for team in self.teams.iter_mut() {
            team.tokens.retain(|token| {
                !destroyed.iter().any(|&(hex, kind)| {
                    token.pos == hex && kind.map_or(true, |k| k == token.kind)
                })
            });
        }
    }

    /// Detect the end of the game, recording the outcome in `utility`
    pub fn goal_test(&mut self) -> bool {
        let upper = self.uppers();
        let lower = self.lowers();

        let upper_out = upper.is_exhausted();
        let lower_out = lower.is_exhausted();

        let upper_invincible = upper.remaining_throws == 0
            && upper.tokens.iter().any(|t| !t.threatened_by(&lower.tokens));
        let lower_invincible = lower.remaining_throws == 0
            && lower.tokens.iter().any(|t| !t.threatened_by(&upper.tokens));
        let upper_last = upper.remaining_throws == 0 && upper.len() == 1;
        let lower_last = lower.remaining_throws == 0 && lower.len() == 1;

        self.utility = if upper_out && lower_out {
            Utility::Draw
        } else if upper_out {
            Utility::Lose
        } else if lower_out {
            Utility::Win
        } else if upper_invincible && lower_invincible {
            Utility::Draw
        } else if upper_invincible && lower_last {
            Utility::Win
        } else if lower_invincible && upper_last {
            Utility::Lose
        } else if self.half_moves >= 2 * MAX_TURNS {
            Utility::Draw
        } else {
            Utility::Unassigned
        };

        self.utility.is_terminal()
    }

    /// Average distance from Upper tokens to their nearest targets minus the
    /// same for Lower. Tokens without a target add nothing to their side.
    ///
    /// Grows as Upper falls farther behind its targets, so `evaluate`
    /// subtracts it.
    pub fn distance_balance(&self) -> f64 {
        fn average(team: &Team, opponents: &Team) -> f64 {
            if team.is_empty() {
                return 0.0;
            }
            let total: i32 = team.tokens
                .iter()
                .filter_map(|t| t.nearest_target(&opponents.tokens).map(|target| t.dist(target)))
                .sum();
            total as f64 / team.len() as f64
        }

        average(self.uppers(), self.lowers()) - average(self.lowers(), self.uppers())
    }

    /// Static score for non-terminal boards; positive favours Upper
    pub fn evaluate(&self) -> f64 {
        let token_diff = self.uppers().len() as f64 - self.lowers().len() as f64;
        let throw_diff =
            self.uppers().remaining_throws as f64 - self.lowers().remaining_throws as f64;

        0.7 * token_diff + 0.3 * throw_diff - 0.1 * self.distance_balance()
    }

    /// Ranked candidate actions for `side`
    pub fn actions(&self, side: Side, limit: usize) -> Vec<Action> {
        self.teams[side].limited_actions(&self.teams[!side].tokens, limit)
    }

    pub fn display_map(&self) -> BTreeMap<Coord, char> {
        let mut map = self.uppers().display_map();
        map.extend(self.lowers().display_map());
        map
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.teams == other.teams
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.teams.hash(state);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "turn {} throws {}/{}",
            self.depth(),
            self.uppers().remaining_throws,
            self.lowers().remaining_throws
        )?;
        for team in self.teams.iter() {
            for token in &team.tokens {
                writeln!(f, "{}", token)?;
            }
        }
        Ok(())
    }
}

//! One side's tokens, throw budget and candidate-action generation

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use anyhow::{ensure, Context, Result};

use super::{
    action::{throw_band, Action, WireAction},
    coord::{Coord, MAX_DIST},
    side::Side,
    token::{Token, TokenType},
};

pub const INITIAL_THROWS: u32 = 9;

/// Throws rank slightly behind moves at equal distance
const THROW_WEIGHT: f64 = 1.1;

/// Moves farther than this from their nearest target are not worth chasing
const TARGET_HORIZON: i32 = MAX_DIST / 2;

#[derive(Debug, Clone)]
pub struct Team {
    pub side: Side,
    pub tokens: Vec<Token>,
    pub remaining_throws: u32,
}

impl Team {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            tokens: Vec::new(),
            remaining_throws: INITIAL_THROWS,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn throws_spent(&self) -> u32 {
        INITIAL_THROWS - self.remaining_throws
    }

    /// No tokens left and nothing to throw
    pub fn is_exhausted(&self) -> bool {
        self.remaining_throws == 0 && self.tokens.is_empty()
    }

    pub fn token_at(&self, pos: Coord) -> Option<&Token> {
        self.tokens.iter().find(|t| t.pos == pos)
    }

    pub fn occupies(&self, pos: Coord) -> bool {
        self.token_at(pos).is_some()
    }

    pub fn display_map(&self) -> BTreeMap<Coord, char> {
        self.tokens.iter().map(|t| (t.pos, t.symbol())).collect()
    }

    /// Apply a wire action to this side
    pub fn update(&mut self, action: &WireAction) -> Result<()> {
        match *action {
            WireAction::Throw { kind, to } => {
                ensure!(self.remaining_throws > 0, "{:?} has no throws remaining", self.side);
                ensure!(to.on_board(), "Throw destination {} is off the board", to);
                self.tokens.push(Token::new(kind, self.side, to));
                self.remaining_throws -= 1;
            }
            WireAction::Slide { from, to } | WireAction::Swing { from, to } => {
                ensure!(to.on_board(), "Move destination {} is off the board", to);
                let token = self.tokens
                    .iter_mut()
                    .find(|t| t.pos == from)
                    .with_context(|| format!("No {:?} token at {}", self.side, from))?;
                token.pos = to;
            }
        }

        Ok(())
    }

    /// Every throw into the currently unlocked rows
    pub fn throw_actions(&self) -> Vec<Action> {
        if self.remaining_throws == 0 {
            return Vec::new();
        }

        let band = throw_band(self.side, self.throws_spent());
        Coord::all()
            .iter()
            .filter(|to| band.contains(&to.x))
            .flat_map(|&to| TokenType::ALL.map(|kind| Action::Throw { kind, to }))
            .collect()
    }

    /// Every slide and swing of every token
    pub fn move_actions(&self) -> Vec<Action> {
        self.tokens
            .iter()
            .flat_map(|token| token.move_actions(&self.tokens))
            .collect()
    }

    /// A short, ranked list of promising actions against `opponents`.
    ///
    /// Captures win outright, then escapes from an adjacent enemy. Otherwise
    /// moves that close in on a target are ranked together with a pruned set
    /// of throws, and the list is truncated to `max_actions`.
    pub fn limited_actions(&self, opponents: &[Token], max_actions: usize) -> Vec<Action> {
        let moves = self.move_actions();
        let mut has_target = Vec::new();

        if !moves.is_empty() {
            let mut captures = Vec::new();
            let mut escapes = Vec::new();

            for action in &moves {
                let kind = action.token_type();
                let target_dist = nearest_dist(action.destination(), opponents, kind.target());
                let enemy_dist = match action {
                    Action::Slide { token, .. } | Action::Swing { token, .. } => {
                        nearest_dist(token.pos, opponents, kind.enemy())
                    }
                    Action::Throw { .. } => None,
                };

                if let Some(d) = target_dist {
                    if d <= TARGET_HORIZON {
                        has_target.push(*action);
                    }
                    if d == 0 {
                        captures.push(*action);
                    }
                }
                if enemy_dist == Some(1) {
                    escapes.push(*action);
                }
            }

            if !captures.is_empty() {
                return captures;
            }

            let escapes = self.filter_actions(escapes);
            if !escapes.is_empty() {
                return escapes;
            }
        }

        let candidates = if !has_target.is_empty() {
            let mut candidates = self.sort_actions(has_target, opponents);
            candidates.extend(self.limit_throws(opponents));
            candidates
        } else if self.remaining_throws != 0 {
            self.throw_actions()
        } else {
            moves
        };

        let mut sorted = self.sort_actions(self.filter_actions(candidates), opponents);
        sorted.truncate(max_actions);
        sorted
    }

    /// Drop actions that land on a team-mate
    pub fn filter_actions(&self, actions: Vec<Action>) -> Vec<Action> {
        actions
            .into_iter()
            .filter(|action| !self.occupies(action.destination()))
            .collect()
    }

    /// Throws that capture directly, plus the closest throw of every type not
    /// already countering one of the opponent's tokens.
    pub fn limit_throws(&self, opponents: &[Token]) -> Vec<Action> {
        let throws = self.throw_actions();
        if throws.is_empty() {
            return Vec::new();
        }

        let throw_dist = |action: &Action| {
            nearest_dist(action.destination(), opponents, action.token_type().target())
                .unwrap_or(MAX_DIST)
        };

        let mut filtered: Vec<Action> = throws
            .iter()
            .filter(|throw| throw_dist(*throw) == 0)
            .copied()
            .collect();

        let mut missing: Vec<TokenType> = TokenType::ALL.to_vec();
        for opponent in opponents {
            let counter = opponent.kind.enemy();
            if missing.contains(&counter) && self.tokens.iter().any(|t| t.kind == counter) {
                missing.retain(|&kind| kind != counter);
            }
        }

        for kind in missing {
            let mut best: Option<(i32, Action)> = None;
            for throw in throws.iter().filter(|t| t.token_type() == kind) {
                let d = throw_dist(throw);
                if best.map_or(true, |(best_d, _)| d < best_d) {
                    best = Some((d, *throw));
                }
            }
            if let Some((_, throw)) = best {
                filtered.push(throw);
            }
        }

        filtered
    }

    /// Stable sort by distance to the nearest target, throws weighted
    pub fn sort_actions(&self, actions: Vec<Action>, opponents: &[Token]) -> Vec<Action> {
        if actions.is_empty() || opponents.is_empty() {
            return actions;
        }

        let mut scored: Vec<(Action, f64)> = actions
            .into_iter()
            .map(|action| {
                let dist = nearest_dist(action.destination(), opponents, action.token_type().target())
                    .unwrap_or(MAX_DIST) as f64;
                let score = if action.is_throw() { dist * THROW_WEIGHT } else { dist };
                (action, score)
            })
            .collect();

        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        scored.into_iter().map(|(action, _)| action).collect()
    }

    fn canonical_tokens(&self) -> Vec<(Coord, TokenType)> {
        let mut tokens: Vec<_> = self.tokens.iter().map(|t| (t.pos, t.kind)).collect();
        tokens.sort();
        tokens
    }
}

/// Distance from `from` to the closest opponent of type `kind`
fn nearest_dist(from: Coord, opponents: &[Token], kind: TokenType) -> Option<i32> {
    opponents
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| from.dist(&t.pos))
        .min()
}

// Token order within a team is irrelevant to identity
impl PartialEq for Team {
    fn eq(&self, other: &Self) -> bool {
        self.side == other.side
            && self.remaining_throws == other.remaining_throws
            && self.canonical_tokens() == other.canonical_tokens()
    }
}

impl Eq for Team {}

impl Hash for Team {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.side.hash(state);
        self.remaining_throws.hash(state);
        self.canonical_tokens().hash(state);
    }
}

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use rand::{prelude::*, rngs::StdRng};

use crate::ai::{History, SelectAction, Strategy, StrategyKind};
use crate::core::{Board, Side, WireAction};
use crate::utils::make_rng;

use super::options::EngineOptions;
use super::search::SearchOptions;

/// How aggressively the remaining clock is spent early in the game
const RATE: f64 = 6.0;

/// Smallest budget handed to a search while the clock allows it
const MIN_CALC_TIME: Duration = Duration::from_millis(70);

/// A game-playing agent for one side, tracking the board and its own clock
pub struct Player {
    pub side: Side,
    pub board: Board,
    pub history: History,
    pub options: EngineOptions,
    computation_time: Duration,
    turns: u32,
    rng: StdRng,
}

impl Player {
    pub fn new(side: Side, options: EngineOptions) -> Self {
        let rng = make_rng(options.seed);
        Self {
            side,
            board: Board::new(side),
            history: History::new(),
            options,
            computation_time: Duration::ZERO,
            turns: 0,
            rng,
        }
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn computation_time(&self) -> Duration {
        self.computation_time
    }

    /// Budget for the current turn: `RATE` times the per-turn share of the
    /// remaining clock, never below `MIN_CALC_TIME` and never past the clock
    pub fn calculation_time(&self) -> Duration {
        let remaining = self.options.time_limit.saturating_sub(self.computation_time);
        let turns_left = self.options.max_turns.saturating_sub(self.turns).max(1);
        let share = remaining / turns_left;

        share.mul_f64(RATE).max(MIN_CALC_TIME).min(remaining)
    }

    /// Choose this turn's action
    pub fn action(&mut self, search: &SearchOptions) -> Result<WireAction> {
        self.turns += 1;
        let start_time = Instant::now();

        // nothing worth searching before the first throw lands
        let kind = if self.turns == 1 {
            StrategyKind::Random
        } else {
            self.options.strategy
        };
        let budget = search.move_time.unwrap_or_else(|| self.calculation_time());
        let depth = search.depth.unwrap_or(self.options.depth);
        let rng = StdRng::seed_from_u64(self.rng.random());

        let mut strategy = Strategy::new(
            kind,
            self.board.clone(),
            self.history.clone(),
            depth,
            budget,
            rng,
        );
        let action = strategy
            .select_action()?
            .context("No legal action available")?;

        let elapsed = start_time.elapsed();
        self.computation_time += elapsed;
        log::info!(
            "turn {} {:?} {} played {} in {:.3}s (total {:.3}s)",
            self.turns,
            self.side,
            kind,
            action,
            elapsed.as_secs_f64(),
            self.computation_time.as_secs_f64()
        );

        Ok(action.represent())
    }

    /// Advance the board once both sides' actions are known
    pub fn update(&mut self, opponent_action: &WireAction, player_action: &WireAction) -> Result<()> {
        let (upper, lower) = match self.side {
            Side::Upper => (player_action, opponent_action),
            Side::Lower => (opponent_action, player_action),
        };

        self.board = self.board.update_board(upper, lower)?;
        let seen = self.history.record(self.board.clone());
        log::debug!("position seen {} times", seen);

        Ok(())
    }

    /// Run the goal test on the current board
    pub fn is_game_over(&mut self) -> bool {
        crate::ai::is_terminal(&self.history, &mut self.board)
    }
}

//! Configuration options for the engine

use anyhow::{bail, Context, Result};
use std::time::Duration;

use crate::ai::StrategyKind;

#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Strategy used after the opening turn
    pub strategy: StrategyKind,
    /// Minimax ply budget in whole turns
    pub depth: u32,
    /// Total thinking time for the whole game
    pub time_limit: Duration,
    /// Turns after which the game is drawn
    pub max_turns: u32,
    /// Fixed seed for reproducible play
    pub seed: Option<u64>,
    /// Whether strict mode is enabled
    pub strict_mode: bool,
}

impl EngineOptions {
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "strategy" => self.strategy = value.parse()?,
            "depth" => self.depth = value.parse().context("invalid depth")?,
            "timelimit" => {
                let secs: f64 = value.parse().context("invalid time limit")?;
                self.time_limit = Duration::try_from_secs_f64(secs).context("invalid time limit")?;
            }
            "maxturns" => self.max_turns = value.parse().context("invalid turn count")?,
            "seed" => self.seed = Some(value.parse().context("invalid seed")?),
            "strictmode" => self.strict_mode = value.parse()?,
            _ => bail!("Unknown option: {}", name),
        }

        Ok(())
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Mcts,
            depth: 2,
            time_limit: Duration::from_secs(60),
            max_turns: crate::core::MAX_TURNS,
            seed: None,
            strict_mode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_option() {
        let mut options = EngineOptions::default();
        options.set_option("strategy", "minimax").unwrap();
        options.set_option("depth", "3").unwrap();
        options.set_option("timelimit", "1.5").unwrap();
        options.set_option("seed", "42").unwrap();
        options.set_option("strictmode", "true").unwrap();

        assert_eq!(options.strategy, StrategyKind::Minimax);
        assert_eq!(options.depth, 3);
        assert_eq!(options.time_limit, Duration::from_millis(1500));
        assert_eq!(options.seed, Some(42));
        assert!(options.strict_mode);
    }

    #[test]
    fn test_bad_options() {
        let mut options = EngineOptions::default();
        assert!(options.set_option("spells", "true").is_err());
        assert!(options.set_option("depth", "deep").is_err());
        assert!(options.set_option("timelimit", "-1").is_err());
        assert!(options.set_option("strategy", "greedy").is_err());
    }
}

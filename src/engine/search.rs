use anyhow::{bail, Context};

use std::str::FromStr;
use std::time::Duration;

/// Per-turn overrides passed with `play`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    /// Fixed thinking time instead of the game-clock share
    pub move_time: Option<Duration>,
    /// Minimax depth for this turn only
    pub depth: Option<u32>,
}

impl FromStr for SearchOptions {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut i = 0;
        let mut search_options = SearchOptions::default();

        let parts = s.split_whitespace().collect::<Vec<_>>();

        while i < parts.len() {
            match parts[i] {
                "movetime" if i + 1 < parts.len() => {
                    let millis: u64 = parts[i + 1].parse().context("invalid movetime")?;
                    search_options.move_time = Some(Duration::from_millis(millis));
                    i += 1;
                }
                "depth" if i + 1 < parts.len() => {
                    let depth = parts[i + 1].parse().context("invalid depth")?;
                    search_options.depth = Some(depth);
                    i += 1;
                }
                p => bail!("invalid play argument {}", p)
            }
            i += 1;
        }
        Ok(search_options)
    }
}

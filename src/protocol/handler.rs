//! Protocol command handling

use std::io::Write;

use anyhow::{bail, ensure, Context, Result};

use crate::core::{Side, WireAction};
use crate::engine::{EngineOptions, Player, SearchOptions};

use super::command::split_pair;

/// Whether the input loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Options set so far and the player once `init` has been seen
#[derive(Default)]
pub struct Session {
    pub options: EngineOptions,
    pub player: Option<Player>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_option(&mut self, name: &str, value: &str) -> Result<()> {
        self.options.set_option(name, value)?;
        if let Some(player) = self.player.as_mut() {
            player.options = self.options.clone();
        }
        Ok(())
    }

    fn player(&mut self) -> Result<&mut Player> {
        self.player.as_mut().context("No game in progress, send init first")
    }
}

/// Handle one command, writing any response to `out`
pub fn handle_command(cmd: &str, session: &mut Session, out: &mut impl Write) -> Result<Flow> {
    let parts: Vec<&str> = cmd.split_whitespace().collect();

    if parts.is_empty() {
        return Ok(Flow::Continue);
    }

    match parts[0] {
        "ropasci" => {
            writeln!(out, "id name ropasci")?;
            writeln!(out, "option name strategy type combo default mcts var random var minimax var equilibrium var mcts")?;
            writeln!(out, "option name depth type spin default 2")?;
            writeln!(out, "option name timelimit type string default 60")?;
            writeln!(out, "option name seed type string")?;
            writeln!(out, "option name strictmode type check default false")?;
            writeln!(out, "ropasciok")?;
        }
        "isready" => {
            writeln!(out, "readyok")?;
        }
        "setoption" => {
            ensure!(parts.len() == 5 && parts[1] == "name" && parts[3] == "value",
                "invalid setoption command");

            session.set_option(parts[2], parts[4])?;
        }
        "init" => {
            ensure!(parts.len() == 2, "init requires a side");
            let side: Side = parts[1].parse()?;

            session.player = Some(Player::new(side, session.options.clone()));
        }
        "play" => {
            let search_options = parts[1..].join(" ").parse::<SearchOptions>()?;
            let action = session.player()?.action(&search_options)?;

            writeln!(out, "{}", action)?;
        }
        "update" => {
            let args = cmd.trim_start().trim_start_matches("update");
            let (upper, lower) = split_pair(args).context("update requires <upper> | <lower>")?;
            let upper: WireAction = upper.parse()?;
            let lower: WireAction = lower.parse()?;

            let player = session.player()?;
            match player.side {
                Side::Upper => player.update(&lower, &upper)?,
                Side::Lower => player.update(&upper, &lower)?,
            }

            if player.is_game_over() {
                writeln!(out, "info result {}", player.board.utility)?;
            }
        }
        "display" => {
            let player = session.player()?;
            for (coord, symbol) in player.board.display_map() {
                writeln!(out, "{},{} {}", coord.x, coord.y, symbol)?;
            }
        }
        "quit" => {
            return Ok(Flow::Quit);
        }
        cmd => {
            bail!("Unknown command: {}", cmd);
        }
    }

    out.flush()?;
    Ok(Flow::Continue)
}

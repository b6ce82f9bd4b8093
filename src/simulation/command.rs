//! External commands as data
//!
//! Lets the CLI script commands and lets the periodic driver accept them
//! from another thread.

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Error};

use super::types::{DrivingMode, RoadCategory};
use super::world::AccSim;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetMode(DrivingMode),
    TogglePause,
    Accelerate,
    Brake,
    SetRoadCategory(RoadCategory),
    Emergency,
    Reset,
}

impl Command {
    /// Apply against the current state. Returns false if a guard rejected it.
    pub fn apply(self, sim: &mut AccSim) -> bool {
        match self {
            Command::SetMode(mode) => sim.set_mode(mode),
            Command::TogglePause => sim.toggle_pause(),
            Command::Accelerate => sim.accelerate(),
            Command::Brake => sim.brake(),
            Command::SetRoadCategory(road) => sim.set_road_category(road),
            Command::Emergency => sim.emergency(),
            Command::Reset => sim.reset(),
        }
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some((key, value)) = s.split_once('=') {
            return match key.trim().to_ascii_lowercase().as_str() {
                "mode" => Ok(Command::SetMode(value.parse()?)),
                "road" => Ok(Command::SetRoadCategory(value.parse()?)),
                other => bail!("unknown command '{}'", other),
            };
        }

        match s.to_ascii_lowercase().as_str() {
            "pause" => Ok(Command::TogglePause),
            "accelerate" | "gas" => Ok(Command::Accelerate),
            "brake" => Ok(Command::Brake),
            "emergency" => Ok(Command::Emergency),
            "reset" => Ok(Command::Reset),
            other => bail!("unknown command '{}'", other),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::SetMode(DrivingMode::Automatic) => write!(f, "mode=acc"),
            Command::SetMode(DrivingMode::Manual) => write!(f, "mode=manual"),
            Command::TogglePause => write!(f, "pause"),
            Command::Accelerate => write!(f, "accelerate"),
            Command::Brake => write!(f, "brake"),
            Command::SetRoadCategory(road) => write!(f, "road={}", road),
            Command::Emergency => write!(f, "emergency"),
            Command::Reset => write!(f, "reset"),
        }
    }
}

/// A command to issue just before the given tick runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledCommand {
    pub tick: u32,
    pub command: Command,
}

impl FromStr for ScheduledCommand {
    type Err = Error;

    /// Parses `TICK:COMMAND`, e.g. `50:mode=acc`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tick, command) = s
            .split_once(':')
            .with_context(|| format!("expected TICK:COMMAND, got '{}'", s))?;
        let tick = tick
            .trim()
            .parse()
            .with_context(|| format!("invalid tick in '{}'", s))?;
        let command = command
            .parse()
            .with_context(|| format!("invalid command in '{}'", s))?;
        Ok(Self { tick, command })
    }
}

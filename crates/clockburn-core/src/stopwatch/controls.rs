//! Mapping from the two physical stopwatch controls to engine commands.
//!
//! The engine only knows four independent commands. The stopwatch UI has two
//! buttons whose meaning depends on whether the stopwatch is running; that
//! coupling lives here so every presentation adapter resolves it the same way.

use serde::{Deserialize, Serialize};

use super::engine::StopwatchEngine;

/// Engine commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Start,
    Stop,
    RecordLap,
    Reset,
}

impl Command {
    pub fn label(self) -> &'static str {
        match self {
            Command::Start => "Start",
            Command::Stop => "Stop",
            Command::RecordLap => "Lap",
            Command::Reset => "Reset",
        }
    }
}

/// The two buttons of the stopwatch view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Start / Stop
    Primary,
    /// Lap / Reset
    Secondary,
}

impl Control {
    /// Command this control triggers for the given run state.
    pub fn command(self, is_running: bool) -> Command {
        match (self, is_running) {
            (Control::Primary, false) => Command::Start,
            (Control::Primary, true) => Command::Stop,
            (Control::Secondary, false) => Command::Reset,
            (Control::Secondary, true) => Command::RecordLap,
        }
    }

    pub fn label(self, is_running: bool) -> &'static str {
        self.command(is_running).label()
    }

    /// Resolve against the engine's current state.
    pub fn resolve(self, engine: &StopwatchEngine) -> Command {
        self.command(engine.is_running())
    }
}

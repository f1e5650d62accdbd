//! # ClockBurn Core Library
//!
//! This library provides the business logic behind the ClockBurn utility:
//! a stopwatch with lap recording, a multi-timezone world clock and an alarm
//! list editor. The `clockburn` CLI is a thin presentation layer over it.
//!
//! ## Architecture
//!
//! - **Stopwatch Engine**: a tick-driven state machine. Elapsed time is the
//!   sum of delivered tick intervals; the engine never reads a clock.
//! - **Tick Sources**: real (tokio interval) and synthetic periodic signals
//!   behind the [`TickSource`] trait.
//! - **Formatting**: `MM:SS.CC` elapsed time and 24-hour wall-clock strings.
//! - **Collaborators**: in-memory [`TimeZoneList`] and [`AlarmList`].
//! - **Storage**: TOML-based configuration.
//!
//! ## Key Components
//!
//! - [`StopwatchEngine`]: Core stopwatch state machine
//! - [`Control`]: Two-button control mapping onto engine commands
//! - [`Config`]: Application configuration management

pub mod alarm;
pub mod error;
pub mod events;
pub mod format;
pub mod stopwatch;
pub mod storage;
pub mod world_clock;

pub use alarm::{Alarm, AlarmList};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use format::{format_clock, format_elapsed, format_time_of_day, ClockPrecision};
pub use stopwatch::{
    Command, Control, IntervalTicks, Lap, StopwatchEngine, StopwatchSnapshot, StopwatchState,
    SyntheticTicks, TickSource,
};
pub use storage::Config;
pub use world_clock::{ClockRow, TimeZoneDraft, TimeZoneEntry, TimeZoneList};

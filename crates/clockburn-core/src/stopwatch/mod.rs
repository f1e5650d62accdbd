mod controls;
mod engine;
mod tick;

pub use controls::{Command, Control};
pub use engine::{Lap, StopwatchEngine, StopwatchSnapshot, StopwatchState};
pub use tick::{drive, IntervalTicks, SyntheticTicks, TickSource, CLOCK_PERIOD, STOPWATCH_PERIOD};

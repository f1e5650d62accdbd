pub mod alarm;
pub mod clock;
pub mod config;
pub mod stopwatch;

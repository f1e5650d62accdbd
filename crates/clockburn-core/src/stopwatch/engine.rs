//! Stopwatch engine implementation.
//!
//! The engine is a tick-driven state machine. It never reads a clock: elapsed
//! time is the sum of the intervals handed to `tick()` while running, so ticks
//! that are delayed or dropped by the host simply never count.
//!
//! ## State Transitions
//!
//! ```text
//! Stopped --start--> Running --stop--> Stopped
//! Running --tick/record_lap--> Running
//! Stopped --reset--> Stopped
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = StopwatchEngine::new();
//! engine.start();
//! // Once per tick source firing:
//! engine.tick(Duration::from_millis(10));
//! engine.record_lap();
//! ```
//!
//! Every command returns `Some(Event)` when it changed state and `None` when
//! its precondition did not hold.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::controls::Command;
use crate::events::Event;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopwatchState {
    #[default]
    Stopped,
    Running,
}

/// One recorded lap as presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lap {
    /// 1-based lap number.
    pub number: usize,
    /// Elapsed time when the lap was recorded.
    pub elapsed: Duration,
    /// Time since the previous lap (or since zero for the first lap).
    pub split: Duration,
}

/// Read-only view of the engine consumed on every render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopwatchSnapshot {
    pub state: StopwatchState,
    pub elapsed_ms: u64,
    pub laps_ms: Vec<u64>,
}

/// Core stopwatch engine.
#[derive(Debug, Clone, Default)]
pub struct StopwatchEngine {
    state: StopwatchState,
    elapsed: Duration,
    /// Elapsed snapshots in recording order.
    laps: Vec<Duration>,
}

impl StopwatchEngine {
    /// Create a stopped engine with zero elapsed time and no laps.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> StopwatchState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == StopwatchState::Running
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn laps(&self) -> &[Duration] {
        &self.laps
    }

    /// Laps with their numbers and splits, oldest first.
    pub fn lap_rows(&self) -> Vec<Lap> {
        let mut previous = Duration::ZERO;
        self.laps
            .iter()
            .enumerate()
            .map(|(i, &elapsed)| {
                let lap = Lap {
                    number: i + 1,
                    elapsed,
                    split: elapsed.saturating_sub(previous),
                };
                previous = elapsed;
                lap
            })
            .collect()
    }

    /// Read-only view of the current state.
    pub fn snapshot(&self) -> StopwatchSnapshot {
        StopwatchSnapshot {
            state: self.state,
            elapsed_ms: as_ms(self.elapsed),
            laps_ms: self.laps.iter().copied().map(as_ms).collect(),
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot_event(&self) -> Event {
        Event::StateSnapshot {
            snapshot: self.snapshot(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            StopwatchState::Stopped => {
                self.state = StopwatchState::Running;
                tracing::debug!(elapsed_ms = as_ms(self.elapsed), "stopwatch started");
                Some(Event::StopwatchStarted {
                    elapsed_ms: as_ms(self.elapsed),
                    at: Utc::now(),
                })
            }
            StopwatchState::Running => {
                tracing::debug!("start ignored: already running");
                None
            }
        }
    }

    pub fn stop(&mut self) -> Option<Event> {
        match self.state {
            StopwatchState::Running => {
                self.state = StopwatchState::Stopped;
                tracing::debug!(elapsed_ms = as_ms(self.elapsed), "stopwatch stopped");
                Some(Event::StopwatchStopped {
                    elapsed_ms: as_ms(self.elapsed),
                    at: Utc::now(),
                })
            }
            StopwatchState::Stopped => {
                tracing::debug!("stop ignored: not running");
                None
            }
        }
    }

    /// Call once per tick source firing with the nominal interval.
    pub fn tick(&mut self, interval: Duration) {
        if self.is_running() {
            self.elapsed = self.elapsed.saturating_add(interval);
            tracing::trace!(elapsed_ms = as_ms(self.elapsed), "tick");
        }
    }

    pub fn record_lap(&mut self) -> Option<Event> {
        if !self.is_running() {
            tracing::debug!("lap ignored: not running");
            return None;
        }
        let split = self
            .laps
            .last()
            .map_or(self.elapsed, |&prev| self.elapsed.saturating_sub(prev));
        self.laps.push(self.elapsed);
        tracing::debug!(number = self.laps.len(), elapsed_ms = as_ms(self.elapsed), "lap recorded");
        Some(Event::LapRecorded {
            number: self.laps.len(),
            elapsed_ms: as_ms(self.elapsed),
            split_ms: as_ms(split),
            at: Utc::now(),
        })
    }

    pub fn reset(&mut self) -> Option<Event> {
        if self.is_running() {
            tracing::debug!("reset ignored: running");
            return None;
        }
        let cleared_elapsed_ms = as_ms(self.elapsed);
        let cleared_laps = self.laps.len();
        self.elapsed = Duration::ZERO;
        self.laps.clear();
        tracing::debug!(cleared_elapsed_ms, cleared_laps, "stopwatch reset");
        Some(Event::StopwatchReset {
            cleared_elapsed_ms,
            cleared_laps,
            at: Utc::now(),
        })
    }

    /// Dispatch a command to the matching operation.
    pub fn apply(&mut self, command: Command) -> Option<Event> {
        match command {
            Command::Start => self.start(),
            Command::Stop => self.stop(),
            Command::RecordLap => self.record_lap(),
            Command::Reset => self.reset(),
        }
    }
}

fn as_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEN_MS: Duration = Duration::from_millis(10);

    fn run_ticks(engine: &mut StopwatchEngine, n: usize) {
        for _ in 0..n {
            engine.tick(TEN_MS);
        }
    }

    #[test]
    fn new_engine_is_stopped_and_empty() {
        let engine = StopwatchEngine::new();
        assert_eq!(engine.state(), StopwatchState::Stopped);
        assert_eq!(engine.elapsed(), Duration::ZERO);
        assert!(engine.laps().is_empty());
    }

    #[test]
    fn start_stop() {
        let mut engine = StopwatchEngine::new();

        assert!(engine.start().is_some());
        assert!(engine.is_running());

        assert!(engine.stop().is_some());
        assert!(!engine.is_running());
    }

    #[test]
    fn double_start_is_noop() {
        let mut engine = StopwatchEngine::new();
        engine.start();
        run_ticks(&mut engine, 3);
        assert!(engine.start().is_none());
        assert!(engine.is_running());
        assert_eq!(engine.elapsed(), Duration::from_millis(30));
    }

    #[test]
    fn stop_when_stopped_is_noop() {
        let mut engine = StopwatchEngine::new();
        assert!(engine.stop().is_none());
        assert_eq!(engine.state(), StopwatchState::Stopped);
    }

    #[test]
    fn one_second_of_ticks() {
        let mut engine = StopwatchEngine::new();
        engine.start();
        run_ticks(&mut engine, 100);
        assert_eq!(engine.elapsed(), Duration::from_secs(1));
        assert!(engine.laps().is_empty());
        assert_eq!(crate::format::format_elapsed(engine.elapsed()), "00:01.00");
    }

    #[test]
    fn laps_are_snapshots() {
        let mut engine = StopwatchEngine::new();
        engine.start();
        run_ticks(&mut engine, 250);
        engine.record_lap();
        run_ticks(&mut engine, 50);
        engine.record_lap();

        assert_eq!(
            engine.laps(),
            &[Duration::from_millis(2500), Duration::from_millis(3000)]
        );

        run_ticks(&mut engine, 10);
        assert_eq!(engine.laps()[1], Duration::from_millis(3000));
    }

    #[test]
    fn lap_rows_carry_splits() {
        let mut engine = StopwatchEngine::new();
        engine.start();
        run_ticks(&mut engine, 250);
        engine.record_lap();
        run_ticks(&mut engine, 50);
        engine.record_lap();

        let rows = engine.lap_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number, 1);
        assert_eq!(rows[0].split, Duration::from_millis(2500));
        assert_eq!(rows[1].number, 2);
        assert_eq!(rows[1].split, Duration::from_millis(500));
    }

    #[test]
    fn lap_event_reports_split() {
        let mut engine = StopwatchEngine::new();
        engine.start();
        run_ticks(&mut engine, 20);
        engine.record_lap();
        run_ticks(&mut engine, 5);
        match engine.record_lap() {
            Some(Event::LapRecorded {
                number,
                elapsed_ms,
                split_ms,
                ..
            }) => {
                assert_eq!(number, 2);
                assert_eq!(elapsed_ms, 250);
                assert_eq!(split_ms, 50);
            }
            other => panic!("Expected LapRecorded, got {other:?}"),
        }
    }

    #[test]
    fn lap_when_stopped_is_noop() {
        let mut engine = StopwatchEngine::new();
        assert!(engine.record_lap().is_none());
        assert!(engine.laps().is_empty());
    }

    #[test]
    fn stop_then_reset_clears_everything() {
        let mut engine = StopwatchEngine::new();
        engine.start();
        run_ticks(&mut engine, 100);
        engine.record_lap();
        engine.stop();

        match engine.reset() {
            Some(Event::StopwatchReset {
                cleared_elapsed_ms,
                cleared_laps,
                ..
            }) => {
                assert_eq!(cleared_elapsed_ms, 1000);
                assert_eq!(cleared_laps, 1);
            }
            other => panic!("Expected StopwatchReset, got {other:?}"),
        }
        assert_eq!(engine.elapsed(), Duration::ZERO);
        assert!(engine.laps().is_empty());
    }

    #[test]
    fn reset_while_running_is_noop() {
        let mut engine = StopwatchEngine::new();
        engine.start();
        run_ticks(&mut engine, 40);
        engine.record_lap();

        assert!(engine.reset().is_none());
        assert!(engine.is_running());
        assert_eq!(engine.elapsed(), Duration::from_millis(400));
        assert_eq!(engine.laps().len(), 1);
    }

    #[test]
    fn tick_when_stopped_is_noop() {
        let mut engine = StopwatchEngine::new();
        engine.tick(TEN_MS);
        assert_eq!(engine.elapsed(), Duration::ZERO);

        engine.start();
        engine.tick(TEN_MS);
        engine.stop();
        engine.tick(Duration::from_secs(5));
        assert_eq!(engine.elapsed(), TEN_MS);
    }

    #[test]
    fn resume_accumulates_on_top() {
        let mut engine = StopwatchEngine::new();
        engine.start();
        run_ticks(&mut engine, 10);
        engine.stop();
        engine.start();
        run_ticks(&mut engine, 10);
        assert_eq!(engine.elapsed(), Duration::from_millis(200));
    }

    #[test]
    fn apply_dispatches_commands() {
        let mut engine = StopwatchEngine::new();
        assert!(engine.apply(Command::Start).is_some());
        engine.tick(TEN_MS);
        assert!(engine.apply(Command::RecordLap).is_some());
        assert!(engine.apply(Command::Reset).is_none());
        assert!(engine.apply(Command::Stop).is_some());
        assert!(engine.apply(Command::Reset).is_some());
        assert_eq!(engine.snapshot().laps_ms, Vec::<u64>::new());
    }

    #[test]
    fn snapshot_event_wraps_snapshot() {
        let mut engine = StopwatchEngine::new();
        engine.start();
        run_ticks(&mut engine, 7);
        engine.record_lap();
        let view = engine.snapshot();
        assert_eq!(view.state, StopwatchState::Running);
        assert_eq!(view.elapsed_ms, 70);
        assert_eq!(view.laps_ms, vec![70]);
        match engine.snapshot_event() {
            Event::StateSnapshot { snapshot, .. } => assert_eq!(snapshot, view),
            _ => panic!("Expected StateSnapshot"),
        }
    }

    #[test]
    fn snapshot_serializes_flat() {
        let engine = StopwatchEngine::new();
        let json = serde_json::to_value(engine.snapshot_event()).unwrap();
        assert_eq!(json["type"], "StateSnapshot");
        assert_eq!(json["state"], "stopped");
        assert_eq!(json["elapsed_ms"], 0);
    }
}

//! Tick sources that drive the stopwatch engine.
//!
//! A tick carries no payload beyond "one nominal interval elapsed". The engine
//! adds the nominal interval, never a measured one, so a source that falls
//! behind makes the stopwatch run slow instead of catching up.

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior};

use super::engine::StopwatchEngine;

/// Stopwatch refresh period.
pub const STOPWATCH_PERIOD: Duration = Duration::from_millis(10);
/// Wall-clock display refresh period.
pub const CLOCK_PERIOD: Duration = Duration::from_secs(1);

/// A periodic signal generator.
#[allow(async_fn_in_trait)]
pub trait TickSource {
    /// Nominal interval between firings.
    fn period(&self) -> Duration;

    /// Wait for the next firing and return its nominal interval.
    /// `None` means the source is exhausted.
    async fn next_tick(&mut self) -> Option<Duration>;
}

/// Real-time source backed by a tokio interval.
///
/// Must be created inside a tokio runtime.
#[derive(Debug)]
pub struct IntervalTicks {
    period: Duration,
    interval: Interval,
}

impl IntervalTicks {
    pub fn new(period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        // First firing one period from now, not immediately.
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        // Missed firings are dropped, never delivered in a burst.
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { period, interval }
    }
}

impl TickSource for IntervalTicks {
    fn period(&self) -> Duration {
        self.period
    }

    async fn next_tick(&mut self) -> Option<Duration> {
        self.interval.tick().await;
        Some(self.period)
    }
}

/// Deterministic source: a fixed number of ticks, delivered without waiting.
#[derive(Debug, Clone)]
pub struct SyntheticTicks {
    period: Duration,
    remaining: usize,
}

impl SyntheticTicks {
    pub fn new(period: Duration, count: usize) -> Self {
        Self {
            period,
            remaining: count,
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl TickSource for SyntheticTicks {
    fn period(&self) -> Duration {
        self.period
    }

    async fn next_tick(&mut self) -> Option<Duration> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.period)
    }
}

/// Feed every tick of `source` into `engine` until the source is exhausted.
/// Returns the number of ticks delivered.
pub async fn drive<S: TickSource>(engine: &mut StopwatchEngine, source: &mut S) -> usize {
    let mut delivered = 0;
    while let Some(interval) = source.next_tick().await {
        engine.tick(interval);
        delivered += 1;
    }
    delivered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn synthetic_ticks_run_out() {
        let mut ticks = SyntheticTicks::new(STOPWATCH_PERIOD, 2);
        assert_eq!(ticks.next_tick().await, Some(STOPWATCH_PERIOD));
        assert_eq!(ticks.next_tick().await, Some(STOPWATCH_PERIOD));
        assert_eq!(ticks.next_tick().await, None);
        assert_eq!(ticks.remaining(), 0);
    }

    #[tokio::test]
    async fn drive_accumulates_only_while_running() {
        let mut engine = StopwatchEngine::new();
        let delivered = drive(&mut engine, &mut SyntheticTicks::new(STOPWATCH_PERIOD, 30)).await;
        assert_eq!(delivered, 30);
        assert_eq!(engine.elapsed(), Duration::ZERO);

        engine.start();
        drive(&mut engine, &mut SyntheticTicks::new(STOPWATCH_PERIOD, 100)).await;
        assert_eq!(engine.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn interval_ticks_report_nominal_period() {
        let mut ticks = IntervalTicks::new(STOPWATCH_PERIOD);
        assert_eq!(ticks.period(), STOPWATCH_PERIOD);

        let before = Instant::now();
        let mut engine = StopwatchEngine::new();
        engine.start();
        for _ in 0..5 {
            let interval = ticks.next_tick().await.unwrap();
            engine.tick(interval);
        }
        assert_eq!(engine.elapsed(), Duration::from_millis(50));
        assert!(Instant::now() - before >= Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_interval_does_not_catch_up() {
        let mut ticks = IntervalTicks::new(STOPWATCH_PERIOD);
        let mut engine = StopwatchEngine::new();
        engine.start();

        // Host stalls for 100 ms; only one late firing is delivered for it.
        tokio::time::advance(Duration::from_millis(100)).await;
        engine.tick(ticks.next_tick().await.unwrap());
        assert_eq!(engine.elapsed(), STOPWATCH_PERIOD);
    }

    #[test]
    fn zero_period_is_clamped() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let _guard = rt.enter();
        let ticks = IntervalTicks::new(Duration::ZERO);
        assert_eq!(ticks.period(), Duration::from_millis(1));
    }
}

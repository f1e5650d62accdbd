use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stopwatch::StopwatchSnapshot;

/// Every accepted stopwatch command produces an Event.
/// Ignored commands produce none, so the presentation layer can tell the two apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    StopwatchStarted {
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    StopwatchStopped {
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    LapRecorded {
        /// 1-based lap number.
        number: usize,
        elapsed_ms: u64,
        split_ms: u64,
        at: DateTime<Utc>,
    },
    StopwatchReset {
        /// Elapsed time discarded by the reset.
        cleared_elapsed_ms: u64,
        cleared_laps: usize,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        #[serde(flatten)]
        snapshot: StopwatchSnapshot,
        at: DateTime<Utc>,
    },
}

//! Display formatting for elapsed time and wall-clock time.

use std::time::Duration;

use chrono::{DateTime, Local, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// How much of the wall-clock time to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockPrecision {
    /// `HH:MM`
    Minutes,
    /// `HH:MM:SS`
    #[default]
    Seconds,
}

impl ClockPrecision {
    pub fn from_show_seconds(show_seconds: bool) -> Self {
        if show_seconds {
            Self::Seconds
        } else {
            Self::Minutes
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            Self::Minutes => "%H:%M",
            Self::Seconds => "%H:%M:%S",
        }
    }
}

/// Format elapsed time as `MM:SS.CC`.
///
/// Minutes do not wrap at 60 and widen past two digits when needed.
/// Hundredths are truncated, not rounded.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    let centis = elapsed.subsec_millis() / 10;
    format!("{minutes:02}:{seconds:02}.{centis:02}")
}

/// Format an instant as 24-hour wall-clock time.
///
/// `zone = None` renders in the host's local zone.
pub fn format_clock(instant: DateTime<Utc>, zone: Option<Tz>, precision: ClockPrecision) -> String {
    let pattern = precision.pattern();
    match zone {
        Some(tz) => instant.with_timezone(&tz).format(pattern).to_string(),
        None => instant.with_timezone(&Local).format(pattern).to_string(),
    }
}

/// Format a time of day as `HH:MM`.
pub fn format_time_of_day(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

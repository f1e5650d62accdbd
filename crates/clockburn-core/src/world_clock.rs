//! World clock: the list of timezones shown side by side.
//!
//! Entries are kept in insertion order and keyed by IANA identifier, so a zone
//! appears at most once. Nothing here is persisted; the initial list comes
//! from configuration.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::format::{format_clock, ClockPrecision};

/// Resolve an IANA identifier such as `Asia/Tokyo`.
pub fn parse_time_zone(identifier: &str) -> Result<Tz, ValidationError> {
    identifier
        .trim()
        .parse::<Tz>()
        .map_err(|_| ValidationError::UnknownTimeZone(identifier.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeZoneEntry {
    pub name: String,
    pub identifier: String,
}

impl TimeZoneEntry {
    /// Validated constructor: the name must be non-blank and the identifier
    /// must resolve.
    pub fn new(name: impl Into<String>, identifier: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        let identifier = identifier.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyField {
                field: "name".into(),
            });
        }
        parse_time_zone(&identifier)?;
        Ok(Self { name, identifier })
    }

    pub fn zone(&self) -> Result<Tz, ValidationError> {
        parse_time_zone(&self.identifier)
    }
}

/// Zones listed on a fresh world clock.
pub fn default_zones() -> Vec<TimeZoneEntry> {
    [
        ("Taipei", "Asia/Taipei"),
        ("Tokyo", "Asia/Tokyo"),
        ("London", "Europe/London"),
        ("Los Angeles", "America/Los_Angeles"),
    ]
    .into_iter()
    .map(|(name, identifier)| TimeZoneEntry {
        name: name.into(),
        identifier: identifier.into(),
    })
    .collect()
}

/// Zones offered by the "add zone" picker.
pub fn common_zones() -> Vec<TimeZoneEntry> {
    [
        ("New York", "America/New_York"),
        ("Paris", "Europe/Paris"),
        ("Sydney", "Australia/Sydney"),
        ("Singapore", "Asia/Singapore"),
        ("Hong Kong", "Asia/Hong_Kong"),
        ("Seoul", "Asia/Seoul"),
    ]
    .into_iter()
    .map(|(name, identifier)| TimeZoneEntry {
        name: name.into(),
        identifier: identifier.into(),
    })
    .collect()
}

/// State of the "add zone" form.
///
/// The confirm action stays disabled until a zone is selected and a name is
/// given; `confirm` returns `None` in that case instead of failing.
#[derive(Debug, Clone, Default)]
pub struct TimeZoneDraft {
    selected: Option<Tz>,
    custom_name: String,
}

impl TimeZoneDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick one of the presets; pre-fills the name.
    pub fn select_preset(&mut self, preset: &TimeZoneEntry) {
        self.selected = parse_time_zone(&preset.identifier).ok();
        self.custom_name = preset.name.clone();
    }

    /// Pick an arbitrary identifier. An unresolvable identifier clears the
    /// selection.
    pub fn select_identifier(&mut self, identifier: &str) {
        self.selected = parse_time_zone(identifier).ok();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.custom_name = name.into();
    }

    pub fn selected(&self) -> Option<Tz> {
        self.selected
    }

    pub fn name(&self) -> &str {
        &self.custom_name
    }

    pub fn is_confirmable(&self) -> bool {
        self.selected.is_some() && !self.custom_name.trim().is_empty()
    }

    pub fn confirm(&self) -> Option<TimeZoneEntry> {
        let tz = self.selected?;
        TimeZoneEntry::new(self.custom_name.clone(), tz.name()).ok()
    }
}

/// One rendered world-clock line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClockRow {
    pub name: String,
    pub identifier: String,
    pub time: String,
}

/// Ordered collection of timezone entries.
#[derive(Debug, Clone, Default)]
pub struct TimeZoneList {
    entries: IndexMap<String, TimeZoneEntry>,
}

impl TimeZoneList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: impl IntoIterator<Item = TimeZoneEntry>) -> Self {
        let mut list = Self::new();
        for entry in entries {
            list.add(entry);
        }
        list
    }

    /// Append an entry. An identifier already present keeps its position and
    /// takes the new name.
    pub fn add(&mut self, entry: TimeZoneEntry) {
        tracing::debug!(identifier = %entry.identifier, name = %entry.name, "timezone added");
        self.entries.insert(entry.identifier.clone(), entry);
    }

    pub fn remove(&mut self, identifier: &str) -> Option<TimeZoneEntry> {
        let removed = self.entries.shift_remove(identifier);
        if removed.is_some() {
            tracing::debug!(identifier, "timezone removed");
        }
        removed
    }

    /// Remove by display position.
    pub fn remove_at(&mut self, index: usize) -> Result<TimeZoneEntry, ValidationError> {
        let len = self.entries.len();
        self.entries
            .shift_remove_index(index)
            .map(|(_, entry)| entry)
            .ok_or(ValidationError::OutOfBounds {
                collection: "timezones".into(),
                index,
                len,
            })
    }

    pub fn get(&self, identifier: &str) -> Option<&TimeZoneEntry> {
        self.entries.get(identifier)
    }

    pub fn list(&self) -> Vec<&TimeZoneEntry> {
        self.entries.values().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render every entry at `now`. Entries whose identifier no longer
    /// resolves are skipped.
    pub fn render(&self, now: DateTime<Utc>, precision: ClockPrecision) -> Vec<ClockRow> {
        self.entries
            .values()
            .filter_map(|entry| {
                let tz = entry.zone().ok()?;
                Some(ClockRow {
                    name: entry.name.clone(),
                    identifier: entry.identifier.clone(),
                    time: format_clock(now, Some(tz), precision),
                })
            })
            .collect()
    }
}

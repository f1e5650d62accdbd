//! Alarm list editor.
//!
//! Alarms are plain records: nothing schedules or fires them.

use std::collections::HashSet;

use chrono::{NaiveTime, Timelike};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::format::format_time_of_day;

/// Parse `HH:MM` (24-hour).
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M").map_err(|_| ValidationError::InvalidTimeOfDay {
        input: input.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alarm {
    pub id: Uuid,
    /// Time of day, minute precision.
    pub time: NaiveTime,
    pub enabled: bool,
    pub label: String,
}

impl Alarm {
    /// New alarms start enabled. Seconds are dropped from `time`.
    pub fn new(time: NaiveTime, label: impl Into<String>) -> Self {
        let time = time
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(time);
        Self {
            id: Uuid::new_v4(),
            time,
            enabled: true,
            label: label.into(),
        }
    }

    pub fn time_label(&self) -> String {
        format_time_of_day(self.time)
    }
}

/// Ordered collection of alarms keyed by id.
#[derive(Debug, Clone, Default)]
pub struct AlarmList {
    alarms: IndexMap<Uuid, Alarm>,
}

impl AlarmList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new enabled alarm and return its id.
    pub fn add(&mut self, time: NaiveTime, label: impl Into<String>) -> Uuid {
        let alarm = Alarm::new(time, label);
        let id = alarm.id;
        tracing::debug!(%id, time = %alarm.time_label(), "alarm added");
        self.alarms.insert(id, alarm);
        id
    }

    pub fn remove(&mut self, id: Uuid) -> Option<Alarm> {
        self.alarms.shift_remove(&id)
    }

    /// Remove every alarm whose id is in `ids`. Returns how many were removed.
    pub fn remove_many(&mut self, ids: &HashSet<Uuid>) -> usize {
        let before = self.alarms.len();
        self.alarms.retain(|id, _| !ids.contains(id));
        let removed = before - self.alarms.len();
        tracing::debug!(removed, "alarms removed");
        removed
    }

    /// Returns false when the id is unknown.
    pub fn set_enabled(&mut self, id: Uuid, enabled: bool) -> bool {
        match self.alarms.get_mut(&id) {
            Some(alarm) => {
                alarm.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: Uuid) -> Option<&Alarm> {
        self.alarms.get(&id)
    }

    /// Id of the alarm at a display position.
    pub fn id_at(&self, index: usize) -> Option<Uuid> {
        self.alarms.get_index(index).map(|(id, _)| *id)
    }

    pub fn list(&self) -> Vec<&Alarm> {
        self.alarms.values().collect()
    }

    pub fn len(&self) -> usize {
        self.alarms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty()
    }
}

//! Derived per-day suggestion models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single recommended hour-level time window
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Slot {
    /// Display-formatted local time of day (e.g. "14:00")
    pub time: String,
    /// UV index for this hour
    pub uv_index: f64,
}

/// Recommended sunbathing slots for one calendar day.
///
/// Derived per query and never cached. A day with no recommended hours is
/// still produced, with an empty slot list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastDay {
    /// Calendar date (local)
    pub date: NaiveDate,
    /// Matched slots in chronological order
    pub slots: Vec<Slot>,
}

impl ForecastDay {
    /// Format the date for display (e.g. "Saturday, June 15")
    #[must_use]
    pub fn format_date(&self) -> String {
        self.date.format("%A, %B %d").to_string()
    }
}

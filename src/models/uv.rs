//! Hourly UV sample model

use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Serialize};

/// A single hourly UV observation from the forecast series
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UvSample {
    /// Timestamp for this observation
    pub timestamp: DateTime<Utc>,
    /// UV index (unit-less, 0-11+)
    pub uv_index: f64,
}

impl UvSample {
    /// Create a sample from epoch seconds as delivered by the forecast API
    #[must_use]
    pub fn from_epoch(epoch_seconds: i64, uv_index: f64) -> Self {
        let timestamp = DateTime::from_timestamp(epoch_seconds, 0).unwrap_or_else(Utc::now);
        Self {
            timestamp,
            uv_index,
        }
    }

    /// Day-of-month of this sample in the local timezone.
    ///
    /// Month and year are intentionally not part of the value; slot
    /// selection matches on day-of-month only.
    #[must_use]
    pub fn local_day_of_month(&self) -> u32 {
        self.timestamp.with_timezone(&Local).day()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_from_epoch() {
        // 2024-06-15 12:00:00 UTC
        let sample = UvSample::from_epoch(1_718_452_800, 4.2);
        assert_eq!(sample.timestamp, Utc.timestamp_opt(1_718_452_800, 0).unwrap());
        assert_eq!(sample.uv_index, 4.2);
    }

    #[test]
    fn test_local_day_of_month() {
        let local = Local
            .with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
            .single()
            .expect("unambiguous local time");
        let sample = UvSample {
            timestamp: local.with_timezone(&Utc),
            uv_index: 3.0,
        };
        assert_eq!(sample.local_day_of_month(), 15);
    }
}

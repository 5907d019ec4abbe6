//! Best-Slot Selection Module
//!
//! Selects recommended sunbathing windows from an hourly UV sample series.
//! The policy threshold is the "ideal band" of UV index 3 to 5 inclusive for
//! the single-day variant; the multi-day variant keeps the lower bound only.
//! That asymmetry is deliberate and mirrors the behavior this replaces.
//!
//! Day matching compares day-of-month only. Month and year are not part of
//! the comparison, so a sample from a different month sharing the same day
//! number is treated as matching. Known limitation, kept as-is.

use chrono::{Datelike, Local, Timelike};
use tracing::debug;

use crate::models::{ForecastDay, Slot, UvSample};

/// Lower bound of the ideal sunbathing band (inclusive)
pub const IDEAL_UV_MIN: f64 = 3.0;
/// Upper bound of the ideal sunbathing band (inclusive, single-day only)
pub const IDEAL_UV_MAX: f64 = 5.0;
/// Number of days covered by multi-day suggestions
pub const SUGGESTION_DAYS: usize = 3;

/// Find the best sunbathing slot for one day.
///
/// Filters the hourly series to samples whose local day-of-month equals
/// `day_of_month`, then returns the first sample (in sequence order) whose
/// UV index falls in the ideal band. `None` is the "not recommended"
/// sentinel.
#[must_use]
pub fn best_single_day_slot(hourly: &[UvSample], day_of_month: u32) -> Option<&UvSample> {
    let best = hourly
        .iter()
        .filter(|sample| sample.local_day_of_month() == day_of_month)
        .find(|sample| sample.uv_index >= IDEAL_UV_MIN && sample.uv_index <= IDEAL_UV_MAX);

    match best {
        Some(sample) => debug!(
            "Best slot for day {}: {} (UV {:.1})",
            day_of_month, sample.timestamp, sample.uv_index
        ),
        None => debug!("No ideal-band slot for day {}", day_of_month),
    }

    best
}

/// Format a single-day selection result for display.
///
/// A match renders as its local hour ("14:00"); the sentinel renders as
/// "Not recommended today".
#[must_use]
pub fn format_best_slot(slot: Option<&UvSample>) -> String {
    match slot {
        Some(sample) => format!("{}:00", sample.timestamp.with_timezone(&Local).hour()),
        None => "Not recommended today".to_string(),
    }
}

/// Derive per-day recommended slots for the next days.
///
/// Takes the first [`SUGGESTION_DAYS`] entries of the daily aggregate series
/// as the days of interest. For each day, hourly samples whose local
/// day-of-month matches and whose UV index is at least [`IDEAL_UV_MIN`]
/// become slots, in chronological order. Days with no matching hours still
/// produce a [`ForecastDay`] with an empty slot list.
#[must_use]
pub fn multi_day_slots(hourly: &[UvSample], daily: &[UvSample]) -> Vec<ForecastDay> {
    daily
        .iter()
        .take(SUGGESTION_DAYS)
        .map(|day| {
            let local_day = day.timestamp.with_timezone(&Local);
            let day_of_month = local_day.day();

            let slots: Vec<Slot> = hourly
                .iter()
                .filter(|sample| {
                    sample.local_day_of_month() == day_of_month
                        && sample.uv_index >= IDEAL_UV_MIN
                })
                .map(|sample| Slot {
                    time: sample
                        .timestamp
                        .with_timezone(&Local)
                        .format("%H:%M")
                        .to_string(),
                    uv_index: sample.uv_index,
                })
                .collect();

            debug!(
                "Day {} has {} recommended slot(s)",
                local_day.date_naive(),
                slots.len()
            );

            ForecastDay {
                date: local_day.date_naive(),
                slots,
            }
        })
        .collect()
}

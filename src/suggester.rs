//! Sunbathing Slot Suggestion Module
//!
//! Orchestrates the two sequential collaborator calls (geocode, then
//! forecast) and derives recommended slots from the results. The forecast
//! call is never issued when geocoding finds nothing.
//!
//! Overlapping queries are guarded by a request-generation counter: a
//! request that was superseded by a newer one before completing yields
//! [`SuntrackError::Superseded`] instead of silently delivering stale data.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::WeatherApiClient;
use crate::error::SuntrackError;
use crate::location_resolver::LocationResolver;
use crate::models::{ForecastDay, Location, UvSample};
use crate::slots;
use crate::Result;

/// Multi-day sunbathing suggestions for a resolved location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SunbathingSuggestions {
    /// Resolved location
    pub location: Location,
    /// One entry per suggested day, in forecast order
    pub days: Vec<ForecastDay>,
    /// When these suggestions were derived
    pub generated_at: DateTime<Utc>,
}

/// Current UV conditions plus today's best slot, used for tracker setup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Resolved location
    pub location: Location,
    /// Current UV index at the location
    pub uv_index: f64,
    /// First hourly sample of today inside the ideal band, if any
    pub best_slot: Option<UvSample>,
}

impl CurrentConditions {
    /// Display label for today's best slot ("14:00" or the sentinel text)
    #[must_use]
    pub fn best_slot_label(&self) -> String {
        slots::format_best_slot(self.best_slot.as_ref())
    }
}

/// Service deriving sunbathing suggestions from location queries
pub struct SlotSuggester {
    client: WeatherApiClient,
    generation: AtomicU64,
}

impl SlotSuggester {
    /// Create a suggester around an API client
    #[must_use]
    pub fn new(client: WeatherApiClient) -> Self {
        Self {
            client,
            generation: AtomicU64::new(0),
        }
    }

    /// Derive per-day recommended slots for the next days.
    ///
    /// Resolves the location, fetches the multi-day forecast, and selects
    /// slots per [`slots::multi_day_slots`]. Fails with the distinct
    /// not-found error when geocoding yields nothing, with a fetch error on
    /// transport or parse failures, and with [`SuntrackError::Superseded`]
    /// when a newer query started before this one finished.
    pub async fn suggest(&self, location_query: &str) -> Result<SunbathingSuggestions> {
        let generation = self.begin_request();
        info!("Fetching sunbathing suggestions for: {}", location_query);

        let result = self.fetch_suggestions(location_query).await;
        // A stale request surfaces neither its result nor its own error
        self.ensure_current(generation)?;
        result
    }

    async fn fetch_suggestions(&self, location_query: &str) -> Result<SunbathingSuggestions> {
        let location = LocationResolver::resolve(&self.client, location_query).await?;
        let forecast = self
            .client
            .multi_day_forecast(location.latitude, location.longitude)
            .await?;

        let hourly: Vec<UvSample> = forecast.hourly.iter().map(UvSample::from).collect();
        let daily: Vec<UvSample> = forecast
            .daily
            .iter()
            .map(|entry| UvSample::from_epoch(entry.dt, entry.uvi.unwrap_or_default()))
            .collect();

        let days = slots::multi_day_slots(&hourly, &daily);
        debug!("Derived {} suggestion day(s)", days.len());

        Ok(SunbathingSuggestions {
            location,
            days,
            generated_at: Utc::now(),
        })
    }

    /// Fetch current conditions and today's best slot for tracker setup.
    ///
    /// Same failure semantics as [`Self::suggest`]. The best slot is chosen
    /// against the current local day-of-month.
    pub async fn current_conditions(&self, location_query: &str) -> Result<CurrentConditions> {
        let generation = self.begin_request();
        info!("Fetching current conditions for: {}", location_query);

        let result = self.fetch_current_conditions(location_query).await;
        self.ensure_current(generation)?;
        result
    }

    async fn fetch_current_conditions(&self, location_query: &str) -> Result<CurrentConditions> {
        let location = LocationResolver::resolve(&self.client, location_query).await?;
        let forecast = self
            .client
            .single_day_forecast(location.latitude, location.longitude)
            .await?;

        let hourly: Vec<UvSample> = forecast.hourly.iter().map(UvSample::from).collect();
        let today = Local::now().day();
        let best_slot = slots::best_single_day_slot(&hourly, today).cloned();

        debug!(
            "Current UV index {:.1}, best slot: {}",
            forecast.current.uvi,
            slots::format_best_slot(best_slot.as_ref())
        );

        Ok(CurrentConditions {
            location,
            uv_index: forecast.current.uvi,
            best_slot,
        })
    }

    /// Register a new request and return its generation
    fn begin_request(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Fail with [`SuntrackError::Superseded`] if a newer request has
    /// started since `generation` was issued
    fn ensure_current(&self, generation: u64) -> Result<()> {
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Request generation {} superseded", generation);
            return Err(SuntrackError::Superseded);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeatherConfig;

    fn test_suggester() -> SlotSuggester {
        let config = WeatherConfig {
            api_key: Some("test-key".to_string()),
            ..WeatherConfig::default()
        };
        let client = WeatherApiClient::new(&config).expect("client should build");
        SlotSuggester::new(client)
    }

    #[test]
    fn test_generation_guard_detects_superseded_request() {
        let suggester = test_suggester();

        let first = suggester.begin_request();
        let second = suggester.begin_request();

        assert!(matches!(
            suggester.ensure_current(first),
            Err(SuntrackError::Superseded)
        ));
        assert!(suggester.ensure_current(second).is_ok());
    }

    #[test]
    fn test_generation_guard_passes_latest_request() {
        let suggester = test_suggester();
        let generation = suggester.begin_request();
        assert!(suggester.ensure_current(generation).is_ok());
    }
}

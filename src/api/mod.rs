//! Weather API Client Module
//!
//! Thin HTTP wrapper over the two external collaborators: the geocoding
//! endpoint and the One Call forecast endpoint (OpenWeatherMap shapes).
//! Each operation is a single round trip with no retries and no caching.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::config::WeatherConfig;
use crate::error::SuntrackError;
use crate::models::{Location, UvSample};
use crate::Result;

/// HTTP client for the geocoding and forecast collaborators.
///
/// The API key is injected at construction from configuration. Its absence
/// is not validated here; calls without a key fail downstream with the
/// provider's error status.
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    client: reqwest::Client,
    api_key: String,
    api_base_url: String,
    geo_base_url: String,
}

/// One geocoding candidate from the direct geocoding endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GeoCandidate {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: Option<String>,
}

impl From<GeoCandidate> for Location {
    fn from(candidate: GeoCandidate) -> Self {
        Location {
            latitude: candidate.lat,
            longitude: candidate.lon,
            name: candidate.name,
            country: candidate.country,
        }
    }
}

/// Current conditions entry from the One Call response
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentEntry {
    pub dt: i64,
    pub uvi: f64,
}

/// One hourly entry from the One Call response
#[derive(Debug, Clone, Deserialize)]
pub struct HourlyEntry {
    pub dt: i64,
    pub uvi: f64,
}

impl From<&HourlyEntry> for UvSample {
    fn from(entry: &HourlyEntry) -> Self {
        UvSample::from_epoch(entry.dt, entry.uvi)
    }
}

/// One daily aggregate entry from the One Call response.
///
/// Only the timestamp is consumed (to enumerate calendar dates); the daily
/// UV maximum is parsed but unused by slot selection.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyEntry {
    pub dt: i64,
    #[serde(default)]
    pub uvi: Option<f64>,
}

/// Forecast payload for the single-day use (tracker setup)
#[derive(Debug, Clone, Deserialize)]
pub struct SingleDayForecast {
    pub current: CurrentEntry,
    #[serde(default)]
    pub hourly: Vec<HourlyEntry>,
}

/// Forecast payload for the multi-day use (slot suggestions)
#[derive(Debug, Clone, Deserialize)]
pub struct MultiDayForecast {
    #[serde(default)]
    pub hourly: Vec<HourlyEntry>,
    #[serde(default)]
    pub daily: Vec<DailyEntry>,
}

impl WeatherApiClient {
    /// Build a client from weather configuration
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone().unwrap_or_default(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            geo_base_url: config.geo_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Geocode a free-text location name, limited to one candidate.
    ///
    /// An empty result list is a normal outcome; the resolver turns it into
    /// the distinct not-found error.
    pub async fn geocode(&self, query: &str) -> Result<Vec<GeoCandidate>> {
        let url = format!(
            "{}/direct?q={}&limit=1&appid={}",
            self.geo_base_url,
            urlencoding::encode(query),
            self.api_key
        );

        debug!("Geocoding request for: {}", query);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let candidates: Vec<GeoCandidate> = response
            .json()
            .await
            .map_err(|e| SuntrackError::fetch(format!("Failed to parse geocoding response: {e}")))?;

        debug!("Geocoding returned {} candidate(s)", candidates.len());
        Ok(candidates)
    }

    /// Fetch current UV conditions plus the hourly series for today.
    ///
    /// Excludes the minutely, daily, and alert sections.
    pub async fn single_day_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<SingleDayForecast> {
        let url = format!(
            "{}/onecall?lat={latitude}&lon={longitude}&exclude=minutely,daily,alerts&units=metric&appid={}",
            self.api_base_url, self.api_key
        );

        debug!(
            "Fetching single-day forecast for ({:.4}, {:.4})",
            latitude, longitude
        );
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let forecast: SingleDayForecast = response
            .json()
            .await
            .map_err(|e| SuntrackError::fetch(format!("Failed to parse forecast response: {e}")))?;

        Ok(forecast)
    }

    /// Fetch the hourly series plus the daily aggregates for the next days.
    ///
    /// Excludes the current, minutely, and alert sections.
    pub async fn multi_day_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<MultiDayForecast> {
        let url = format!(
            "{}/onecall?lat={latitude}&lon={longitude}&exclude=current,minutely,alerts&units=metric&appid={}",
            self.api_base_url, self.api_key
        );

        debug!(
            "Fetching multi-day forecast for ({:.4}, {:.4})",
            latitude, longitude
        );
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let forecast: MultiDayForecast = response
            .json()
            .await
            .map_err(|e| SuntrackError::fetch(format!("Failed to parse forecast response: {e}")))?;

        Ok(forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_candidate_into_location() {
        let candidate = GeoCandidate {
            name: "Nice".to_string(),
            lat: 43.7102,
            lon: 7.262,
            country: Some("FR".to_string()),
        };

        let location = Location::from(candidate);
        assert_eq!(location.name, "Nice");
        assert_eq!(location.latitude, 43.7102);
        assert_eq!(location.country.as_deref(), Some("FR"));
    }

    #[test]
    fn test_parse_single_day_payload() {
        let payload = r#"{
            "current": { "dt": 1718445600, "uvi": 4.5 },
            "hourly": [
                { "dt": 1718445600, "uvi": 4.5 },
                { "dt": 1718449200, "uvi": 5.2 }
            ]
        }"#;

        let forecast: SingleDayForecast =
            serde_json::from_str(payload).expect("payload should parse");
        assert_eq!(forecast.current.uvi, 4.5);
        assert_eq!(forecast.hourly.len(), 2);
    }

    #[test]
    fn test_parse_multi_day_payload_tolerates_missing_daily_uvi() {
        let payload = r#"{
            "hourly": [ { "dt": 1718445600, "uvi": 3.1 } ],
            "daily": [ { "dt": 1718445600 }, { "dt": 1718532000, "uvi": 6.0 } ]
        }"#;

        let forecast: MultiDayForecast =
            serde_json::from_str(payload).expect("payload should parse");
        assert_eq!(forecast.daily.len(), 2);
        assert!(forecast.daily[0].uvi.is_none());
        assert_eq!(forecast.daily[1].uvi, Some(6.0));
    }

    #[test]
    fn test_hourly_entry_into_sample() {
        let entry = HourlyEntry {
            dt: 1_718_452_800,
            uvi: 3.7,
        };
        let sample = UvSample::from(&entry);
        assert_eq!(sample.uv_index, 3.7);
    }
}

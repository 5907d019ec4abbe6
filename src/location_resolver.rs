//! Location Resolution Module
//!
//! Resolves a free-text location query into a structured [`Location`] via
//! the geocoding collaborator. An empty candidate list is a normal, expected
//! outcome surfaced as the distinct not-found error, never as a generic
//! fetch failure.

use tracing::debug;

use crate::api::WeatherApiClient;
use crate::error::SuntrackError;
use crate::models::Location;
use crate::Result;

/// Service for resolving location queries
pub struct LocationResolver;

impl LocationResolver {
    /// Resolve a free-text location query into a structured location.
    ///
    /// The first (best) geocoding candidate is used. Empty or
    /// whitespace-only queries are rejected before any network call.
    pub async fn resolve(client: &WeatherApiClient, query: &str) -> Result<Location> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SuntrackError::invalid_input("location cannot be empty"));
        }

        debug!("Resolving location query: {}", query);
        let candidates = client.geocode(query).await?;

        let Some(candidate) = candidates.into_iter().next() else {
            return Err(SuntrackError::LocationNotFound {
                query: query.to_string(),
            });
        };

        let location = Location::from(candidate);
        debug!(
            "Resolved location: {} at ({:.4}, {:.4})",
            location.name, location.latitude, location.longitude
        );

        Ok(location)
    }
}

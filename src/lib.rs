//! Suntrack - UV exposure tracking and sunbathing time-slot recommendations
//!
//! This library provides the core functionality for tracking sunbathing
//! sessions (elapsed time and UV-proportional tan progress) and for deriving
//! recommended sunbathing slots from third-party weather data.

pub mod api;
pub mod config;
pub mod error;
pub mod exposure;
pub mod location_resolver;
pub mod models;
pub mod slots;
pub mod suggester;

// Re-export core types for public API
pub use api::WeatherApiClient;
pub use config::SuntrackConfig;
pub use error::SuntrackError;
pub use exposure::{ExposureSession, ExposureTimer};
pub use location_resolver::LocationResolver;
pub use models::{ForecastDay, Location, Slot, UvSample};
pub use suggester::{CurrentConditions, SlotSuggester, SunbathingSuggestions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SuntrackError>;

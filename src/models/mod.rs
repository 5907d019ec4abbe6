//! Data models for locations, UV samples, and derived forecasts

pub mod forecast;
pub mod location;
pub mod uv;

pub use forecast::{ForecastDay, Slot};
pub use location::Location;
pub use uv::UvSample;

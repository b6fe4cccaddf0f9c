//! Core library for the city weather and time tools.
//!
//! This crate defines:
//! - The `get_weather` and `get_current_time` tools and a registry to call them by name
//! - Geocoding and forecast providers (Open-Meteo) behind async traits
//! - Shared domain models (geocode results, weather snapshots, tool results)
//! - Configuration of the upstream endpoints
//!
//! It is used by `citytools-cli`, but can also be embedded in any agent harness
//! that calls named tools with a `city` argument.

pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod provider;
pub mod tools;

pub use config::Config;
pub use error::ToolError;
pub use model::{Coordinates, CurrentWeather, GeocodeResult, ToolResult};
pub use provider::{Geocoder, WeatherProvider};
pub use tools::{ToolId, Toolbox, get_current_time, get_weather, tool_descriptions};

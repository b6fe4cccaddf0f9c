use crate::{
    Config,
    error::ToolError,
    model::{Coordinates, CurrentWeather, GeocodeResult},
    provider::openmeteo::{OpenMeteoForecast, OpenMeteoGeocoder},
};
use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;

pub mod openmeteo;

const USER_AGENT: &str = concat!("citytools/", env!("CARGO_PKG_VERSION"));

/// Resolves free-text place names.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// First-ranked match for `city`, or `None` when the service has no candidate.
    async fn lookup(&self, city: &str) -> Result<Option<GeocodeResult>, ToolError>;
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions at `at`, or `None` when the forecast carries no snapshot.
    async fn current_weather(&self, at: Coordinates) -> Result<Option<CurrentWeather>, ToolError>;
}

/// HTTP client shared by both providers.
pub fn http_client(config: &Config) -> Result<Client, ToolError> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(ToolError::Client)
}

/// Construct the geocoder configured in `config`.
pub fn geocoder_from_config(config: &Config, http: Client) -> Box<dyn Geocoder> {
    Box::new(OpenMeteoGeocoder::new(config.geocoding_url.clone(), http))
}

/// Construct the weather provider configured in `config`.
pub fn weather_provider_from_config(config: &Config, http: Client) -> Box<dyn WeatherProvider> {
    Box::new(OpenMeteoForecast::new(config.forecast_url.clone(), http))
}

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::{
    error::ToolError,
    model::{Coordinates, CurrentWeather, GeocodeResult},
};

use super::{Geocoder, WeatherProvider};

const GEOCODING_SERVICE: &str = "Open-Meteo geocoding";
const FORECAST_SERVICE: &str = "Open-Meteo forecast";

#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    base_url: String,
    http: Client,
}

impl OpenMeteoGeocoder {
    pub fn new(base_url: String, http: Client) -> Self {
        Self { base_url, http }
    }
}

#[derive(Debug, Clone)]
pub struct OpenMeteoForecast {
    base_url: String,
    http: Client,
}

impl OpenMeteoForecast {
    pub fn new(base_url: String, http: Client) -> Self {
        Self { base_url, http }
    }
}

#[derive(Debug, Deserialize)]
struct OmPlace {
    latitude: Option<f64>,
    longitude: Option<f64>,
    name: Option<String>,
    timezone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmSearchResponse {
    #[serde(default)]
    results: Option<Vec<OmPlace>>,
}

impl OmSearchResponse {
    fn into_first_match(self) -> Option<GeocodeResult> {
        let place = self.results?.into_iter().next()?;

        let coordinates = match (place.latitude, place.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates { latitude, longitude }),
            _ => None,
        };

        Some(GeocodeResult {
            coordinates,
            timezone: place.timezone.filter(|tz| !tz.is_empty()),
            name: place.name,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    temperature: f64,
    windspeed: f64,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current_weather: Option<OmCurrentWeather>,
}

/// Body Open-Meteo sends alongside a 4xx/5xx.
#[derive(Debug, Deserialize)]
struct OmErrorBody {
    reason: Option<String>,
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    async fn lookup(&self, city: &str) -> Result<Option<GeocodeResult>, ToolError> {
        debug!(city, url = %self.base_url, "Geocoding city");

        let request = self
            .http
            .get(&self.base_url)
            .query(&[("name", city), ("count", "1")]);
        let parsed: OmSearchResponse = fetch_json(GEOCODING_SERVICE, request).await?;

        let found = parsed.into_first_match();
        if let Some(place) = &found {
            debug!(
                city,
                name = place.name.as_deref().unwrap_or("?"),
                coordinates = ?place.coordinates,
                timezone = place.timezone.as_deref().unwrap_or("?"),
                "Geocoded city"
            );
        }
        Ok(found)
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoForecast {
    async fn current_weather(
        &self,
        at: Coordinates,
    ) -> Result<Option<CurrentWeather>, ToolError> {
        debug!(latitude = at.latitude, longitude = at.longitude, "Fetching current weather");

        let request = self.http.get(&self.base_url).query(&[
            ("latitude", at.latitude.to_string()),
            ("longitude", at.longitude.to_string()),
            ("current_weather", "true".to_string()),
        ]);
        let parsed: OmForecastResponse = fetch_json(FORECAST_SERVICE, request).await?;

        Ok(parsed.current_weather.map(|current| CurrentWeather {
            temperature_c: current.temperature,
            wind_speed_kph: current.windspeed,
        }))
    }
}

async fn fetch_json<T: DeserializeOwned>(
    service: &'static str,
    request: RequestBuilder,
) -> Result<T, ToolError> {
    let res = request
        .send()
        .await
        .map_err(|source| ToolError::Request { service, source })?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|source| ToolError::Request { service, source })?;

    if status.is_success() {
        return serde_json::from_str(&body)
            .map_err(|source| ToolError::Decode { service, source });
    }

    // Open-Meteo rejects bad requests with `{"error": true, "reason": ...}`. Read as `T`, that
    // body lacks the payload field, and callers report the missing data.
    match serde_json::from_str::<T>(&body) {
        Ok(parsed) => {
            warn!(
                service,
                %status,
                reason = %failure_reason(&body),
                "Upstream returned error status"
            );
            Ok(parsed)
        }
        Err(_) => Err(ToolError::Status { service, status, reason: failure_reason(&body) }),
    }
}

fn failure_reason(body: &str) -> String {
    serde_json::from_str::<OmErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.reason)
        .unwrap_or_else(|| truncate_body(body))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

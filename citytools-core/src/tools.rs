//! The two agent-facing tools and a registry for dispatching them by name.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde_json::{Value, json};
use tracing::info;

use crate::{
    Config,
    error::ToolError,
    format::{format_local_time, format_measurement, title_case},
    model::ToolResult,
    provider::{
        Geocoder, WeatherProvider, geocoder_from_config, http_client,
        weather_provider_from_config,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolId {
    GetWeather,
    GetCurrentTime,
}

impl ToolId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolId::GetWeather => "get_weather",
            ToolId::GetCurrentTime => "get_current_time",
        }
    }

    pub const fn all() -> &'static [ToolId] {
        &[ToolId::GetWeather, ToolId::GetCurrentTime]
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolId::GetWeather => {
                "Retrieves the current weather report (temperature and wind speed) for a city."
            }
            ToolId::GetCurrentTime => "Returns the current local time in a city.",
        }
    }
}

impl std::fmt::Display for ToolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ToolId {
    type Error = ToolError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "get_weather" => Ok(ToolId::GetWeather),
            "get_current_time" => Ok(ToolId::GetCurrentTime),
            _ => Err(ToolError::UnknownTool(value.to_string())),
        }
    }
}

/// JSON descriptions of every tool, for registering them with an agent runtime.
pub fn tool_descriptions() -> Value {
    let tools: Vec<Value> = ToolId::all()
        .iter()
        .map(|id| {
            json!({
                "name": id.as_str(),
                "description": id.description(),
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "city": {
                            "type": "string",
                            "description": "The name of the city, e.g. 'Paris' or 'New York'."
                        }
                    },
                    "required": ["city"]
                }
            })
        })
        .collect();

    Value::Array(tools)
}

/// Current weather for `city`. Never fails: problems come back as `ToolResult::Error`.
pub async fn get_weather(
    geocoder: &dyn Geocoder,
    weather: &dyn WeatherProvider,
    city: &str,
) -> ToolResult {
    weather_report(geocoder, weather, city).await.into()
}

/// Current local time in `city`. Never fails: problems come back as `ToolResult::Error`.
pub async fn get_current_time(geocoder: &dyn Geocoder, city: &str) -> ToolResult {
    time_report_now(geocoder, city).await.into()
}

async fn weather_report(
    geocoder: &dyn Geocoder,
    weather: &dyn WeatherProvider,
    city: &str,
) -> Result<String, ToolError> {
    let location = geocoder
        .lookup(city)
        .await?
        .ok_or_else(|| ToolError::LocationNotFound { city: city.to_string() })?;

    let coordinates = location
        .coordinates
        .ok_or_else(|| ToolError::MissingCoordinates { city: city.to_string() })?;

    let current = weather
        .current_weather(coordinates)
        .await?
        .ok_or_else(|| ToolError::WeatherUnavailable { city: city.to_string() })?;

    info!(city, temperature_c = current.temperature_c, "Weather report ready");

    Ok(format!(
        "The weather in {} is {}°C with wind speed {} km/h.",
        title_case(city),
        format_measurement(current.temperature_c),
        format_measurement(current.wind_speed_kph),
    ))
}

async fn time_report_now(geocoder: &dyn Geocoder, city: &str) -> Result<String, ToolError> {
    let location = geocoder
        .lookup(city)
        .await?
        .ok_or_else(|| ToolError::LocationNotFound { city: city.to_string() })?;

    let timezone = location
        .timezone
        .ok_or_else(|| ToolError::TimezoneUnavailable { city: city.to_string() })?;

    let report = time_report(city, &timezone, Utc::now())?;
    info!(city, timezone = %timezone, "Time report ready");
    Ok(report)
}

/// Render `now` as wall-clock time in the IANA zone `timezone`.
pub fn time_report(city: &str, timezone: &str, now: DateTime<Utc>) -> Result<String, ToolError> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| ToolError::UnknownTimezone(timezone.to_string()))?;

    Ok(format!(
        "The current time in {} is {}",
        title_case(city),
        format_local_time(&now.with_timezone(&tz)),
    ))
}

/// Both tools wired to one geocoder and one weather provider.
#[derive(Debug)]
pub struct Toolbox {
    geocoder: Box<dyn Geocoder>,
    weather: Box<dyn WeatherProvider>,
}

impl Toolbox {
    pub fn new(geocoder: Box<dyn Geocoder>, weather: Box<dyn WeatherProvider>) -> Self {
        Self { geocoder, weather }
    }

    /// Build Open-Meteo backed tools from `config`.
    pub fn from_config(config: &Config) -> Result<Self, ToolError> {
        let http = http_client(config)?;
        Ok(Self::new(
            geocoder_from_config(config, http.clone()),
            weather_provider_from_config(config, http),
        ))
    }

    pub async fn get_weather(&self, city: &str) -> ToolResult {
        get_weather(self.geocoder.as_ref(), self.weather.as_ref(), city).await
    }

    pub async fn get_current_time(&self, city: &str) -> ToolResult {
        get_current_time(self.geocoder.as_ref(), city).await
    }

    pub async fn run(&self, tool: ToolId, city: &str) -> ToolResult {
        match tool {
            ToolId::GetWeather => self.get_weather(city).await,
            ToolId::GetCurrentTime => self.get_current_time(city).await,
        }
    }

    /// Dispatch a harness call: `name` is a tool name, `args` a JSON object with a `city` string.
    pub async fn call(&self, name: &str, args: &Value) -> ToolResult {
        let parsed = ToolId::try_from(name).and_then(|tool| Ok((tool, city_argument(args)?)));

        match parsed {
            Ok((tool, city)) => self.run(tool, city).await,
            Err(err) => ToolResult::from(Err::<String, _>(err)),
        }
    }
}

fn city_argument(args: &Value) -> Result<&str, ToolError> {
    match args.get("city") {
        Some(Value::String(city)) => Ok(city),
        Some(other) => Err(ToolError::InvalidArguments(format!(
            "'city' must be a string, got {other}"
        ))),
        None => Err(ToolError::InvalidArguments("missing required argument 'city'".to_string())),
    }
}

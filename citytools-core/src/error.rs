use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can stop a tool from producing a report.
///
/// The first three variants carry the user-facing messages the agent harness
/// relays verbatim; the rest are generic failures described by their source.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Could not find location for '{city}'.")]
    LocationNotFound { city: String },

    #[error("Weather data not available for '{city}'.")]
    WeatherUnavailable { city: String },

    #[error("Timezone information not available for '{city}'.")]
    TimezoneUnavailable { city: String },

    #[error("Geocoding result for '{city}' has no coordinates.")]
    MissingCoordinates { city: String },

    #[error("No time zone found with key {0}")]
    UnknownTimezone(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to send request to {service}: {source}")]
    Request {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} request failed with status {status}: {reason}")]
    Status {
        service: &'static str,
        status: StatusCode,
        reason: String,
    },

    #[error("Failed to parse {service} JSON: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown tool '{0}'. Available tools: get_weather, get_current_time.")]
    UnknownTool(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl ToolError {
    /// True for the three outcomes the tools anticipate (nothing found, or a
    /// field the upstream service left out), as opposed to transport trouble.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            ToolError::LocationNotFound { .. }
                | ToolError::WeatherUnavailable { .. }
                | ToolError::TimezoneUnavailable { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_messages_quote_raw_city() {
        let err = ToolError::LocationNotFound { city: "nowhereville".into() };
        assert_eq!(err.to_string(), "Could not find location for 'nowhereville'.");

        let err = ToolError::WeatherUnavailable { city: "paris".into() };
        assert_eq!(err.to_string(), "Weather data not available for 'paris'.");

        let err = ToolError::TimezoneUnavailable { city: "Null Island".into() };
        assert_eq!(err.to_string(), "Timezone information not available for 'Null Island'.");
    }

    #[test]
    fn status_error_mentions_service_and_reason() {
        let err = ToolError::Status {
            service: "Open-Meteo forecast",
            status: StatusCode::BAD_REQUEST,
            reason: "Latitude must be in range of -90 to 90°.".into(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Open-Meteo forecast request failed with status 400"));
        assert!(msg.contains("Latitude must be in range"));
        assert!(!err.is_expected());
    }

    #[test]
    fn expected_errors_are_classified() {
        assert!(ToolError::LocationNotFound { city: "x".into() }.is_expected());
        assert!(!ToolError::UnknownTimezone("Mars/Olympus".into()).is_expected());
        assert!(!ToolError::MissingCoordinates { city: "x".into() }.is_expected());
    }
}

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ToolError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Best geocoding match for a city name.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    /// Absent when the geocoder omits latitude or longitude; the time tool does not need them.
    pub coordinates: Option<Coordinates>,
    /// IANA zone name, e.g. "Europe/Paris".
    pub timezone: Option<String>,
    /// Canonical place name as the geocoder spells it; only used for logging.
    pub name: Option<String>,
}

/// Snapshot of the "current weather" block of a forecast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentWeather {
    pub temperature_c: f64,
    pub wind_speed_kph: f64,
}

/// Outcome handed back to the agent harness.
///
/// Serializes as `{"status": "success", "report": ...}` or
/// `{"status": "error", "error_message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ToolResult {
    Success {
        report: String,
    },
    Error {
        #[serde(rename = "error_message")]
        message: String,
    },
}

impl ToolResult {
    pub fn success(report: impl Into<String>) -> Self {
        ToolResult::Success { report: report.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ToolResult::Error { message: message.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolResult::Success { .. })
    }
}

impl From<Result<String, ToolError>> for ToolResult {
    fn from(outcome: Result<String, ToolError>) -> Self {
        match outcome {
            Ok(report) => ToolResult::Success { report },
            Err(err) => {
                if err.is_expected() {
                    info!("Tool returned error result: {err}");
                } else {
                    warn!("Tool failed: {err}");
                }
                ToolResult::Error { message: err.to_string() }
            }
        }
    }
}

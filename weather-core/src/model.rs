use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current conditions for one city, exactly as the weather API reports them.
///
/// Units are whatever upstream sends (°C, %, hPa, m/s); nothing is converted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub temperature: f64,
    pub humidity: u8,
    pub pressure: u32,
    pub description: String,
    pub wind_speed: f64,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureCode {
    CityNotFound,
    ApiError,
    InternalError,
}

impl FailureCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureCode::CityNotFound => "CITY_NOT_FOUND",
            FailureCode::ApiError => "API_ERROR",
            FailureCode::InternalError => "INTERNAL_ERROR",
        }
    }

    pub const fn all() -> &'static [FailureCode] {
        &[FailureCode::CityNotFound, FailureCode::ApiError, FailureCode::InternalError]
    }
}

impl std::fmt::Display for FailureCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch weather data";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// A lookup that did not produce a report, normalized for display.
///
/// The message is never empty; blank messages are replaced on construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LookupFailure {
    message: String,
    code: Option<FailureCode>,
}

impl LookupFailure {
    pub fn new(message: impl Into<String>, code: Option<FailureCode>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            UNEXPECTED_ERROR_MESSAGE.to_string()
        } else {
            message
        };

        Self { message, code }
    }

    pub fn city_not_found(city: &str) -> Self {
        Self::new(format!("City '{city}' not found"), Some(FailureCode::CityNotFound))
    }

    /// Upstream rejected the request; `detail` is its own explanation, if any.
    pub fn api_error(detail: Option<String>) -> Self {
        let message = detail
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| FETCH_FAILED_MESSAGE.to_string());
        Self::new(message, Some(FailureCode::ApiError))
    }

    pub fn internal() -> Self {
        Self::new(UNEXPECTED_ERROR_MESSAGE, Some(FailureCode::InternalError))
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> Option<FailureCode> {
        self.code
    }
}

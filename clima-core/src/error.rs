use thiserror::Error;

use crate::location::LocationError;

/// Everything that can end a fetch. Each category maps to exactly one short
/// user-facing message; detail stays in the variant for logs.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("location permission not granted")]
    PermissionDenied,

    #[error("last known location is unavailable")]
    LocationUnavailable,

    /// Timeouts, non-2xx statuses and malformed payloads all land here.
    #[error("weather request failed: {0}")]
    Network(String),

    #[error("unexpected error: {0}")]
    Unknown(String),
}

impl FetchError {
    /// Short message shown on the watch face in place of the weather.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::PermissionDenied => "permission not granted",
            FetchError::LocationUnavailable => "location unavailable",
            FetchError::Network(_) => "fetch error",
            FetchError::Unknown(_) => "unexpected error",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Network(format!("malformed payload: {err}"))
    }
}

impl From<LocationError> for FetchError {
    fn from(err: LocationError) -> Self {
        match err {
            LocationError::PermissionDenied => FetchError::PermissionDenied,
            // A failing platform service reads the same as "no fix recorded".
            LocationError::Service(_) => FetchError::LocationUnavailable,
        }
    }
}

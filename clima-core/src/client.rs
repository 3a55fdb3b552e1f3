use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::{
    error::FetchError,
    model::{Coordinate, CurrentSnapshot, ForecastSnapshot},
};

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Typed client for the two WeatherAPI.com endpoints the app consumes.
///
/// Explicitly constructed and handed to the orchestrator rather than living
/// in a global singleton, so tests can point it at a local server. One call
/// per screen visit: no retry, no cache, no rate limiting.
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the client at a different host. Tests use this with a mock
    /// server; production code sticks to [`DEFAULT_BASE_URL`].
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self { api_key: api_key.into(), base_url: base_url.into(), http })
    }

    /// GET `current.json` for the given coordinate.
    pub async fn current(&self, coordinate: Coordinate) -> Result<CurrentSnapshot, FetchError> {
        let url = format!("{}/current.json", self.base_url);
        let query = coordinate.as_query();
        debug!(%query, "requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", query.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Network(format!(
                "current request failed with status {status}: {}",
                truncate_body(&body),
            )));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// GET `forecast.json` for the given coordinate and day count.
    pub async fn forecast(
        &self,
        coordinate: Coordinate,
        days: u8,
    ) -> Result<ForecastSnapshot, FetchError> {
        let url = format!("{}/forecast.json", self.base_url);
        let query = coordinate.as_query();
        let days = days.to_string();
        debug!(%query, %days, "requesting forecast");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query.as_str()),
                ("days", days.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Network(format!(
                "forecast request failed with status {status}: {}",
                truncate_body(&body),
            )));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    // Upstream error pages may be non-ASCII; cut on a char boundary.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

use serde::{Deserialize, Serialize};

/// Device position, produced once per fetch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Query form expected by WeatherAPI: `"lat,lon"`.
    pub fn as_query(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// Unit the presentation layer renders temperatures in. Storage is always
/// Celsius; conversion happens at display time only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn suffix(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

// Raw WeatherAPI payload shapes. Every field is optional because the upstream
// may omit any of them; unknown extra fields are ignored on deserialization.
// Defaults for missing values are applied in `normalize`, nowhere else.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiLocation {
    pub name: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiCondition {
    pub text: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiCurrent {
    pub temp_c: Option<f64>,
    pub humidity: Option<i64>,
    pub condition: Option<ApiCondition>,
}

/// Deserialized `current.json` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentSnapshot {
    pub location: Option<ApiLocation>,
    pub current: Option<ApiCurrent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiDay {
    pub maxtemp_c: Option<f64>,
    pub mintemp_c: Option<f64>,
    pub avghumidity: Option<f64>,
    pub condition: Option<ApiCondition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiForecastDay {
    pub date: Option<String>,
    pub day: Option<ApiDay>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiForecast {
    #[serde(default)]
    pub forecastday: Vec<ApiForecastDay>,
}

/// Deserialized `forecast.json` response. Day entries stay in the order the
/// API returned them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastSnapshot {
    pub location: Option<ApiLocation>,
    pub forecast: Option<ApiForecast>,
}

/// Normalized current weather, as shown on the today screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherToday {
    pub location_label: String,
    pub temperature_c: f64,
    pub condition: String,
    pub humidity_pct: i32,
    pub feels_like_c: f64,
    pub wind: String,
}

/// One row of the forecast list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherDay {
    pub weekday: String,
    pub condition: String,
    pub max_temp_c: i32,
    pub humidity_pct: i32,
}

/// Normalized forecast: the header label plus the ordered day rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherForecast {
    pub location_label: String,
    pub days: Vec<WeatherDay>,
}

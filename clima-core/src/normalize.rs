//! Pure mapping from raw API snapshots to display-ready models.
//!
//! All defaulting for missing upstream fields lives here so it is applied
//! (and tested) in exactly one place. Nothing in this module performs I/O.

use chrono::{NaiveDate, Utc};

use crate::model::{
    CurrentSnapshot, ForecastSnapshot, TemperatureUnit, WeatherDay, WeatherForecast, WeatherToday,
};

/// Condition label when the upstream omits it.
pub const UNKNOWN_CONDITION: &str = "Desconocido";
/// Location label when the whole location object is absent.
pub const UNKNOWN_LOCATION: &str = "Ubicación desconocida";
/// The upstream wind field is not consumed; the watch face shows this fixed
/// value instead.
pub const WIND_PLACEHOLDER: &str = "12 km/h";

/// Feels-like is approximated as a flat offset over the air temperature, not
/// read from the API's `feelslike_c` field.
const FEELS_LIKE_OFFSET_C: f64 = 2.0;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 1.8 + 32.0
}

/// Temperature as the presentation layer prints it: converted if requested,
/// then truncated toward zero (89.6 °F renders as 89).
pub fn display_temperature(celsius: f64, unit: TemperatureUnit) -> i32 {
    match unit {
        TemperatureUnit::Celsius => celsius as i32,
        TemperatureUnit::Fahrenheit => celsius_to_fahrenheit(celsius) as i32,
    }
}

/// Map a `current.json` snapshot to the today-screen model.
pub fn display_today(snapshot: &CurrentSnapshot) -> WeatherToday {
    let location_label = snapshot
        .location
        .as_ref()
        .map(|loc| {
            let name = loc.name.as_deref().unwrap_or(UNKNOWN_CONDITION);
            let region = loc.region.as_deref().unwrap_or("");
            format!("{name}, {region}").trim().trim_end_matches(',').to_string()
        })
        .unwrap_or_else(|| UNKNOWN_LOCATION.to_string());

    let current = snapshot.current.as_ref();
    let temperature_c = current.and_then(|c| c.temp_c).unwrap_or(0.0);
    let humidity_pct = current.and_then(|c| c.humidity).unwrap_or(0) as i32;
    let condition = current
        .and_then(|c| c.condition.as_ref())
        .and_then(|c| c.text.clone())
        .unwrap_or_else(|| UNKNOWN_CONDITION.to_string());

    WeatherToday {
        location_label,
        temperature_c,
        condition,
        humidity_pct,
        feels_like_c: temperature_c + FEELS_LIKE_OFFSET_C,
        wind: WIND_PLACEHOLDER.to_string(),
    }
}

/// Map a `forecast.json` snapshot to the forecast screen model. Day entries
/// keep the chronological order the API returned; the header label is the
/// location name alone, unlike the today screen's name-and-region label.
pub fn display_forecast(snapshot: &ForecastSnapshot) -> WeatherForecast {
    let location_label = snapshot
        .location
        .as_ref()
        .and_then(|loc| loc.name.clone())
        .unwrap_or_else(|| UNKNOWN_LOCATION.to_string());

    let entries = snapshot
        .forecast
        .as_ref()
        .map(|f| f.forecastday.as_slice())
        .unwrap_or_default();

    let days = entries
        .iter()
        .map(|entry| {
            // An unparseable date falls back to today's weekday instead of
            // failing the whole mapping.
            let date = entry
                .date
                .as_deref()
                .and_then(|raw| NaiveDate::parse_from_str(raw, DATE_FORMAT).ok())
                .unwrap_or_else(|| Utc::now().date_naive());

            let day = entry.day.as_ref();
            WeatherDay {
                weekday: date.format("%A").to_string(),
                condition: day
                    .and_then(|d| d.condition.as_ref())
                    .and_then(|c| c.text.clone())
                    .unwrap_or_else(|| UNKNOWN_CONDITION.to_string()),
                max_temp_c: day.and_then(|d| d.maxtemp_c).unwrap_or(0.0) as i32,
                humidity_pct: day.and_then(|d| d.avghumidity).unwrap_or(0.0) as i32,
            }
        })
        .collect();

    WeatherForecast { location_label, days }
}

/// Icon category shown next to a condition. The glyph/tint a renderer picks
/// for each category is its own business; the classification is fixed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherIcon {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rainy,
    Stormy,
}

impl WeatherIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            WeatherIcon::Sunny => "sun",
            WeatherIcon::PartlyCloudy => "cloud-sun",
            WeatherIcon::Cloudy => "cloud",
            WeatherIcon::Rainy => "umbrella",
            WeatherIcon::Stormy => "bolt",
        }
    }
}

/// Icon tint as 0xRRGGBB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconColor(pub u32);

impl IconColor {
    pub fn rgb(&self) -> u32 {
        self.0
    }
}

const HEAT_ORANGE: IconColor = IconColor(0xFF8F00);
const AMBER: IconColor = IconColor(0xFFA726);
const SOFT_AMBER: IconColor = IconColor(0xFFB74D);
const RAIN_BLUE: IconColor = IconColor(0x42A5F5);
const COLD_BLUE: IconColor = IconColor(0x1976D2);
const STORM_PURPLE: IconColor = IconColor(0x7E57C2);
const GRAY: IconColor = IconColor(0x90A4AE);
const BLUE_GRAY: IconColor = IconColor(0x78909C);

const HOT_THRESHOLD_C: f64 = 30.0;
const COLD_THRESHOLD_C: f64 = 15.0;

const SUNNY_WORDS: &[&str] = &["sun", "clear", "soleado"];
const RAINY_WORDS: &[&str] = &["rain", "lluvia"];
const STORMY_WORDS: &[&str] = &["storm", "thunder", "tormenta"];
const CLOUDY_WORDS: &[&str] = &["cloud", "nublado", "overcast"];
const PARTLY_WORDS: &[&str] = &["partly", "parcialmente"];

fn matches_any(condition: &str, keywords: &[&str]) -> bool {
    let lower = condition.to_lowercase();
    keywords.iter().any(|word| lower.contains(word))
}

/// Classify a condition text into an icon category. Within each temperature
/// band the first matching keyword table wins; unmatched text gets the band's
/// bias (sun when hot, clouds otherwise).
pub fn icon_for(condition: &str, temperature_c: f64) -> WeatherIcon {
    if temperature_c >= HOT_THRESHOLD_C {
        if matches_any(condition, SUNNY_WORDS) {
            WeatherIcon::Sunny
        } else if matches_any(condition, RAINY_WORDS) {
            WeatherIcon::Rainy
        } else if matches_any(condition, STORMY_WORDS) {
            WeatherIcon::Stormy
        } else {
            WeatherIcon::Sunny
        }
    } else if temperature_c <= COLD_THRESHOLD_C {
        if matches_any(condition, RAINY_WORDS) {
            WeatherIcon::Rainy
        } else if matches_any(condition, STORMY_WORDS) {
            WeatherIcon::Stormy
        } else if matches_any(condition, CLOUDY_WORDS) {
            WeatherIcon::Cloudy
        } else if matches_any(condition, SUNNY_WORDS) {
            WeatherIcon::Sunny
        } else {
            WeatherIcon::Cloudy
        }
    } else if matches_any(condition, SUNNY_WORDS) {
        WeatherIcon::Sunny
    } else if matches_any(condition, RAINY_WORDS) {
        WeatherIcon::Rainy
    } else if matches_any(condition, STORMY_WORDS) {
        WeatherIcon::Stormy
    } else if matches_any(condition, CLOUDY_WORDS) {
        WeatherIcon::Cloudy
    } else if matches_any(condition, PARTLY_WORDS) {
        WeatherIcon::PartlyCloudy
    } else {
        WeatherIcon::Cloudy
    }
}

/// Tint for the same (condition, temperature) input. Hot bands skew warm
/// regardless of cloud cover; cold bands skew toward blue-gray.
pub fn color_for(condition: &str, temperature_c: f64) -> IconColor {
    if temperature_c >= HOT_THRESHOLD_C {
        if matches_any(condition, RAINY_WORDS) {
            RAIN_BLUE
        } else if matches_any(condition, STORMY_WORDS) {
            STORM_PURPLE
        } else {
            HEAT_ORANGE
        }
    } else if temperature_c <= COLD_THRESHOLD_C {
        if matches_any(condition, SUNNY_WORDS) {
            SOFT_AMBER
        } else if matches_any(condition, RAINY_WORDS) {
            COLD_BLUE
        } else if matches_any(condition, STORMY_WORDS) {
            STORM_PURPLE
        } else {
            BLUE_GRAY
        }
    } else if matches_any(condition, SUNNY_WORDS) {
        AMBER
    } else if matches_any(condition, RAINY_WORDS) {
        RAIN_BLUE
    } else if matches_any(condition, STORMY_WORDS) {
        STORM_PURPLE
    } else if matches_any(condition, CLOUDY_WORDS) {
        GRAY
    } else if matches_any(condition, PARTLY_WORDS) {
        SOFT_AMBER
    } else {
        GRAY
    }
}

impl WeatherToday {
    pub fn icon(&self) -> WeatherIcon {
        icon_for(&self.condition, self.temperature_c)
    }

    pub fn color(&self) -> IconColor {
        color_for(&self.condition, self.temperature_c)
    }

    pub fn temperature_in(&self, unit: TemperatureUnit) -> i32 {
        display_temperature(self.temperature_c, unit)
    }

    pub fn feels_like_in(&self, unit: TemperatureUnit) -> i32 {
        display_temperature(self.feels_like_c, unit)
    }
}

impl WeatherDay {
    pub fn icon(&self) -> WeatherIcon {
        icon_for(&self.condition, f64::from(self.max_temp_c))
    }

    pub fn color(&self) -> IconColor {
        color_for(&self.condition, f64::from(self.max_temp_c))
    }

    pub fn max_temp_in(&self, unit: TemperatureUnit) -> i32 {
        display_temperature(f64::from(self.max_temp_c), unit)
    }
}

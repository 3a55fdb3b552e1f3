//! Core library for the `clima` watch-face weather app.
//!
//! This crate defines:
//! - Location acquisition behind the [`LocationProvider`] seam
//! - A typed client for the WeatherAPI.com REST endpoints
//! - Normalization of raw payloads into display-ready models
//! - The fetch orchestrator sequencing location → request → normalization
//!
//! It is used by `clima-cli`, but can back any presentation layer.

pub mod client;
pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod normalize;
pub mod orchestrator;

pub use client::WeatherApiClient;
pub use config::Config;
pub use error::FetchError;
pub use location::{FixedLocationProvider, LocationError, LocationProvider};
pub use model::{
    Coordinate, CurrentSnapshot, ForecastSnapshot, TemperatureUnit, WeatherDay, WeatherForecast,
    WeatherToday,
};
pub use normalize::{IconColor, WeatherIcon, celsius_to_fahrenheit};
pub use orchestrator::{DEFAULT_FORECAST_DAYS, FetchState, FetchTask, WeatherFetchOrchestrator};

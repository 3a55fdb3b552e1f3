use anyhow::Result;
use clap::{Parser, Subcommand};
use clima_core::{
    Config, FetchState, FixedLocationProvider, TemperatureUnit, WeatherApiClient,
    WeatherFetchOrchestrator, WeatherForecast, WeatherToday,
    orchestrator::DEFAULT_FORECAST_DAYS,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "clima", version, about = "Watch-face weather, in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key and a fallback coordinate.
    Configure,

    /// Show current weather for the configured location.
    Today {
        /// Display temperatures in Fahrenheit.
        #[arg(long)]
        fahrenheit: bool,
    },

    /// Show the multi-day forecast.
    Forecast {
        /// Number of forecast days to request.
        #[arg(long, default_value_t = DEFAULT_FORECAST_DAYS)]
        days: u8,

        /// Display temperatures in Fahrenheit.
        #[arg(long)]
        fahrenheit: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Today { fahrenheit } => today(unit(fahrenheit)).await,
            Command::Forecast { days, fahrenheit } => forecast(days, unit(fahrenheit)).await,
        }
    }
}

fn unit(fahrenheit: bool) -> TemperatureUnit {
    if fahrenheit { TemperatureUnit::Fahrenheit } else { TemperatureUnit::Celsius }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Text::new("WeatherAPI.com key:").prompt()?;
    let latitude = inquire::CustomType::<f64>::new("Latitude:")
        .with_help_message("Decimal degrees, e.g. 25.67")
        .prompt()?;
    let longitude = inquire::CustomType::<f64>::new("Longitude:")
        .with_help_message("Decimal degrees, e.g. -100.31")
        .prompt()?;

    config.set_api_key(api_key);
    config.set_location(latitude, longitude);
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

fn orchestrator_from_config(
    config: &Config,
) -> Result<WeatherFetchOrchestrator<FixedLocationProvider>> {
    let client = WeatherApiClient::new(config.api_key()?)?;

    let location = match config.coordinate() {
        Some(coordinate) => FixedLocationProvider::new(coordinate),
        // Unset location surfaces as "location unavailable" at fetch time,
        // same as a watch with no recorded fix.
        None => FixedLocationProvider::unset(),
    };

    Ok(WeatherFetchOrchestrator::new(location, client))
}

async fn today(unit: TemperatureUnit) -> Result<()> {
    let config = Config::load()?;
    let orchestrator = orchestrator_from_config(&config)?;

    match orchestrator.fetch_today().await {
        FetchState::Ready(weather) => print_today(&weather, unit),
        FetchState::Failed(message) => println!("{message}"),
        FetchState::Idle | FetchState::Loading => {}
    }

    Ok(())
}

async fn forecast(days: u8, unit: TemperatureUnit) -> Result<()> {
    let config = Config::load()?;
    let orchestrator = orchestrator_from_config(&config)?;

    match orchestrator.fetch_forecast(days).await {
        FetchState::Ready(forecast) => print_forecast(&forecast, unit),
        FetchState::Failed(message) => println!("{message}"),
        FetchState::Idle | FetchState::Loading => {}
    }

    Ok(())
}

fn print_today(weather: &WeatherToday, unit: TemperatureUnit) {
    let suffix = unit.suffix();
    println!("{}", weather.location_label);
    println!(
        "  {}{suffix}  {}  [{}]",
        weather.temperature_in(unit),
        weather.condition,
        weather.icon().glyph(),
    );
    println!("  feels like {}{suffix}", weather.feels_like_in(unit));
    println!("  humidity {}%  wind {}", weather.humidity_pct, weather.wind);
}

fn print_forecast(forecast: &WeatherForecast, unit: TemperatureUnit) {
    let suffix = unit.suffix();
    println!("{}", forecast.location_label);
    for day in &forecast.days {
        println!(
            "{:<10} {:<22} {:>4}{suffix} {:>4}%  [{}]",
            day.weekday,
            day.condition,
            day.max_temp_in(unit),
            day.humidity_pct,
            day.icon().glyph(),
        );
    }
}

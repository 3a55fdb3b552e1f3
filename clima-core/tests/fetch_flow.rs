//! End-to-end orchestrator scenarios against a mock WeatherAPI server.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use clima_core::{
    Coordinate, FetchState, FixedLocationProvider, LocationError, LocationProvider,
    TemperatureUnit, WeatherApiClient, WeatherFetchOrchestrator, WeatherIcon,
    orchestrator::DEFAULT_FORECAST_DAYS,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug)]
struct DeniedLocation;

#[async_trait]
impl LocationProvider for DeniedLocation {
    async fn last_known(&self) -> Result<Option<Coordinate>, LocationError> {
        Err(LocationError::PermissionDenied)
    }
}

fn monterrey() -> Coordinate {
    Coordinate::new(25.67, -100.31)
}

fn orchestrator_against(server: &MockServer) -> WeatherFetchOrchestrator<FixedLocationProvider> {
    let client = WeatherApiClient::with_base_url("test-key", server.uri()).unwrap();
    WeatherFetchOrchestrator::new(FixedLocationProvider::new(monterrey()), client)
}

fn sunny_current_body() -> serde_json::Value {
    serde_json::json!({
        "location": {"name": "Monterrey", "region": "Nuevo León", "country": "Mexico"},
        "current": {
            "temp_c": 32.0,
            "humidity": 45,
            "condition": {"text": "Sunny", "icon": "//cdn.weatherapi.com/113.png"}
        }
    })
}

#[tokio::test]
async fn today_happy_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("key", "test-key"))
        .and(query_param("q", "25.67,-100.31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sunny_current_body()))
        .mount(&server)
        .await;

    let orchestrator = orchestrator_against(&server);
    let state = orchestrator.fetch_today().await;

    let FetchState::Ready(today) = state else {
        panic!("expected Ready, got {state:?}");
    };
    assert_eq!(today.location_label, "Monterrey, Nuevo León");
    assert_eq!(today.temperature_c, 32.0);
    assert_eq!(today.condition, "Sunny");
    assert_eq!(today.humidity_pct, 45);
    assert_eq!(today.feels_like_c, 34.0);
    assert_eq!(today.wind, "12 km/h");
    assert_eq!(today.icon(), WeatherIcon::Sunny);
    // Unit toggle: 32 * 1.8 + 32 = 89.6, truncated to 89.
    assert_eq!(today.temperature_in(TemperatureUnit::Fahrenheit), 89);
    assert_eq!(today.temperature_in(TemperatureUnit::Celsius), 32);
}

#[tokio::test]
async fn today_with_sparse_payload_uses_defaults() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let orchestrator = orchestrator_against(&server);

    let FetchState::Ready(today) = orchestrator.fetch_today().await else {
        panic!("sparse payload must not fail the fetch");
    };
    assert_eq!(today.location_label, "Ubicación desconocida");
    assert_eq!(today.condition, "Desconocido");
    assert_eq!(today.temperature_c, 0.0);
    assert_eq!(today.humidity_pct, 0);
}

#[tokio::test]
async fn forecast_happy_path_preserves_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("key", "test-key"))
        .and(query_param("q", "25.67,-100.31"))
        .and(query_param("days", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "location": {"name": "Monterrey"},
            "forecast": {"forecastday": [
                {"date": "2024-01-15", "day": {"maxtemp_c": 28.0, "avghumidity": 55.0,
                    "condition": {"text": "Sunny"}}},
                {"date": "2024-01-16", "day": {"maxtemp_c": 23.0, "avghumidity": 70.0,
                    "condition": {"text": "Cloudy"}}},
                {"date": "2024-01-17", "day": {"maxtemp_c": 19.0, "avghumidity": 90.0,
                    "condition": {"text": "Heavy rain"}}}
            ]}
        })))
        .mount(&server)
        .await;

    let orchestrator = orchestrator_against(&server);
    let state = orchestrator.fetch_forecast(DEFAULT_FORECAST_DAYS).await;

    let FetchState::Ready(forecast) = state else {
        panic!("expected Ready, got {state:?}");
    };
    assert_eq!(forecast.location_label, "Monterrey");
    let days = forecast.days;
    assert_eq!(days.len(), 3);
    assert_eq!(days[0].weekday, "Monday");
    assert_eq!(days[0].icon(), WeatherIcon::Sunny);
    assert_eq!(days[1].weekday, "Tuesday");
    assert_eq!(days[2].weekday, "Wednesday");
    assert_eq!(days[2].max_temp_c, 19);
    assert_eq!(days[2].icon(), WeatherIcon::Rainy);
}

#[tokio::test]
async fn location_absent_fails_without_touching_the_network() {
    let server = MockServer::start().await;
    // No mocks mounted: any request would come back 404 and fail differently.

    let client = WeatherApiClient::with_base_url("test-key", server.uri()).unwrap();
    let orchestrator = WeatherFetchOrchestrator::new(FixedLocationProvider::unset(), client);

    let state = orchestrator.fetch_today().await;
    assert_eq!(state, FetchState::Failed("location unavailable".into()));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn permission_denied_has_its_own_message() {
    let server = MockServer::start().await;
    let client = WeatherApiClient::with_base_url("test-key", server.uri()).unwrap();
    let orchestrator = WeatherFetchOrchestrator::new(DeniedLocation, client);

    let state = orchestrator.fetch_today().await;
    assert_eq!(state, FetchState::Failed("permission not granted".into()));
}

#[tokio::test]
async fn server_error_maps_to_fetch_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let orchestrator = orchestrator_against(&server);
    let state = orchestrator.fetch_today().await;
    assert_eq!(state, FetchState::Failed("fetch error".into()));
}

#[tokio::test]
async fn non_ascii_error_body_still_maps_to_fetch_error() {
    let server = MockServer::start().await;

    // Long Spanish error page whose multibyte chars straddle the point where
    // the body excerpt gets cut.
    let body = "ubicación no válida, ".repeat(30);
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string(body))
        .mount(&server)
        .await;

    let orchestrator = orchestrator_against(&server);
    let state = orchestrator.fetch_today().await;
    assert_eq!(state, FetchState::Failed("fetch error".into()));
}

#[tokio::test]
async fn malformed_json_maps_to_fetch_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let orchestrator = orchestrator_against(&server);
    let state = orchestrator.fetch_forecast(3).await;
    assert_eq!(state, FetchState::Failed("fetch error".into()));
}

#[tokio::test]
async fn spawned_fetch_reports_loading_then_ready() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sunny_current_body())
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let orchestrator = Arc::new(orchestrator_against(&server));
    let task = orchestrator.spawn_today();

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(task.state(), FetchState::Loading);

    let FetchState::Ready(today) = task.settled().await else {
        panic!("expected Ready");
    };
    assert_eq!(today.condition, "Sunny");
}

#[tokio::test]
async fn cancelled_fetch_publishes_no_terminal_state() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sunny_current_body())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let orchestrator = Arc::new(orchestrator_against(&server));
    let task = orchestrator.spawn_today();

    tokio::time::sleep(Duration::from_millis(50)).await;
    task.cancel();
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(!task.state().is_terminal());
}

#[tokio::test]
async fn today_and_forecast_fetches_are_independent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sunny_current_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    let orchestrator = orchestrator_against(&server);

    // Forecast failing does not taint a subsequent today fetch.
    let forecast = orchestrator.fetch_forecast(3).await;
    assert_eq!(forecast, FetchState::Failed("fetch error".into()));

    let today = orchestrator.fetch_today().await;
    assert!(matches!(today, FetchState::Ready(_)));
}

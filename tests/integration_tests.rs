//! Integration tests for the AgriWeather client, pipeline and CLI

use std::process::Command;

use agriweather::{
    AgriWeatherConfig, AgriWeatherError, PipelineState, WeatherApiClient, WeatherPipeline,
};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test_api_key_for_integration";

fn config_for(server: &MockServer) -> AgriWeatherConfig {
    let mut config = AgriWeatherConfig::default();
    config.weather.base_url = server.uri();
    config.weather.api_key = Some(API_KEY.to_string());
    config.weather.timeout_seconds = 5;
    config
}

fn current_body() -> Value {
    json!({
        "dt": 1_717_383_600,
        "timezone": 19800,
        "main": { "temp": 37.2, "humidity": 84 },
        "wind": { "speed": 6.0 },
        "rain": { "1h": 18.0 },
        "weather": [{ "main": "Thunderstorm", "description": "thunderstorm with rain" }],
        "name": "Nashik"
    })
}

/// Five days of three-hour samples starting 2024-06-03 00:00 UTC
fn forecast_body() -> Value {
    let start: i64 = 1_717_372_800;
    let list: Vec<Value> = (0..40)
        .map(|i: i64| {
            json!({
                "dt": start + i * 3 * 3600,
                "main": { "temp": 24.0 + (i % 8) as f64, "humidity": 55 },
                "wind": { "speed": 4.0 },
                "weather": [{ "main": "Clear" }]
            })
        })
        .collect();

    json!({ "list": list, "city": { "name": "Nashik", "timezone": 0 } })
}

async fn mount_weather(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(server)
        .await;
}

async fn mount_geocoding(server: &MockServer, body: Value, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_geocode_decodes_candidates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Nashik"))
        .and(query_param("limit", "5"))
        .and(query_param("appid", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "Nashik", "lat": 19.9975, "lon": 73.7898,
              "country": "IN", "state": "Maharashtra" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = WeatherApiClient::new(&config_for(&server)).unwrap();
    let results = client.geocode_direct("Nashik", 5).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Nashik");
    assert_eq!(results[0].state.as_deref(), Some("Maharashtra"));
}

#[tokio::test]
async fn test_http_status_mapping() {
    let cases = [
        (401, "auth"),
        (404, "not_found"),
        (429, "rate_limited"),
        (500, "unavailable"),
        (503, "unavailable"),
    ];

    for (status, expected) in cases {
        let server = MockServer::start().await;
        mount_status(&server, status).await;
        let client = WeatherApiClient::new(&config_for(&server)).unwrap();

        let err = client.geocode_direct("Nashik", 5).await.unwrap_err();
        let kind = match err {
            AgriWeatherError::Auth { .. } => "auth",
            AgriWeatherError::LocationNotFound { .. } => "not_found",
            AgriWeatherError::RateLimited { .. } => "rate_limited",
            AgriWeatherError::ProviderUnavailable { .. } => "unavailable",
            other => panic!("unexpected error for HTTP {status}: {other:?}"),
        };
        assert_eq!(kind, expected, "HTTP {status}");
    }
}

#[tokio::test]
async fn test_undecodable_body_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = WeatherApiClient::new(&config_for(&server)).unwrap();
    let err = client.get_current_weather(19.99, 73.79).await.unwrap_err();
    assert!(matches!(err, AgriWeatherError::ProviderUnavailable { .. }));
}

#[tokio::test]
async fn test_unreachable_provider_is_unavailable() {
    let mut config = AgriWeatherConfig::default();
    config.weather.base_url = "http://127.0.0.1:1".to_string();
    config.weather.timeout_seconds = 2;

    let client = WeatherApiClient::new(&config).unwrap();
    let err = client.get_forecast(19.99, 73.79).await.unwrap_err();
    assert!(matches!(err, AgriWeatherError::ProviderUnavailable { .. }));
}

#[tokio::test]
async fn test_errors_never_expose_api_key() {
    let mut config = AgriWeatherConfig::default();
    config.weather.base_url = "http://127.0.0.1:1".to_string();
    config.weather.api_key = Some("SECRET_KEY_123456".to_string());
    config.weather.timeout_seconds = 2;

    let client = WeatherApiClient::new(&config).unwrap();
    let err = client.get_forecast(19.99, 73.79).await.unwrap_err();
    assert!(matches!(err, AgriWeatherError::ProviderUnavailable { .. }));
    assert!(!err.to_string().contains("SECRET_KEY_123456"));

    let pipeline = WeatherPipeline::from_config(&config).unwrap();
    let report = pipeline.get_weather_report("Mumbai").await.unwrap();
    assert_eq!(report.state, PipelineState::Degraded);
    assert!(!report.warning.unwrap().contains("SECRET_KEY_123456"));
}

#[tokio::test]
async fn test_pipeline_live_report() {
    let server = MockServer::start().await;
    mount_geocoding(
        &server,
        json!([{ "name": "Nashik", "lat": 19.9975, "lon": 73.7898,
                 "country": "IN", "state": "Maharashtra" }]),
        1,
    )
    .await;
    mount_weather(&server).await;

    let pipeline = WeatherPipeline::from_config(&config_for(&server)).unwrap();
    let report = pipeline.get_weather_report("Nashik").await.unwrap();

    assert_eq!(report.state, PipelineState::Ready);
    assert!(report.warning.is_none());
    assert_eq!(report.location, "Nashik, Maharashtra, IN");
    assert_eq!(report.forecast.len(), 5);

    // today comes from current conditions, not the interval samples
    assert_eq!(report.current.temp_max_c, 37.2);
    assert_eq!(report.current.humidity_percent, 84.0);
    assert_eq!(report.current.rainfall_mm, 18.0);
    assert!((report.current.wind_speed_kmh - 21.6).abs() < 1e-9);

    assert_eq!(report.forecast[1].temp_max_c, 31.0);
    assert_eq!(report.forecast[1].temp_min_c, 24.0);
    assert_eq!(report.forecast[1].wind_speed_kmh, 14.0);

    assert!(report.advice.contains(agriweather::advisory::DRAINAGE_WARNING));
    assert!(report.advice.contains(agriweather::advisory::LIVESTOCK_SHADE_WARNING));
    assert!(report.advice.contains(agriweather::advisory::FUNGAL_WARNING));
    assert!(report.advice.contains(agriweather::advisory::SECURE_STRUCTURES_WARNING));
    assert_eq!(report.crop_impacts.len(), 4);
}

#[tokio::test]
async fn test_builtin_location_never_geocodes() {
    let server = MockServer::start().await;
    mount_geocoding(&server, json!([]), 0).await;
    mount_weather(&server).await;

    let pipeline = WeatherPipeline::from_config(&config_for(&server)).unwrap();
    let report = pipeline.get_weather_report("delhi").await.unwrap();

    assert_eq!(report.location, "Delhi");
    assert_eq!(report.state, PipelineState::Ready);
}

#[tokio::test]
async fn test_unknown_location_returns_degraded_report() {
    let server = MockServer::start().await;
    mount_geocoding(&server, json!([]), 1).await;

    let pipeline = WeatherPipeline::from_config(&config_for(&server)).unwrap();
    let report = pipeline.get_weather_report("zzzzz").await.unwrap();

    assert_eq!(report.state, PipelineState::Degraded);
    assert_eq!(report.forecast.len(), 7);
    assert!(report.warning.unwrap().contains("zzzzz"));
}

#[tokio::test]
async fn test_weather_outage_returns_degraded_report() {
    let server = MockServer::start().await;
    mount_status(&server, 503).await;

    let pipeline = WeatherPipeline::from_config(&config_for(&server)).unwrap();
    let report = pipeline.get_weather_report("Mumbai").await.unwrap();

    assert_eq!(report.state, PipelineState::Degraded);
    assert_eq!(report.location, "Mumbai");
    assert!(report.warning.is_some());
}

#[tokio::test]
async fn test_empty_input_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let pipeline = WeatherPipeline::from_config(&config_for(&server)).unwrap();
    let err = pipeline.get_weather_report("   ").await.unwrap_err();
    assert!(matches!(err, AgriWeatherError::InvalidInput { .. }));
}

/// The binary rejects empty input before touching the network
#[test]
fn test_cli_empty_location_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_agriweather"))
        .env("AGRIWEATHER_CONFIG", "/nonexistent/agriweather.toml")
        .arg("")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid input"));
    assert!(stderr.contains("Location cannot be empty"));
}

#[test]
fn test_cli_help_mentions_farming() {
    let output = Command::new(env!("CARGO_BIN_EXE_agriweather"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("agriweather"));
    assert!(stdout.contains("farming advice"));
}

use skyportal::{data::weatherapi::WeatherClient, domain::weather::Units, error::AppError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn forecast_day(date: &str, max: f32, min: f32, text: &str) -> serde_json::Value {
    serde_json::json!({
        "date": date,
        "day": {
            "maxtemp_f": max,
            "mintemp_f": min,
            "avghumidity": 64.0,
            "maxwind_mph": 12.5,
            "condition": { "text": text, "icon": "//cdn.weatherapi.com/x.png" },
        },
    })
}

fn forecast_payload(days: usize) -> serde_json::Value {
    let all = [
        forecast_day("2024-06-01", 85.0, 70.0, "Patchy rain nearby"),
        forecast_day("2024-06-02", 90.0, 72.0, "Partly cloudy"),
        forecast_day("2024-06-03", 95.0, 75.0, "Sunny"),
        forecast_day("2024-06-04", 93.0, 74.0, "Sunny"),
    ];
    let forecastday = all[..days].to_vec();
    serde_json::json!({
        "location": {
            "name": "Austin",
            "region": "Texas",
            "lat": 30.27,
            "lon": -97.74,
            "localtime": "2024-06-01 14:05",
        },
        "current": {
            "temp_f": 88.0,
            "condition": { "text": "Sunny" },
            "humidity": 40.0,
            "wind_mph": 9.4,
            "feelslike_f": 90.1,
            "vis_miles": 10.0,
        },
        "forecast": { "forecastday": forecastday },
    })
}

async fn server_with(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn parses_forecast_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("key", "secret"))
        .and(query_param("q", "Austin"))
        .and(query_param("days", "3"))
        .and(query_param("aqi", "no"))
        .and(query_param("alerts", "no"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_payload(3)))
        .expect(1)
        .mount(&server)
        .await;

    let client = WeatherClient::with_base_url(server.uri(), "secret");
    let record = client.fetch("Austin").await.expect("record");

    assert_eq!(record.location.name, "Austin");
    assert_eq!(record.location.region, "Texas");
    assert_eq!(
        record
            .location
            .local_time
            .map(|t| t.format("%H:%M").to_string())
            .as_deref(),
        Some("14:05")
    );
    assert_eq!(record.current.condition.text, "Sunny");
    assert_eq!(record.current_temp(Units::Fahrenheit), 88);
    assert_eq!(record.forecast_days.len(), 3);
    assert_eq!(record.forecast_days[1].condition.text, "Partly cloudy");
    assert!((record.forecast_days[2].max_temp_f - 95.0).abs() < f32::EPSILON);
}

#[tokio::test]
async fn keeps_at_most_three_forecast_days() {
    let server = server_with(ResponseTemplate::new(200).set_body_json(forecast_payload(4))).await;
    let client = WeatherClient::with_base_url(server.uri(), "secret");
    let record = client.fetch("Austin").await.expect("record");
    assert_eq!(record.forecast_days.len(), 3);
}

#[tokio::test]
async fn short_forecast_is_accepted() {
    let server = server_with(ResponseTemplate::new(200).set_body_json(forecast_payload(1))).await;
    let client = WeatherClient::with_base_url(server.uri(), "secret");
    let record = client.fetch("Austin").await.expect("record");
    assert_eq!(record.forecast_days.len(), 1);
}

#[tokio::test]
async fn unknown_location_maps_to_invalid_input() {
    let server = server_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
        "error": { "code": 1006, "message": "No matching location found." }
    })))
    .await;
    let client = WeatherClient::with_base_url(server.uri(), "secret");
    let err = client.fetch("Atlantis").await.expect_err("no match");
    assert_eq!(err, AppError::InvalidLocationInput("Atlantis".to_string()));
}

#[tokio::test]
async fn server_errors_map_to_fetch_failure() {
    let server = server_with(ResponseTemplate::new(500).set_body_string("boom")).await;
    let client = WeatherClient::with_base_url(server.uri(), "secret");
    let err = client.fetch("Austin").await.expect_err("server error");
    assert!(matches!(err, AppError::WeatherFetchFailed(_)));
}

#[tokio::test]
async fn rejected_key_maps_to_fetch_failure() {
    let server = server_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
        "error": { "code": 2006, "message": "API key is invalid." }
    })))
    .await;
    let client = WeatherClient::with_base_url(server.uri(), "bad");
    let err = client.fetch("Austin").await.expect_err("bad key");
    assert!(matches!(err, AppError::WeatherFetchFailed(ref m) if m.contains("API key is invalid")));
}

#[tokio::test]
async fn malformed_body_maps_to_fetch_failure() {
    let server = server_with(ResponseTemplate::new(200).set_body_string("not json")).await;
    let client = WeatherClient::with_base_url(server.uri(), "secret");
    let err = client.fetch("Austin").await.expect_err("bad body");
    assert!(matches!(err, AppError::WeatherFetchFailed(_)));
}

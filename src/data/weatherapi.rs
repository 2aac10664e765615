use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    domain::weather::{
        Condition, CurrentConditions, FORECAST_DAYS, ForecastDay, LocationInfo, WeatherRecord,
        parse_date, parse_local_time,
    },
    error::AppError,
};

/// Upstream error code for a `q` value that matches no place.
const NO_MATCHING_LOCATION: u32 = 1006;

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Current conditions plus a three-day forecast for `query`, which may
    /// be a place name or a `"lat,lon"` pair.
    pub async fn fetch(&self, query: &str) -> Result<WeatherRecord, AppError> {
        let days = FORECAST_DAYS.to_string();
        debug!("fetching forecast for {query:?}");
        let response = self
            .client
            .get(format!("{}/forecast.json", self.base_url))
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query),
                ("days", days.as_str()),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(upstream_error(status, &body, query));
        }

        let payload: ForecastResponse = response.json().await?;
        Ok(payload.into_record())
    }
}

fn upstream_error(status: StatusCode, body: &str, query: &str) -> AppError {
    let detail = serde_json::from_str::<ErrorResponse>(body).ok();
    match detail {
        Some(ErrorResponse { error }) if error.code == NO_MATCHING_LOCATION => {
            AppError::InvalidLocationInput(query.to_string())
        }
        Some(ErrorResponse { error }) => {
            warn!("weather api rejected request: {} ({})", error.message, error.code);
            AppError::WeatherFetchFailed(format!("{status}: {}", error.message))
        }
        None => AppError::WeatherFetchFailed(format!("{status}")),
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: u32,
    message: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    location: LocationBlock,
    current: CurrentBlock,
    #[serde(default)]
    forecast: ForecastBlock,
}

#[derive(Debug, Deserialize)]
struct LocationBlock {
    name: String,
    #[serde(default)]
    region: String,
    lat: f64,
    lon: f64,
    #[serde(default)]
    localtime: String,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    text: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temp_f: f32,
    condition: ConditionBlock,
    humidity: f32,
    wind_mph: f32,
    feelslike_f: f32,
    vis_miles: f32,
}

#[derive(Debug, Default, Deserialize)]
struct ForecastBlock {
    #[serde(default)]
    forecastday: Vec<ForecastDayBlock>,
}

#[derive(Debug, Deserialize)]
struct ForecastDayBlock {
    date: String,
    day: DayBlock,
}

#[derive(Debug, Deserialize)]
struct DayBlock {
    maxtemp_f: f32,
    mintemp_f: f32,
    avghumidity: f32,
    maxwind_mph: f32,
    condition: ConditionBlock,
}

impl From<ConditionBlock> for Condition {
    fn from(block: ConditionBlock) -> Self {
        Self {
            text: block.text,
            icon: block.icon,
        }
    }
}

impl ForecastResponse {
    fn into_record(self) -> WeatherRecord {
        WeatherRecord {
            location: LocationInfo {
                local_time: parse_local_time(&self.location.localtime),
                name: self.location.name,
                region: self.location.region,
                latitude: self.location.lat,
                longitude: self.location.lon,
            },
            current: CurrentConditions {
                temperature_f: self.current.temp_f,
                condition: self.current.condition.into(),
                humidity_pct: self.current.humidity,
                wind_mph: self.current.wind_mph,
                feels_like_f: self.current.feelslike_f,
                visibility_miles: self.current.vis_miles,
            },
            forecast_days: parse_forecast_days(self.forecast.forecastday),
        }
    }
}

fn parse_forecast_days(days: Vec<ForecastDayBlock>) -> Vec<ForecastDay> {
    days.into_iter()
        .filter_map(|entry| {
            let Some(date) = parse_date(&entry.date) else {
                debug!("skipping forecast day with bad date {:?}", entry.date);
                return None;
            };
            Some(ForecastDay {
                date,
                max_temp_f: entry.day.maxtemp_f,
                min_temp_f: entry.day.mintemp_f,
                avg_humidity_pct: entry.day.avghumidity,
                max_wind_mph: entry.day.maxwind_mph,
                condition: entry.day.condition.into(),
            })
        })
        .take(FORECAST_DAYS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day_block(date: &str) -> ForecastDayBlock {
        ForecastDayBlock {
            date: date.to_string(),
            day: DayBlock {
                maxtemp_f: 80.0,
                mintemp_f: 60.0,
                avghumidity: 50.0,
                maxwind_mph: 10.0,
                condition: ConditionBlock {
                    text: "Sunny".to_string(),
                    icon: String::new(),
                },
            },
        }
    }

    #[test]
    fn forecast_days_skip_bad_dates_and_cap_at_three() {
        let parsed = parse_forecast_days(vec![
            day_block("bad"),
            day_block("2024-06-01"),
            day_block("2024-06-02"),
            day_block("2024-06-03"),
            day_block("2024-06-04"),
        ]);
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].date, parse_date("2024-06-01").expect("date"));
    }

    #[test]
    fn upstream_no_match_maps_to_invalid_location() {
        let body = r#"{"error":{"code":1006,"message":"No matching location found."}}"#;
        assert_eq!(
            upstream_error(StatusCode::BAD_REQUEST, body, "Atlantis"),
            AppError::InvalidLocationInput("Atlantis".to_string())
        );
    }

    #[test]
    fn other_upstream_errors_are_fetch_failures() {
        let body = r#"{"error":{"code":2006,"message":"API key is invalid."}}"#;
        match upstream_error(StatusCode::UNAUTHORIZED, body, "Austin") {
            AppError::WeatherFetchFailed(detail) => assert!(detail.contains("API key is invalid")),
            other => panic!("unexpected error {other:?}"),
        }
        assert!(matches!(
            upstream_error(StatusCode::BAD_GATEWAY, "<html>", "Austin"),
            AppError::WeatherFetchFailed(_)
        ));
    }
}

#![allow(dead_code)]

use clap::Parser;
use skyportal::{
    app::{
        events::AppEvent,
        state::{AppMode, AppState},
    },
    cli::Cli,
    domain::weather::{
        Condition, CurrentConditions, ForecastDay, LocationInfo, WeatherRecord, parse_date,
        parse_local_time,
    },
};
use tokio::sync::mpsc;

/// Nothing listens here; stray requests fail immediately.
pub const UNROUTABLE: &str = "http://127.0.0.1:9";

pub fn reykjavik_cli(extra: &[&str]) -> Cli {
    let mut args = vec![
        "skyportal",
        "--api-key",
        "fixture-key",
        "--base-url",
        UNROUTABLE,
        "--geolocation-url",
        UNROUTABLE,
        "--no-animation",
        "--no-flash",
    ];
    args.extend_from_slice(extra);
    Cli::parse_from(args)
}

fn fixture_day(date: &str, max: f32, min: f32, condition: &str) -> ForecastDay {
    ForecastDay {
        date: parse_date(date).expect("valid fixture date"),
        max_temp_f: max,
        min_temp_f: min,
        avg_humidity_pct: 80.0,
        max_wind_mph: 22.0,
        condition: Condition::new(condition),
    }
}

pub fn reykjavik_record(condition: &str, local_time: &str) -> WeatherRecord {
    WeatherRecord {
        location: LocationInfo {
            name: "Reykjavik".to_string(),
            region: "Capital Region".to_string(),
            latitude: 64.15,
            longitude: -21.95,
            local_time: parse_local_time(local_time),
        },
        current: CurrentConditions {
            temperature_f: 41.0,
            condition: Condition::new(condition),
            humidity_pct: 87.0,
            wind_mph: 18.0,
            feels_like_f: 33.0,
            visibility_miles: 4.0,
        },
        forecast_days: vec![
            fixture_day("2026-02-12", 43.0, 34.0, "Moderate snow"),
            fixture_day("2026-02-13", 39.0, 30.0, "Overcast"),
            fixture_day("2026-02-14", 45.0, 36.0, "Sunny"),
        ],
    }
}

/// Delivers `record` as the answer to the state's current request.
pub async fn deliver(state: &mut AppState, cli: &Cli, record: WeatherRecord) {
    let (tx, _rx) = mpsc::channel(8);
    let generation = state.request_generation;
    state
        .handle_event(
            AppEvent::FetchSucceeded {
                generation,
                record: Box::new(record),
            },
            &tx,
            cli,
        )
        .await
        .expect("deliver record");
}

pub async fn ready_state(cli: &Cli, record: WeatherRecord) -> AppState {
    let mut state = AppState::new(cli);
    deliver(&mut state, cli, record).await;
    assert_eq!(state.mode, AppMode::Ready);
    state
}

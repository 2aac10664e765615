use clap::Parser;

use crate::{
    app::state::AppState,
    cli::Cli,
    domain::weather::{
        Condition, CurrentConditions, ForecastDay, LocationInfo, WeatherRecord, parse_date,
        parse_local_time,
    },
};

/// Points both services at a closed local port so stray requests fail fast.
const UNROUTABLE: &str = "http://127.0.0.1:9";

pub(crate) fn test_cli(extra: &[&str]) -> Cli {
    let mut args = vec![
        "skyportal",
        "--api-key",
        "test-key",
        "--base-url",
        UNROUTABLE,
        "--geolocation-url",
        UNROUTABLE,
    ];
    args.extend_from_slice(extra);
    Cli::parse_from(args)
}

/// A still cli: no particles, no lightning.
pub(crate) fn still_cli() -> Cli {
    test_cli(&["--no-animation", "--no-flash"])
}

fn forecast_day(date: &str, max: f32, min: f32, condition: &str) -> ForecastDay {
    ForecastDay {
        date: parse_date(date).expect("fixture date"),
        max_temp_f: max,
        min_temp_f: min,
        avg_humidity_pct: 55.0,
        max_wind_mph: 14.0,
        condition: Condition::new(condition),
    }
}

pub(crate) fn sample_record(condition: &str, local_time: &str) -> WeatherRecord {
    WeatherRecord {
        location: LocationInfo {
            name: "Austin".to_string(),
            region: "Texas".to_string(),
            latitude: 30.27,
            longitude: -97.74,
            local_time: parse_local_time(local_time),
        },
        current: CurrentConditions {
            temperature_f: 78.0,
            condition: Condition::new(condition),
            humidity_pct: 62.0,
            wind_mph: 9.0,
            feels_like_f: 80.0,
            visibility_miles: 6.0,
        },
        forecast_days: vec![
            forecast_day("2024-06-01", 85.0, 70.0, "Patchy rain nearby"),
            forecast_day("2024-06-02", 90.0, 72.0, "Partly cloudy"),
            forecast_day("2024-06-03", 95.0, 75.0, "Sunny"),
        ],
    }
}

pub(crate) fn ready_state(cli: &Cli, record: WeatherRecord) -> AppState {
    let mut state = AppState::new(cli);
    state.handle_fetch_succeeded(state.request_generation, record);
    state
}

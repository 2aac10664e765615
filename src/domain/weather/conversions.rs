use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::Units;

#[must_use]
pub fn convert_temp(fahrenheit: f32, units: Units) -> f32 {
    match units {
        Units::Fahrenheit => fahrenheit,
        Units::Celsius => (fahrenheit - 32.0) / 1.8,
    }
}

#[must_use]
pub fn round_temp(value: f32) -> i32 {
    value.round() as i32
}

#[must_use]
pub fn unit_suffix(units: Units) -> &'static str {
    match units {
        Units::Fahrenheit => "°F",
        Units::Celsius => "°C",
    }
}

/// Parses the provider's civil local time (`2024-06-03 9:05`). Unpadded
/// hours are accepted, as is an ISO `T` separator.
#[must_use]
pub fn parse_local_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
}

#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Civil noon on `date`.
#[must_use]
pub fn noon_on(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN + chrono::Duration::hours(12))
}

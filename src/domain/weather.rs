use chrono::{NaiveDate, NaiveDateTime};

mod conditions;
mod conversions;

pub use conditions::*;
pub use conversions::*;

/// Forecast days requested from the provider and kept on a record.
pub const FORECAST_DAYS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    Fahrenheit,
    Celsius,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationInfo {
    pub name: String,
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Civil time at the location. No offset is attached; `None` when the
    /// provider value could not be parsed.
    pub local_time: Option<NaiveDateTime>,
}

impl LocationInfo {
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.region.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.region)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub text: String,
    pub icon: String,
}

impl Condition {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            icon: String::new(),
        }
    }

    #[must_use]
    pub fn category(&self) -> ConditionCategory {
        classify_condition(&self.text)
    }

    #[must_use]
    pub fn is_partly_cloudy(&self) -> bool {
        is_partly_cloudy(&self.text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature_f: f32,
    pub condition: Condition,
    pub humidity_pct: f32,
    pub wind_mph: f32,
    pub feels_like_f: f32,
    pub visibility_miles: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub max_temp_f: f32,
    pub min_temp_f: f32,
    pub avg_humidity_pct: f32,
    pub max_wind_mph: f32,
    pub condition: Condition,
}

/// One fetched weather snapshot. Never mutated after it is built; a portal
/// preview is a separate synthetic record.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub location: LocationInfo,
    pub current: CurrentConditions,
    /// Chronological, index 0 is today.
    pub forecast_days: Vec<ForecastDay>,
}

impl WeatherRecord {
    #[must_use]
    pub fn current_category(&self) -> ConditionCategory {
        self.current.condition.category()
    }

    #[must_use]
    pub fn current_temp(&self, units: Units) -> i32 {
        round_temp(convert_temp(self.current.temperature_f, units))
    }

    #[must_use]
    pub fn feels_like(&self, units: Units) -> i32 {
        round_temp(convert_temp(self.current.feels_like_f, units))
    }

    /// High and low of the record's first forecast day: today on a fetched
    /// record, the previewed day on a portal record.
    #[must_use]
    pub fn high_low(&self, units: Units) -> Option<(i32, i32)> {
        let today = self.forecast_days.first()?;
        Some((
            round_temp(convert_temp(today.max_temp_f, units)),
            round_temp(convert_temp(today.min_temp_f, units)),
        ))
    }
}

#[cfg(test)]
mod tests;

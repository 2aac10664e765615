//! Forecast-day portals.
//!
//! The view is either on the fetched record (`Main`) or previewing one
//! forecast day through a synthetic record (`Portal`). Entering a portal
//! while another is open exits the current one first; portals never nest.

use thiserror::Error;

use super::weather::{
    CurrentConditions, FORECAST_DAYS, ForecastDay, LocationInfo, WeatherRecord, noon_on,
};

/// Visibility reported for synthetic forecast-day records, in miles.
pub const PORTAL_VISIBILITY_MILES: f32 = 10.0;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PortalState {
    #[default]
    Main,
    Portal {
        day_index: usize,
        record: WeatherRecord,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PortalError {
    #[error("forecast day {0} is outside the supported range")]
    OutOfRange(usize),
    #[error("forecast day {0} is not available")]
    MissingDay(usize),
}

/// What a transition changed. Callers recompute the scene from
/// [`PortalState::effective_record`] whenever `changed()` is true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PortalTransition {
    pub exited: Option<usize>,
    pub entered: Option<usize>,
}

impl PortalTransition {
    #[must_use]
    pub fn changed(self) -> bool {
        self.exited.is_some() || self.entered.is_some()
    }
}

impl PortalState {
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Portal { .. })
    }

    #[must_use]
    pub fn source_day_index(&self) -> Option<usize> {
        match self {
            Self::Main => None,
            Self::Portal { day_index, .. } => Some(*day_index),
        }
    }

    #[must_use]
    pub fn synthetic_record(&self) -> Option<&WeatherRecord> {
        match self {
            Self::Main => None,
            Self::Portal { record, .. } => Some(record),
        }
    }

    /// The record the scene and the overlay should show.
    #[must_use]
    pub fn effective_record<'a>(&'a self, main: &'a WeatherRecord) -> &'a WeatherRecord {
        self.synthetic_record().unwrap_or(main)
    }

    pub fn enter(
        &mut self,
        main: &WeatherRecord,
        day_index: usize,
    ) -> Result<PortalTransition, PortalError> {
        if day_index >= FORECAST_DAYS {
            return Err(PortalError::OutOfRange(day_index));
        }
        let day = main
            .forecast_days
            .get(day_index)
            .ok_or(PortalError::MissingDay(day_index))?;
        let record = synthesize_forecast_record(main, day);
        let exited = self.exit().exited;
        *self = Self::Portal { day_index, record };
        Ok(PortalTransition {
            exited,
            entered: Some(day_index),
        })
    }

    pub fn exit(&mut self) -> PortalTransition {
        let exited = self.source_day_index();
        *self = Self::Main;
        PortalTransition {
            exited,
            entered: None,
        }
    }
}

/// Builds the weather snapshot shown inside a forecast-day portal. The
/// local time is pinned to civil noon, so the portal always renders as day.
/// Its only forecast day is the previewed one, so high/low readouts follow it.
#[must_use]
pub fn synthesize_forecast_record(main: &WeatherRecord, day: &ForecastDay) -> WeatherRecord {
    WeatherRecord {
        location: LocationInfo {
            name: main.location.name.clone(),
            region: main.location.region.clone(),
            latitude: main.location.latitude,
            longitude: main.location.longitude,
            local_time: Some(noon_on(day.date)),
        },
        current: CurrentConditions {
            temperature_f: day.max_temp_f,
            condition: day.condition.clone(),
            humidity_pct: day.avg_humidity_pct,
            wind_mph: day.max_wind_mph,
            feels_like_f: day.max_temp_f,
            visibility_miles: PORTAL_VISIBILITY_MILES,
        },
        forecast_days: vec![day.clone()],
    }
}

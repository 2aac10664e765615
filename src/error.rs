use thiserror::Error;

/// Failures surfaced to the user. Every variant ends up as one full-screen
/// message with a manual retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("device location is unavailable: {0}")]
    GeolocationUnavailable(String),
    #[error("device location lookup was denied: {0}")]
    GeolocationDenied(String),
    #[error("device location lookup timed out after {0}s")]
    GeolocationTimeout(u64),
    #[error("weather request failed: {0}")]
    WeatherFetchFailed(String),
    #[error("no matching location for {0:?}")]
    InvalidLocationInput(String),
    #[error("missing weather API key (pass --api-key or set WEATHER_API_KEY)")]
    MissingApiKey,
}

impl AppError {
    #[must_use]
    pub fn is_geolocation(&self) -> bool {
        matches!(
            self,
            Self::GeolocationUnavailable(_) | Self::GeolocationDenied(_) | Self::GeolocationTimeout(_)
        )
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::WeatherFetchFailed(err.to_string())
    }
}

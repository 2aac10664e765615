use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use log::debug;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::time::timeout;

use crate::error::AppError;

pub const DEFAULT_GEOLOCATION_URL: &str = "https://ipapi.co";
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);
/// A position younger than this is reused instead of looked up again.
pub const MAX_POSITION_AGE: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

#[derive(Debug, Clone)]
struct CachedPosition {
    query: String,
    at: Instant,
}

/// Approximate device position from the public IP address.
#[derive(Debug, Clone)]
pub struct Geolocator {
    client: Client,
    base_url: String,
    timeout: Duration,
    cache: Arc<Mutex<Option<CachedPosition>>>,
}

impl Geolocator {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: LOOKUP_TIMEOUT,
            cache: Arc::new(Mutex::new(None)),
        }
    }

    /// Replaces the [`LOOKUP_TIMEOUT`] applied to each lookup.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolves the current position to a `"lat,lon"` weather query.
    pub async fn locate(&self) -> Result<String, AppError> {
        if let Some(query) = self.cached() {
            debug!("reusing cached position {query}");
            return Ok(query);
        }

        let query = timeout(self.timeout, self.lookup())
            .await
            .map_err(|_| AppError::GeolocationTimeout(self.timeout.as_secs()))??;

        if let Ok(mut cache) = self.cache.lock() {
            *cache = Some(CachedPosition {
                query: query.clone(),
                at: Instant::now(),
            });
        }
        Ok(query)
    }

    fn cached(&self) -> Option<String> {
        let cache = self.cache.lock().ok()?;
        cache
            .as_ref()
            .filter(|entry| entry.at.elapsed() < MAX_POSITION_AGE)
            .map(|entry| entry.query.clone())
    }

    async fn lookup(&self) -> Result<String, AppError> {
        let response = self
            .client
            .get(format!("{}/json/", self.base_url))
            .send()
            .await
            .map_err(|err| AppError::GeolocationUnavailable(err.to_string()))?;

        let status = response.status();
        if matches!(status, StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS) {
            return Err(AppError::GeolocationDenied(status.to_string()));
        }
        if !status.is_success() {
            return Err(AppError::GeolocationUnavailable(status.to_string()));
        }

        let body: IpApiResponse = response
            .json()
            .await
            .map_err(|err| AppError::GeolocationUnavailable(err.to_string()))?;
        position_query(body)
    }
}

fn position_query(body: IpApiResponse) -> Result<String, AppError> {
    if body.error {
        return Err(AppError::GeolocationDenied(
            body.reason.unwrap_or_else(|| "lookup refused".to_string()),
        ));
    }
    match (body.latitude, body.longitude) {
        (Some(lat), Some(lon)) => Ok(format!("{lat},{lon}")),
        _ => Err(AppError::GeolocationUnavailable(
            "response carried no coordinates".to_string(),
        )),
    }
}

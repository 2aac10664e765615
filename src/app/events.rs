use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tokio::{sync::mpsc::Sender, time::interval};

use crate::{
    data::{geolocation::Geolocator, weatherapi::WeatherClient},
    domain::weather::WeatherRecord,
    error::AppError,
};

/// Which operation a weather fetch performs. A failed request is retried by
/// running the same value again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    /// Resolve the device position first, then fetch for it.
    CurrentLocation,
    /// Fetch for a place name or a `"lat,lon"` pair.
    Named(String),
}

impl FetchRequest {
    /// What the user reads when this request fails.
    #[must_use]
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::CurrentLocation => {
                "Unable to load weather data. Please try entering a city manually."
            }
            Self::Named(_) => {
                "Unable to load weather data for this location. Please try a different city."
            }
        }
    }

    pub async fn perform(
        &self,
        weather: &WeatherClient,
        geolocator: &Geolocator,
    ) -> Result<WeatherRecord, AppError> {
        let query = match self {
            Self::CurrentLocation => geolocator.locate().await?,
            Self::Named(query) => query.clone(),
        };
        weather.fetch(&query).await
    }
}

#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    TickFrame,
    Input(Event),
    FetchSucceeded {
        generation: u64,
        record: Box<WeatherRecord>,
    },
    FetchFailed {
        generation: u64,
        error: AppError,
    },
    Quit,
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}

pub fn start_frame_task(tx: Sender<AppEvent>, fps: u8) {
    let fps = fps.max(15);
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_millis(1000_u64 / u64::from(fps)));
        loop {
            ticker.tick().await;
            if tx.send(AppEvent::TickFrame).await.is_err() {
                break;
            }
        }
    });
}

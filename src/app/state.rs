use std::time::Instant;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info, warn};
use tokio::sync::mpsc;

use crate::{
    app::events::{AppEvent, FetchRequest, start_frame_task},
    cli::{Cli, IconMode},
    data::{geolocation::Geolocator, weatherapi::WeatherClient},
    domain::{
        camera::OrbitCamera,
        portal::PortalState,
        scene::{SceneConfiguration, WeatherEffect, idle_scene, resolve_scene, system_hour},
        weather::{Units, WeatherRecord},
    },
    error::AppError,
    ui::{lightning::LightningFlash, particles::ParticleEngine},
};

mod input;
mod methods_async;
mod methods_fetch;

use input::{KeyCommand, command_char, command_from_char, is_location_char};

pub const LOADING_MESSAGE: &str = "Loading weather data...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Loading,
    Ready,
    Error,
    Quit,
}

/// The full-screen failure panel and the request its retry re-runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorScreen {
    pub message: String,
    pub cause: AppError,
    pub retry: FetchRequest,
}

#[derive(Debug)]
pub struct AppState {
    pub mode: AppMode,
    pub running: bool,
    pub loading_message: String,
    pub error: Option<ErrorScreen>,
    pub weather: Option<WeatherRecord>,
    pub portal: PortalState,
    /// Resolved from the effective record; refreshed on every weather or
    /// portal change.
    pub scene: SceneConfiguration,
    pub units: Units,
    pub icon_mode: IconMode,
    pub camera: OrbitCamera,
    pub particles: ParticleEngine,
    pub lightning: LightningFlash,
    /// Text typed into the location prompt while it is open.
    pub location_input: Option<String>,
    pub request_generation: u64,
    pub last_request: Option<FetchRequest>,
    pub last_frame_at: Instant,
    pub frame_tick: u64,
    pub animate_ui: bool,
    weather_client: WeatherClient,
    geolocator: Geolocator,
}

impl AppState {
    pub fn new(cli: &Cli) -> Self {
        let api_key = cli.api_key().unwrap_or_default();
        Self {
            mode: AppMode::Loading,
            running: true,
            loading_message: LOADING_MESSAGE.to_string(),
            error: None,
            weather: None,
            portal: PortalState::default(),
            scene: idle_scene(system_hour()),
            units: cli.units.into(),
            icon_mode: cli.icon_mode(),
            camera: OrbitCamera::default(),
            particles: ParticleEngine::new(cli.no_animation, cli.reduced_motion),
            lightning: LightningFlash::new(cli.no_flash || cli.no_animation, cli.reduced_motion),
            location_input: None,
            request_generation: 0,
            last_request: None,
            last_frame_at: Instant::now(),
            frame_tick: 0,
            animate_ui: cli.animate() && !cli.reduced_motion,
            weather_client: WeatherClient::with_base_url(cli.base_url.clone(), api_key),
            geolocator: Geolocator::with_base_url(cli.geolocation_url.clone()),
        }
    }

    /// The record the scene and readouts currently describe: the portal's
    /// synthetic record while one is open, the fetched record otherwise.
    #[must_use]
    pub fn effective_record(&self) -> Option<&WeatherRecord> {
        self.weather
            .as_ref()
            .map(|main| self.portal.effective_record(main))
    }

    pub(crate) fn recompute_scene(&mut self) {
        self.scene = match self.effective_record() {
            Some(record) => resolve_scene(record),
            None => idle_scene(system_hour()),
        };
    }
}

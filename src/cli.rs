#![allow(clippy::missing_errors_doc)]

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::{
    data::geolocation::DEFAULT_GEOLOCATION_URL, domain::weather::Units, error::AppError,
};

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum UnitsArg {
    Fahrenheit,
    Celsius,
}

impl From<UnitsArg> for Units {
    fn from(value: UnitsArg) -> Self {
        match value {
            UnitsArg::Fahrenheit => Units::Fahrenheit,
            UnitsArg::Celsius => Units::Celsius,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconMode {
    Unicode,
    Ascii,
    Emoji,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser, Clone)]
#[command(
    name = "skyportal",
    version,
    about = "Weather-driven sky scene with forecast-day portals"
)]
pub struct Cli {
    /// City or place name (default: detect current location)
    pub location: Option<String>,

    /// weatherapi.com API key
    #[arg(long, env = "WEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Weather API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// IP geolocation service base URL
    #[arg(long, default_value = DEFAULT_GEOLOCATION_URL, hide = true)]
    pub geolocation_url: String,

    /// Direct latitude (requires --lon)
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Direct longitude (requires --lat)
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Displayed temperature units
    #[arg(long, value_enum, default_value_t = UnitsArg::Fahrenheit)]
    pub units: UnitsArg,

    /// Target FPS (15..60)
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u8).range(15..=60))]
    pub fps: u8,

    /// Disable particle animation
    #[arg(long)]
    pub no_animation: bool,

    /// Lower motion mode
    #[arg(long)]
    pub reduced_motion: bool,

    /// Disable lightning flashes
    #[arg(long)]
    pub no_flash: bool,

    /// Force ASCII icons
    #[arg(long)]
    pub ascii_icons: bool,

    /// Force emoji icons
    #[arg(long, conflicts_with = "ascii_icons")]
    pub emoji_icons: bool,

    /// Write logs to this file (RUST_LOG filters, default info)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Print a scene snapshot to stdout and exit (non-interactive)
    #[arg(long)]
    pub one_shot: bool,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        match (self.lat, self.lon) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("--lat and --lon must be provided together")
            }
            _ => {}
        }
        self.api_key()?;
        Ok(())
    }

    pub fn api_key(&self) -> Result<String, AppError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(ToString::to_string)
            .ok_or(AppError::MissingApiKey)
    }

    /// Query for the startup fetch, or `None` to use device location.
    #[must_use]
    pub fn startup_query(&self) -> Option<String> {
        if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            return Some(format!("{lat},{lon}"));
        }
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(ToString::to_string)
    }

    #[must_use]
    pub fn icon_mode(&self) -> IconMode {
        if self.ascii_icons {
            IconMode::Ascii
        } else if self.emoji_icons {
            IconMode::Emoji
        } else {
            IconMode::Unicode
        }
    }

    #[must_use]
    pub fn animate(&self) -> bool {
        !self.no_animation
    }
}

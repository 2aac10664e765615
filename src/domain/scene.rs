//! Weather record → scene configuration.
//!
//! Everything here is a pure function of a [`WeatherRecord`] and, when the
//! record carries no usable local time, an explicit fallback hour. The
//! renderer consumes [`SceneConfiguration`] and never re-derives any rule.

use std::f32::consts::PI;

use chrono::{Local, NaiveDateTime, Timelike};
use glam::Vec3;

use super::weather::{ConditionCategory, WeatherRecord, classify_condition, is_partly_cloudy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeOfDay {
    Dawn,
    Day,
    Dusk,
    Night,
}

impl TimeOfDay {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Dawn => "dawn",
            Self::Day => "day",
            Self::Dusk => "dusk",
            Self::Night => "night",
        }
    }
}

/// Buckets a fractional civil hour.
///
/// The night predicate is evaluated first, so 06:00 exactly is night even
/// though it is also the lower bound of dawn.
#[must_use]
pub fn time_of_day(hour: f32) -> TimeOfDay {
    if hour >= 19.0 || hour <= 6.0 {
        TimeOfDay::Night
    } else if hour < 8.0 {
        TimeOfDay::Dawn
    } else if hour >= 17.0 {
        TimeOfDay::Dusk
    } else {
        TimeOfDay::Day
    }
}

#[must_use]
pub fn fractional_hour(time: NaiveDateTime) -> f32 {
    time.hour() as f32 + time.minute() as f32 / 60.0
}

#[must_use]
pub fn system_hour() -> f32 {
    fractional_hour(Local::now().naive_local())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    #[must_use]
    pub fn to_hex_string(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

pub const NIGHT_SKY: Rgb = Rgb::hex(0x0A1428);
pub const DAWN_SKY: Rgb = Rgb::hex(0x3B1F5C);
pub const DUSK_SKY: Rgb = Rgb::hex(0x6B3A1E);
pub const STORM_SKY: Rgb = Rgb::hex(0x263238);
pub const OVERCAST_SKY: Rgb = Rgb::hex(0x546E7A);
pub const CLOUDY_SKY: Rgb = Rgb::hex(0x42A5F5);
pub const CLEAR_SKY: Rgb = Rgb::hex(0x1976D2);

pub const DAWN_LIGHT: Rgb = Rgb::hex(0xD98CC8);
pub const DUSK_LIGHT: Rgb = Rgb::hex(0xFF9A4D);
pub const MOON_LIGHT: Rgb = Rgb::hex(0x4169E1);
pub const DAY_LIGHT: Rgb = Rgb::hex(0xFFFFFF);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precipitation {
    Rain { count: u16 },
    Snow { count: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudLayer {
    /// Relative cover in `0.0..=1.0`.
    pub density: f32,
    pub speed: f32,
    pub dark: bool,
    /// Thin clouds drifting in front of the celestial body.
    pub foreground_wisps: bool,
}

/// What the renderer draws for one weather effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectLayers {
    pub celestial_body: bool,
    pub clouds: Option<CloudLayer>,
    pub precipitation: Option<Precipitation>,
    pub lightning: bool,
    pub mist: bool,
}

/// The weather-effect variant. Renderers match on it exhaustively through
/// [`WeatherEffect::layers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherEffect {
    Sunny { partly_cloudy: bool },
    Cloudy { partly_cloudy: bool },
    Rainy,
    Snowy,
    Stormy,
    Foggy,
}

impl WeatherEffect {
    #[must_use]
    pub fn select(category: ConditionCategory, partly_cloudy: bool) -> Self {
        match category {
            ConditionCategory::Sunny => Self::Sunny { partly_cloudy },
            ConditionCategory::Cloudy => Self::Cloudy { partly_cloudy },
            ConditionCategory::Rainy => Self::Rainy,
            ConditionCategory::Snowy => Self::Snowy,
            ConditionCategory::Stormy => Self::Stormy,
            ConditionCategory::Foggy => Self::Foggy,
        }
    }

    #[must_use]
    pub fn from_condition_text(text: &str) -> Self {
        Self::select(classify_condition(text), is_partly_cloudy(text))
    }

    #[must_use]
    pub fn shows_celestial_body(self) -> bool {
        self.layers().celestial_body
    }

    #[must_use]
    pub fn layers(self) -> EffectLayers {
        match self {
            Self::Sunny { partly_cloudy } => EffectLayers {
                celestial_body: true,
                clouds: partly_cloudy.then_some(CloudLayer {
                    density: 0.5,
                    speed: 0.1,
                    dark: false,
                    foreground_wisps: true,
                }),
                precipitation: None,
                lightning: false,
                mist: false,
            },
            Self::Cloudy { partly_cloudy } => EffectLayers {
                celestial_body: partly_cloudy,
                clouds: Some(CloudLayer {
                    density: if partly_cloudy { 0.7 } else { 1.0 },
                    speed: 0.1,
                    dark: false,
                    foreground_wisps: partly_cloudy,
                }),
                precipitation: None,
                lightning: false,
                mist: false,
            },
            Self::Rainy => EffectLayers {
                celestial_body: false,
                clouds: Some(CloudLayer {
                    density: 0.8,
                    speed: 0.15,
                    dark: false,
                    foreground_wisps: false,
                }),
                precipitation: Some(Precipitation::Rain { count: 800 }),
                lightning: false,
                mist: false,
            },
            Self::Snowy => EffectLayers {
                celestial_body: false,
                clouds: Some(CloudLayer {
                    density: 0.6,
                    speed: 0.05,
                    dark: false,
                    foreground_wisps: false,
                }),
                precipitation: Some(Precipitation::Snow { count: 400 }),
                lightning: false,
                mist: false,
            },
            Self::Stormy => EffectLayers {
                celestial_body: false,
                clouds: Some(CloudLayer {
                    density: 0.9,
                    speed: 0.2,
                    dark: true,
                    foreground_wisps: false,
                }),
                precipitation: Some(Precipitation::Rain { count: 1500 }),
                lightning: true,
                mist: false,
            },
            Self::Foggy => EffectLayers {
                celestial_body: false,
                clouds: Some(CloudLayer {
                    density: 0.9,
                    speed: 0.05,
                    dark: false,
                    foreground_wisps: false,
                }),
                precipitation: None,
                lightning: false,
                mist: true,
            },
        }
    }

    #[must_use]
    pub fn label(self, is_night: bool) -> &'static str {
        let pick = |day: &'static str, night: &'static str| if is_night { night } else { day };
        match self {
            Self::Sunny {
                partly_cloudy: false,
            } => pick("sun", "moon"),
            Self::Sunny {
                partly_cloudy: true,
            } => pick("sun + light clouds", "moon + light clouds"),
            Self::Cloudy {
                partly_cloudy: true,
            } => pick("sun + clouds", "moon + clouds"),
            Self::Cloudy {
                partly_cloudy: false,
            } => "full cloud cover",
            Self::Rainy => "dense clouds + rain",
            Self::Snowy => "clouds + snow",
            Self::Stormy => "storm clouds + rain + lightning",
            Self::Foggy => "dense fog",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfiguration {
    pub time_of_day: TimeOfDay,
    pub is_night: bool,
    /// Fractional civil hour the configuration was derived from.
    pub hour: f32,
    pub background_color: Rgb,
    /// Unit vector towards the sun (day arc) or the moon (night).
    pub sun_or_moon_direction: Vec3,
    pub sky_turbidity: f32,
    pub sky_inclination: f32,
    pub ambient_light_intensity: f32,
    pub directional_light_intensity: f32,
    pub directional_light_color: Rgb,
    pub show_lens_flare: bool,
    /// `None` while no weather has loaded; only the bare sky is drawn.
    pub effect: Option<WeatherEffect>,
    pub category: Option<ConditionCategory>,
}

impl SceneConfiguration {
    #[must_use]
    pub fn shows_celestial_body(&self) -> bool {
        self.effect.is_some_and(WeatherEffect::shows_celestial_body)
    }
}

/// Resolves against the record's local time, falling back to the system
/// clock when the record has none.
#[must_use]
pub fn resolve_scene(record: &WeatherRecord) -> SceneConfiguration {
    resolve_scene_at(record, system_hour())
}

/// Deterministic form of [`resolve_scene`]: `fallback_hour` is only used
/// when `record.location.local_time` is `None`.
#[must_use]
pub fn resolve_scene_at(record: &WeatherRecord, fallback_hour: f32) -> SceneConfiguration {
    let hour = record
        .location
        .local_time
        .map_or(fallback_hour, fractional_hour);
    let text = record.current.condition.text.as_str();
    let category = classify_condition(text);
    let effect = WeatherEffect::select(category, is_partly_cloudy(text));
    build_configuration(hour, Some(category), Some(effect), turbidity_for(text))
}

/// The sky shown before any weather has loaded.
#[must_use]
pub fn idle_scene(hour: f32) -> SceneConfiguration {
    build_configuration(hour, None, None, CLEAR_TURBIDITY)
}

fn build_configuration(
    hour: f32,
    category: Option<ConditionCategory>,
    effect: Option<WeatherEffect>,
    day_turbidity: f32,
) -> SceneConfiguration {
    let time_of_day = time_of_day(hour);
    let is_night = time_of_day == TimeOfDay::Night;
    let (ambient, directional) = light_intensities(time_of_day);
    let (sky_turbidity, sky_inclination) = if is_night {
        (20.0, 0.3)
    } else {
        (day_turbidity, 0.9)
    };
    let show_lens_flare = !is_night && effect.is_some_and(WeatherEffect::shows_celestial_body);

    SceneConfiguration {
        time_of_day,
        is_night,
        hour,
        background_color: background_color(time_of_day, category),
        sun_or_moon_direction: celestial_direction(hour),
        sky_turbidity,
        sky_inclination,
        ambient_light_intensity: ambient,
        directional_light_intensity: directional,
        directional_light_color: directional_light_color(time_of_day),
        show_lens_flare,
        effect,
        category,
    }
}

#[must_use]
pub fn background_color(time_of_day: TimeOfDay, category: Option<ConditionCategory>) -> Rgb {
    match time_of_day {
        TimeOfDay::Night => NIGHT_SKY,
        TimeOfDay::Dawn => DAWN_SKY,
        TimeOfDay::Dusk => DUSK_SKY,
        TimeOfDay::Day => match category {
            Some(ConditionCategory::Stormy) => STORM_SKY,
            Some(ConditionCategory::Rainy | ConditionCategory::Foggy) => OVERCAST_SKY,
            Some(ConditionCategory::Cloudy) => CLOUDY_SKY,
            Some(ConditionCategory::Sunny | ConditionCategory::Snowy) | None => CLEAR_SKY,
        },
    }
}

/// `(ambient, directional)` light intensities.
#[must_use]
pub fn light_intensities(time_of_day: TimeOfDay) -> (f32, f32) {
    match time_of_day {
        TimeOfDay::Dawn | TimeOfDay::Dusk => (0.25, 0.6),
        TimeOfDay::Night => (0.2, 0.5),
        TimeOfDay::Day => (0.4, 1.0),
    }
}

#[must_use]
pub fn directional_light_color(time_of_day: TimeOfDay) -> Rgb {
    match time_of_day {
        TimeOfDay::Dawn => DAWN_LIGHT,
        TimeOfDay::Dusk => DUSK_LIGHT,
        TimeOfDay::Night => MOON_LIGHT,
        TimeOfDay::Day => DAY_LIGHT,
    }
}

const CLEAR_TURBIDITY: f32 = 2.0;

fn turbidity_for(text: &str) -> f32 {
    let lower = text.to_lowercase();
    if lower.contains("storm") || lower.contains("heavy rain") {
        8.0
    } else if lower.contains("rain") || lower.contains("overcast") {
        6.0
    } else if lower.contains("cloudy") {
        4.0
    } else {
        CLEAR_TURBIDITY
    }
}

/// Sun on an east→west arc between 06:00 and 18:00, fixed moon direction
/// otherwise. Elevation is lifted so the sun stays above the horizon.
#[must_use]
pub fn celestial_direction(hour: f32) -> Vec3 {
    if !(6.0..=18.0).contains(&hour) {
        return Vec3::new(0.0, -30.0, 50.0).normalize();
    }
    let progress = (hour - 6.0) / 12.0;
    let angle = progress * PI;
    let elevation = angle.sin() * 0.7 + 0.3;
    Vec3::new(
        (angle - PI / 2.0).sin() * 0.8,
        elevation,
        (angle - PI / 2.0).cos() * 0.3,
    )
    .normalize()
}

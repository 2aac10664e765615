//! Plain-text rendition of a resolved scene for `--one-shot`.

use std::fmt::Write as _;

use crate::{
    cli::IconMode,
    domain::{scene::SceneConfiguration, weather::{Units, WeatherRecord, condition_icon}},
    ui::overlay::{forecast_entry, high_low_line, stats_line, temperature_line},
};

#[must_use]
pub fn describe(
    record: &WeatherRecord,
    scene: &SceneConfiguration,
    units: Units,
    icons: IconMode,
) -> String {
    let mut out = String::new();
    let location = &record.location;
    let _ = writeln!(out, "{}", location.name.to_uppercase());
    if !location.region.is_empty() {
        let _ = writeln!(out, "{}", location.region);
    }

    let icon = condition_icon(record.current_category(), icons, scene.is_night);
    let mut headline = format!(
        "{}  {icon} {}",
        temperature_line(record, units),
        record.current.condition.text
    );
    if let Some(high_low) = high_low_line(record, units) {
        let _ = write!(headline, "  ({high_low})");
    }
    let _ = writeln!(out, "{headline}");

    let local = location
        .local_time
        .map_or_else(|| "unknown".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string());
    let _ = writeln!(out, "Local time {local} · {}", scene.time_of_day.label());
    if let Some(effect) = scene.effect {
        let _ = writeln!(out, "Scene: {}", effect.label(scene.is_night));
    }
    let _ = writeln!(
        out,
        "Sky {} · turbidity {:.1} · inclination {:.2}",
        scene.background_color.to_hex_string(),
        scene.sky_turbidity,
        scene.sky_inclination
    );
    let _ = writeln!(
        out,
        "Light: ambient {:.2} · directional {:.2} {}",
        scene.ambient_light_intensity,
        scene.directional_light_intensity,
        scene.directional_light_color.to_hex_string()
    );
    let _ = writeln!(
        out,
        "Lens flare: {}",
        if scene.show_lens_flare { "on" } else { "off" }
    );

    let strip = record
        .forecast_days
        .iter()
        .enumerate()
        .map(|(i, day)| forecast_entry(i, day, units, icons))
        .collect::<Vec<_>>()
        .join("   ");
    if !strip.is_empty() {
        let _ = writeln!(out, "{strip}");
    }
    let _ = writeln!(out, "{}", stats_line(record, units));
    out
}

use std::{f32::consts::PI, time::Duration};

use super::*;
use crate::{
    domain::scene::Precipitation,
    test_support::{ready_state, sample_record, still_cli, test_cli},
};

const WIDTH: usize = 80;
const HEIGHT: usize = 24;

fn canvas_for(condition: &str, local_time: &str) -> SkyCanvas {
    let state = ready_state(&still_cli(), sample_record(condition, local_time));
    build_canvas(&state, WIDTH, HEIGHT)
}

fn find(canvas: &SkyCanvas, ch: char) -> Option<(usize, usize)> {
    canvas.rows().iter().enumerate().find_map(|(y, row)| {
        row.iter()
            .position(|cell| cell.ch == ch)
            .map(|x| (x, y))
    })
}

#[test]
fn clear_afternoon_draws_sun_and_flare() {
    let canvas = canvas_for("Sunny", "2024-06-01 14:00");
    assert!(find(&canvas, '●').is_some());
    assert!(canvas.count(Tone::Sun) > 0);
    assert!(canvas.count(Tone::Flare) > 0);
    assert_eq!(canvas.count(Tone::Moon), 0);
    assert_eq!(canvas.count(Tone::Cloud), 0);
}

#[test]
fn clear_night_draws_moon_and_stars_without_flare() {
    let canvas = canvas_for("Clear", "2024-06-01 22:00");
    assert!(canvas.count(Tone::Moon) > 0);
    assert!(canvas.count(Tone::Star) > 0);
    assert_eq!(canvas.count(Tone::Sun), 0);
    assert_eq!(canvas.count(Tone::Flare), 0);
}

#[test]
fn overcast_hides_the_sun() {
    let canvas = canvas_for("Overcast", "2024-06-01 12:00");
    assert_eq!(canvas.count(Tone::Sun), 0);
    assert_eq!(canvas.count(Tone::Flare), 0);
    assert!(canvas.count(Tone::Cloud) > 0);
}

#[test]
fn partly_cloudy_day_has_sun_and_clouds() {
    let canvas = canvas_for("Partly cloudy", "2024-06-01 14:00");
    assert!(canvas.count(Tone::Sun) > 0);
    assert!(canvas.count(Tone::Cloud) > 0);
}

#[test]
fn storm_clouds_are_dark_and_bolt_shows_while_lit() {
    let mut state = ready_state(&test_cli(&[]), sample_record("Thunderstorm", "2024-06-01 15:00"));
    let dark = build_canvas(&state, WIDTH, HEIGHT);
    assert!(dark.count(Tone::StormCloud) > 0);
    assert_eq!(dark.count(Tone::Bolt), 0);

    state.lightning.strike(0b1010_1100);
    let lit = build_canvas(&state, WIDTH, HEIGHT);
    assert!(lit.count(Tone::Bolt) > 0);
}

#[test]
fn rain_particles_are_painted() {
    let mut state = ready_state(&test_cli(&[]), sample_record("Heavy rain", "2024-06-01 22:00"));
    state.particles.update(
        Some(Precipitation::Rain { count: 800 }),
        0.0,
        Duration::from_millis(50),
    );
    let canvas = build_canvas(&state, WIDTH, HEIGHT);
    assert!(canvas.count(Tone::Rain) > 0);
    assert_eq!(canvas.count(Tone::Moon), 0);
}

#[test]
fn fog_paints_mist_bands() {
    let canvas = canvas_for("Fog", "2024-06-01 10:00");
    assert!(canvas.count(Tone::Mist) > WIDTH);
}

#[test]
fn no_weather_is_bare_sky() {
    let state = AppState::new(&still_cli());
    let canvas = build_canvas(&state, WIDTH, HEIGHT);
    assert_eq!(canvas.count(Tone::Sky), WIDTH * HEIGHT);
}

#[test]
fn orbiting_pans_the_sun() {
    let mut state = ready_state(&still_cli(), sample_record("Sunny", "2024-06-01 14:00"));
    let before = find(&build_canvas(&state, WIDTH, HEIGHT), '●').expect("sun");
    state.camera.rotate(PI, 0.0);
    let after = find(&build_canvas(&state, WIDTH, HEIGHT), '●').expect("sun");
    assert_ne!(before.0, after.0);
    assert_eq!(before.1, after.1);
}

#[test]
fn zooming_in_uses_large_art() {
    let mut state = ready_state(&still_cli(), sample_record("Sunny", "2024-06-01 14:00"));
    let small = build_canvas(&state, WIDTH, HEIGHT).count(Tone::Sun);
    state.camera.zoom(-5.0);
    let large = build_canvas(&state, WIDTH, HEIGHT).count(Tone::Sun);
    assert!(large > small);
}

#[test]
fn tiny_views_do_not_panic() {
    let state = ready_state(&test_cli(&[]), sample_record("Blizzard", "2024-06-01 03:00"));
    for (w, h) in [(0, 0), (1, 1), (3, 2), (5, 40)] {
        let _ = build_canvas(&state, w, h);
    }
}

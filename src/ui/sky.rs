#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use std::f32::consts::PI;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::state::AppState,
    domain::{
        camera::OrbitCamera,
        scene::{CloudLayer, Rgb, SceneConfiguration, TimeOfDay},
    },
    ui::particles::{Particle, ParticleKind},
};

const SUN_ART: [&str; 3] = ["\\ | /", "- ● -", "/ | \\"];
const SUN_ART_LARGE: [&str; 5] = ["\\  |  /", " .---. ", "-( ● )-", " '---' ", "/  |  \\"];
const MOON_ART: [&str; 3] = [" .-.", "(  (", " `-'"];
const MOON_ART_LARGE: [&str; 5] = ["  .--.", " /  .'", "|  (  ", " \\  '.", "  `--'"];
/// Camera scale above which the large celestial art is used.
const LARGE_ART_SCALE: f32 = 1.3;

/// Flare elements as fractions of the way from the sun to the view centre.
const FLARE_CHAIN: [(f32, char); 5] = [
    (0.35, '·'),
    (0.6, 'o'),
    (0.85, '·'),
    (1.15, '○'),
    (1.45, '◦'),
];

/// Paint layer of a cell. Later variants draw over earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tone {
    Sky,
    Star,
    Flare,
    Sun,
    Moon,
    Cloud,
    StormCloud,
    Mist,
    Rain,
    Snow,
    Bolt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub tone: Tone,
}

const BLANK: Cell = Cell {
    ch: ' ',
    tone: Tone::Sky,
};

#[derive(Debug, Clone)]
pub struct SkyCanvas {
    rows: Vec<Vec<Cell>>,
}

impl SkyCanvas {
    fn new(width: usize, height: usize) -> Self {
        Self {
            rows: vec![vec![BLANK; width]; height],
        }
    }

    fn paint(&mut self, x: isize, y: isize, ch: char, tone: Tone) {
        if x < 0 || y < 0 || ch == ' ' {
            return;
        }
        let Some(cell) = self
            .rows
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        else {
            return;
        };
        if tone >= cell.tone {
            *cell = Cell { ch, tone };
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    #[must_use]
    pub fn row_text(&self, y: usize) -> String {
        self.rows
            .get(y)
            .map(|row| row.iter().map(|cell| cell.ch).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn count(&self, tone: Tone) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| cell.tone == tone)
            .count()
    }
}

/// Screen geometry derived from the orbit camera.
struct View {
    width: usize,
    height: usize,
    horizon_y: usize,
    pan: isize,
    scale: f32,
    phase: usize,
}

impl View {
    fn new(camera: &OrbitCamera, width: usize, height: usize, phase: usize) -> Self {
        let horizon = (height as f32 * (0.8 - 0.15 * camera.tilt())).round() as usize;
        Self {
            width,
            height,
            horizon_y: horizon.clamp(3.min(height), height),
            pan: (camera.pan_fraction() * width as f32).round() as isize,
            scale: camera.scale(),
            phase,
        }
    }

    fn wrap_x(&self, x: isize) -> isize {
        (x - self.pan).rem_euclid(self.width.max(1) as isize)
    }
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let canvas = build_canvas(state, usize::from(area.width), usize::from(area.height));
    let flashing = state.lightning.is_lit()
        && state
            .scene
            .effect
            .is_some_and(|effect| effect.layers().lightning);
    let background = sky_color(state.scene.background_color, flashing);
    let lines = canvas
        .rows()
        .iter()
        .map(|row| row_line(row, &state.scene))
        .collect::<Vec<_>>();
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(background)),
        area,
    );
}

/// Paints the scene for a `width`×`height` view. Without weather only the
/// bare sky is drawn.
#[must_use]
pub fn build_canvas(state: &AppState, width: usize, height: usize) -> SkyCanvas {
    let mut canvas = SkyCanvas::new(width, height);
    let scene = &state.scene;
    let Some(effect) = scene.effect else {
        return canvas;
    };
    if width == 0 || height == 0 {
        return canvas;
    }

    let phase = if state.animate_ui {
        state.frame_tick as usize
    } else {
        0
    };
    let view = View::new(&state.camera, width, height, phase);
    let layers = effect.layers();
    let anchor = layers
        .celestial_body
        .then(|| celestial_anchor(scene, &view));

    if let Some(anchor) = anchor {
        if scene.is_night {
            paint_stars(&mut canvas, &view);
        }
        paint_celestial(&mut canvas, anchor, scene.is_night, &view);
        if scene.show_lens_flare {
            paint_lens_flare(&mut canvas, anchor, &view);
        }
    }
    if let Some(clouds) = layers.clouds {
        paint_clouds(&mut canvas, clouds, &view);
        if let (true, Some(anchor)) = (clouds.foreground_wisps, anchor) {
            paint_wisps(&mut canvas, anchor, &view);
        }
    }
    if layers.mist {
        paint_mist(&mut canvas, &view);
    }
    paint_particles(&mut canvas, &state.particles.particles, &view);
    if layers.lightning && state.lightning.is_lit() {
        paint_bolt(&mut canvas, state.lightning.bolt_seed(), &view);
    }
    canvas
}

fn celestial_anchor(scene: &SceneConfiguration, view: &View) -> (isize, isize) {
    let direction = scene.sun_or_moon_direction;
    let centre_x = view.width as f32 / 2.0;
    let (x, y) = if direction.y > 0.0 {
        (
            centre_x + direction.x * view.width as f32 * 0.45,
            view.horizon_y as f32 - direction.y * (view.horizon_y as f32 - 2.0),
        )
    } else {
        // Below the horizon: keep the body in view, high and centred.
        (centre_x, view.horizon_y as f32 * 0.3)
    };
    (view.wrap_x(x.round() as isize), y.round().max(1.0) as isize)
}

fn paint_celestial(canvas: &mut SkyCanvas, (ax, ay): (isize, isize), is_night: bool, view: &View) {
    let large = view.scale >= LARGE_ART_SCALE;
    let (art, tone): (&[&str], Tone) = match (is_night, large) {
        (false, false) => (&SUN_ART, Tone::Sun),
        (false, true) => (&SUN_ART_LARGE, Tone::Sun),
        (true, false) => (&MOON_ART, Tone::Moon),
        (true, true) => (&MOON_ART_LARGE, Tone::Moon),
    };
    let art_width = art.iter().map(|line| line.chars().count()).max().unwrap_or(0) as isize;
    let top = ay - art.len() as isize / 2;
    let left = ax - art_width / 2;
    for (dy, line) in art.iter().enumerate() {
        for (dx, ch) in line.chars().enumerate() {
            canvas.paint(left + dx as isize, top + dy as isize, ch, tone);
        }
    }
}

fn paint_stars(canvas: &mut SkyCanvas, view: &View) {
    let count = (view.width / 5).max(6);
    let rows = view.horizon_y.max(2);
    for i in 0..count {
        let x = view.wrap_x((i * 7 + i * i * 3) as isize);
        let y = (i * 5 + i / 3) % rows;
        let ch = match (i + view.phase / 8) % 4 {
            0 => '*',
            2 => '.',
            _ => '·',
        };
        canvas.paint(x, y as isize, ch, Tone::Star);
    }
}

fn paint_lens_flare(canvas: &mut SkyCanvas, (ax, ay): (isize, isize), view: &View) {
    let centre = (view.width as f32 / 2.0, view.height as f32 / 2.0);
    for (t, ch) in FLARE_CHAIN {
        let x = ax as f32 + (centre.0 - ax as f32) * t;
        let y = ay as f32 + (centre.1 - ay as f32) * t;
        canvas.paint(x.round() as isize, y.round() as isize, ch, Tone::Flare);
    }
}

fn cloud_patterns(rows: usize) -> &'static [&'static [char]] {
    if rows >= 3 {
        &[
            &[' ', '░', '░', '▒', '▒', '░', '░', ' '],
            &['░', '▒', '▓', '▓', '▓', '▓', '▒', '░'],
            &[' ', ' ', '░', '▒', '▒', '░', ' ', ' '],
        ]
    } else {
        &[
            &[' ', '░', '▒', '▒', '▒', '░', ' '],
            &['░', '▒', '▓', '▓', '▒', '░', ' '],
        ]
    }
}

fn paint_clouds(canvas: &mut SkyCanvas, layer: CloudLayer, view: &View) {
    let tone = if layer.dark {
        Tone::StormCloud
    } else {
        Tone::Cloud
    };
    let count = ((layer.density * view.width as f32 / 12.0).ceil() as usize).max(1);
    let rows = if layer.density >= 0.8 { 3 } else { 2 };
    let band = (view.horizon_y * 2 / 3).saturating_sub(rows).max(1);
    let drift = (view.phase as f32 * layer.speed * 0.5) as usize;
    let span = view.width + 16;
    for i in 0..count {
        let cloud_width = ((10 + (i * 7) % 9) as f32 * view.scale).round().max(4.0) as usize;
        let cx = (i * span / count + drift + (i % 3) * 5) % span;
        let cy = (i * 3 + i / 2) % band;
        draw_cloud(canvas, view, (cx as isize - 8, cy as isize), cloud_width, rows, tone);
    }
}

fn draw_cloud(
    canvas: &mut SkyCanvas,
    view: &View,
    (cx, cy): (isize, isize),
    cloud_width: usize,
    rows: usize,
    tone: Tone,
) {
    let patterns = cloud_patterns(rows);
    for (row_idx, pattern) in patterns.iter().enumerate() {
        let y = cy + row_idx as isize;
        for col in 0..cloud_width {
            let pat_idx = (col * pattern.len()) / cloud_width.max(1);
            let ch = pattern[pat_idx.min(pattern.len() - 1)];
            let x = view.wrap_x(cx - (cloud_width / 2) as isize + col as isize);
            canvas.paint(x, y, ch, tone);
        }
    }
}

/// Thin cloud drifting across the celestial body.
fn paint_wisps(canvas: &mut SkyCanvas, (ax, ay): (isize, isize), view: &View) {
    let width = (9.0 * view.scale).round().max(3.0) as isize;
    let shift = ((view.phase / 12) % 5) as isize - 2;
    for dx in 0..width {
        let ch = if dx % 3 == 1 { '▒' } else { '░' };
        canvas.paint(ax - width / 2 + dx + shift, ay + 1, ch, Tone::Cloud);
    }
}

fn paint_mist(canvas: &mut SkyCanvas, view: &View) {
    let density_chars = ['░', '░', '▒', '░'];
    for band in 0..4 {
        let y = view.horizon_y.saturating_sub(3) + band;
        if y >= view.height {
            continue;
        }
        let drift = (view.phase / 2 + band * 7) % view.width;
        for x in 0..view.width {
            let shifted = (x + drift) % view.width;
            let wave = ((shifted as f32 / view.width as f32) * PI * 3.0).sin();
            if wave > -0.2 {
                let idx = ((wave + 1.0) / 2.0 * (density_chars.len() - 1) as f32).round() as usize;
                canvas.paint(
                    x as isize,
                    y as isize,
                    density_chars[idx.min(density_chars.len() - 1)],
                    Tone::Mist,
                );
            }
        }
    }
}

fn paint_particles(canvas: &mut SkyCanvas, particles: &[Particle], view: &View) {
    for particle in particles {
        let tone = match particle.kind {
            ParticleKind::Rain => Tone::Rain,
            ParticleKind::Snow => Tone::Snow,
        };
        canvas.paint(
            (particle.x * view.width as f32) as isize,
            (particle.y * view.height as f32) as isize,
            particle.glyph,
            tone,
        );
    }
}

fn paint_bolt(canvas: &mut SkyCanvas, seed: u64, view: &View) {
    let mut x = (seed % view.width.max(1) as u64) as isize;
    for y in 1..view.horizon_y.saturating_sub(1) {
        let right = (seed >> (y % 64)) & 1 == 1;
        canvas.paint(x, y as isize, if right { '╲' } else { '╱' }, Tone::Bolt);
        x += if right { 1 } else { -1 };
    }
}

fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

fn sky_color(base: Rgb, flashing: bool) -> Color {
    if !flashing {
        return rgb(base);
    }
    let lift = |channel: u8| ((u16::from(channel) + 220) / 2) as u8;
    Color::Rgb(lift(base.r), lift(base.g), lift(base.b).max(200))
}

fn tone_color(tone: Tone, scene: &SceneConfiguration) -> Color {
    let shade = |base: f32| {
        let v = (base * (0.45 + scene.ambient_light_intensity * 1.4)).clamp(0.0, 255.0) as u8;
        Color::Rgb(v, v, v)
    };
    match tone {
        Tone::Sky => rgb(scene.background_color),
        Tone::Star => Color::Rgb(235, 235, 255),
        Tone::Flare => rgb(scene.directional_light_color),
        Tone::Sun => match scene.time_of_day {
            TimeOfDay::Day => Color::Rgb(255, 214, 80),
            _ => rgb(scene.directional_light_color),
        },
        Tone::Moon => Color::Rgb(225, 228, 240),
        Tone::Cloud => shade(245.0),
        Tone::StormCloud => shade(110.0),
        Tone::Mist => shade(215.0),
        Tone::Rain => Color::Rgb(150, 185, 235),
        Tone::Snow => Color::Rgb(245, 248, 255),
        Tone::Bolt => Color::Rgb(255, 250, 210),
    }
}

fn row_line(row: &[Cell], scene: &SceneConfiguration) -> Line<'static> {
    let mut spans = Vec::new();
    let mut run = String::new();
    let mut tone = Tone::Sky;
    for cell in row {
        if cell.tone != tone && !run.is_empty() {
            spans.push(Span::styled(
                std::mem::take(&mut run),
                Style::default().fg(tone_color(tone, scene)),
            ));
        }
        tone = cell.tone;
        run.push(cell.ch);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, Style::default().fg(tone_color(tone, scene))));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests;

use std::time::Duration;

use rand::Rng;

use crate::domain::scene::Precipitation;

/// Seconds between spawn batches.
const SPAWN_INTERVAL: f32 = 0.04;
/// Scene particle counts are divided by this to get one spawn batch.
const BATCH_DIVISOR: u16 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Rain,
    Snow,
}

/// Position and velocity in view fractions (`0.0..1.0` across and down).
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub kind: ParticleKind,
    pub glyph: char,
}

#[derive(Debug)]
pub struct ParticleEngine {
    disabled: bool,
    reduced_motion: bool,
    pub particles: Vec<Particle>,
    accumulator: f32,
}

impl ParticleEngine {
    pub fn new(disabled: bool, reduced_motion: bool) -> Self {
        Self {
            disabled,
            reduced_motion,
            particles: Vec::new(),
            accumulator: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.particles.clear();
        self.accumulator = 0.0;
    }

    pub fn update(&mut self, precipitation: Option<Precipitation>, wind_mph: f32, dt: Duration) {
        let Some(precipitation) = precipitation.filter(|_| !self.disabled) else {
            self.particles.clear();
            return;
        };

        let dt = dt.as_secs_f32().clamp(0.0, 0.25);
        self.accumulator += dt;

        let (kind, count) = match precipitation {
            Precipitation::Rain { count } => (ParticleKind::Rain, count),
            Precipitation::Snow { count } => (ParticleKind::Snow, count),
        };
        let drift = (wind_mph / 40.0).clamp(0.0, 1.0);
        let mut batch = usize::from((count / BATCH_DIVISOR).max(1));
        if self.reduced_motion {
            batch = (batch / 4).max(1);
        }

        if self.accumulator >= SPAWN_INTERVAL {
            self.accumulator = 0.0;
            let room = usize::from(count).saturating_sub(self.particles.len());
            for _ in 0..batch.min(room) {
                self.particles.push(spawn_particle(kind, drift));
            }
        }

        let step = dt * 60.0;
        for p in &mut self.particles {
            p.x += p.vx * step;
            p.y += p.vy * step;
        }
        self.particles
            .retain(|p| p.y < 1.2 && p.x > -0.2 && p.x < 1.2);
    }
}

fn spawn_particle(kind: ParticleKind, drift: f32) -> Particle {
    let mut rng = rand::rng();
    let x = rng.random_range(-0.1..1.0);

    match kind {
        ParticleKind::Rain => Particle {
            x,
            y: 0.0,
            vx: (drift * 0.002) + rng.random_range(-0.0005..0.0005),
            vy: rng.random_range(0.008..0.015),
            kind,
            glyph: if drift > 0.4 { '╲' } else { '│' },
        },
        ParticleKind::Snow => Particle {
            x,
            y: 0.0,
            vx: (drift * 0.001) + rng.random_range(-0.0015..0.0015),
            vy: rng.random_range(0.002..0.006),
            kind,
            glyph: if rng.random_bool(0.3) { '*' } else { '•' },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(50);

    #[test]
    fn rain_spawns_and_falls() {
        let mut engine = ParticleEngine::new(false, false);
        engine.update(Some(Precipitation::Rain { count: 800 }), 0.0, FRAME);
        assert_eq!(engine.particles.len(), 8);
        assert!(engine.particles.iter().all(|p| p.kind == ParticleKind::Rain));
        assert!(engine.particles.iter().all(|p| p.y > 0.0));
    }

    #[test]
    fn storm_rain_is_denser_than_rain() {
        let mut rain = ParticleEngine::new(false, false);
        let mut storm = ParticleEngine::new(false, false);
        rain.update(Some(Precipitation::Rain { count: 800 }), 0.0, FRAME);
        storm.update(Some(Precipitation::Rain { count: 1500 }), 0.0, FRAME);
        assert!(storm.particles.len() > rain.particles.len());
    }

    #[test]
    fn clear_sky_or_disabled_engine_has_no_particles() {
        let mut engine = ParticleEngine::new(false, false);
        engine.update(Some(Precipitation::Snow { count: 400 }), 5.0, FRAME);
        assert!(!engine.particles.is_empty());
        engine.update(None, 5.0, FRAME);
        assert!(engine.particles.is_empty());

        let mut disabled = ParticleEngine::new(true, false);
        disabled.update(Some(Precipitation::Snow { count: 400 }), 5.0, FRAME);
        assert!(disabled.particles.is_empty());
    }

    #[test]
    fn reduced_motion_spawns_fewer() {
        let mut engine = ParticleEngine::new(false, true);
        engine.update(Some(Precipitation::Rain { count: 1500 }), 0.0, FRAME);
        assert_eq!(engine.particles.len(), 3);
    }

    #[test]
    fn live_particles_never_exceed_scene_count() {
        let mut engine = ParticleEngine::new(false, false);
        for _ in 0..200 {
            engine.update(Some(Precipitation::Snow { count: 400 }), 0.0, FRAME);
        }
        assert!(engine.particles.len() <= 400);
    }
}

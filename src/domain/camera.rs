use std::f32::consts::{PI, TAU};

use glam::Vec3;

pub const MIN_POLAR: f32 = PI / 4.0;
pub const MAX_POLAR: f32 = PI / 1.8;
pub const MIN_DISTANCE: f32 = 3.0;
pub const MAX_DISTANCE: f32 = 20.0;

const TARGET: Vec3 = Vec3::new(0.0, 2.0, 0.0);
const START_POSITION: Vec3 = Vec3::new(0.0, 1.0, 8.0);

/// Orbit camera around the scene target. Azimuth wraps, polar angle and
/// distance are clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub azimuth: f32,
    pub polar: f32,
    pub distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        let offset = START_POSITION - TARGET;
        let distance = offset.length();
        Self {
            azimuth: offset.x.atan2(offset.z),
            polar: (offset.y / distance).acos().clamp(MIN_POLAR, MAX_POLAR),
            distance: distance.clamp(MIN_DISTANCE, MAX_DISTANCE),
        }
    }
}

impl OrbitCamera {
    pub fn rotate(&mut self, delta_azimuth: f32, delta_polar: f32) {
        self.azimuth = (self.azimuth + delta_azimuth).rem_euclid(TAU);
        self.polar = (self.polar + delta_polar).clamp(MIN_POLAR, MAX_POLAR);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        TARGET + Vec3::new(sin_polar * sin_az, cos_polar, sin_polar * cos_az) * self.distance
    }

    /// Horizontal pan of the sky as a fraction of the view width.
    #[must_use]
    pub fn pan_fraction(&self) -> f32 {
        self.azimuth / TAU
    }

    /// How far the horizon is lifted (positive) or lowered, in `-1.0..=1.0`.
    #[must_use]
    pub fn tilt(&self) -> f32 {
        let mid = (MIN_POLAR + MAX_POLAR) / 2.0;
        ((self.polar - mid) / ((MAX_POLAR - MIN_POLAR) / 2.0)).clamp(-1.0, 1.0)
    }

    /// Apparent size multiplier of scene objects, 1.0 at the start distance.
    #[must_use]
    pub fn scale(&self) -> f32 {
        Self::default().distance / self.distance
    }
}

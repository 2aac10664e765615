use std::time::Duration;

use rand::Rng;

/// Chance per frame that a storm sky flashes.
const FLASH_CHANCE: f64 = 0.01;
const FLASH_SECONDS: f32 = 0.1;

/// Storm lightning with its own timer. The renderer only asks whether it is
/// lit and where the bolt falls.
#[derive(Debug)]
pub struct LightningFlash {
    disabled: bool,
    reduced_motion: bool,
    timer: f32,
    bolt_seed: u64,
}

impl LightningFlash {
    pub fn new(disabled: bool, reduced_motion: bool) -> Self {
        Self {
            disabled,
            reduced_motion,
            timer: 0.0,
            bolt_seed: 0,
        }
    }

    #[must_use]
    pub fn is_lit(&self) -> bool {
        self.timer > 0.0
    }

    /// Stable for the duration of one flash, new for the next.
    #[must_use]
    pub fn bolt_seed(&self) -> u64 {
        self.bolt_seed
    }

    pub fn update(&mut self, storm_active: bool, dt: Duration) {
        if self.disabled || !storm_active {
            self.timer = 0.0;
            return;
        }
        let chance = if self.reduced_motion {
            FLASH_CHANCE / 4.0
        } else {
            FLASH_CHANCE
        };
        let mut rng = rand::rng();
        if !self.is_lit() && rng.random_bool(chance) {
            self.strike(rng.random());
            return;
        }
        self.timer = (self.timer - dt.as_secs_f32()).max(0.0);
    }

    pub fn strike(&mut self, bolt_seed: u64) {
        if self.disabled {
            return;
        }
        self.timer = FLASH_SECONDS;
        self.bolt_seed = bolt_seed;
    }
}

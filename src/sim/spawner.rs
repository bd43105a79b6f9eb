//! Asteroid population control
//!
//! The spawner keeps the number of live asteroids at its target, adding at
//! most one per tick, and raises the target at a fixed simulated-time
//! interval while a game runs.

use rand::Rng;

use super::entity::Asteroid;
use super::path::{random_selector, resolve_spawn};
use super::state::Canvas;
use crate::settings::Settings;
use crate::tick_ms;

/// Randomisation ranges for new asteroids
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnTuning {
    pub min_size: u32,
    pub max_size: u32,
    pub min_speed: f32,
    pub max_speed: f32,
}

impl SpawnTuning {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            min_size: settings.asteroid_min_size,
            max_size: settings.asteroid_max_size,
            min_speed: settings.asteroid_min_speed,
            max_speed: settings.asteroid_max_speed,
        }
    }

    fn roll_size<R: Rng>(&self, rng: &mut R) -> f32 {
        if self.max_size > self.min_size {
            rng.random_range(self.min_size..self.max_size) as f32
        } else {
            self.min_size as f32
        }
    }

    fn roll_speed<R: Rng>(&self, rng: &mut R) -> f32 {
        if self.max_speed > self.min_speed {
            rng.random_range(self.min_speed..self.max_speed)
        } else {
            self.min_speed
        }
    }
}

/// Population target and difficulty ramp
#[derive(Debug, Clone)]
pub struct Spawner {
    initial_target: usize,
    target: usize,
    /// Ticks between target increments (0 disables the ramp)
    escalation_ticks: u64,
    next_escalation_tick: u64,
    tuning: SpawnTuning,
}

impl Spawner {
    pub fn new(settings: &Settings) -> Self {
        let escalation_ticks = if settings.escalation_interval_ms == 0 {
            0
        } else {
            ((settings.escalation_interval_ms as f64 / tick_ms()).round() as u64).max(1)
        };
        Self {
            initial_target: settings.initial_asteroids,
            target: settings.initial_asteroids,
            escalation_ticks,
            next_escalation_tick: escalation_ticks,
            tuning: SpawnTuning::from_settings(settings),
        }
    }

    /// Back to the initial target; called on every game start
    pub fn reset(&mut self) {
        self.target = self.initial_target;
        self.next_escalation_tick = self.escalation_ticks;
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// Raise the target if the running clock has reached the next threshold
    ///
    /// Returns true when the target changed.
    pub fn escalate(&mut self, elapsed_ticks: u64) -> bool {
        if self.escalation_ticks == 0 || elapsed_ticks < self.next_escalation_tick {
            return false;
        }
        self.target += 1;
        self.next_escalation_tick += self.escalation_ticks;
        log::debug!(
            "Difficulty raised at tick {}: {} asteroids",
            elapsed_ticks,
            self.target
        );
        true
    }

    /// Create one fresh asteroid with randomised size, speed, shade and path
    pub fn spawn<R: Rng>(&self, id: u32, canvas: Canvas, rng: &mut R) -> Asteroid {
        let size = self.tuning.roll_size(rng);
        let speed = self.tuning.roll_speed(rng);
        let shade = rng.random_range(160..=255u8);
        let selector = random_selector(rng);
        let spawn = resolve_spawn(selector, size, canvas, rng);

        log::debug!(
            "Asteroid {} from selector {}: path={} pos=({}, {}) size={} speed={:.2}",
            id,
            selector,
            spawn.path.code(),
            spawn.pos.x,
            spawn.pos.y,
            size,
            speed
        );

        Asteroid::new(id, spawn, size, speed, shade)
    }

    /// True when the live count is below target and one asteroid should be added
    #[inline]
    pub fn wants_spawn(&self, live: usize) -> bool {
        live < self.target
    }
}

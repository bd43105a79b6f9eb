//! Game settings and tuning
//!
//! Persisted as JSON in the key-value store. Missing fields fall back to the
//! defaults in [`crate::consts`], so a stored blob only needs the values it
//! wants to override.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::platform::KeyValueStore;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Difficulty ===
    /// Asteroids alive when a game starts
    pub initial_asteroids: usize,
    /// Simulated time between population target increments (0 = never)
    pub escalation_interval_ms: u64,

    // === Asteroids ===
    /// Side length range [min, max); equal bounds give a fixed size
    pub asteroid_min_size: u32,
    pub asteroid_max_size: u32,
    /// Speed range [min, max) in pixels per tick
    pub asteroid_min_speed: f32,
    pub asteroid_max_speed: f32,

    // === Player & background ===
    pub player_size: f32,
    pub star_speed: f32,

    /// Fixed RNG seed (clock-seeded when absent)
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background loop volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_asteroids: INITIAL_ASTEROIDS,
            escalation_interval_ms: ESCALATION_INTERVAL_MS,

            asteroid_min_size: ASTEROID_MIN_SIZE,
            asteroid_max_size: ASTEROID_MAX_SIZE,
            asteroid_min_speed: ASTEROID_MIN_SPEED,
            asteroid_max_speed: ASTEROID_MAX_SPEED,

            player_size: PLAYER_SIZE,
            star_speed: STAR_SPEED,

            seed: None,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.6,
            muted: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "asteroid_dodge_settings";

    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Repair values that would break the simulation
    ///
    /// Swapped ranges are reordered, non-finite or negative numbers fall back
    /// to their defaults and volumes are clamped to [0, 1].
    pub fn sanitized(mut self) -> Self {
        let defaults = Settings::default();

        if self.asteroid_min_size == 0 {
            self.asteroid_min_size = 1;
        }
        if self.asteroid_max_size < self.asteroid_min_size {
            std::mem::swap(&mut self.asteroid_min_size, &mut self.asteroid_max_size);
        }

        if !self.asteroid_min_speed.is_finite() || self.asteroid_min_speed <= 0.0 {
            self.asteroid_min_speed = defaults.asteroid_min_speed;
        }
        if !self.asteroid_max_speed.is_finite() || self.asteroid_max_speed <= 0.0 {
            self.asteroid_max_speed = defaults.asteroid_max_speed;
        }
        if self.asteroid_max_speed < self.asteroid_min_speed {
            std::mem::swap(&mut self.asteroid_min_speed, &mut self.asteroid_max_speed);
        }

        if !self.player_size.is_finite() || self.player_size <= 0.0 {
            self.player_size = defaults.player_size;
        }
        if !self.star_speed.is_finite() || self.star_speed < 0.0 {
            self.star_speed = defaults.star_speed;
        }

        self.master_volume = clamp_volume(self.master_volume, defaults.master_volume);
        self.sfx_volume = clamp_volume(self.sfx_volume, defaults.sfx_volume);
        self.music_volume = clamp_volume(self.music_volume, defaults.music_volume);
        self
    }

    /// Effective background loop volume
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Effective one-shot volume
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Load settings from the store, falling back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from storage");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable settings: {}", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to the store
    pub fn save(&self, store: &mut impl KeyValueStore) {
        match self.to_json() {
            Ok(json) => {
                store.set(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
            Err(e) => log::warn!("Could not serialize settings: {}", e),
        }
    }
}

fn clamp_volume(volume: f32, fallback: f32) -> f32 {
    if volume.is_finite() {
        volume.clamp(0.0, 1.0)
    } else {
        fallback
    }
}

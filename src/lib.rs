//! Asteroid Dodge - a single-screen arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, kinematics, collisions, game state)
//! - `game`: Session glue between the simulation, best time and audio cues
//! - `renderer`: Draw-call emission against an abstract 2D surface
//! - `platform`: Browser/native platform abstraction (frames, input, storage)
//! - `settings`: Data-driven game tuning
//! - `best_time`: Longest survival, persisted through the platform store
//! - `audio`: Procedural Web Audio cues (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod best_time;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use best_time::{BestTime, GameResult};
pub use game::{AudioCues, FrameOutcome, NullAudio, Session};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Horizontal star drift per tick
    pub const STAR_SPEED: f32 = 0.5;

    /// Asteroids alive at the start of every game
    pub const INITIAL_ASTEROIDS: usize = 5;
    /// Simulated time between population target increments
    pub const ESCALATION_INTERVAL_MS: u64 = 10_000;
    /// Asteroid side length range [min, max)
    pub const ASTEROID_MIN_SIZE: u32 = 20;
    pub const ASTEROID_MAX_SIZE: u32 = 50;
    /// Asteroid per-tick speed range [min, max)
    pub const ASTEROID_MIN_SPEED: f32 = 1.0;
    pub const ASTEROID_MAX_SPEED: f32 = 4.0;
    /// Corner/edge spawns sit this many sizes outside the canvas
    pub const SPAWN_OFFSET: f32 = 1.5;
    /// An asteroid is gone once it is this many sizes past the left/top edge
    pub const GONE_MARGIN: f32 = 2.0;

    /// Player side length
    pub const PLAYER_SIZE: f32 = 80.0;
}

/// Simulated milliseconds covered by one tick
#[inline]
pub fn tick_ms() -> f64 {
    consts::SIM_DT as f64 * 1000.0
}

/// Format a duration in milliseconds as `mm:ss:mmm`
///
/// Minutes are not capped, so an hour-long run prints as `60:00:000`.
pub fn format_duration(duration_ms: u64) -> String {
    let minutes = duration_ms / 60_000;
    let seconds = (duration_ms / 1000) % 60;
    let millis = duration_ms % 1000;
    format!("{minutes:02}:{seconds:02}:{millis:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(65432), "01:05:432");
        assert_eq!(format_duration(0), "00:00:000");
        assert_eq!(format_duration(999), "00:00:999");
        assert_eq!(format_duration(3_600_000), "60:00:000");
    }

    #[test]
    fn test_tick_ms() {
        assert!((tick_ms() - 16.666).abs() < 0.01);
    }
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no wall-clock reads
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod path;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, first_collision};
pub use entity::{Asteroid, Direction, Entity, Player, Star};
pub use path::{PathTag, Spawn, random_selector, resolve_spawn};
pub use spawner::{SpawnTuning, Spawner};
pub use state::{Canvas, GamePhase, GameState};
pub use tick::{TickOutcome, tick};

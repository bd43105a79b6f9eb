//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame scheduling (requestAnimationFrame on web)
//! - Input events
//! - Storage (LocalStorage on web)

pub mod frame;
pub mod input;
pub mod storage;

pub use frame::{FrameId, FrameLoop, FrameScheduler, LoopMode};
pub use input::{direction_from_key, direction_from_key_code};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
pub use storage::{KeyValueStore, MemoryStore};

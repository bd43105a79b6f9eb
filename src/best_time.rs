//! Best survival time
//!
//! A single number persisted under one key: the longest game, in ms.

use serde::{Deserialize, Serialize};

use crate::format_duration;
use crate::platform::KeyValueStore;

/// Outcome of a finished game, ready for presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// How long the player survived
    pub duration_ms: u64,
    /// This game set a new best
    pub is_new_best: bool,
    /// Best time after this game (equals `duration_ms` on a new best)
    pub best_ms: u64,
}

impl GameResult {
    /// Two-line summary shown on the result screen
    pub fn message(&self) -> String {
        if self.is_new_best {
            format!(
                "Duration: {}\nCongrats! You have the best duration.",
                format_duration(self.duration_ms)
            )
        } else {
            format!(
                "Duration: {}\nBest duration: {}",
                format_duration(self.duration_ms),
                format_duration(self.best_ms)
            )
        }
    }
}

/// Best survival time tracker
#[derive(Debug, Clone, Default)]
pub struct BestTime {
    best_ms: Option<u64>,
}

impl BestTime {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "bestDuration";

    /// Read the stored best; anything unreadable counts as no best
    pub fn load(store: &impl KeyValueStore) -> Self {
        let best_ms = store.get(Self::STORAGE_KEY).and_then(|raw| parse_ms(&raw));
        match best_ms {
            Some(ms) => log::info!("Best duration on record: {} ms", ms),
            None => log::info!("No best duration on record"),
        }
        Self { best_ms }
    }

    pub fn best_ms(&self) -> Option<u64> {
        self.best_ms
    }

    /// Check if a duration beats the record
    pub fn qualifies(&self, duration_ms: u64) -> bool {
        self.best_ms.is_none_or(|best| duration_ms > best)
    }

    /// Record a finished game, writing it to the store if it is a new best
    pub fn record(&mut self, store: &mut impl KeyValueStore, duration_ms: u64) -> GameResult {
        if self.qualifies(duration_ms) {
            self.best_ms = Some(duration_ms);
            store.set(Self::STORAGE_KEY, &duration_ms.to_string());
            log::info!("New best duration: {} ms", duration_ms);
            GameResult {
                duration_ms,
                is_new_best: true,
                best_ms: duration_ms,
            }
        } else {
            GameResult {
                duration_ms,
                is_new_best: false,
                best_ms: self.best_ms.unwrap_or(0),
            }
        }
    }
}

/// Accept integer or float millisecond strings
fn parse_ms(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(ms) = raw.parse::<u64>() {
        return Some(ms);
    }
    let ms = raw.parse::<f64>().ok()?;
    (ms.is_finite() && ms >= 0.0).then(|| ms.round() as u64)
}

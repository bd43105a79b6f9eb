//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation by one frame.

use super::collision::first_collision;
use super::state::{GamePhase, GameState};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Start screen: only the stars moved
    Idle,
    /// Game running, no collision
    Advanced,
    /// The player was hit; the game is now Ended
    Collision { asteroid_id: u32, duration_ms: f64 },
    /// Nothing moved (game over screen)
    Frozen,
}

/// Advance the game state by one tick
///
/// While Running the order is fixed: stars, population upkeep (drop gone
/// asteroids, maybe spawn one), asteroid movement, then the collision check
/// against the positions just computed.
pub fn tick(state: &mut GameState, now_ms: f64) -> TickOutcome {
    match state.phase {
        GamePhase::Ended => return TickOutcome::Frozen,
        GamePhase::Idle => {
            advance_stars(state);
            return TickOutcome::Idle;
        }
        GamePhase::Running => {}
    }

    state.time_ticks += 1;

    advance_stars(state);

    // Population upkeep
    state.spawner.escalate(state.time_ticks);
    let canvas = state.canvas;
    state.asteroids.retain(|a| !a.is_gone(canvas));
    if state.spawner.wants_spawn(state.asteroids.len()) {
        state.spawn_asteroid();
    }

    for asteroid in &mut state.asteroids {
        asteroid.advance();
    }

    debug_assert!(state.player.is_some(), "running game without a player");
    let Some(player) = state.player.as_ref() else {
        return TickOutcome::Advanced;
    };

    if let Some(index) = first_collision(player, &state.asteroids) {
        let asteroid_id = state.asteroids[index].id;
        log::info!("Collision with asteroid {} at tick {}", asteroid_id, state.time_ticks);
        let duration_ms = state.finish(now_ms).unwrap_or(0.0);
        return TickOutcome::Collision {
            asteroid_id,
            duration_ms,
        };
    }

    TickOutcome::Advanced
}

fn advance_stars(state: &mut GameState) {
    let canvas = state.canvas;
    for star in &mut state.stars {
        star.advance(canvas);
    }
}

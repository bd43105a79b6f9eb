//! Game state and phase transitions
//!
//! `GameState` owns every entity on the playfield. The caller owns the
//! state and drives it through `start`, `tick`, `finish`, `acknowledge`
//! and `resize`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Asteroid, Direction, Entity, Player, Star};
use super::spawner::Spawner;
use crate::settings::Settings;
use crate::tick_ms;

/// Drawable area in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen; only the star field animates
    Idle,
    /// Active gameplay
    Running,
    /// Collision happened; simulation frozen while the result is shown
    Ended,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub canvas: Canvas,
    pub phase: GamePhase,
    pub stars: Vec<Star>,
    /// Live asteroids in spawn order
    pub asteroids: Vec<Asteroid>,
    /// Present only while Running or Ended
    pub player: Option<Player>,
    pub spawner: Spawner,
    /// Ticks simulated since the current game started
    pub time_ticks: u64,
    /// Wall-clock start of the current game (ms)
    pub start_ms: Option<f64>,
    /// Wall-clock end of the last game (ms)
    pub end_ms: Option<f64>,
    settings: Settings,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Idle state with a fresh star field
    pub fn new(canvas: Canvas, settings: Settings, seed: u64) -> Self {
        let settings = settings.sanitized();
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = Star::field(canvas, settings.star_speed, &mut rng);
        Self {
            canvas,
            phase: GamePhase::Idle,
            stars,
            asteroids: Vec::new(),
            player: None,
            spawner: Spawner::new(&settings),
            time_ticks: 0,
            start_ms: None,
            end_ms: None,
            settings,
            rng,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Idle/Ended -> Running
    ///
    /// Replaces every entity: new stars, the initial asteroid population and
    /// a centred player. Returns false (and changes nothing) while Running.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.phase == GamePhase::Running {
            log::warn!("Start ignored: game already running");
            return false;
        }

        self.regenerate_stars();
        self.asteroids.clear();
        self.spawner.reset();
        for _ in 0..self.spawner.target() {
            self.spawn_asteroid();
        }
        self.player = Some(Player::new(self.canvas, self.settings.player_size));
        self.time_ticks = 0;
        self.start_ms = Some(now_ms);
        self.end_ms = None;
        self.phase = GamePhase::Running;

        log::info!(
            "Game started on {}x{} canvas with {} asteroids",
            self.canvas.width,
            self.canvas.height,
            self.asteroids.len()
        );
        true
    }

    /// Running -> Ended; returns the game duration in ms
    pub fn finish(&mut self, now_ms: f64) -> Option<f64> {
        if self.phase != GamePhase::Running {
            return None;
        }
        self.phase = GamePhase::Ended;
        self.end_ms = Some(now_ms);
        let duration = self.duration_ms();
        log::info!(
            "Game ended after {:.0} ms ({} ticks)",
            duration.unwrap_or(0.0),
            self.time_ticks
        );
        duration
    }

    /// Ended -> Idle once the result has been seen
    pub fn acknowledge(&mut self) -> bool {
        if self.phase != GamePhase::Ended {
            return false;
        }
        self.phase = GamePhase::Idle;
        self.asteroids.clear();
        self.player = None;
        true
    }

    /// Apply a new canvas size
    ///
    /// The star field is rebuilt for the new size. A running game cannot
    /// survive a resize: it is dropped back to Idle with every entity cleared.
    pub fn resize(&mut self, canvas: Canvas) {
        self.canvas = canvas;
        self.regenerate_stars();

        if self.phase == GamePhase::Running {
            log::info!("Resize during play: returning to start screen");
            self.phase = GamePhase::Idle;
            self.asteroids.clear();
            self.player = None;
            self.start_ms = None;
            self.time_ticks = 0;
            self.spawner.reset();
        }
    }

    /// Move the player one step; ignored unless Running
    pub fn move_player(&mut self, direction: Direction) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        match self.player.as_mut() {
            Some(player) => {
                player.move_toward(direction, self.canvas);
                true
            }
            None => false,
        }
    }

    /// Append one freshly randomised asteroid
    pub fn spawn_asteroid(&mut self) {
        let id = self.next_entity_id();
        let asteroid = self.spawner.spawn(id, self.canvas, &mut self.rng);
        self.asteroids.push(asteroid);
    }

    /// Simulated time of the current game
    pub fn elapsed_ms(&self) -> f64 {
        self.time_ticks as f64 * tick_ms()
    }

    /// Wall-clock duration of the current (or last) game
    pub fn duration_ms(&self) -> Option<f64> {
        let start = self.start_ms?;
        let end = self.end_ms?;
        Some((end - start).max(0.0))
    }

    /// Everything to draw, back to front
    pub fn entities(&self) -> impl Iterator<Item = Entity<'_>> {
        self.stars
            .iter()
            .map(Entity::Star)
            .chain(self.asteroids.iter().map(Entity::Asteroid))
            .chain(self.player.iter().map(Entity::Player))
    }

    fn regenerate_stars(&mut self) {
        self.stars = Star::field(self.canvas, self.settings.star_speed, &mut self.rng);
    }
}

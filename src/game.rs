//! Game session
//!
//! Connects the simulation to its collaborators: the best-time store and
//! the audio cues. Display-refresh timestamps come in, fixed ticks go out.

use crate::best_time::{BestTime, GameResult};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::platform::{KeyValueStore, direction_from_key, direction_from_key_code};
use crate::settings::Settings;
use crate::sim::{Canvas, Direction, GamePhase, GameState, TickOutcome, tick};

/// Fire-and-forget sound triggers
pub trait AudioCues {
    /// Start the looping background track
    fn play_background(&mut self);
    /// One-shot collision sound
    fn play_collision(&mut self);
    /// Stop the background loop and rewind both cues
    fn stop_all(&mut self);
}

/// Silent audio for native builds
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioCues for NullAudio {
    fn play_background(&mut self) {}
    fn play_collision(&mut self) {}
    fn stop_all(&mut self) {}
}

/// What a display frame did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Start screen animating
    Idle,
    /// Game in progress
    Running,
    /// The game ended during this frame
    GameOver(GameResult),
    /// Result screen; nothing to animate
    Frozen,
}

/// One player's game session
pub struct Session<S: KeyValueStore, A: AudioCues> {
    state: GameState,
    store: S,
    audio: A,
    best: BestTime,
    accumulator: f32,
    last_time: Option<f64>,
    last_result: Option<GameResult>,
}

impl<S: KeyValueStore, A: AudioCues> Session<S, A> {
    pub fn new(canvas: Canvas, settings: Settings, seed: u64, store: S, audio: A) -> Self {
        let best = BestTime::load(&store);
        Self {
            state: GameState::new(canvas, settings, seed),
            store,
            audio,
            best,
            accumulator: 0.0,
            last_time: None,
            last_result: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn best(&self) -> &BestTime {
        &self.best
    }

    pub fn last_result(&self) -> Option<GameResult> {
        self.last_result
    }

    /// Begin a new game
    pub fn start(&mut self, now_ms: f64) -> bool {
        if !self.state.start(now_ms) {
            return false;
        }
        self.best = BestTime::load(&self.store);
        self.last_result = None;
        self.accumulator = 0.0;
        self.last_time = Some(now_ms);
        self.audio.play_background();
        true
    }

    /// Run the simulation ticks owed for a display frame at `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> FrameOutcome {
        if self.state.phase == GamePhase::Ended {
            self.last_time = None;
            return FrameOutcome::Frozen;
        }

        let dt = match self.last_time {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, 0.1),
            None => SIM_DT,
        };
        self.last_time = Some(now_ms);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;

            if let TickOutcome::Collision { duration_ms, .. } = tick(&mut self.state, now_ms) {
                self.accumulator = 0.0;
                return FrameOutcome::GameOver(self.finish_game(duration_ms));
            }
        }
        if substeps == MAX_SUBSTEPS {
            // Drop backlog rather than chase it next frame
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        match self.state.phase {
            GamePhase::Running => FrameOutcome::Running,
            GamePhase::Idle => FrameOutcome::Idle,
            GamePhase::Ended => FrameOutcome::Frozen,
        }
    }

    /// Handle a DOM `keyCode`; unknown keys are ignored
    pub fn key_code(&mut self, code: u32) -> bool {
        direction_from_key_code(code).is_some_and(|dir| self.move_player(dir))
    }

    /// Handle a DOM key name; unknown keys are ignored
    pub fn key(&mut self, key: &str) -> bool {
        direction_from_key(key).is_some_and(|dir| self.move_player(dir))
    }

    pub fn move_player(&mut self, direction: Direction) -> bool {
        self.state.move_player(direction)
    }

    /// Result seen; back to the start screen
    pub fn acknowledge(&mut self) -> bool {
        if !self.state.acknowledge() {
            return false;
        }
        self.last_time = None;
        self.accumulator = 0.0;
        true
    }

    /// Viewport changed size; a running game is abandoned
    pub fn resize(&mut self, canvas: Canvas) {
        let was_running = self.state.phase == GamePhase::Running;
        self.state.resize(canvas);
        if was_running {
            self.audio.stop_all();
        }
        self.last_time = None;
        self.accumulator = 0.0;
    }

    fn finish_game(&mut self, duration_ms: f64) -> GameResult {
        self.audio.stop_all();
        self.audio.play_collision();

        let result = self.best.record(&mut self.store, duration_ms.round() as u64);
        self.last_result = Some(result);
        self.last_time = None;
        result
    }
}

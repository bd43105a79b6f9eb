//! Audio system using Web Audio API
//!
//! Procedurally generated sound - no external files needed!
//! A low looping drone plays while a game runs and an explosion marks the
//! collision that ends it.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::game::AudioCues;
use crate::settings::Settings;

/// Nodes of the running background drone
struct Drone {
    oscillators: Vec<OscillatorNode>,
    gain: GainNode,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    music_volume: f32,
    sfx_volume: f32,
    drone: Option<Drone>,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            music_volume: settings.effective_music_volume(),
            sfx_volume: settings.effective_sfx_volume(),
            drone: None,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    /// Create an oscillator feeding a fresh gain node
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Hyperspace drone: two detuned low tones with a slow swell
    fn start_drone(ctx: &AudioContext, vol: f32) -> Option<Drone> {
        let (low, gain) = Self::create_osc(ctx, 55.0, OscillatorType::Sine)?;
        let high = ctx.create_oscillator().ok()?;
        high.set_type(OscillatorType::Triangle);
        high.frequency().set_value(110.5);
        high.connect_with_audio_node(&gain).ok()?;

        let t = ctx.current_time();
        gain.gain().set_value_at_time(0.001, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(vol * 0.25, t + 1.5)
            .ok();

        // Slow wobble on the high tone's pitch
        let mut oscillators = vec![low, high];
        if let Ok(lfo) = ctx.create_oscillator() {
            lfo.frequency().set_value(0.2);
            if let Ok(depth) = ctx.create_gain() {
                depth.gain().set_value(3.0);
                let linked = lfo.connect_with_audio_node(&depth).is_ok()
                    && depth
                        .connect_with_audio_param(&oscillators[1].frequency())
                        .is_ok();
                if linked {
                    oscillators.push(lfo);
                }
            }
        }

        for osc in &oscillators {
            osc.start().ok();
        }
        Some(Drone { oscillators, gain })
    }

    /// Collision - boom with a high crack on top
    fn play_explosion(ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = Self::create_osc(ctx, 120.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.6, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.8)
            .ok();
        osc.frequency().set_value_at_time(120.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(25.0, t + 0.8)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.9).ok();

        if let Some((crack, crack_gain)) = Self::create_osc(ctx, 1800.0, OscillatorType::Square) {
            crack_gain.gain().set_value_at_time(vol * 0.2, t).ok();
            crack_gain
                .gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            crack.start().ok();
            crack.stop_with_when(t + 0.15).ok();
        }
    }
}

impl AudioCues for AudioManager {
    fn play_background(&mut self) {
        self.stop_all();
        if self.music_volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        self.resume();
        self.drone = Self::start_drone(ctx, self.music_volume);
    }

    fn play_collision(&mut self) {
        if self.sfx_volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        self.resume();
        Self::play_explosion(ctx, self.sfx_volume);
    }

    fn stop_all(&mut self) {
        if let Some(drone) = self.drone.take() {
            for osc in &drone.oscillators {
                osc.stop().ok();
            }
            let _ = drone.gain.disconnect();
        }
    }
}

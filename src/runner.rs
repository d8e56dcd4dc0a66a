//! Frame loop glue
//!
//! Sits between a host loop and the simulation: latches input events
//! until a tick consumes them, runs fixed steps from variable frame times,
//! keeps frame-rate diagnostics and forwards tick events to audio.

use crate::audio::{AudioSink, SoundEffect};
use crate::config::Config;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameState, Snapshot, TickInput, tick};

/// Discrete input from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    FlapPressed,
    RestartPressed,
}

pub struct Runner<A: AudioSink> {
    state: GameState,
    audio: A,
    input: TickInput,
    accumulator: f32,
}

impl<A: AudioSink> Runner<A> {
    pub fn new(config: Config, seed: u64, audio: A) -> Self {
        Self {
            state: GameState::new(config, seed),
            audio,
            input: TickInput::default(),
            accumulator: 0.0,
        }
    }

    /// Latch an input event for the next tick. A flap latched alongside a
    /// restart is kept for the tick after the restart.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::FlapPressed => self.input.flap = true,
            InputEvent::RestartPressed => self.input.restart = true,
        }
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.input.autopilot = enabled;
    }

    /// Advance by one host frame of `frame_dt` seconds, running as many fixed
    /// steps as have accumulated. Returns the number of steps run.
    pub fn frame(&mut self, frame_dt: f32) -> u32 {
        // A bogus host clock reading counts as no time passing
        let frame_dt = if frame_dt.is_finite() { frame_dt } else { 0.0 };
        self.state.record_frame(frame_dt);

        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Run exactly one tick of `dt`, bypassing the accumulator
    pub fn step(&mut self, dt: f32) {
        tick(&mut self.state, &self.input, dt);

        // Clear one-shot inputs after processing; a restart tick ignores flap
        if self.input.restart {
            self.input.restart = false;
        } else {
            self.input.flap = false;
        }

        for &event in &self.state.events {
            let effect = SoundEffect::from(event);
            log::debug!("Event {:?} -> play {}", event, effect.as_str());
            self.audio.play(effect);
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }
}

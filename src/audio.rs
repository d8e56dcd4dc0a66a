//! Sound effect dispatch
//!
//! The simulation never waits on audio. Effects are handed to an
//! [`AudioSink`], which must return immediately; [`ChannelAudio`] queues them
//! for a worker thread and drops them if the player falls behind.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{Sender, TrySendError, bounded};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Avatar flapped
    Wing,
    /// Avatar struck an obstacle or the ground
    Hit,
    /// Pair cleared
    Point,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Wing => "wing",
            SoundEffect::Hit => "hit",
            SoundEffect::Point => "point",
        }
    }
}

impl From<GameEvent> for SoundEffect {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::Flap => SoundEffect::Wing,
            GameEvent::Hit => SoundEffect::Hit,
            GameEvent::Point => SoundEffect::Point,
        }
    }
}

/// Fire-and-forget sound output
pub trait AudioSink {
    /// Request an effect. Must not block.
    fn play(&self, effect: SoundEffect);
}

/// Discards everything (headless runs, muted play)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&self, _effect: SoundEffect) {}
}

/// Effects queued before new ones are dropped
pub const AUDIO_QUEUE_CAPACITY: usize = 16;

/// Hands effects to a player running on its own thread
pub struct ChannelAudio {
    tx: Option<Sender<SoundEffect>>,
    worker: Option<JoinHandle<()>>,
    muted: bool,
}

impl ChannelAudio {
    /// Spawn a worker that calls `player` for every queued effect
    pub fn spawn<F>(mut player: F) -> Self
    where
        F: FnMut(SoundEffect) + Send + 'static,
    {
        let (tx, rx) = bounded::<SoundEffect>(AUDIO_QUEUE_CAPACITY);
        let worker = thread::Builder::new()
            .name("audio".to_string())
            .spawn(move || {
                for effect in rx {
                    player(effect);
                }
            });

        match worker {
            Ok(worker) => Self {
                tx: Some(tx),
                worker: Some(worker),
                muted: false,
            },
            Err(e) => {
                log::warn!("Failed to start audio thread: {} - audio disabled", e);
                Self {
                    tx: None,
                    worker: None,
                    muted: false,
                }
            }
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

impl AudioSink for ChannelAudio {
    fn play(&self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        let Some(tx) = &self.tx else { return };

        match tx.try_send(effect) {
            Ok(()) => {}
            Err(TrySendError::Full(effect)) => {
                log::debug!("Audio queue full, dropped {}", effect.as_str());
            }
            Err(TrySendError::Disconnected(_)) => {
                log::debug!("Audio worker gone");
            }
        }
    }
}

impl Drop for ChannelAudio {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::warn!("Audio thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    #[test]
    fn test_event_mapping() {
        assert_eq!(SoundEffect::from(GameEvent::Flap), SoundEffect::Wing);
        assert_eq!(SoundEffect::from(GameEvent::Hit), SoundEffect::Hit);
        assert_eq!(SoundEffect::from(GameEvent::Point), SoundEffect::Point);
    }

    #[test]
    fn test_channel_delivers_in_order() {
        let played = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let played = Arc::clone(&played);
            ChannelAudio::spawn(move |effect| played.lock().unwrap().push(effect))
        };
        sink.play(SoundEffect::Wing);
        sink.play(SoundEffect::Point);
        sink.play(SoundEffect::Hit);
        // Dropping joins the worker after the queue drains
        drop(sink);

        assert_eq!(
            *played.lock().unwrap(),
            vec![SoundEffect::Wing, SoundEffect::Point, SoundEffect::Hit]
        );
    }

    #[test]
    fn test_slow_player_never_blocks() {
        let sink = ChannelAudio::spawn(|_| thread::sleep(Duration::from_millis(50)));

        let start = Instant::now();
        for _ in 0..AUDIO_QUEUE_CAPACITY * 4 {
            sink.play(SoundEffect::Wing);
        }
        assert!(start.elapsed() < Duration::from_millis(40));
    }

    #[test]
    fn test_muted_drops_everything() {
        let played = Arc::new(Mutex::new(0));
        let mut sink = {
            let played = Arc::clone(&played);
            ChannelAudio::spawn(move |_| *played.lock().unwrap() += 1)
        };
        sink.set_muted(true);
        sink.play(SoundEffect::Hit);
        drop(sink);
        assert_eq!(*played.lock().unwrap(), 0);
    }
}

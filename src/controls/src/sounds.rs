//! Short sound cues for cube events.
//!
//! All cues share one audio context. It is opened by the first cue played,
//! which always follows some user gesture, and closed by
//! [`SoundEffects::dispose`] or on drop.

use std::time::Duration;

use log::{debug, warn};
use thiserror::Error;

/// A single sine beep, starting `delay` after the cue starts
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration: Duration,
    /// Peak gain in `0.0..=1.0`
    pub volume: f32,
    pub delay: Duration,
}

impl Tone {
    const fn new(frequency_hz: f32, duration_ms: u64, volume: f32, delay_ms: u64) -> Tone {
        Tone {
            frequency_hz,
            duration: Duration::from_millis(duration_ms),
            volume,
            delay: Duration::from_millis(delay_ms),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Cue {
    Move,
    Shuffle,
    Reset,
    Error,
    Success,
}

static MOVE: [Tone; 1] = [Tone::new(600.0, 80, 0.08, 0)];
static SHUFFLE: [Tone; 2] = [Tone::new(700.0, 50, 0.06, 0), Tone::new(650.0, 50, 0.06, 60)];
static RESET: [Tone; 1] = [Tone::new(400.0, 100, 0.08, 0)];
static ERROR: [Tone; 1] = [Tone::new(300.0, 150, 0.08, 0)];
static SUCCESS: [Tone; 3] = [
    Tone::new(600.0, 100, 0.07, 0),
    Tone::new(800.0, 100, 0.07, 110),
    Tone::new(1000.0, 100, 0.07, 220),
];

impl Cue {
    pub const ALL: [Cue; 5] = [Cue::Move, Cue::Shuffle, Cue::Reset, Cue::Error, Cue::Success];

    /// The beeps making up this cue, ordered by delay
    pub fn tones(self) -> &'static [Tone] {
        match self {
            Cue::Move => &MOVE,
            Cue::Shuffle => &SHUFFLE,
            Cue::Reset => &RESET,
            Cue::Error => &ERROR,
            Cue::Success => &SUCCESS,
        }
    }
}

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("No audio output is available: {0}")]
    Unavailable(String),
    #[error("Failed to play a tone: {0}")]
    Playback(String),
}

/// Something that can make noise
pub trait AudioBackend {
    /// An open output, kept for as long as sounds are being played
    type Context;

    /// # Errors
    ///
    /// If there is no usable output.
    fn open(&mut self) -> Result<Self::Context, AudioError>;

    /// Schedule `tones` on `context`, each at its own delay.
    ///
    /// # Errors
    ///
    /// If the output rejects the tones.
    fn play(&mut self, context: &mut Self::Context, tones: &[Tone]) -> Result<(), AudioError>;

    fn close(&mut self, context: Self::Context);
}

/// Plays cues through a lazily opened context of `B`. Failures never reach
/// the caller.
pub struct SoundEffects<B: AudioBackend> {
    backend: B,
    context: Option<B::Context>,
    enabled: bool,
    unavailable: bool,
}

impl<B: AudioBackend> SoundEffects<B> {
    pub fn new(backend: B) -> SoundEffects<B> {
        SoundEffects {
            backend,
            context: None,
            enabled: true,
            unavailable: false,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the context has been opened and not disposed
    pub fn is_open(&self) -> bool {
        self.context.is_some()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn play(&mut self, cue: Cue) {
        if !self.enabled {
            return;
        }

        if self.context.is_none() {
            // Don't retry an output that was already found missing
            if self.unavailable {
                return;
            }
            match self.backend.open() {
                Ok(context) => {
                    debug!(target: "sounds", "Opened the audio context");
                    self.context = Some(context);
                }
                Err(err) => {
                    warn!(target: "sounds", "Audio context not available: {err}");
                    self.unavailable = true;
                    return;
                }
            }
        }
        let Some(context) = self.context.as_mut() else {
            return;
        };

        if let Err(err) = self.backend.play(context, cue.tones()) {
            warn!(target: "sounds", "Failed to play {cue:?}: {err}");
        }
    }

    /// Close the context. A later cue opens a fresh one.
    pub fn dispose(&mut self) {
        if let Some(context) = self.context.take() {
            debug!(target: "sounds", "Closing the audio context");
            self.backend.close(context);
        }
        self.unavailable = false;
    }
}

impl<B: AudioBackend> Drop for SoundEffects<B> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_tones() {
        assert_eq!(Cue::Move.tones().len(), 1);
        assert_eq!(Cue::Move.tones()[0].frequency_hz, 600.0);
        let success: Vec<f32> = Cue::Success.tones().iter().map(|t| t.frequency_hz).collect();
        assert_eq!(success, [600.0, 800.0, 1000.0]);
        assert_eq!(Cue::Shuffle.tones()[1].delay, Duration::from_millis(60));
    }

    #[test]
    fn tones_are_sorted_and_quiet() {
        for cue in Cue::ALL {
            let tones = cue.tones();
            assert!(!tones.is_empty());
            assert!(tones.windows(2).all(|w| w[0].delay <= w[1].delay), "{cue:?}");
            assert!(tones.iter().all(|t| t.volume > 0.0 && t.volume <= 0.1));
        }
    }
}

//! Input and side-channel plumbing around a cube: keyboard and swipe
//! controls, timed autoplay, persistence of the session, and sound cues.
//!
//! Everything here is single threaded. Handlers are attached to an
//! [`EventSource`] and stay attached for as long as the returned guard lives.

#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub mod autoplay;
pub mod keyboard;
pub mod listeners;
pub mod persistence;
pub mod sounds;
pub mod swipe;

pub use autoplay::{AutoPlay, PlaybackState};
pub use keyboard::{FocusTarget, Key, KeyAction, KeyEvent, KeyboardControls, Modifiers};
pub use listeners::{EventSource, Subscription};
pub use persistence::{
    Debounce, FileStorage, MemoryStorage, STORAGE_KEY, Storage, StorageError, clear_cube_state,
    load_cube_state, save_cube_state,
};
pub use sounds::{AudioBackend, AudioError, Cue, SoundEffects, Tone};
pub use swipe::{Point, SwipeControls, SwipeDirection, SwipeTracker, TouchEvent};

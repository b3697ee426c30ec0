use std::{cell::Cell, rc::Rc};

use cube_core::{Face, Move, Turn};
use log::debug;

use crate::listeners::{EventSource, Subscription};

/// The key that was pressed, as reported by the platform
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Key {
    /// A key producing text. Letters arrive already cased by Shift.
    Character(char),
    ArrowLeft,
    ArrowRight,
    Other,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Cmd on macOS
    pub meta: bool,
}

/// What had keyboard focus when a key was pressed
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum FocusTarget {
    #[default]
    Document,
    /// The text field where moves are typed in notation
    MoveInput,
    /// Any other text field
    TextInput,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    pub target: FocusTarget,
}

impl KeyEvent {
    pub fn new(key: Key) -> KeyEvent {
        KeyEvent {
            key,
            modifiers: Modifiers::default(),
            target: FocusTarget::Document,
        }
    }

    /// A plain press of a character key. Uppercase letters imply Shift.
    pub fn character(c: char) -> KeyEvent {
        let mut event = KeyEvent::new(Key::Character(c));
        event.modifiers.shift = c.is_ascii_uppercase();
        event
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> KeyEvent {
        self.modifiers.ctrl = true;
        self
    }

    #[must_use]
    pub fn with_meta(mut self) -> KeyEvent {
        self.modifiers.meta = true;
        self
    }

    #[must_use]
    pub fn in_target(mut self, target: FocusTarget) -> KeyEvent {
        self.target = target;
        self
    }
}

/// What a key press asks the cube to do
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Move(Move),
    Undo,
    Redo,
}

/// Uppercase letters turn their face clockwise, lowercase letters turn it
/// counterclockwise and the digits 1 to 6 give half turns of U D L R F B.
pub const KEY_MAP: [(char, Move); 18] = {
    let mut out = [(' ', Move::new(Face::U, Turn::Clockwise)); 18];
    let mut i = 0;
    while i < 6 {
        let face = Face::ALL[i];
        let upper = b"UDLRFB"[i];
        out[i] = (upper as char, Move::new(face, Turn::Clockwise));
        out[i + 6] = (
            upper.to_ascii_lowercase() as char,
            Move::new(face, Turn::CounterClockwise),
        );
        out[i + 12] = (b"123456"[i] as char, Move::new(face, Turn::Double));
        i += 1;
    }
    out
};

/// The move bound to `c`, if any
pub fn key_move(c: char) -> Option<Move> {
    KEY_MAP
        .iter()
        .find(|(key, _)| *key == c)
        .map(|&(_, mv)| mv)
}

/// Decide what `event` means for the cube. Key presses while some unrelated
/// text field has focus mean nothing.
pub fn key_action(event: &KeyEvent) -> Option<KeyAction> {
    if event.target == FocusTarget::TextInput {
        return None;
    }

    if event.modifiers.ctrl || event.modifiers.meta {
        match event.key {
            Key::Character('z') => return Some(KeyAction::Undo),
            Key::Character('y') => return Some(KeyAction::Redo),
            _ => {}
        }
    }

    match event.key {
        Key::ArrowLeft => Some(KeyAction::Undo),
        Key::ArrowRight => Some(KeyAction::Redo),
        Key::Character(c) => key_move(c).map(KeyAction::Move),
        Key::Other => None,
    }
}

/// Routes key presses from an [`EventSource`] to a handler while attached.
/// Dropping the controls detaches them.
pub struct KeyboardControls {
    enabled: Rc<Cell<bool>>,
    _subscription: Subscription<KeyEvent>,
}

impl KeyboardControls {
    pub fn attach(
        source: &EventSource<KeyEvent>,
        mut on_action: impl FnMut(KeyAction) + 'static,
    ) -> KeyboardControls {
        let enabled = Rc::new(Cell::new(true));
        let subscription = source.listen({
            let enabled = Rc::clone(&enabled);
            move |event| {
                if !enabled.get() {
                    return;
                }
                if let Some(action) = key_action(event) {
                    debug!(target: "keyboard", "{:?} -> {action:?}", event.key);
                    on_action(action);
                }
            }
        });

        KeyboardControls {
            enabled,
            _subscription: subscription,
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }
}

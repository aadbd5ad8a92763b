//! Held-key tracking on top of the terminal's key-event stream.
//!
//! Terminals report key *events*, not key *state*.  Instead of acting on
//! each event individually, `KeyTracker` records the frame number of the
//! last press/repeat event for every key.  Each frame the driver asks which
//! keys are still "fresh" and applies all their effects simultaneously, so
//! Space + ←/→ can be held at the same time with no interference.
//!
//! Works on two classes of terminal:
//! * **Keyboard-enhancement capable** (kitty protocol and friends): proper
//!   `Press` / `Repeat` / `Release` events, so keys are dropped on release.
//! * **Classic terminals**: only `Press` events (OS key-repeat shows up as
//!   repeated `Press`).  The OS waits a while before it starts repeating, so
//!   a fresh key is trusted for `FIRST_PRESS_WINDOW` frames.  Once repeats
//!   arrive it expires after `HOLD_WINDOW` frames of silence.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::compute::TickInput;

/// Window for a key whose auto-repeat has started.  OS key-repeat runs at
/// ≥ 15 Hz, so 8 frames @ 60 FPS (≈133 ms) is refreshed before it expires.
pub const HOLD_WINDOW: u64 = 8;

/// Window for a key seen only once so far.  Covers the OS delay before the
/// first repeat (250–600 ms); a quick tap therefore keeps acting for up to
/// this long on terminals without release events.
pub const FIRST_PRESS_WINDOW: u64 = 36;

/// One-shot actions carried by a key press, as opposed to held state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    Restart,
}

/// Decode the one-shot meaning of a key event, if it has one.
pub fn command_for(key: &KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Command::Quit)
        }
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug)]
struct KeyState {
    /// Frame of the last press or repeat.
    last: u64,
    /// Set once a repeat (or a second press) shows auto-repeat is running.
    repeating: bool,
}

/// Maps each held key to the frame it was last seen (press or repeat).
#[derive(Debug, Default)]
pub struct KeyTracker {
    keys: HashMap<KeyCode, KeyState>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one key event observed during `frame`.
    pub fn record(&mut self, key: &KeyEvent, frame: u64) {
        match key.kind {
            KeyEventKind::Press => {
                // A press while the key is still live is an OS repeat; one
                // after it expired is a fresh tap.
                let repeating = self.is_held(key.code, frame);
                self.keys.insert(key.code, KeyState { last: frame, repeating });
            }
            KeyEventKind::Repeat => {
                self.keys.insert(key.code, KeyState { last: frame, repeating: true });
            }
            KeyEventKind::Release => {
                self.keys.remove(&key.code);
            }
        }
    }

    /// Returns true if `key` is still within its hold window at `frame`.
    pub fn is_held(&self, key: KeyCode, frame: u64) -> bool {
        self.keys
            .get(&key)
            .map(|k| {
                let window = if k.repeating { HOLD_WINDOW } else { FIRST_PRESS_WINDOW };
                frame.saturating_sub(k.last) <= window
            })
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|&k| self.is_held(k, frame))
    }

    /// Forget every key, e.g. after a restart so a stale Space doesn't fire.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Snapshot of the movement and fire keys for this frame.
    pub fn tick_input(&self, frame: u64) -> TickInput {
        TickInput {
            left: self.any_held(
                &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
                frame,
            ),
            right: self.any_held(
                &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
                frame,
            ),
            fire: self.is_held(KeyCode::Char(' '), frame),
        }
    }
}

/// Keyboard adapter: turns crossterm key events into `InputState` and `Key`.
///
/// Instead of acting on each key event individually, `KeyTracker` records
/// the frame number of the last press/repeat event for every key.  Each
/// frame the keys that are still "fresh" become the held set, so Space and
/// two arrows can be held at the same time with no interference.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol): proper `Press` /
///   `Repeat` / `Release` events, and keys are dropped on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire after `HOLD_WINDOW` frames of silence.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEventKind};

use crate::entities::{InputState, Key};

/// A key counts as held if its last press/repeat arrived within this many
/// frames.  OS key-repeat runs at ≥ 15 Hz, which refreshes it in time.
pub const HOLD_WINDOW: u64 = 4;

#[derive(Debug, Default)]
pub struct KeyTracker {
    last_seen: HashMap<KeyCode, u64>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one key event seen during `frame`.
    pub fn record(&mut self, code: KeyCode, kind: KeyEventKind, frame: u64) {
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.last_seen.insert(normalize(code), frame);
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&normalize(code));
            }
        }
    }

    pub fn is_held(&self, code: KeyCode, frame: u64) -> bool {
        self.last_seen
            .get(&normalize(code))
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// Which gameplay keys are live during `frame`.
    pub fn input_state(&self, frame: u64) -> InputState {
        let any = |codes: &[KeyCode]| codes.iter().any(|&c| self.is_held(c, frame));
        InputState {
            left: any(&[KeyCode::Left, KeyCode::Char('a')]),
            right: any(&[KeyCode::Right, KeyCode::Char('d')]),
            up: any(&[KeyCode::Up, KeyCode::Char('w')]),
            down: any(&[KeyCode::Down, KeyCode::Char('s')]),
            attack: self.is_held(KeyCode::Char(' '), frame),
        }
    }

    pub fn clear(&mut self) {
        self.last_seen.clear();
    }
}

/// Fold letter case so Shift or Caps Lock don't break movement.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Map a pressed key to the session action it triggers, if any.
pub fn key_for(code: KeyCode) -> Key {
    match normalize(code) {
        KeyCode::Enter => Key::Start,
        KeyCode::Char('m') => Key::ToggleSound,
        _ => Key::Other,
    }
}

/// Keys that leave the program.  Ctrl-C is handled by the caller since it
/// needs the modifiers.
pub fn is_quit(code: KeyCode) -> bool {
    matches!(normalize(code), KeyCode::Char('q') | KeyCode::Esc)
}

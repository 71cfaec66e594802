/// Keyboard handling: maps terminal keys onto game controls and tracks
/// which direction keys are currently held.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// OS key-repeat keeps refreshing the key while it is down.
pub const HOLD_WINDOW: u64 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    MoveLeft,
    MoveRight,
    Fire,
    Start,
    Restart,
    Quit,
}

pub fn control_for(event: &KeyEvent) -> Option<Control> {
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') => Some(Control::Quit),
            _ => None,
        };
    }
    match event.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Control::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Control::MoveRight),
        KeyCode::Char(' ') => Some(Control::Fire),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Control::Start),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Control::Restart),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Control::Quit),
        _ => None,
    }
}

/// Direction keys held at the start of a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Steering {
    pub left: bool,
    pub right: bool,
}

/// Held-key bookkeeping, fed with key events and sampled once per frame.
#[derive(Debug, Default)]
pub struct HeldKeys {
    last_seen: HashMap<Control, u64>,
}

impl HeldKeys {
    /// Record a key event seen during `frame`.  Returns the control that was
    /// freshly pressed, if any, so one-shot actions fire once per press.
    pub fn observe(&mut self, event: &KeyEvent, frame: u64) -> Option<Control> {
        let control = control_for(event)?;
        match event.kind {
            KeyEventKind::Press => {
                let repeat = self.is_held(control, frame.saturating_sub(1));
                self.last_seen.insert(control, frame);
                // Terminals without release events report repeats as presses.
                if repeat && control == Control::Fire {
                    None
                } else {
                    Some(control)
                }
            }
            KeyEventKind::Repeat => {
                self.last_seen.insert(control, frame);
                None
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&control);
                None
            }
        }
    }

    pub fn is_held(&self, control: Control, frame: u64) -> bool {
        self.last_seen
            .get(&control)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    pub fn steering(&self, frame: u64) -> Steering {
        Steering {
            left: self.is_held(Control::MoveLeft, frame),
            right: self.is_held(Control::MoveRight, frame),
        }
    }

    pub fn clear(&mut self) {
        self.last_seen.clear();
    }
}

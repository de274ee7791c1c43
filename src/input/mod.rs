//! Terminal input binding: crossterm key events to cursor actions.
//!
//! The device layer only reports key transitions; all game-logic repeat
//! timing stays in the cursor. Terminals without key-release events get a
//! release timeout so a single tap does not read as held forever.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::Action;

/// How long a press stays "held" with no repeat from the terminal before
/// we synthesize a release.
const KEY_RELEASE_TIMEOUT_MS: u64 = 150;

/// Map keyboard input to cursor actions.
pub fn map_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Action::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::Right),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Action::Swap1),
        KeyCode::Char('x') | KeyCode::Char('X') => Some(Action::Swap2),
        KeyCode::Char(' ') => Some(Action::Lift),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Transition emitted toward the cursor's start/stop surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Start(Action),
    Stop(Action),
}

/// Single-held-key tracker with a release timeout.
///
/// Mirrors the cursor's single-action input model: a new press replaces
/// the previous held action (emitting its stop first), and a press of the
/// already-held action just refreshes the timeout.
#[derive(Debug, Clone)]
pub struct KeyTracker {
    held: Option<(Action, Instant)>,
    timeout: Duration,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self {
            held: None,
            timeout: Duration::from_millis(KEY_RELEASE_TIMEOUT_MS),
        }
    }

    #[cfg(test)]
    fn with_timeout(timeout: Duration) -> Self {
        Self {
            held: None,
            timeout,
        }
    }

    /// Record a key press (or terminal auto-repeat, which refreshes the
    /// hold). Returns the transitions to apply, stop before start.
    pub fn press(&mut self, code: KeyCode, now: Instant) -> Vec<Transition> {
        let Some(action) = map_key(code) else {
            return Vec::new();
        };
        match self.held {
            Some((current, _)) if current == action => {
                self.held = Some((action, now));
                Vec::new()
            }
            Some((current, _)) => {
                self.held = Some((action, now));
                vec![Transition::Stop(current), Transition::Start(action)]
            }
            None => {
                self.held = Some((action, now));
                vec![Transition::Start(action)]
            }
        }
    }

    /// Record an explicit key release, for terminals that emit them.
    pub fn release(&mut self, code: KeyCode) -> Option<Transition> {
        let action = map_key(code)?;
        match self.held {
            Some((current, _)) if current == action => {
                self.held = None;
                Some(Transition::Stop(action))
            }
            _ => None,
        }
    }

    /// Synthesize a release once the timeout elapses with no refresh.
    pub fn poll(&mut self, now: Instant) -> Option<Transition> {
        match self.held {
            Some((action, since)) if now.duration_since(since) > self.timeout => {
                self.held = None;
                Some(Transition::Stop(action))
            }
            _ => None,
        }
    }
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new()
    }
}

//! Input-source interface sampled by the camera once per frame.

use std::collections::HashSet;

use crate::Vec2;

/// Logical keys the core reacts to. Platform layers map physical keys onto these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
    Quit,
}

/// Read-only view of the current frame's keyboard and mouse state.
pub trait InputState {
    /// Returns true while the key is held.
    fn key_down(&self, key: Key) -> bool;

    /// Returns true while the primary (left) mouse button is held.
    fn mouse_left_down(&self) -> bool;

    /// Cursor travel in pixels since the previous frame.
    fn mouse_delta(&self) -> Vec2;
}

/// Plain input state for one frame, built by hand.
///
/// Handy for scripted camera moves and tests.
#[derive(Clone, Debug, Default)]
pub struct InputSnapshot {
    keys_down: HashSet<Key>,
    mouse_left: bool,
    mouse_delta: Vec2,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, key: Key) -> Self {
        self.keys_down.insert(key);
        self
    }

    /// Cursor motion with the primary button held.
    pub fn with_mouse_drag(mut self, delta: Vec2) -> Self {
        self.mouse_left = true;
        self.mouse_delta = delta;
        self
    }

    /// Cursor motion with no button held.
    pub fn with_mouse_delta(mut self, delta: Vec2) -> Self {
        self.mouse_delta = delta;
        self
    }

    pub fn set_key(&mut self, key: Key, down: bool) {
        if down {
            self.keys_down.insert(key);
        } else {
            self.keys_down.remove(&key);
        }
    }

    pub fn set_mouse_left(&mut self, down: bool) {
        self.mouse_left = down;
    }

    pub fn set_mouse_delta(&mut self, delta: Vec2) {
        self.mouse_delta = delta;
    }
}

impl InputState for InputSnapshot {
    fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    fn mouse_left_down(&self) -> bool {
        self.mouse_left
    }

    fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }
}

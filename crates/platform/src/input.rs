//! Keyboard/mouse tracking from winit window events.

use std::collections::HashSet;

use corelib::{InputState, Key, Vec2};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Physical key -> logical camera key.
pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::KeyW => Some(Key::Forward),
        KeyCode::KeyS => Some(Key::Backward),
        KeyCode::KeyA => Some(Key::Left),
        KeyCode::KeyD => Some(Key::Right),
        KeyCode::Space => Some(Key::Up),
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Some(Key::Down),
        KeyCode::Escape => Some(Key::Quit),
        _ => None,
    }
}

/// Tracks held keys, the primary mouse button and cursor travel per frame.
#[derive(Default)]
pub struct WinitInput {
    keys_down: HashSet<KeyCode>,
    mouse_buttons_down: HashSet<MouseButton>,
    /// None until the cursor has been seen inside the window.
    mouse_position: Option<Vec2>,
    mouse_delta: Vec2,
}

impl WinitInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call once the frame's update has consumed the input.
    pub fn begin_frame(&mut self) {
        self.mouse_delta = Vec2::ZERO;
    }

    /// Process a window event and update input state.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.set_key(code, event.state == ElementState::Pressed);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.set_button(*button, *state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_position = None;
            }
            WindowEvent::Focused(false) => self.release_all(),
            _ => {}
        }
    }

    pub(crate) fn set_key(&mut self, code: KeyCode, down: bool) {
        if down {
            self.keys_down.insert(code);
        } else {
            self.keys_down.remove(&code);
        }
    }

    pub(crate) fn set_button(&mut self, button: MouseButton, down: bool) {
        if down {
            self.mouse_buttons_down.insert(button);
        } else {
            self.mouse_buttons_down.remove(&button);
        }
    }

    pub(crate) fn cursor_moved(&mut self, position: Vec2) {
        if let Some(last) = self.mouse_position {
            self.mouse_delta += position - last;
        }
        self.mouse_position = Some(position);
    }

    /// Drop every held key and button, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        if !self.keys_down.is_empty() || !self.mouse_buttons_down.is_empty() {
            log::debug!("Releasing held input");
        }
        self.keys_down.clear();
        self.mouse_buttons_down.clear();
    }

    pub fn key_code_down(&self, code: KeyCode) -> bool {
        self.keys_down.contains(&code)
    }
}

impl InputState for WinitInput {
    fn key_down(&self, key: Key) -> bool {
        self.keys_down
            .iter()
            .any(|code| map_key(*code) == Some(key))
    }

    fn mouse_left_down(&self) -> bool {
        self.mouse_buttons_down.contains(&MouseButton::Left)
    }

    fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }
}

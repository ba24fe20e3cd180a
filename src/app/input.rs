use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::KeyCode;

/// Per-frame input state.
///
/// Deltas accumulate over a frame and are cleared in [`end_frame`];
/// `keys_pressed` holds only the keys that went down this frame, so edge
/// detection needs no bookkeeping in user code.
///
/// [`end_frame`]: Input::end_frame
#[derive(Default, Debug, Clone)]
pub struct Input {
    pub cursor_position: Vec2,
    pub cursor_delta: Vec2,
    pub scroll_delta: Vec2,
    pub screen_size: Vec2,
    pub mouse_buttons: HashSet<MouseButton>,

    /// Keys currently held down
    pub keys_down: HashSet<KeyCode>,
    /// Keys that transitioned to pressed this frame
    pub keys_pressed: HashSet<KeyCode>,
}

impl Input {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears per-frame deltas and edge-detection sets.
    pub fn end_frame(&mut self) {
        self.cursor_delta = Vec2::ZERO;
        self.scroll_delta = Vec2::ZERO;
        self.keys_pressed.clear();
    }

    pub fn handle_resize(&mut self, width: u32, height: u32) {
        self.screen_size = Vec2::new(width as f32, height as f32);
    }

    pub fn handle_cursor_move(&mut self, x: f64, y: f64) {
        let new_pos = Vec2::new(x as f32, y as f32);
        // First event has no meaningful delta
        if self.cursor_position != Vec2::ZERO {
            self.cursor_delta += new_pos - self.cursor_position;
        }
        self.cursor_position = new_pos;
    }

    pub fn handle_mouse_input(&mut self, state: ElementState, button: MouseButton) {
        match state {
            ElementState::Pressed => {
                self.mouse_buttons.insert(button);
            }
            ElementState::Released => {
                self.mouse_buttons.remove(&button);
            }
        }
    }

    pub fn handle_mouse_wheel(&mut self, delta: MouseScrollDelta) {
        match delta {
            MouseScrollDelta::LineDelta(x, y) => {
                self.scroll_delta += Vec2::new(x, y);
            }
            MouseScrollDelta::PixelDelta(pos) => {
                // PixelDelta values run much larger than line deltas
                self.scroll_delta += Vec2::new(pos.x as f32, pos.y as f32) * 0.1;
            }
        }
    }

    pub fn handle_key(&mut self, state: ElementState, key: KeyCode, repeat: bool) {
        match state {
            ElementState::Pressed => {
                if !repeat && self.keys_down.insert(key) {
                    self.keys_pressed.insert(key);
                }
            }
            ElementState::Released => {
                self.keys_down.remove(&key);
            }
        }
    }

    #[must_use]
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }

    #[must_use]
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// True only on the frame the key went down.
    #[must_use]
    pub fn was_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }
}

//! Input handling for keyboard, cursor, and single-pointer touch.

pub mod touch;

use glam::Vec2;
use std::collections::HashSet;

pub use touch::TouchTracker;

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,
    /// Cursor position in window coordinates.
    cursor_position: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                // OS key repeat re-delivers Pressed while held; each delivery
                // counts as a fresh keystroke for the per-keystroke controls.
                self.keys_pressed.insert(key);
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    /// Process cursor position update.
    pub fn process_cursor_position(&mut self, position: (f64, f64)) {
        self.cursor_position = Vec2::new(position.0 as f32, position.1 as f32);
    }

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame (includes OS key repeat).
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Get the cursor position in window coordinates.
    pub fn cursor_position(&self) -> Vec2 {
        self.cursor_position
    }
}

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_repeat_counts_as_keystrokes() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        assert!(input.is_key_pressed(KeyCode::KeyW));

        input.begin_frame();
        assert!(!input.is_key_pressed(KeyCode::KeyW));
        assert!(input.is_key_held(KeyCode::KeyW));

        // OS repeat delivers Pressed again without a Release in between.
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        assert!(input.is_key_pressed(KeyCode::KeyW));
    }

    #[test]
    fn release_clears_held() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyF, ElementState::Pressed);
        input.process_keyboard(KeyCode::KeyF, ElementState::Released);
        assert!(!input.is_key_held(KeyCode::KeyF));
    }

    #[test]
    fn cursor_position_tracks_moves() {
        let mut input = InputState::new();
        input.process_cursor_position((120.0, 48.5));
        assert_eq!(input.cursor_position(), Vec2::new(120.0, 48.5));
    }
}

//! Input state management

use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Pixel scroll deltas are divided by this to approximate wheel notches
pub const PIXELS_PER_SCROLL_LINE: f32 = 10.0;

/// Cursor mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorMode {
    /// Visible, free movement (default)
    #[default]
    Normal,
    /// Hidden and locked to the window, for mouse look
    Grabbed,
}

/// Input accumulated by the runtime between frames
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Currently pressed keys
    pub keys: HashSet<KeyCode>,
    /// Raw device motion since last frame, not constrained by the window
    pub raw_mouse_delta: Vec2,
    /// Scroll delta in lines
    pub scroll_delta: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a key is currently pressed
    #[inline]
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    /// -1, 0 or 1 depending on which of the two keys are held
    pub fn axis(&self, positive: KeyCode, negative: KeyCode) -> f32 {
        let mut axis = 0.0;
        if self.is_key_pressed(positive) {
            axis += 1.0;
        }
        if self.is_key_pressed(negative) {
            axis -= 1.0;
        }
        axis
    }

    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys.insert(key);
        } else {
            self.keys.remove(&key);
        }
    }

    pub fn add_scroll(&mut self, delta: MouseScrollDelta) {
        self.scroll_delta += scroll_lines(delta);
    }

    /// Accumulate raw device motion
    pub fn add_mouse_motion(&mut self, delta: (f64, f64)) {
        self.raw_mouse_delta += Vec2::new(delta.0 as f32, delta.1 as f32);
    }

    /// Fold a window event into the state
    pub fn record_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseWheel { delta, .. } => self.add_scroll(*delta),
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.set_key(key, event.state == ElementState::Pressed);
                }
            }
            WindowEvent::Focused(false) => self.keys.clear(),
            _ => {}
        }
    }

    /// Clear the per-frame deltas, keeping held keys
    pub fn reset_frame_deltas(&mut self) {
        self.raw_mouse_delta = Vec2::ZERO;
        self.scroll_delta = Vec2::ZERO;
    }
}

/// Scroll amount in lines
pub fn scroll_lines(delta: MouseScrollDelta) -> Vec2 {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => Vec2::new(x, y),
        MouseScrollDelta::PixelDelta(pos) => {
            Vec2::new(pos.x as f32, pos.y as f32) / PIXELS_PER_SCROLL_LINE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_axis() {
        let mut input = InputState::new();
        assert_eq!(input.axis(KeyCode::KeyW, KeyCode::KeyS), 0.0);

        input.set_key(KeyCode::KeyW, true);
        assert_eq!(input.axis(KeyCode::KeyW, KeyCode::KeyS), 1.0);

        input.set_key(KeyCode::KeyS, true);
        assert_eq!(input.axis(KeyCode::KeyW, KeyCode::KeyS), 0.0);

        input.set_key(KeyCode::KeyW, false);
        assert_eq!(input.axis(KeyCode::KeyW, KeyCode::KeyS), -1.0);
    }

    #[test]
    fn test_scroll_lines() {
        assert_eq!(
            scroll_lines(MouseScrollDelta::LineDelta(0.0, -2.0)),
            Vec2::new(0.0, -2.0)
        );
        assert_eq!(
            scroll_lines(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 30.0))),
            Vec2::new(0.0, 3.0)
        );
    }

    #[test]
    fn test_raw_motion_accumulates() {
        let mut input = InputState::new();
        input.add_mouse_motion((2.0, -1.0));
        input.add_mouse_motion((0.5, 4.0));
        assert_eq!(input.raw_mouse_delta, Vec2::new(2.5, 3.0));
    }

    #[test]
    fn test_focus_loss_releases_keys() {
        let mut input = InputState::new();
        input.set_key(KeyCode::KeyW, true);
        input.record_window_event(&WindowEvent::Focused(false));
        assert!(!input.is_key_pressed(KeyCode::KeyW));
    }

    #[test]
    fn test_reset_keeps_held_keys() {
        let mut input = InputState::new();
        input.set_key(KeyCode::KeyQ, true);
        input.add_mouse_motion((3.0, -2.0));
        input.add_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));

        input.reset_frame_deltas();

        assert_eq!(input.raw_mouse_delta, Vec2::ZERO);
        assert_eq!(input.scroll_delta, Vec2::ZERO);
        assert!(input.is_key_pressed(KeyCode::KeyQ));
    }
}

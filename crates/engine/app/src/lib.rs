//! Application framework for native OpenGL applications
//!
//! This crate provides the core abstractions for building windowed demos:
//!
//! - [`App`] trait: The main interface for application logic
//! - [`FrameContext`] / [`InputState`]: per-frame data handed to the app
//! - [`camera`]: fly camera and its keyboard/mouse controller
//! - [`cli`]: shared command line arguments
//!
//! With the `runtime` feature enabled, additional utilities are available:
//! - [`AppRuntime`] / [`run_app`]: Window creation and event loop management
//! - [`EguiIntegration`]: Egui UI rendering integration

use glow::Context;
use winit::event::WindowEvent;
use winit::window::Window;

pub mod camera;
pub mod cli;
mod error;
pub mod input;

// Runtime module (requires runtime feature)
#[cfg(feature = "runtime")]
mod egui_integration;
#[cfg(feature = "runtime")]
mod runner;

pub use camera::{FlyCamera, FlyController};
pub use error::AppError;
pub use input::{CursorMode, InputState};

#[cfg(feature = "runtime")]
pub use egui_integration::EguiIntegration;
#[cfg(feature = "runtime")]
pub use runner::{create_event_loop, run_app, AppConfig, AppRuntime, DebugMode};

// Re-export egui when runtime feature is enabled
#[cfg(feature = "runtime")]
pub use egui;

/// Result of [`App::init`]; any error aborts startup
pub type InitResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Width over height, or 1 for a degenerate size
pub fn aspect_ratio(size: (u32, u32)) -> f32 {
    if size.0 > 0 && size.1 > 0 {
        size.0 as f32 / size.1 as f32
    } else {
        1.0
    }
}

/// Frame context passed to update/render methods
///
/// Contains all per-frame information apps need without storing it themselves.
pub struct FrameContext<'a> {
    /// OpenGL context
    pub gl: &'a Context,
    /// Window reference (for DPI, size, etc.)
    pub window: &'a Window,
    /// Time since last frame in seconds
    pub delta_time: f32,
    /// Total elapsed time since app start in seconds
    pub elapsed: f32,
    /// Current frame number
    pub frame: u64,
    /// Window size in pixels (width, height)
    pub size: (u32, u32),
}

impl FrameContext<'_> {
    /// Get the aspect ratio of the window
    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        aspect_ratio(self.size)
    }
}

/// Application lifecycle hooks
///
/// # Lifecycle
///
/// 1. `init()` - once, after the GL context is current
/// 2. `on_event()` for window events, then `update()` + `render()` + `ui()` each frame
/// 3. `shutdown()` - once, while the GL context is still current
pub trait App {
    /// Create GL resources and initial state
    fn init(&mut self, ctx: &FrameContext) -> InitResult;

    /// Release GL resources
    fn shutdown(&mut self, ctx: &FrameContext);

    /// Handle a window event not consumed by the UI
    fn on_event(&mut self, _event: &WindowEvent) {}

    /// Update app logic
    fn update(&mut self, ctx: &FrameContext, input: &InputState);

    /// Render the frame
    fn render(&mut self, ctx: &FrameContext);

    /// Render UI (optional)
    ///
    /// Called after render with the egui context.
    #[cfg(feature = "runtime")]
    fn ui(&mut self, _ctx: &FrameContext, _egui: &egui::Context) {
        // Default: no UI
    }

    /// Request cursor mode (optional)
    ///
    /// Called each frame to check cursor behavior.
    fn cursor_mode(&self) -> CursorMode {
        CursorMode::Normal
    }

    /// Called each frame after update. Return true to request application exit.
    fn should_exit(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio() {
        assert!((aspect_ratio((1080, 720)) - 1.5).abs() < 1e-6);
        assert_eq!(aspect_ratio((800, 0)), 1.0);
        assert_eq!(aspect_ratio((0, 0)), 1.0);
    }

    #[test]
    fn test_cursor_mode_default() {
        assert_eq!(CursorMode::default(), CursorMode::Normal);
    }
}

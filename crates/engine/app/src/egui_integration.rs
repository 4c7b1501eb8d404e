//! egui on top of the app's GL context
//!
//! Input comes in through egui-winit, painting goes out through egui_glow.

use egui_glow::Painter;
use glow::{Context, HasContext};
use std::sync::Arc;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::error::AppError;

/// Owns the egui context and the GL painter for one window
pub struct EguiIntegration {
    ctx: egui::Context,
    state: egui_winit::State,
    painter: Painter,
}

impl EguiIntegration {
    /// # Safety
    /// The GL context must be current when this is called.
    pub unsafe fn new(window: &Window, gl: Arc<Context>) -> Result<Self, AppError> {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            None,
            None,
            None,
        );
        let painter = Painter::new(gl, "", None, false).map_err(|e| AppError::Ui(e.to_string()))?;

        Ok(Self {
            ctx,
            state,
            painter,
        })
    }

    pub fn context(&self) -> &egui::Context {
        &self.ctx
    }

    /// Feed a window event to egui. Returns true when egui consumed it.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Build the UI for one frame and paint it over the current framebuffer
    ///
    /// Depth testing is off while painting and back on afterwards; blending is
    /// left disabled.
    pub fn run(
        &mut self,
        window: &Window,
        gl: &Context,
        size: [u32; 2],
        build: impl FnMut(&egui::Context),
    ) {
        let input = self.state.take_egui_input(window);
        let output = self.ctx.run(input, build);
        self.state.handle_platform_output(window, output.platform_output);

        let primitives = self.ctx.tessellate(output.shapes, output.pixels_per_point);

        unsafe {
            gl.disable(glow::DEPTH_TEST);
            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
        }
        self.painter.paint_and_update_textures(
            size,
            output.pixels_per_point,
            &primitives,
            &output.textures_delta,
        );
        unsafe {
            gl.enable(glow::DEPTH_TEST);
            gl.disable(glow::BLEND);
        }
    }
}

impl Drop for EguiIntegration {
    fn drop(&mut self) {
        self.painter.destroy();
    }
}

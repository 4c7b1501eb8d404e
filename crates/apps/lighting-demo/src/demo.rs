use app::{App, CursorMode, FlyCamera, FlyController, FrameContext, InitResult, InputState};
use glam::Vec3;
use lighting::{CameraParams, FrameStats, LightingState, Scene};
use renderer::GlSceneRenderer;
use tracing::{debug, error, info};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::config::DemoConfig;

/// Application state for the lighting demo
///
/// Owns the editable [`LightingState`]; controls and UI write to it, the
/// renderer reads it once per frame.
pub struct LightingDemo {
    pub state: LightingState,
    pub scene: Scene,
    pub camera: FlyCamera,
    pub controller: FlyController,
    pub background: Vec3,
    pub wireframe: bool,
    pub cursor_locked: bool,
    exit_requested: bool,
    renderer: Option<GlSceneRenderer>,
    stats: FrameStats,
}

impl LightingDemo {
    pub fn new(config: &DemoConfig) -> Self {
        let mut camera = FlyCamera::default();
        camera.fov = config.camera.fov;

        Self {
            state: config.lighting,
            scene: Scene::default(),
            camera,
            controller: config.controller(),
            background: config.scene.background,
            wireframe: config.scene.wireframe,
            cursor_locked: true,
            exit_requested: false,
            renderer: None,
            stats: FrameStats::default(),
        }
    }

    pub fn camera_params(&self) -> CameraParams {
        CameraParams {
            projection: self.camera.projection_matrix(),
            view: self.camera.view_matrix(),
            position: self.camera.position,
        }
    }

    /// Counters from the most recent frame
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Apply a single key press
    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::KeyR => {
                self.camera.reset();
                info!("Camera reset");
            }
            KeyCode::Digit1 => {
                self.wireframe = !self.wireframe;
                info!("Wireframe: {}", self.wireframe);
            }
            KeyCode::Escape => {
                info!("Exit requested");
                self.exit_requested = true;
            }
            _ => {}
        }
    }

    pub fn toggle_cursor_lock(&mut self) {
        self.cursor_locked = !self.cursor_locked;
        info!("Cursor locked: {}", self.cursor_locked);
    }
}

impl App for LightingDemo {
    fn init(&mut self, ctx: &FrameContext) -> InitResult {
        self.camera.aspect_ratio = ctx.aspect_ratio();

        let renderer = unsafe { GlSceneRenderer::new(ctx.gl) }.inspect_err(|e| {
            error!("Failed to create scene renderer: {e}");
        })?;
        self.renderer = Some(renderer);

        info!(
            "Lighting demo initialized ({} point lights)",
            self.state.orbit.active_count()
        );
        Ok(())
    }

    fn shutdown(&mut self, ctx: &FrameContext) {
        if let Some(mut renderer) = self.renderer.take() {
            unsafe { renderer.destroy(ctx.gl) };
        }
        info!("Lighting demo shut down");
    }

    fn on_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.handle_key(key);
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Right,
                ..
            } => self.toggle_cursor_lock(),
            WindowEvent::Resized(size) => {
                self.camera.aspect_ratio = app::aspect_ratio((size.width, size.height));
            }
            _ => {}
        }
    }

    fn update(&mut self, ctx: &FrameContext, input: &InputState) {
        self.controller
            .update(&mut self.camera, input, ctx.delta_time, self.cursor_locked);
    }

    fn render(&mut self, ctx: &FrameContext) {
        let camera = self.camera_params();
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };

        renderer.wireframe = self.wireframe;
        self.stats = unsafe {
            renderer.render(
                ctx.gl,
                ctx.size,
                self.background,
                &self.state,
                &camera,
                ctx.elapsed,
                &self.scene,
            )
        };

        if ctx.frame % 600 == 0 {
            debug!(
                "Frame {}: {} point lights, {} draws",
                ctx.frame, self.stats.point_lights, self.stats.draws
            );
        }
    }

    fn ui(&mut self, _ctx: &FrameContext, egui: &egui::Context) {
        crate::ui::lighting_windows(egui, &mut self.state);
    }

    fn cursor_mode(&self) -> CursorMode {
        if self.cursor_locked {
            CursorMode::Grabbed
        } else {
            CursorMode::Normal
        }
    }

    fn should_exit(&self) -> bool {
        self.exit_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo() -> LightingDemo {
        LightingDemo::new(&DemoConfig::default())
    }

    #[test]
    fn test_new_from_config() {
        let mut config = DemoConfig::default();
        config.camera.fov = 45.0;
        config.camera.move_speed = 2.0;
        config.scene.wireframe = true;
        config.lighting.orbit.count = 4;

        let demo = LightingDemo::new(&config);
        assert_eq!(demo.camera.fov, 45.0);
        assert_eq!(demo.controller.move_speed, 2.0);
        assert!(demo.wireframe);
        assert_eq!(demo.state.orbit.count, 4);
        assert!(demo.cursor_locked);
        assert_eq!(demo.cursor_mode(), CursorMode::Grabbed);
    }

    #[test]
    fn test_wireframe_toggle() {
        let mut demo = demo();
        demo.handle_key(KeyCode::Digit1);
        assert!(demo.wireframe);
        demo.handle_key(KeyCode::Digit1);
        assert!(!demo.wireframe);
    }

    #[test]
    fn test_reset_restores_camera() {
        let mut demo = demo();
        demo.camera.position = Vec3::new(4.0, 2.0, 1.0);
        demo.camera.rotate(30.0, 10.0);

        demo.handle_key(KeyCode::KeyR);

        assert_eq!(demo.camera.position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!((demo.camera.yaw, demo.camera.pitch), (-90.0, 0.0));
    }

    #[test]
    fn test_escape_requests_exit() {
        let mut demo = demo();
        assert!(!demo.should_exit());
        demo.handle_key(KeyCode::Escape);
        assert!(demo.should_exit());
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let mut demo = demo();
        demo.handle_key(KeyCode::KeyZ);
        assert!(!demo.wireframe);
        assert!(!demo.should_exit());
    }

    #[test]
    fn test_cursor_lock_toggle() {
        let mut demo = demo();
        demo.toggle_cursor_lock();
        assert_eq!(demo.cursor_mode(), CursorMode::Normal);
        demo.toggle_cursor_lock();
        assert_eq!(demo.cursor_mode(), CursorMode::Grabbed);
    }

    #[test]
    fn test_right_click_toggles_cursor_lock() {
        let mut demo = demo();
        let click = |state| WindowEvent::MouseInput {
            device_id: unsafe { winit::event::DeviceId::dummy() },
            state,
            button: MouseButton::Right,
        };

        demo.on_event(&click(ElementState::Pressed));
        assert_eq!(demo.cursor_mode(), CursorMode::Normal);
        demo.on_event(&click(ElementState::Released));
        assert_eq!(demo.cursor_mode(), CursorMode::Normal);
        demo.on_event(&click(ElementState::Pressed));
        assert_eq!(demo.cursor_mode(), CursorMode::Grabbed);
    }

    #[test]
    fn test_camera_params_follow_camera() {
        let mut demo = demo();
        demo.camera.position = Vec3::new(1.0, 2.0, 3.0);
        let params = demo.camera_params();
        assert_eq!(params.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(params.view, demo.camera.view_matrix());
        assert_eq!(params.projection, demo.camera.projection_matrix());
    }

    #[test]
    fn test_look_is_disabled_when_unlocked() {
        let mut demo = demo();
        demo.toggle_cursor_lock();
        let mut input = InputState::new();
        input.raw_mouse_delta = glam::Vec2::new(50.0, 50.0);

        demo.controller
            .update(&mut demo.camera, &input, 0.016, demo.cursor_locked);

        assert_eq!((demo.camera.yaw, demo.camera.pitch), (-90.0, 0.0));
    }
}

//! Window, GL context and event loop for [`App`] implementations
//!
//! [`run_app`] owns the whole frame loop: winit events feed [`InputState`]
//! and [`App::on_event`], then each redraw runs update, render, the egui pass
//! and the buffer swap. Startup failures stop the loop and are returned.

use glow::{Context, HasContext};
use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{ContextApi, ContextAttributesBuilder, GlProfile, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::DisplayBuilder;
use image::RgbaImage;
use raw_window_handle::HasWindowHandle;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{CursorGrabMode, Window, WindowId};

#[cfg(target_os = "linux")]
use winit::platform::x11::EventLoopBuilderExtX11;

use crate::error::AppError;
use crate::{App, CursorMode, EguiIntegration, FrameContext, InputState};

/// Run a fixed number of frames, then save the last one and exit
#[derive(Debug, Clone)]
pub struct DebugMode {
    pub frames: u64,
    /// PNG written after the final frame
    pub output_path: PathBuf,
}

impl DebugMode {
    pub fn new(frames: u64) -> Self {
        Self {
            frames,
            output_path: PathBuf::from("output/frame_last.png"),
        }
    }

    /// Read back the framebuffer and write it to `output_path`
    fn capture(&self, gl: &Context, size: PhysicalSize<u32>) -> Result<(), AppError> {
        if size.width == 0 || size.height == 0 {
            return Err(AppError::Capture("framebuffer is empty".into()));
        }

        let mut pixels = vec![0u8; size.width as usize * size.height as usize * 4];
        unsafe {
            gl.read_pixels(
                0,
                0,
                size.width as i32,
                size.height as i32,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelPackData::Slice(Some(&mut pixels)),
            );
        }

        let mut frame = RgbaImage::from_raw(size.width, size.height, pixels)
            .ok_or_else(|| AppError::Capture("pixel buffer does not match frame size".into()))?;
        // GL rows start at the bottom
        image::imageops::flip_vertical_in_place(&mut frame);

        if let Some(dir) = self.output_path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| AppError::Capture(e.to_string()))?;
        }
        frame
            .save(&self.output_path)
            .map_err(|e| AppError::Capture(e.to_string()))
    }
}

/// Window and GL settings for [`run_app`]
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    /// Logical window size
    pub width: u32,
    pub height: u32,
    /// Requested core-profile GL version
    pub gl_major: u8,
    pub gl_minor: u8,
    pub debug_mode: Option<DebugMode>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Application".to_string(),
            width: 800,
            height: 600,
            gl_major: 3,
            gl_minor: 3,
            debug_mode: None,
        }
    }
}

impl AppConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Exit after `frames` frames and save a screenshot of the last one
    pub fn with_debug_mode(mut self, frames: u64) -> Self {
        self.debug_mode = Some(DebugMode::new(frames));
        self
    }
}

/// GL objects that live as long as the window
struct Graphics {
    // Egui goes first: its painter must be destroyed while the context lives
    egui: Option<EguiIntegration>,
    gl: Arc<Context>,
    surface: glutin::surface::Surface<WindowSurface>,
    context: glutin::context::PossiblyCurrentContext,
    window: Window,
}

impl Graphics {
    fn frame_context(&self, delta_time: f32, elapsed: f32, frame: u64) -> FrameContext<'_> {
        let size = self.window.inner_size();
        FrameContext {
            gl: &self.gl,
            window: &self.window,
            delta_time,
            elapsed,
            frame,
            size: (size.width, size.height),
        }
    }
}

/// Event loop state for one [`App`]
pub struct AppRuntime<A: App> {
    config: AppConfig,
    app: A,
    graphics: Option<Graphics>,

    start_time: Instant,
    last_update: Instant,
    frame_count: u64,

    input: InputState,
    cursor_mode: Option<CursorMode>,

    initialized: bool,
    shut_down: bool,
    error: Option<AppError>,
}

impl<A: App> AppRuntime<A> {
    pub fn new(app: A, config: AppConfig) -> Self {
        Self {
            config,
            app,
            graphics: None,
            start_time: Instant::now(),
            last_update: Instant::now(),
            frame_count: 0,
            input: InputState::default(),
            cursor_mode: None,
            initialized: false,
            shut_down: false,
            error: None,
        }
    }

    /// Take the startup error that stopped the event loop, if any
    pub fn take_error(&mut self) -> Option<AppError> {
        self.error.take()
    }

    fn create_graphics(&self, event_loop: &ActiveEventLoop) -> Result<Graphics, AppError> {
        info!(
            "Creating window and OpenGL {}.{} context",
            self.config.gl_major, self.config.gl_minor
        );

        let window_attributes = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.width,
                self.config.height,
            ));
        let template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_transparency(false);

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(window_attributes))
            .build(event_loop, template, pick_config)
            .map_err(|e| AppError::Window(e.to_string()))?;
        let window = window.ok_or_else(|| AppError::Window("no window was created".into()))?;
        let window_handle = window
            .window_handle()
            .map_err(|e| AppError::Window(e.to_string()))?
            .as_raw();

        let display = gl_config.display();
        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(
                self.config.gl_major,
                self.config.gl_minor,
            ))))
            .build(Some(window_handle));
        let context = unsafe { display.create_context(&gl_config, &context_attributes) }
            .map_err(|e| AppError::Context(e.to_string()))?;

        let size = window.inner_size();
        let (width, height) = NonZeroU32::new(size.width)
            .zip(NonZeroU32::new(size.height))
            .ok_or_else(|| AppError::Surface(format!("window has zero size {size:?}")))?;
        let surface_attributes =
            SurfaceAttributesBuilder::<WindowSurface>::new().build(window_handle, width, height);
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(|e| AppError::Surface(e.to_string()))?;

        let context = context
            .make_current(&surface)
            .map_err(|e| AppError::Context(e.to_string()))?;
        let gl = Arc::new(unsafe {
            Context::from_loader_function_cstr(|name| display.get_proc_address(name))
        });
        info!("OpenGL context created ({}x{})", size.width, size.height);

        let egui = unsafe { EguiIntegration::new(&window, Arc::clone(&gl))? };

        Ok(Graphics {
            egui: Some(egui),
            gl,
            surface,
            context,
            window,
        })
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let graphics = self.create_graphics(event_loop)?;

        if !self.initialized {
            self.app
                .init(&graphics.frame_context(0.0, 0.0, 0))
                .map_err(|e| AppError::Init(e.to_string()))?;
            self.initialized = true;
            info!("App initialized");
        }

        self.graphics = Some(graphics);
        self.start_time = Instant::now();
        self.last_update = self.start_time;
        Ok(())
    }

    /// Let the app release its resources, then stop the loop
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if !self.shut_down {
            if let Some(graphics) = self.graphics.as_mut() {
                let ctx = graphics.frame_context(
                    0.0,
                    self.start_time.elapsed().as_secs_f32(),
                    self.frame_count,
                );
                self.app.shutdown(&ctx);
                graphics.egui = None;
                info!("App shut down after {} frames", self.frame_count);
            }
            self.shut_down = true;
        }
        event_loop.exit();
    }

    fn sync_cursor(&mut self) {
        let mode = self.app.cursor_mode();
        if self.cursor_mode == Some(mode) {
            return;
        }
        if let Some(graphics) = &self.graphics {
            apply_cursor_mode(&graphics.window, mode);
            debug!("Cursor mode: {mode:?}");
            self.cursor_mode = Some(mode);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let delta_time = (now - self.last_update).as_secs_f32();
        self.last_update = now;
        let elapsed = self.start_time.elapsed().as_secs_f32();

        let Some(graphics) = self.graphics.as_mut() else {
            return;
        };
        let Graphics {
            ref mut egui,
            ref gl,
            ref surface,
            ref context,
            ref window,
        } = *graphics;
        let size = window.inner_size();
        let ctx = FrameContext {
            gl,
            window,
            delta_time,
            elapsed,
            frame: self.frame_count,
            size: (size.width, size.height),
        };

        self.app.update(&ctx, &self.input);
        self.input.reset_frame_deltas();
        if self.app.should_exit() {
            info!("App requested exit");
            self.shutdown(event_loop);
            return;
        }

        self.app.render(&ctx);
        if let Some(egui) = egui.as_mut() {
            let app = &mut self.app;
            egui.run(window, gl, [size.width, size.height], |egui_ctx| {
                app.ui(&ctx, egui_ctx);
            });
        }

        self.frame_count += 1;
        let frame_count = self.frame_count;

        // Read back before the swap leaves the back buffer undefined
        let last_debug_frame = self
            .config
            .debug_mode
            .as_ref()
            .filter(|debug_mode| frame_count >= debug_mode.frames);
        if let Some(debug_mode) = last_debug_frame {
            match debug_mode.capture(gl, size) {
                Ok(()) => info!(
                    "Saved frame {frame_count} to {}",
                    debug_mode.output_path.display()
                ),
                Err(e) => error!("{e}"),
            }
        }

        if let Err(e) = surface.swap_buffers(context) {
            warn!("Failed to swap buffers: {e}");
        }

        if last_debug_frame.is_some() {
            self.shutdown(event_loop);
            return;
        }

        window.request_redraw();
        self.sync_cursor();
    }
}

/// Prefer the config with the most samples
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|best, config| {
            if config.num_samples() > best.num_samples() {
                config
            } else {
                best
            }
        })
        .expect("display offered no GL configs")
}

/// Events handed to the app before egui sees them
///
/// A click over a UI panel still reaches [`App::on_event`].
fn reaches_app_before_ui(event: &WindowEvent) -> bool {
    matches!(event, WindowEvent::MouseInput { .. })
}

fn apply_cursor_mode(window: &Window, mode: CursorMode) {
    window.set_cursor_visible(mode == CursorMode::Normal);

    let grab = match mode {
        // Not every platform can lock the pointer
        CursorMode::Grabbed => window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined)),
        CursorMode::Normal => window.set_cursor_grab(CursorGrabMode::None),
    };
    if let Err(e) = grab {
        warn!("Could not change cursor grab: {e}");
    }
}

impl<A: App> ApplicationHandler for AppRuntime<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() || self.error.is_some() {
            return;
        }

        match self.start(event_loop) {
            Ok(()) => self.sync_cursor(),
            Err(e) => {
                error!("{e}");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.input.add_mouse_motion(delta);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Clicks reach the app even when egui takes them
        let early = reaches_app_before_ui(&event);
        if early {
            self.app.on_event(&event);
        }

        if let Some(Graphics {
            egui: Some(egui),
            window,
            ..
        }) = self.graphics.as_mut()
        {
            if egui.on_window_event(window, &event) {
                if early {
                    self.sync_cursor();
                }
                return;
            }
        }

        self.input.record_window_event(&event);
        if !early {
            self.app.on_event(&event);
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested");
                self.shutdown(event_loop);
            }
            WindowEvent::Resized(size) => {
                // Minimized windows report 0x0; keep the old surface
                let (Some(width), Some(height)) =
                    (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                else {
                    return;
                };
                if let Some(graphics) = &self.graphics {
                    graphics.surface.resize(&graphics.context, width, height);
                    graphics.window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }

        self.sync_cursor();
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(graphics) = &self.graphics {
            graphics.window.request_redraw();
        }
    }
}

/// Run `app` until it exits or the window closes
///
/// Startup failures are returned once the loop has stopped.
pub fn run_app<A: App + 'static>(app: A, config: AppConfig) -> Result<(), AppError> {
    let event_loop = create_event_loop()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut runtime = AppRuntime::new(app, config);
    event_loop.run_app(&mut runtime)?;

    match runtime.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

pub fn create_event_loop() -> Result<EventLoop<()>, AppError> {
    #[cfg(target_os = "linux")]
    {
        let mut builder = EventLoop::builder();
        builder.with_x11();
        Ok(builder.build()?)
    }

    #[cfg(not(target_os = "linux"))]
    {
        Ok(EventLoop::new()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::{ElementState, MouseButton};

    #[test]
    fn test_clicks_reach_app_before_ui() {
        let click = WindowEvent::MouseInput {
            device_id: unsafe { DeviceId::dummy() },
            state: ElementState::Pressed,
            button: MouseButton::Right,
        };
        assert!(reaches_app_before_ui(&click));

        let release = WindowEvent::MouseInput {
            device_id: unsafe { DeviceId::dummy() },
            state: ElementState::Released,
            button: MouseButton::Left,
        };
        assert!(reaches_app_before_ui(&release));
    }

    #[test]
    fn test_other_events_wait_for_ui() {
        assert!(!reaches_app_before_ui(&WindowEvent::Focused(true)));
        assert!(!reaches_app_before_ui(&WindowEvent::CloseRequested));
        assert!(!reaches_app_before_ui(&WindowEvent::Resized(
            PhysicalSize::new(640, 480)
        )));
    }
}

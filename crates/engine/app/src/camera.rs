//! Free-flying perspective camera
//!
//! - [`FlyCamera`]: position plus yaw/pitch in degrees, with a perspective lens
//! - [`FlyController`]: maps held keys, mouse motion and scroll onto the camera

use glam::{Mat4, Vec3};
use winit::keyboard::KeyCode;

use crate::input::InputState;

/// Pitch limit in degrees, keeps the view away from the poles
pub const MAX_PITCH: f32 = 89.9;

const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 0.0, 5.0);
const DEFAULT_YAW: f32 = -90.0;
const DEFAULT_PITCH: f32 = 0.0;
const DEFAULT_FOV: f32 = 60.0;
const MIN_FOV: f32 = 1.0;
const MAX_FOV: f32 = 179.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyCamera {
    pub position: Vec3,
    /// Degrees; -90 looks down -Z
    pub yaw: f32,
    /// Degrees, clamped to [`MAX_PITCH`]
    pub pitch: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            position: DEFAULT_POSITION,
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            fov: DEFAULT_FOV,
            aspect_ratio: 1.0,
            near: 0.01,
            far: 100.0,
        }
    }
}

impl FlyCamera {
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            aspect_ratio,
            ..Default::default()
        }
    }

    pub fn forward(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov.to_radians(),
            self.aspect_ratio,
            self.near,
            self.far,
        )
    }

    /// Back to the start position and orientation. Field of view is kept.
    pub fn reset(&mut self) {
        self.position = DEFAULT_POSITION;
        self.yaw = DEFAULT_YAW;
        self.pitch = DEFAULT_PITCH;
    }

    /// Turn by the given angles in degrees
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Narrow the field of view by `delta` degrees
    pub fn zoom(&mut self, delta: f32) {
        self.fov = (self.fov - delta).clamp(MIN_FOV, MAX_FOV);
    }
}

/// Keyboard and mouse bindings for a [`FlyCamera`]
///
/// W/S move along the view direction, D/A strafe, Q/E move along
/// `forward x right`. Mouse motion looks around, scroll zooms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyController {
    /// Units per second
    pub move_speed: f32,
    /// Degrees per pixel of mouse motion
    pub mouse_sensitivity: f32,
    /// Degrees of field of view per scroll notch
    pub zoom_speed: f32,
}

impl Default for FlyController {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            mouse_sensitivity: 0.1,
            zoom_speed: 3.0,
        }
    }
}

impl FlyController {
    /// Displacement for one frame of held movement keys
    pub fn movement(&self, camera: &FlyCamera, input: &InputState, delta_time: f32) -> Vec3 {
        let forward = camera.forward();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = forward.cross(right).normalize_or_zero();

        let amount = self.move_speed * delta_time;
        forward * input.axis(KeyCode::KeyW, KeyCode::KeyS) * amount
            + right * input.axis(KeyCode::KeyD, KeyCode::KeyA) * amount
            + up * input.axis(KeyCode::KeyQ, KeyCode::KeyE) * amount
    }

    /// Apply one frame of input. Mouse look only happens when `look` is set,
    /// i.e. while the cursor is locked to the window.
    pub fn update(&self, camera: &mut FlyCamera, input: &InputState, delta_time: f32, look: bool) {
        camera.position += self.movement(camera, input, delta_time);

        if look {
            let delta = input.raw_mouse_delta * self.mouse_sensitivity;
            camera.rotate(delta.x, -delta.y);
        }

        if input.scroll_delta.y != 0.0 {
            camera.zoom(input.scroll_delta.y * self.zoom_speed);
        }
    }
}

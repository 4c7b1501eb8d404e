//! Static scene layout and the per-frame draw sequence

use glam::{Mat4, Quat, Vec3};

use crate::model::LightingState;
use crate::orbit::OrbitLight;
use crate::packer::{CameraParams, pack_lighting};
use crate::uniforms::{Pipeline, Uniform, UniformSink};

/// Procedural meshes known to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Cube,
    Sphere,
    Cylinder,
    Plane,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::Cube, Shape::Sphere, Shape::Cylinder, Shape::Plane];
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Static transforms of the demo scene
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub objects: Vec<(Shape, Transform)>,
    /// Template for light markers; the position is replaced per light
    pub marker: Transform,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            objects: vec![
                (Shape::Cube, Transform::from_position(Vec3::new(-2.0, 0.0, 0.0))),
                (Shape::Sphere, Transform::from_position(Vec3::ZERO)),
                (Shape::Cylinder, Transform::from_position(Vec3::new(2.0, 0.0, 0.0))),
                (
                    Shape::Plane,
                    Transform::from_position(Vec3::new(0.0, -1.0, 0.0)).with_scale(10.0),
                ),
            ],
            marker: Transform::default().with_scale(0.5),
        }
    }
}

/// Drawing side of a frame. Uniform writes go to the pipeline selected last.
pub trait RenderBackend: UniformSink {
    fn use_pipeline(&mut self, pipeline: Pipeline);
    fn draw(&mut self, shape: Shape);
}

/// Counters returned by [`render_scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub point_lights: usize,
    pub draws: usize,
}

/// Draw one small unlit sphere per light, tinted with the light's color.
/// Returns the number of draws issued.
pub fn draw_light_markers<B: RenderBackend>(
    backend: &mut B,
    camera: &CameraParams,
    lights: &[OrbitLight],
    marker: &Transform,
) -> usize {
    if lights.is_empty() {
        return 0;
    }

    backend.use_pipeline(Pipeline::Unlit);
    backend.set(Uniform::Projection, camera.projection);
    backend.set(Uniform::View, camera.view);

    for light in lights {
        let transform = Transform {
            position: light.position,
            ..*marker
        };
        backend.set(Uniform::Model, transform.model_matrix());
        backend.set(Uniform::Color, light.color.rgb());
        backend.draw(Shape::Sphere);
    }
    lights.len()
}

/// Pack the lighting state, mark the point lights and draw the static geometry.
pub fn render_scene<B: RenderBackend>(
    backend: &mut B,
    state: &LightingState,
    camera: &CameraParams,
    time: f32,
    scene: &Scene,
) -> FrameStats {
    let lights: Vec<OrbitLight> = state.orbit.lights(time).collect();

    backend.use_pipeline(Pipeline::Lit);
    pack_lighting(backend, state, camera, &lights);

    let mut draws = draw_light_markers(backend, camera, &lights, &scene.marker);

    backend.use_pipeline(Pipeline::Lit);
    for (shape, transform) in &scene.objects {
        backend.set(Uniform::Model, transform.model_matrix());
        backend.draw(*shape);
        draws += 1;
    }

    FrameStats {
        point_lights: lights.len(),
        draws,
    }
}

//! GL backend for the lighting scene

use std::collections::HashMap;

use glam::Vec3;
use glow::*;
use lighting::{
    CameraParams, FrameStats, LightingState, Pipeline, RenderBackend, Scene, Shape, Uniform,
    UniformSink, UniformValue, render_scene,
};
use tracing::info;

use crate::error::RenderError;
use crate::mesh::GlMesh;
use crate::program::ShaderProgram;
use crate::shapes::{MeshData, create_cube, create_cylinder, create_plane, create_sphere};

const LIT_VERTEX_SHADER: &str = include_str!("shaders/lit.vert");
const LIT_FRAGMENT_SHADER: &str = include_str!("shaders/lit.frag");
const UNLIT_FRAGMENT_SHADER: &str = include_str!("shaders/unlit.frag");

const SPHERE_SEGMENTS: u32 = 64;
const CYLINDER_SEGMENTS: u32 = 64;

/// CPU mesh for each scene shape
pub fn shape_mesh(shape: Shape) -> MeshData {
    match shape {
        Shape::Cube => create_cube(1.0, 1.0, 1.0),
        Shape::Sphere => create_sphere(0.5, SPHERE_SEGMENTS),
        Shape::Cylinder => create_cylinder(1.0, 0.5, CYLINDER_SEGMENTS),
        Shape::Plane => create_plane(1.0, 1.0),
    }
}

/// Owns both shader pipelines and the four shape meshes
pub struct GlSceneRenderer {
    lit: ShaderProgram,
    unlit: ShaderProgram,
    meshes: HashMap<Shape, GlMesh>,
    /// Draw the scene as lines instead of filled triangles
    pub wireframe: bool,
}

impl GlSceneRenderer {
    /// Compile the pipelines and upload the meshes
    ///
    /// # Safety
    /// Must be called with an active GL context on the current thread.
    pub unsafe fn new(gl: &Context) -> Result<Self, RenderError> {
        unsafe {
            let lit = ShaderProgram::new(gl, "lit", LIT_VERTEX_SHADER, LIT_FRAGMENT_SHADER)?;
            let unlit =
                ShaderProgram::new(gl, "unlit", LIT_VERTEX_SHADER, UNLIT_FRAGMENT_SHADER)?;

            let mut meshes = HashMap::new();
            for shape in Shape::ALL {
                let data = shape_mesh(shape);
                meshes.insert(shape, GlMesh::upload(gl, &data)?);
            }
            info!("Scene renderer ready ({} meshes)", meshes.len());

            Ok(Self {
                lit,
                unlit,
                meshes,
                wireframe: false,
            })
        }
    }

    /// Clear the framebuffer and set the fixed-function state the scene expects.
    /// egui leaves depth testing and culling off, so this runs every frame.
    ///
    /// # Safety
    /// Must be called with an active GL context on the current thread.
    pub unsafe fn begin_frame(&self, gl: &Context, size: (u32, u32), background: Vec3) {
        unsafe {
            gl.viewport(0, 0, size.0 as i32, size.1 as i32);

            gl.enable(CULL_FACE);
            gl.cull_face(BACK);

            gl.enable(BLEND);
            gl.blend_func(SRC_ALPHA, ONE_MINUS_SRC_ALPHA);

            gl.enable(DEPTH_TEST);
            gl.depth_func(LESS);

            gl.clear_color(background.x, background.y, background.z, 1.0);
            gl.clear(COLOR_BUFFER_BIT | DEPTH_BUFFER_BIT);

            let mode = if self.wireframe { LINE } else { FILL };
            gl.polygon_mode(FRONT_AND_BACK, mode);
        }
    }

    /// Restore fill mode so the UI is never drawn as wireframe
    ///
    /// # Safety
    /// Must be called with an active GL context on the current thread.
    pub unsafe fn end_frame(&self, gl: &Context) {
        unsafe { gl.polygon_mode(FRONT_AND_BACK, FILL) };
    }

    /// Borrow the renderer as a [`RenderBackend`] for one frame
    ///
    /// # Safety
    /// The GL context must stay current for as long as the frame is used.
    pub unsafe fn frame<'a>(&'a mut self, gl: &'a Context) -> GlFrame<'a> {
        GlFrame {
            gl,
            renderer: self,
            active: None,
        }
    }

    /// Clear, draw the whole scene and restore state
    ///
    /// # Safety
    /// Must be called with an active GL context on the current thread.
    #[allow(clippy::too_many_arguments)]
    pub unsafe fn render(
        &mut self,
        gl: &Context,
        size: (u32, u32),
        background: Vec3,
        state: &LightingState,
        camera: &CameraParams,
        time: f32,
        scene: &Scene,
    ) -> FrameStats {
        unsafe {
            self.begin_frame(gl, size, background);
            let stats = render_scene(&mut self.frame(gl), state, camera, time, scene);
            self.end_frame(gl);
            stats
        }
    }

    /// # Safety
    /// Must be called with an active GL context on the current thread.
    pub unsafe fn destroy(&mut self, gl: &Context) {
        unsafe {
            self.lit.destroy(gl);
            self.unlit.destroy(gl);
            for (_, mesh) in self.meshes.drain() {
                mesh.destroy(gl);
            }
        }
        info!("Scene renderer destroyed");
    }

    fn program_mut(&mut self, pipeline: Pipeline) -> &mut ShaderProgram {
        match pipeline {
            Pipeline::Lit => &mut self.lit,
            Pipeline::Unlit => &mut self.unlit,
        }
    }
}

/// A [`GlSceneRenderer`] bound to a GL context for one frame
pub struct GlFrame<'a> {
    gl: &'a Context,
    renderer: &'a mut GlSceneRenderer,
    active: Option<Pipeline>,
}

impl UniformSink for GlFrame<'_> {
    fn set_uniform(&mut self, uniform: Uniform, value: UniformValue) {
        let Some(pipeline) = self.active else {
            return;
        };
        let gl = self.gl;
        // SAFETY: the frame only exists while the context is current
        unsafe {
            self.renderer
                .program_mut(pipeline)
                .set_uniform(gl, uniform, value)
        };
    }
}

impl RenderBackend for GlFrame<'_> {
    fn use_pipeline(&mut self, pipeline: Pipeline) {
        if self.active == Some(pipeline) {
            return;
        }
        // SAFETY: the frame only exists while the context is current
        unsafe { self.renderer.program_mut(pipeline).bind(self.gl) };
        self.active = Some(pipeline);
    }

    fn draw(&mut self, shape: Shape) {
        if let Some(mesh) = self.renderer.meshes.get(&shape) {
            // SAFETY: the frame only exists while the context is current
            unsafe { mesh.draw(self.gl) };
        }
    }
}

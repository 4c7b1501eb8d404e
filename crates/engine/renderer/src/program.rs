//! Linked shader program with cached uniform locations

use std::collections::HashMap;

use glow::*;
use lighting::{Uniform, UniformValue};
use tracing::debug;

use crate::error::RenderError;
use crate::shader_utils::create_program;

pub struct ShaderProgram {
    label: &'static str,
    program: Program,
    /// `None` entries are uniforms the linker dropped; looked up once and remembered
    locations: HashMap<Uniform, Option<NativeUniformLocation>>,
}

impl ShaderProgram {
    /// # Safety
    /// Requires an active OpenGL context
    pub unsafe fn new(
        gl: &Context,
        label: &'static str,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<Self, RenderError> {
        let program = unsafe { create_program(gl, vertex_src, fragment_src)? };
        debug!("Linked {label} program");
        Ok(Self {
            label,
            program,
            locations: HashMap::new(),
        })
    }

    /// # Safety
    /// Requires an active OpenGL context
    pub unsafe fn bind(&self, gl: &Context) {
        unsafe { gl.use_program(Some(self.program)) };
    }

    fn location(&mut self, gl: &Context, uniform: Uniform) -> Option<NativeUniformLocation> {
        let program = self.program;
        let label = self.label;
        self.locations
            .entry(uniform)
            .or_insert_with(|| {
                let location = unsafe { gl.get_uniform_location(program, &uniform.name()) };
                if location.is_none() {
                    debug!("{label} program has no active uniform {uniform}");
                }
                location
            })
            .clone()
    }

    /// Write a uniform of the currently bound program
    ///
    /// # Safety
    /// Requires an active OpenGL context with this program bound
    pub unsafe fn set_uniform(&mut self, gl: &Context, uniform: Uniform, value: UniformValue) {
        let location = self.location(gl, uniform);
        let location = location.as_ref();
        unsafe {
            match value {
                UniformValue::Int(v) => gl.uniform_1_i32(location, v),
                UniformValue::Float(v) => gl.uniform_1_f32(location, v),
                UniformValue::Vec3(v) => gl.uniform_3_f32(location, v.x, v.y, v.z),
                UniformValue::Mat4(m) => gl.uniform_matrix_4_f32_slice(location, false, m.as_ref()),
            }
        }
    }

    /// # Safety
    /// Requires an active OpenGL context
    pub unsafe fn destroy(&mut self, gl: &Context) {
        unsafe { gl.delete_program(self.program) };
        self.locations.clear();
    }
}

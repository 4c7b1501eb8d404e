//! GPU-side meshes

use glow::*;

use crate::error::RenderError;
use crate::shapes::{MeshData, Vertex};

/// Compiled mesh ready for GL rendering
pub struct GlMesh {
    vao: NativeVertexArray,
    vbo: NativeBuffer,
    ebo: NativeBuffer,
    index_count: i32,
}

impl GlMesh {
    /// Upload vertex and index data into a new VAO
    ///
    /// # Safety
    /// Must be called with an active GL context on the current thread.
    pub unsafe fn upload(gl: &Context, data: &MeshData) -> Result<Self, RenderError> {
        unsafe {
            let vao = gl
                .create_vertex_array()
                .map_err(RenderError::resource("vertex array"))?;
            gl.bind_vertex_array(Some(vao));

            let vbo = gl
                .create_buffer()
                .map_err(RenderError::resource("vertex buffer"))?;
            gl.bind_buffer(ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                ARRAY_BUFFER,
                bytemuck::cast_slice(&data.vertices),
                STATIC_DRAW,
            );

            let stride = std::mem::size_of::<Vertex>() as i32;
            let float = std::mem::size_of::<f32>() as i32;

            // Position attribute (location 0)
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, FLOAT, false, stride, 0);

            // Normal attribute (location 1)
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 3, FLOAT, false, stride, 3 * float);

            // UV attribute (location 2)
            gl.enable_vertex_attrib_array(2);
            gl.vertex_attrib_pointer_f32(2, 2, FLOAT, false, stride, 6 * float);

            let ebo = gl
                .create_buffer()
                .map_err(RenderError::resource("index buffer"))?;
            gl.bind_buffer(ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(
                ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(&data.indices),
                STATIC_DRAW,
            );

            gl.bind_vertex_array(None);

            Ok(Self {
                vao,
                vbo,
                ebo,
                index_count: data.indices.len() as i32,
            })
        }
    }

    /// # Safety
    /// Must be called with an active GL context and a bound program.
    pub unsafe fn draw(&self, gl: &Context) {
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            gl.draw_elements(TRIANGLES, self.index_count, UNSIGNED_INT, 0);
            gl.bind_vertex_array(None);
        }
    }

    /// # Safety
    /// Must be called with an active GL context on the current thread.
    pub unsafe fn destroy(&self, gl: &Context) {
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
            gl.delete_buffer(self.ebo);
        }
    }
}

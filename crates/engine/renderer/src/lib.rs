//! OpenGL renderer for the lighting scene
//!
//! Implements [`lighting::RenderBackend`] on top of glow:
//!
//! - [`shapes`]: CPU mesh generation (cube, sphere, cylinder, plane)
//! - [`GlMesh`]: uploaded vertex/index buffers
//! - [`ShaderProgram`]: linked program with per-[`lighting::Uniform`] location cache
//! - [`GlSceneRenderer`]: the lit and unlit pipelines plus the scene meshes

mod error;
mod mesh;
mod program;
mod scene_renderer;
pub mod shader_utils;
pub mod shapes;

pub use error::RenderError;
pub use mesh::GlMesh;
pub use program::ShaderProgram;
pub use scene_renderer::{GlFrame, GlSceneRenderer, shape_mesh};
pub use shapes::{MeshData, Vertex};

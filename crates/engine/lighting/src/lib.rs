//! Per-frame lighting parameter pipeline
//!
//! This crate holds everything about the lighting demo that does not need a
//! GL context:
//!
//! - **model**: light and material parameter records with their documented ranges
//! - **orbit**: point-light orbit animation and per-index color classification
//! - **uniforms**: structured addressing for the shading-stage parameter protocol
//! - **packer**: flattens the model into that protocol each frame
//! - **scene**: static shape transforms and the frame draw sequence
//!
//! The GL side lives in the `renderer` crate, which implements
//! [`RenderBackend`] on top of glow.

pub mod model;
pub mod orbit;
pub mod packer;
pub mod scene;
pub mod uniforms;

pub use model::{
    DirectionalLight, Light, LightingState, MAX_POINT_LIGHTS, Material, PointLight,
    PointLightOrbit, SpotLight, ranges,
};
pub use orbit::{
    OrbitColor, OrbitLight, OrbitLights, orbit_phase, orbit_position,
    orbit_step_degrees,
};
pub use packer::{CameraParams, pack_lighting};
pub use scene::{FrameStats, RenderBackend, Scene, Shape, Transform, draw_light_markers, render_scene};
pub use uniforms::{
    DirectionalField, MaterialField, Pipeline, PointLightField, RecordingSink, SpotField, Uniform,
    UniformSink, UniformValue,
};

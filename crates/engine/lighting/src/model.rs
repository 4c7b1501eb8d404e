//! Light and material parameter model
//!
//! Plain data records edited by the UI and read by the packer. The model does
//! not validate anything: the ranges in [`ranges`] document what the UI
//! enforces, and out-of-range writes from other code paths are kept as-is.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Capacity of the point-light array on the shading side
pub const MAX_POINT_LIGHTS: usize = 8;

/// Intended value ranges, shared with the UI widgets
pub mod ranges {
    use std::ops::RangeInclusive;

    /// Color channels
    pub const COLOR: RangeInclusive<f32> = 0.0..=1.0;
    /// Light intensity as edited in the UI
    pub const INTENSITY: RangeInclusive<f32> = 0.0..=1.0;
    /// Point-light constant/linear/quadratic attenuation coefficients
    pub const ATTENUATION: RangeInclusive<f32> = 0.0..=1.0;
    /// Directional light direction, edited per component as degrees
    pub const DIRECTION_DEGREES: RangeInclusive<f32> = 0.0..=360.0;
    /// Spot light direction, edited per component
    pub const SPOT_DIRECTION: RangeInclusive<f32> = -1.0..=1.0;
    /// Spot light reach in world units
    pub const SPOT_RANGE: RangeInclusive<f32> = 0.0..=30.0;
    /// Spot light inner/outer cone half-angles in degrees
    pub const SPOT_ANGLE: RangeInclusive<f32> = 0.0..=180.0;
    /// Spot light inner-to-outer rolloff exponent
    pub const SPOT_FALLOFF: RangeInclusive<f32> = 0.0..=5.0;
    /// Material ambient/diffuse/specular coefficients
    pub const REFLECTANCE: RangeInclusive<f32> = 0.0..=1.0;
    /// Material specular exponent
    pub const SHININESS: RangeInclusive<f32> = 1.0..=512.0;
    /// Number of orbiting point lights
    pub const POINT_LIGHT_COUNT: RangeInclusive<u32> = 0..=super::MAX_POINT_LIGHTS as u32;
}

/// Shared light sub-record
///
/// `position` is meaningless for directional lights. Colors are display
/// values in [0, 1], not radiance.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Light {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionalLight {
    /// Raw vector handed to the shader as-is, even though the UI edits it as degrees
    pub direction: Vec3,
    pub light: Light,
}

/// Point-light template shared by every orbiting instance
///
/// Instances only differ in position and color; intensity and attenuation
/// always come from this one record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PointLight {
    pub light: Light,
    pub const_k: f32,
    pub linear_k: f32,
    pub quadratic_k: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotLight {
    pub position: Vec3,
    pub direction: Vec3,
    pub light: Light,
    pub range: f32,
    /// Cone half-angle in degrees inside which the light is at full strength
    pub inner_angle: f32,
    /// Cone half-angle in degrees outside which the light contributes nothing
    pub outer_angle: f32,
    pub angle_falloff: f32,
}

/// Phong surface material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub color: Vec3,
    pub ambient_k: f32,
    pub diffuse_k: f32,
    pub specular_k: f32,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Vec3::ZERO,
            ambient_k: 0.0,
            diffuse_k: 0.0,
            specular_k: 0.0,
            shininess: 1.0,
        }
    }
}

/// Population state for the ring of orbiting point lights
///
/// All instances share the center, radius and speed; they are phase-offset
/// by index only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PointLightOrbit {
    pub count: u32,
    pub center: Vec3,
    pub radius: f32,
    /// Angular rate in radians per second
    pub speed: f32,
}

impl PointLightOrbit {
    /// Number of instances actually handed to the shading stage
    pub fn active_count(&self) -> usize {
        (self.count as usize).min(MAX_POINT_LIGHTS)
    }
}

/// Complete editable lighting state of the demo
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingState {
    pub directional: DirectionalLight,
    pub point_light: PointLight,
    pub spot_light: SpotLight,
    pub material: Material,
    pub orbit: PointLightOrbit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_zeroed() {
        let state = LightingState::default();
        assert_eq!(state.orbit.count, 0);
        assert_eq!(state.directional.light.intensity, 0.0);
        assert_eq!(state.point_light.const_k, 0.0);
        assert_eq!(state.spot_light.range, 0.0);
        assert_eq!(state.material.shininess, 1.0);
    }

    #[test]
    fn test_out_of_range_writes_are_kept() {
        let mut state = LightingState::default();
        state.material.shininess = 4096.0;
        state.point_light.light.intensity = 3.5;
        state.orbit.count = 12;

        assert_eq!(state.material.shininess, 4096.0);
        assert_eq!(state.point_light.light.intensity, 3.5);
        assert_eq!(state.orbit.count, 12);
        assert!(!ranges::SHININESS.contains(&state.material.shininess));
    }

    #[test]
    fn test_active_count_is_capped() {
        let mut orbit = PointLightOrbit::default();
        assert_eq!(orbit.active_count(), 0);
        orbit.count = 5;
        assert_eq!(orbit.active_count(), 5);
        orbit.count = 20;
        assert_eq!(orbit.active_count(), MAX_POINT_LIGHTS);
    }

    #[test]
    fn test_partial_toml_seeds_only_named_fields() {
        let state: LightingState = toml::from_str(
            r#"
            [material]
            diffuse_k = 0.5
            shininess = 64.0

            [orbit]
            count = 3
            center = [1.0, 0.0, 0.0]
            "#,
        )
        .unwrap();

        assert_eq!(state.material.diffuse_k, 0.5);
        assert_eq!(state.material.shininess, 64.0);
        assert_eq!(state.material.ambient_k, 0.0);
        assert_eq!(state.orbit.count, 3);
        assert_eq!(state.orbit.center, Vec3::X);
        assert_eq!(state.spot_light, SpotLight::default());
    }
}

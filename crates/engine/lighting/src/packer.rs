//! Per-frame packing of the lighting model into shading parameters

use glam::{Mat4, Vec3};

use crate::model::LightingState;
use crate::orbit::OrbitLight;
use crate::uniforms::{
    DirectionalField, MaterialField, PointLightField, SpotField, Uniform, UniformSink,
};

/// Camera data consumed by both pipelines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraParams {
    pub projection: Mat4,
    pub view: Mat4,
    pub position: Vec3,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            position: Vec3::ZERO,
        }
    }
}

/// Write the full lit-pipeline parameter set for one frame.
///
/// `lights` are the orbit-derived instances for this frame. Intensity and
/// attenuation of every instance come from the shared point-light template.
/// The count is always written alongside the array so the shader never reads
/// slots left over from earlier frames.
pub fn pack_lighting<S: UniformSink>(
    sink: &mut S,
    state: &LightingState,
    camera: &CameraParams,
    lights: &[OrbitLight],
) {
    sink.set(Uniform::Projection, camera.projection);
    sink.set(Uniform::View, camera.view);
    sink.set(Uniform::CameraPosition, camera.position);

    let directional = &state.directional;
    sink.set(
        Uniform::Directional(DirectionalField::Direction),
        directional.direction,
    );
    sink.set(
        Uniform::Directional(DirectionalField::Intensity),
        directional.light.intensity,
    );
    sink.set(
        Uniform::Directional(DirectionalField::Color),
        directional.light.color,
    );

    let template = &state.point_light;
    for light in lights {
        let index = light.index as u8;
        let slot = |field| Uniform::PointLight { index, field };
        sink.set(slot(PointLightField::Position), light.position);
        sink.set(slot(PointLightField::Color), light.color.rgb());
        sink.set(slot(PointLightField::Intensity), template.light.intensity);
        sink.set(slot(PointLightField::ConstK), template.const_k);
        sink.set(slot(PointLightField::LinearK), template.linear_k);
        sink.set(slot(PointLightField::QuadraticK), template.quadratic_k);
    }
    sink.set(Uniform::PointLightCount, lights.len() as i32);

    let spot = &state.spot_light;
    sink.set(Uniform::Spot(SpotField::Position), spot.position);
    sink.set(Uniform::Spot(SpotField::Direction), spot.direction);
    sink.set(Uniform::Spot(SpotField::Intensity), spot.light.intensity);
    sink.set(Uniform::Spot(SpotField::Color), spot.light.color);
    sink.set(Uniform::Spot(SpotField::Range), spot.range);
    sink.set(Uniform::Spot(SpotField::InnerAngle), spot.inner_angle);
    sink.set(Uniform::Spot(SpotField::OuterAngle), spot.outer_angle);
    sink.set(Uniform::Spot(SpotField::AngleFalloff), spot.angle_falloff);

    let material = &state.material;
    sink.set(Uniform::Material(MaterialField::Color), material.color);
    sink.set(Uniform::Material(MaterialField::AmbientK), material.ambient_k);
    sink.set(Uniform::Material(MaterialField::DiffuseK), material.diffuse_k);
    sink.set(Uniform::Material(MaterialField::SpecularK), material.specular_k);
    sink.set(Uniform::Material(MaterialField::Shininess), material.shininess);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uniforms::{RecordingSink, UniformValue};

    fn sample_state() -> LightingState {
        let mut state = LightingState::default();
        state.directional.direction = Vec3::new(0.0, -1.0, 0.0);
        state.directional.light.intensity = 0.4;
        state.directional.light.color = Vec3::ONE;
        state.point_light.light.intensity = 0.8;
        state.point_light.const_k = 1.0;
        state.point_light.linear_k = 0.2;
        state.point_light.quadratic_k = 0.05;
        state.spot_light.range = 12.0;
        state.spot_light.inner_angle = 15.0;
        state.spot_light.outer_angle = 30.0;
        state.spot_light.angle_falloff = 2.0;
        state.material.color = Vec3::new(0.8, 0.6, 0.4);
        state.material.shininess = 32.0;
        state.orbit.count = 4;
        state.orbit.radius = 3.0;
        state.orbit.speed = 1.5;
        state
    }

    fn pack(state: &LightingState, time: f32) -> RecordingSink {
        let lights: Vec<_> = state.orbit.lights(time).collect();
        let mut sink = RecordingSink::new();
        pack_lighting(&mut sink, state, &CameraParams::default(), &lights);
        sink
    }

    #[test]
    fn test_instances_share_template() {
        let sink = pack(&sample_state(), 0.3);
        for index in 0..4 {
            let slot = |field| Uniform::PointLight { index, field };
            assert_eq!(
                sink.get(slot(PointLightField::Intensity)),
                Some(UniformValue::Float(0.8))
            );
            assert_eq!(
                sink.get(slot(PointLightField::LinearK)),
                Some(UniformValue::Float(0.2))
            );
        }
        assert_eq!(sink.get(Uniform::PointLightCount), Some(UniformValue::Int(4)));
        assert_eq!(sink.max_point_light_index(), Some(3));
    }

    #[test]
    fn test_directional_direction_is_raw() {
        let mut state = sample_state();
        state.directional.direction = Vec3::new(45.0, 270.0, 0.0);
        let sink = pack(&state, 0.0);
        assert_eq!(
            sink.get(Uniform::Directional(DirectionalField::Direction)),
            Some(UniformValue::Vec3(Vec3::new(45.0, 270.0, 0.0)))
        );
    }

    #[test]
    fn test_no_lights_still_writes_count() {
        let mut state = sample_state();
        state.orbit.count = 0;
        let sink = pack(&state, 5.0);
        assert_eq!(sink.max_point_light_index(), None);
        assert_eq!(sink.get(Uniform::PointLightCount), Some(UniformValue::Int(0)));
        assert_eq!(
            sink.get(Uniform::Material(MaterialField::Shininess)),
            Some(UniformValue::Float(32.0))
        );
    }

    fn assert_packed(sink: &RecordingSink, uniform: Uniform, expected: impl Into<UniformValue>) {
        assert_eq!(sink.get(uniform), Some(expected.into()), "{uniform:?}");
    }

    #[test]
    fn test_each_group_carries_its_own_fields() {
        let mut state = sample_state();
        state.directional.direction = Vec3::new(0.1, 0.2, 0.3);
        state.directional.light.intensity = 0.35;
        state.directional.light.color = Vec3::new(0.9, 0.1, 0.2);
        state.spot_light.position = Vec3::new(1.0, 4.0, -2.0);
        state.spot_light.direction = Vec3::new(0.0, -0.9, 0.1);
        state.spot_light.light.intensity = 0.65;
        state.spot_light.light.color = Vec3::new(0.3, 0.7, 0.5);
        state.spot_light.range = 17.0;
        state.spot_light.inner_angle = 11.0;
        state.spot_light.outer_angle = 47.0;
        state.spot_light.angle_falloff = 1.25;
        state.material.color = Vec3::new(0.25, 0.5, 0.75);
        state.material.ambient_k = 0.11;
        state.material.diffuse_k = 0.22;
        state.material.specular_k = 0.33;
        state.material.shininess = 96.0;

        let sink = pack(&state, 0.0);

        let directional = Uniform::Directional;
        assert_packed(&sink, directional(DirectionalField::Direction), Vec3::new(0.1, 0.2, 0.3));
        assert_packed(&sink, directional(DirectionalField::Intensity), 0.35_f32);
        assert_packed(&sink, directional(DirectionalField::Color), Vec3::new(0.9, 0.1, 0.2));

        let spot = Uniform::Spot;
        assert_packed(&sink, spot(SpotField::Position), Vec3::new(1.0, 4.0, -2.0));
        assert_packed(&sink, spot(SpotField::Direction), Vec3::new(0.0, -0.9, 0.1));
        assert_packed(&sink, spot(SpotField::Intensity), 0.65_f32);
        assert_packed(&sink, spot(SpotField::Color), Vec3::new(0.3, 0.7, 0.5));
        assert_packed(&sink, spot(SpotField::Range), 17.0_f32);
        assert_packed(&sink, spot(SpotField::InnerAngle), 11.0_f32);
        assert_packed(&sink, spot(SpotField::OuterAngle), 47.0_f32);
        assert_packed(&sink, spot(SpotField::AngleFalloff), 1.25_f32);

        let material = Uniform::Material;
        assert_packed(&sink, material(MaterialField::Color), Vec3::new(0.25, 0.5, 0.75));
        assert_packed(&sink, material(MaterialField::AmbientK), 0.11_f32);
        assert_packed(&sink, material(MaterialField::DiffuseK), 0.22_f32);
        assert_packed(&sink, material(MaterialField::SpecularK), 0.33_f32);
        assert_packed(&sink, material(MaterialField::Shininess), 96.0_f32);
    }

    #[test]
    fn test_camera_comes_first() {
        let sink = pack(&sample_state(), 0.0);
        assert_eq!(sink.writes[0].0, Uniform::Projection);
        assert_eq!(sink.writes[1].0, Uniform::View);
        assert_eq!(sink.writes[2].0, Uniform::CameraPosition);
    }
}

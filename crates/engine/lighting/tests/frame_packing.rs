use glam::{Mat4, Vec3};
use lighting::{
    CameraParams, LightingState, OrbitColor, PointLightField, RecordingSink, Uniform,
    UniformValue, pack_lighting,
};

fn three_light_state() -> LightingState {
    let mut state = LightingState::default();
    state.point_light.light.intensity = 1.0;
    state.point_light.const_k = 1.0;
    state.point_light.linear_k = 0.09;
    state.point_light.quadratic_k = 0.032;
    state.orbit.count = 3;
    state.orbit.center = Vec3::new(1.0, 0.0, 0.0);
    state.orbit.radius = 5.0;
    state.orbit.speed = 1.0;
    state
}

fn camera() -> CameraParams {
    CameraParams {
        projection: Mat4::perspective_rh_gl(60f32.to_radians(), 1.5, 0.01, 100.0),
        view: Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y),
        position: Vec3::new(0.0, 0.0, 5.0),
    }
}

fn pack(state: &LightingState, time: f32) -> RecordingSink {
    let lights: Vec<_> = state.orbit.lights(time).collect();
    let mut sink = RecordingSink::new();
    pack_lighting(&mut sink, state, &camera(), &lights);
    sink
}

fn point(index: u8, field: PointLightField) -> Uniform {
    Uniform::PointLight { index, field }
}

fn vec3(sink: &RecordingSink, uniform: Uniform) -> Vec3 {
    match sink.get(uniform) {
        Some(UniformValue::Vec3(value)) => value,
        other => panic!("{uniform} was {other:?}"),
    }
}

#[test]
fn three_lights_at_time_zero() {
    let sink = pack(&three_light_state(), 0.0);

    let expected = [
        (Vec3::new(6.0, 0.0, 0.0), OrbitColor::Blue),
        (Vec3::new(-1.5, 0.0, 4.330127), OrbitColor::Green),
        (Vec3::new(-1.5, 0.0, -4.330127), OrbitColor::Red),
    ];
    for (index, (position, color)) in expected.into_iter().enumerate() {
        let index = index as u8;
        let actual = vec3(&sink, point(index, PointLightField::Position));
        assert!(
            (actual - position).length() < 1e-4,
            "light {index}: expected {position:?}, got {actual:?}"
        );
        assert_eq!(vec3(&sink, point(index, PointLightField::Color)), color.rgb());
    }
    assert_eq!(sink.get(Uniform::PointLightCount), Some(UniformValue::Int(3)));
}

#[test]
fn packing_is_idempotent() {
    let state = three_light_state();
    let first = pack(&state, 2.75);
    let second = pack(&state, 2.75);
    assert_eq!(first, second);
}

#[test]
fn shrinking_the_ring_never_addresses_stale_slots() {
    let mut state = three_light_state();
    state.orbit.count = 8;
    assert_eq!(pack(&state, 1.0).max_point_light_index(), Some(7));

    state.orbit.count = 2;
    let sink = pack(&state, 1.0);
    assert_eq!(sink.max_point_light_index(), Some(1));
    assert_eq!(sink.get(Uniform::PointLightCount), Some(UniformValue::Int(2)));
}

#[test]
fn oversized_ring_is_clamped() {
    let mut state = three_light_state();
    state.orbit.count = 40;
    let sink = pack(&state, 0.0);
    assert_eq!(sink.max_point_light_index(), Some(7));
    assert_eq!(sink.get(Uniform::PointLightCount), Some(UniformValue::Int(8)));
}

#[test]
fn orbit_speed_only_moves_lights() {
    let slow = three_light_state();
    let mut fast = slow;
    fast.orbit.speed = 4.0;

    let slow = pack(&slow, 1.0);
    let fast = pack(&fast, 1.0);

    assert_eq!(slow.get(Uniform::PointLightCount), fast.get(Uniform::PointLightCount));
    for index in 0..3 {
        for field in [
            PointLightField::Intensity,
            PointLightField::ConstK,
            PointLightField::LinearK,
            PointLightField::QuadraticK,
            PointLightField::Color,
        ] {
            assert_eq!(slow.get(point(index, field)), fast.get(point(index, field)));
        }
        assert_ne!(
            slow.get(point(index, PointLightField::Position)),
            fast.get(point(index, PointLightField::Position))
        );
    }
}

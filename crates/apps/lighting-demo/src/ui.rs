//! Parameter editing windows
//!
//! One egui window per light type plus the material. Widgets write straight
//! into the [`LightingState`]; the next frame picks the new values up.

use std::ops::RangeInclusive;

use egui::{DragValue, Ui};
use glam::Vec3;
use lighting::{Light, LightingState, ranges};

const COEFFICIENT_SPEED: f64 = 0.01;
const UNIT_SPEED: f64 = 1.0;

pub fn lighting_windows(ctx: &egui::Context, state: &mut LightingState) {
    egui::Window::new("Directional Light")
        .default_pos([10.0, 10.0])
        .show(ctx, |ui| {
            let directional = &mut state.directional;
            vec3_row(
                ui,
                "Direction",
                &mut directional.direction,
                UNIT_SPEED,
                Some(ranges::DIRECTION_DEGREES),
            )
            .on_hover_text(
                "Dragged as 0-360 but sent to the shader as a raw direction vector",
            );
            light_rows(ui, &mut directional.light);
        });

    egui::Window::new("Point Light")
        .default_pos([10.0, 170.0])
        .show(ctx, |ui| {
            let orbit = &mut state.orbit;
            ui.horizontal(|ui| {
                ui.label("Count");
                ui.add(
                    DragValue::new(&mut orbit.count)
                        .speed(1.0)
                        .range(ranges::POINT_LIGHT_COUNT),
                );
            });
            vec3_row(ui, "Orbit center", &mut orbit.center, UNIT_SPEED, None);
            scalar_row(ui, "Orbit radius", &mut orbit.radius, UNIT_SPEED, None);
            scalar_row(ui, "Orbit speed", &mut orbit.speed, UNIT_SPEED, None);

            ui.separator();

            // One template shared by every orbiting instance
            let point = &mut state.point_light;
            scalar_row(
                ui,
                "Intensity",
                &mut point.light.intensity,
                COEFFICIENT_SPEED,
                Some(ranges::INTENSITY),
            );
            scalar_row(
                ui,
                "Constant",
                &mut point.const_k,
                COEFFICIENT_SPEED,
                Some(ranges::ATTENUATION),
            );
            scalar_row(
                ui,
                "Linear",
                &mut point.linear_k,
                COEFFICIENT_SPEED,
                Some(ranges::ATTENUATION),
            );
            scalar_row(
                ui,
                "Quadratic",
                &mut point.quadratic_k,
                COEFFICIENT_SPEED,
                Some(ranges::ATTENUATION),
            );
        });

    egui::Window::new("Spot Light")
        .default_pos([10.0, 400.0])
        .show(ctx, |ui| {
            let spot = &mut state.spot_light;
            vec3_row(ui, "Position", &mut spot.position, UNIT_SPEED, None);
            vec3_row(
                ui,
                "Direction",
                &mut spot.direction,
                COEFFICIENT_SPEED,
                Some(ranges::SPOT_DIRECTION),
            );
            light_rows(ui, &mut spot.light);
            scalar_row(ui, "Range", &mut spot.range, UNIT_SPEED, Some(ranges::SPOT_RANGE));
            scalar_row(
                ui,
                "Inner angle",
                &mut spot.inner_angle,
                UNIT_SPEED,
                Some(ranges::SPOT_ANGLE),
            );
            scalar_row(
                ui,
                "Outer angle",
                &mut spot.outer_angle,
                UNIT_SPEED,
                Some(ranges::SPOT_ANGLE),
            );
            scalar_row(
                ui,
                "Falloff",
                &mut spot.angle_falloff,
                COEFFICIENT_SPEED,
                Some(ranges::SPOT_FALLOFF),
            );
        });

    egui::Window::new("Material")
        .default_pos([300.0, 10.0])
        .show(ctx, |ui| {
            let material = &mut state.material;
            color_row(ui, "Color", &mut material.color);
            scalar_row(
                ui,
                "Ambient",
                &mut material.ambient_k,
                COEFFICIENT_SPEED,
                Some(ranges::REFLECTANCE),
            );
            scalar_row(
                ui,
                "Diffuse",
                &mut material.diffuse_k,
                COEFFICIENT_SPEED,
                Some(ranges::REFLECTANCE),
            );
            scalar_row(
                ui,
                "Specular",
                &mut material.specular_k,
                COEFFICIENT_SPEED,
                Some(ranges::REFLECTANCE),
            );
            scalar_row(
                ui,
                "Shininess",
                &mut material.shininess,
                UNIT_SPEED,
                Some(ranges::SHININESS),
            );
        });
}

/// Color and intensity of a light
fn light_rows(ui: &mut Ui, light: &mut Light) {
    color_row(ui, "Color", &mut light.color);
    scalar_row(
        ui,
        "Intensity",
        &mut light.intensity,
        COEFFICIENT_SPEED,
        Some(ranges::INTENSITY),
    );
}

fn color_row(ui: &mut Ui, label: &str, color: &mut Vec3) {
    ui.horizontal(|ui| {
        ui.label(label);
        let mut rgb = color.to_array();
        if ui.color_edit_button_rgb(&mut rgb).changed() {
            *color = picked_color(rgb);
        }
    });
}

/// Picker output limited to the displayable range
fn picked_color(rgb: [f32; 3]) -> Vec3 {
    Vec3::from_array(rgb).clamp(
        Vec3::splat(*ranges::COLOR.start()),
        Vec3::splat(*ranges::COLOR.end()),
    )
}

fn drag(value: &mut f32, speed: f64, range: Option<RangeInclusive<f32>>) -> DragValue<'_> {
    let widget = DragValue::new(value).speed(speed);
    match range {
        // Values seeded from config may sit outside the widget range
        Some(range) => widget.range(range).clamp_existing_to_range(false),
        None => widget,
    }
}

fn scalar_row(
    ui: &mut Ui,
    label: &str,
    value: &mut f32,
    speed: f64,
    range: Option<RangeInclusive<f32>>,
) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.add(drag(value, speed, range));
    });
}

fn vec3_row(
    ui: &mut Ui,
    label: &str,
    value: &mut Vec3,
    speed: f64,
    range: Option<RangeInclusive<f32>>,
) -> egui::Response {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.add(drag(&mut value.x, speed, range.clone()));
        ui.add(drag(&mut value.y, speed, range.clone()));
        ui.add(drag(&mut value.z, speed, range));
    })
    .response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picked_color_stays_in_range() {
        assert_eq!(picked_color([0.2, 0.5, 1.0]), Vec3::new(0.2, 0.5, 1.0));
        assert_eq!(picked_color([1.4, -0.1, 0.3]), Vec3::new(1.0, 0.0, 0.3));
    }
}

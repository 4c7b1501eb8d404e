//! Shading-stage parameter protocol
//!
//! Parameters are addressed by [`Uniform`], a structured key (field enums plus
//! an array index for point lights) instead of formatted strings. The GLSL
//! identifier is only rendered by [`Uniform::name`], which a binding layer
//! calls once per key and caches.

use std::fmt;

use glam::{Mat4, Vec3};

/// Shader pipeline a draw is issued with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pipeline {
    /// Phong shading over every light plus the material
    Lit,
    /// Flat color, used for light markers
    Unlit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectionalField {
    Direction,
    Intensity,
    Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointLightField {
    Position,
    Color,
    Intensity,
    ConstK,
    LinearK,
    QuadraticK,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpotField {
    Position,
    Direction,
    Intensity,
    Color,
    Range,
    InnerAngle,
    OuterAngle,
    AngleFalloff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialField {
    Color,
    AmbientK,
    DiffuseK,
    SpecularK,
    Shininess,
}

/// Address of one shading parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Uniform {
    Projection,
    View,
    Model,
    CameraPosition,
    /// Flat color of the unlit pipeline
    Color,
    Directional(DirectionalField),
    PointLight { index: u8, field: PointLightField },
    /// Number of valid entries in the point-light array
    PointLightCount,
    Spot(SpotField),
    Material(MaterialField),
}

impl Uniform {
    /// GLSL identifier of this parameter
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Uniform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Projection => f.write_str("_Projection"),
            Self::View => f.write_str("_View"),
            Self::Model => f.write_str("_Model"),
            Self::CameraPosition => f.write_str("_CameraPosition"),
            Self::Color => f.write_str("_Color"),
            Self::Directional(field) => {
                let field = match field {
                    DirectionalField::Direction => "direction",
                    DirectionalField::Intensity => "light.intensity",
                    DirectionalField::Color => "light.color",
                };
                write!(f, "_DirectionalLight.{field}")
            }
            Self::PointLight { index, field } => {
                let field = match field {
                    PointLightField::Position => "position",
                    PointLightField::Color => "light.color",
                    PointLightField::Intensity => "light.intensity",
                    PointLightField::ConstK => "constK",
                    PointLightField::LinearK => "linearK",
                    PointLightField::QuadraticK => "quadraticK",
                };
                write!(f, "_PointLights[{index}].{field}")
            }
            Self::PointLightCount => f.write_str("_PointLightCount"),
            Self::Spot(field) => {
                let field = match field {
                    SpotField::Position => "position",
                    SpotField::Direction => "direction",
                    SpotField::Intensity => "light.intensity",
                    SpotField::Color => "light.color",
                    SpotField::Range => "range",
                    SpotField::InnerAngle => "innerAngle",
                    SpotField::OuterAngle => "outerAngle",
                    SpotField::AngleFalloff => "angleFalloff",
                };
                write!(f, "_SpotLight.{field}")
            }
            Self::Material(field) => {
                let field = match field {
                    MaterialField::Color => "color",
                    MaterialField::AmbientK => "ambientK",
                    MaterialField::DiffuseK => "diffuseK",
                    MaterialField::SpecularK => "specularK",
                    MaterialField::Shininess => "shininess",
                };
                write!(f, "_Material.{field}")
            }
        }
    }
}

/// Value of one shading parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec3(Vec3),
    Mat4(Mat4),
}

impl From<i32> for UniformValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<Vec3> for UniformValue {
    fn from(value: Vec3) -> Self {
        Self::Vec3(value)
    }
}

impl From<Mat4> for UniformValue {
    fn from(value: Mat4) -> Self {
        Self::Mat4(value)
    }
}

/// Receiving side of the parameter protocol
pub trait UniformSink {
    fn set_uniform(&mut self, uniform: Uniform, value: UniformValue);

    /// Convenience wrapper converting plain values
    fn set(&mut self, uniform: Uniform, value: impl Into<UniformValue>)
    where
        Self: Sized,
    {
        self.set_uniform(uniform, value.into());
    }
}

/// Sink that records every write in order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSink {
    pub writes: Vec<(Uniform, UniformValue)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value written to `uniform`, if any
    pub fn get(&self, uniform: Uniform) -> Option<UniformValue> {
        self.writes
            .iter()
            .rev()
            .find(|(key, _)| *key == uniform)
            .map(|(_, value)| *value)
    }

    /// Highest point-light array index written, if any
    pub fn max_point_light_index(&self) -> Option<u8> {
        self.writes
            .iter()
            .filter_map(|(key, _)| match key {
                Uniform::PointLight { index, .. } => Some(*index),
                _ => None,
            })
            .max()
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }
}

impl UniformSink for RecordingSink {
    fn set_uniform(&mut self, uniform: Uniform, value: UniformValue) {
        self.writes.push((uniform, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_names() {
        assert_eq!(Uniform::Projection.name(), "_Projection");
        assert_eq!(
            Uniform::Directional(DirectionalField::Color).name(),
            "_DirectionalLight.light.color"
        );
        assert_eq!(
            Uniform::PointLight {
                index: 3,
                field: PointLightField::QuadraticK
            }
            .name(),
            "_PointLights[3].quadraticK"
        );
        assert_eq!(
            Uniform::Spot(SpotField::AngleFalloff).name(),
            "_SpotLight.angleFalloff"
        );
        assert_eq!(
            Uniform::Material(MaterialField::Shininess).name(),
            "_Material.shininess"
        );
        assert_eq!(Uniform::PointLightCount.name(), "_PointLightCount");
    }

    #[test]
    fn test_recording_sink_keeps_last_write() {
        let mut sink = RecordingSink::new();
        sink.set(Uniform::Color, Vec3::X);
        sink.set(Uniform::Color, Vec3::Y);
        sink.set(Uniform::PointLightCount, 2);

        assert_eq!(sink.writes.len(), 3);
        assert_eq!(sink.get(Uniform::Color), Some(UniformValue::Vec3(Vec3::Y)));
        assert_eq!(sink.get(Uniform::PointLightCount), Some(UniformValue::Int(2)));
        assert_eq!(sink.get(Uniform::Model), None);
        assert_eq!(sink.max_point_light_index(), None);
    }
}

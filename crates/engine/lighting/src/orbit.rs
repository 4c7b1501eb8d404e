//! Point-light orbit animation
//!
//! Lights are spread evenly on a circle in the XZ plane around the orbit
//! center and rotate together at the orbit speed.

use glam::Vec3;

use crate::model::PointLightOrbit;

/// Color class of an orbiting light, derived from its index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitColor {
    Red,
    Green,
    Blue,
}

impl OrbitColor {
    /// Classify a light by index.
    ///
    /// The checks overlap (index 5 passes both), so the order below decides
    /// the result: multiples of three win over multiples of two.
    pub fn for_index(index: usize) -> Self {
        match index + 1 {
            n if n % 3 == 0 => Self::Red,
            n if n % 2 == 0 => Self::Green,
            _ => Self::Blue,
        }
    }

    pub fn rgb(self) -> Vec3 {
        match self {
            Self::Red => Vec3::X,
            Self::Green => Vec3::Y,
            Self::Blue => Vec3::Z,
        }
    }
}

/// Derived per-frame state of one orbiting light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitLight {
    pub index: usize,
    /// Fixed phase offset in radians
    pub phase: f32,
    pub position: Vec3,
    pub color: OrbitColor,
}

/// Angular spacing between neighbouring lights in whole degrees.
///
/// The step is truncated, so counts that do not divide 360 leave a gap
/// between the last and the first light (7 lights step by 51 degrees).
pub fn orbit_step_degrees(count: usize) -> u32 {
    debug_assert!(count > 0);
    360 / count as u32
}

/// Phase offset of light `index` in radians.
///
/// `count` must be non-zero; [`OrbitLights`] never calls this for an empty ring.
pub fn orbit_phase(count: usize, index: usize) -> f32 {
    (orbit_step_degrees(count) as f32 * index as f32).to_radians()
}

/// World position of a light with the given phase at `time` seconds
pub fn orbit_position(orbit: &PointLightOrbit, phase: f32, time: f32) -> Vec3 {
    let theta = phase + time * orbit.speed;
    orbit.center + Vec3::new(theta.cos() * orbit.radius, 0.0, theta.sin() * orbit.radius)
}

impl PointLightOrbit {
    /// Iterate the active lights at `time` seconds
    pub fn lights(&self, time: f32) -> OrbitLights<'_> {
        OrbitLights {
            orbit: self,
            time,
            next: 0,
            count: self.active_count(),
        }
    }
}

/// Iterator over the active orbiting lights for one frame
pub struct OrbitLights<'a> {
    orbit: &'a PointLightOrbit,
    time: f32,
    next: usize,
    count: usize,
}

impl Iterator for OrbitLights<'_> {
    type Item = OrbitLight;

    fn next(&mut self) -> Option<OrbitLight> {
        if self.next >= self.count {
            return None;
        }
        let index = self.next;
        self.next += 1;

        let phase = orbit_phase(self.count, index);
        Some(OrbitLight {
            index,
            phase,
            position: orbit_position(self.orbit, phase, self.time),
            color: OrbitColor::for_index(index),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for OrbitLights<'_> {}

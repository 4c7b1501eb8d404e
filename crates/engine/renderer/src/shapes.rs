//! Procedural mesh generation
//!
//! All shapes are centered on the origin and wound counter-clockwise when
//! seen from outside, so they survive back-face culling.

use std::f32::consts::{PI, TAU};

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// Interleaved vertex layout: position@0, normal@1, uv@2
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }
}

/// Indexed triangle list on the CPU
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    fn push_vertex(&mut self, position: Vec3, normal: Vec3, uv: Vec2) -> u32 {
        self.vertices.push(Vertex::new(position, normal, uv));
        (self.vertices.len() - 1) as u32
    }

    fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Corner positions of every triangle
    pub fn triangles(&self) -> impl Iterator<Item = [&Vertex; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                &self.vertices[tri[0] as usize],
                &self.vertices[tri[1] as usize],
                &self.vertices[tri[2] as usize],
            ]
        })
    }
}

/// Axis-aligned box, four vertices per face so normals stay flat
pub fn create_cube(width: f32, height: f32, depth: f32) -> MeshData {
    let half = Vec3::new(width, height, depth) * 0.5;
    // (normal, u, v) with u x v == normal
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

    let mut mesh = MeshData::default();
    for (normal, u, v) in faces {
        let base = mesh.vertices.len() as u32;
        for (s, t) in corners {
            let position = (normal + u * s + v * t) * half;
            let uv = Vec2::new((s + 1.0) * 0.5, (t + 1.0) * 0.5);
            mesh.push_vertex(position, normal, uv);
        }
        mesh.push_triangle(base, base + 1, base + 2);
        mesh.push_triangle(base + 2, base + 3, base);
    }
    mesh
}

/// UV sphere with `segments` slices around Y and as many rings pole to pole
pub fn create_sphere(radius: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let rings = segments;
    let columns = segments + 1;

    let mut mesh = MeshData::default();
    for i in 0..=rings {
        let phi = PI * i as f32 / rings as f32;
        for j in 0..=segments {
            let theta = TAU * j as f32 / segments as f32;
            let normal = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            let uv = Vec2::new(j as f32 / segments as f32, 1.0 - i as f32 / rings as f32);
            mesh.push_vertex(normal * radius, normal, uv);
        }
    }

    let at = |i: u32, j: u32| i * columns + j;
    for i in 0..rings {
        for j in 0..segments {
            let (a, b, c, d) = (at(i, j), at(i + 1, j), at(i + 1, j + 1), at(i, j + 1));
            // The first and last ring collapse to a pole; skip the zero-area half
            if i + 1 < rings {
                mesh.push_triangle(a, c, b);
            }
            if i > 0 {
                mesh.push_triangle(a, d, c);
            }
        }
    }
    mesh
}

/// Capped cylinder along Y
pub fn create_cylinder(height: f32, radius: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let top = height * 0.5;
    let bottom = -top;
    let rim = |j: u32| {
        let theta = TAU * j as f32 / segments as f32;
        Vec3::new(theta.cos(), 0.0, theta.sin())
    };

    let mut mesh = MeshData::default();

    // Side: a top row and a bottom row, seam duplicated for the uv wrap
    let side = mesh.vertices.len() as u32;
    for (y, v) in [(top, 1.0), (bottom, 0.0)] {
        for j in 0..=segments {
            let dir = rim(j);
            let uv = Vec2::new(j as f32 / segments as f32, v);
            mesh.push_vertex(dir * radius + Vec3::Y * y, dir, uv);
        }
    }
    let columns = segments + 1;
    for j in 0..segments {
        let (a, b) = (side + j, side + columns + j);
        let (c, d) = (b + 1, a + 1);
        mesh.push_triangle(a, c, b);
        mesh.push_triangle(a, d, c);
    }

    for (y, normal) in [(top, Vec3::Y), (bottom, Vec3::NEG_Y)] {
        let center = mesh.push_vertex(Vec3::Y * y, normal, Vec2::splat(0.5));
        let first = mesh.vertices.len() as u32;
        for j in 0..=segments {
            let dir = rim(j);
            let uv = Vec2::new(0.5 + dir.x * 0.5, 0.5 + dir.z * 0.5);
            mesh.push_vertex(dir * radius + Vec3::Y * y, normal, uv);
        }
        for j in 0..segments {
            let (p0, p1) = (first + j, first + j + 1);
            if y > 0.0 {
                mesh.push_triangle(center, p1, p0);
            } else {
                mesh.push_triangle(center, p0, p1);
            }
        }
    }
    mesh
}

/// Flat quad in the XZ plane facing +Y
pub fn create_plane(width: f32, height: f32) -> MeshData {
    let (hw, hh) = (width * 0.5, height * 0.5);
    let mut mesh = MeshData::default();
    mesh.push_vertex(Vec3::new(-hw, 0.0, hh), Vec3::Y, Vec2::new(0.0, 0.0));
    mesh.push_vertex(Vec3::new(hw, 0.0, hh), Vec3::Y, Vec2::new(1.0, 0.0));
    mesh.push_vertex(Vec3::new(hw, 0.0, -hh), Vec3::Y, Vec2::new(1.0, 1.0));
    mesh.push_vertex(Vec3::new(-hw, 0.0, -hh), Vec3::Y, Vec2::new(0.0, 1.0));
    mesh.push_triangle(0, 1, 2);
    mesh.push_triangle(2, 3, 0);
    mesh
}

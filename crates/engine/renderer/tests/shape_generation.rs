use glam::Vec3;
use lighting::Shape;
use renderer::{MeshData, shape_mesh};

fn assert_indices_in_bounds(mesh: &MeshData) {
    assert_eq!(mesh.indices.len() % 3, 0);
    let count = mesh.vertices.len() as u32;
    assert!(mesh.indices.iter().all(|&i| i < count));
}

fn assert_unit_normals(mesh: &MeshData) {
    for vertex in &mesh.vertices {
        let length = vertex.normal().length();
        assert!((length - 1.0).abs() < 1e-4, "normal length {length}");
    }
}

/// Every triangle's geometric normal agrees with its vertex normals
fn assert_outward_winding(mesh: &MeshData) {
    for [a, b, c] in mesh.triangles() {
        let face = (b.position() - a.position()).cross(c.position() - a.position());
        if face.length_squared() < 1e-12 {
            panic!("degenerate triangle at {:?}", a.position());
        }
        let shading = a.normal() + b.normal() + c.normal();
        assert!(
            face.dot(shading) > 0.0,
            "inward triangle at {:?}",
            a.position()
        );
    }
}

#[test]
fn all_shapes_are_well_formed() {
    for shape in Shape::ALL {
        let mesh = shape_mesh(shape);
        assert!(!mesh.indices.is_empty(), "{shape:?} has no triangles");
        assert_indices_in_bounds(&mesh);
        assert_unit_normals(&mesh);
        assert_outward_winding(&mesh);
    }
}

#[test]
fn closed_shapes_point_away_from_center() {
    for shape in [Shape::Cube, Shape::Sphere, Shape::Cylinder] {
        let mesh = shape_mesh(shape);
        for [a, b, c] in mesh.triangles() {
            let centroid = (a.position() + b.position() + c.position()) / 3.0;
            let face = (b.position() - a.position()).cross(c.position() - a.position());
            assert!(face.dot(centroid) > 0.0, "{shape:?} triangle faces inward");
        }
    }
}

#[test]
fn shapes_fit_unit_bounds() {
    for shape in Shape::ALL {
        let mesh = shape_mesh(shape);
        for vertex in &mesh.vertices {
            let p = vertex.position();
            assert!(p.abs().max_element() <= 0.5 + 1e-5, "{shape:?} vertex {p:?}");
        }
    }
}

#[test]
fn plane_lies_flat() {
    let mesh = shape_mesh(Shape::Plane);
    assert!(mesh.vertices.iter().all(|v| v.position().y == 0.0));
    assert!(mesh.vertices.iter().all(|v| v.normal() == Vec3::Y));
}

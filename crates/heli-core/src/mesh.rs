//! Indexed triangle meshes for the primitive shapes used by the scene.
//!
//! Conventions: cylinders stand along +Y and are centered on the origin,
//! planes lie in XY facing +Z, spheres are UV spheres with poles on Y.

use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Cylinder {
        radius: f32,
        height: f32,
        segments: u32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Plane {
        width: f32,
        height: f32,
    },
}

impl Shape {
    pub fn mesh(&self) -> MeshData {
        match *self {
            Shape::Box {
                width,
                height,
                depth,
            } => box_mesh(width, height, depth),
            Shape::Cylinder {
                radius,
                height,
                segments,
            } => cylinder_mesh(radius, height, segments.max(3)),
            Shape::Sphere {
                radius,
                width_segments,
                height_segments,
            } => sphere_mesh(radius, width_segments.max(3), height_segments.max(2)),
            Shape::Plane { width, height } => plane_mesh(width, height),
        }
    }
}

impl MeshData {
    fn push(&mut self, position: Vec3, normal: Vec3, uv: Vec2) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(Vertex {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
        });
        index
    }

    // Quad spanning `origin .. origin + u + v`; `u × v` points along `normal`.
    fn push_quad(&mut self, origin: Vec3, u: Vec3, v: Vec3, normal: Vec3) {
        let a = self.push(origin, normal, Vec2::new(0.0, 0.0));
        let b = self.push(origin + u, normal, Vec2::new(1.0, 0.0));
        let c = self.push(origin + u + v, normal, Vec2::new(1.0, 1.0));
        let d = self.push(origin + v, normal, Vec2::new(0.0, 1.0));
        self.indices.extend_from_slice(&[a, b, c, a, c, d]);
    }
}

fn box_mesh(width: f32, height: f32, depth: f32) -> MeshData {
    let half = Vec3::new(width, height, depth) * 0.5;
    let (x, y, z) = (Vec3::X * width, Vec3::Y * height, Vec3::Z * depth);
    let faces = [
        (Vec3::X, -z, y, half.x),
        (Vec3::NEG_X, z, y, half.x),
        (Vec3::Y, x, -z, half.y),
        (Vec3::NEG_Y, x, z, half.y),
        (Vec3::Z, x, y, half.z),
        (Vec3::NEG_Z, -x, y, half.z),
    ];
    let mut mesh = MeshData::default();
    for (normal, u, v, reach) in faces {
        let origin = normal * reach - (u + v) * 0.5;
        mesh.push_quad(origin, u, v, normal);
    }
    mesh
}

fn plane_mesh(width: f32, height: f32) -> MeshData {
    let mut mesh = MeshData::default();
    let u = Vec3::X * width;
    let v = Vec3::Y * height;
    mesh.push_quad(-(u + v) * 0.5, u, v, Vec3::Z);
    mesh
}

fn cylinder_mesh(radius: f32, height: f32, segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let half = height * 0.5;
    let ring = segments + 1;

    // Side wall: a top row then a bottom row, seam duplicated for UVs.
    for (row, y) in [half, -half].into_iter().enumerate() {
        for i in 0..ring {
            let u = i as f32 / segments as f32;
            let (sin, cos) = (u * TAU).sin_cos();
            let normal = Vec3::new(sin, 0.0, cos);
            mesh.push(
                Vec3::new(radius * sin, y, radius * cos),
                normal,
                Vec2::new(u, 1.0 - row as f32),
            );
        }
    }
    for i in 0..segments {
        let a = i;
        let b = i + ring;
        let c = b + 1;
        let d = a + 1;
        mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    for (y, normal) in [(half, Vec3::Y), (-half, Vec3::NEG_Y)] {
        let center = mesh.push(Vec3::new(0.0, y, 0.0), normal, Vec2::splat(0.5));
        let first = mesh.vertices.len() as u32;
        for i in 0..ring {
            let (sin, cos) = (i as f32 / segments as f32 * TAU).sin_cos();
            mesh.push(
                Vec3::new(radius * sin, y, radius * cos),
                normal,
                Vec2::new(sin * 0.5 + 0.5, cos * 0.5 + 0.5),
            );
        }
        for i in 0..segments {
            let (a, b) = (first + i, first + i + 1);
            if normal.y > 0.0 {
                mesh.indices.extend_from_slice(&[center, a, b]);
            } else {
                mesh.indices.extend_from_slice(&[center, b, a]);
            }
        }
    }
    mesh
}

fn sphere_mesh(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let row = width_segments + 1;
    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let (sin_phi, cos_phi) = (v * PI).sin_cos();
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let (sin_theta, cos_theta) = (u * TAU).sin_cos();
            let normal = Vec3::new(-cos_theta * sin_phi, cos_phi, sin_theta * sin_phi);
            mesh.push(normal * radius, normal, Vec2::new(u, 1.0 - v));
        }
    }
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            // Pole rows collapse to single triangles.
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(mesh: &MeshData) -> (Vec3, Vec3) {
        mesh.vertices.iter().fold(
            (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
            |(lo, hi), v| {
                let p = Vec3::from(v.position);
                (lo.min(p), hi.max(p))
            },
        )
    }

    fn assert_well_formed(mesh: &MeshData) {
        assert!(!mesh.indices.is_empty());
        assert_eq!(mesh.indices.len() % 3, 0);
        let n = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
        for v in &mesh.vertices {
            let len = Vec3::from(v.normal).length();
            assert!((len - 1.0).abs() < 1e-4, "normal length {len}");
        }
    }

    #[test]
    fn box_matches_requested_extents() {
        let mesh = Shape::Box {
            width: 10.0,
            height: 0.1,
            depth: 0.5,
        }
        .mesh();
        assert_well_formed(&mesh);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        let (lo, hi) = bounds(&mesh);
        assert!((hi - Vec3::new(5.0, 0.05, 0.25)).length() < 1e-5);
        assert!((lo + Vec3::new(5.0, 0.05, 0.25)).length() < 1e-5);
    }

    #[test]
    fn box_faces_wind_toward_their_normals() {
        let mesh = Shape::Box {
            width: 1.0,
            height: 2.0,
            depth: 3.0,
        }
        .mesh();
        for tri in mesh.indices.chunks(3) {
            let p = |i: u32| Vec3::from(mesh.vertices[i as usize].position);
            let face = (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0]));
            let normal = Vec3::from(mesh.vertices[tri[0] as usize].normal);
            assert!(face.dot(normal) > 0.0);
        }
    }

    #[test]
    fn cylinder_stands_along_y() {
        let mesh = Shape::Cylinder {
            radius: 0.2,
            height: 8.0,
            segments: 32,
        }
        .mesh();
        assert_well_formed(&mesh);
        let (lo, hi) = bounds(&mesh);
        assert!((hi.y - 4.0).abs() < 1e-5 && (lo.y + 4.0).abs() < 1e-5);
        assert!(hi.x <= 0.2 + 1e-5 && lo.x >= -0.2 - 1e-5);
        assert!(hi.z <= 0.2 + 1e-5 && lo.z >= -0.2 - 1e-5);
    }

    #[test]
    fn sphere_vertices_lie_on_the_surface() {
        let mesh = Shape::Sphere {
            radius: 500.0,
            width_segments: 60,
            height_segments: 40,
        }
        .mesh();
        assert_well_formed(&mesh);
        assert_eq!(mesh.vertices.len(), 61 * 41);
        for v in &mesh.vertices {
            let r = Vec3::from(v.position).length();
            assert!((r - 500.0).abs() < 1e-2, "radius {r}");
        }
    }

    #[test]
    fn plane_faces_positive_z() {
        let mesh = Shape::Plane {
            width: 100.0,
            height: 100.0,
        }
        .mesh();
        assert_well_formed(&mesh);
        let (lo, hi) = bounds(&mesh);
        assert_eq!(lo, Vec3::new(-50.0, -50.0, 0.0));
        assert_eq!(hi, Vec3::new(50.0, 50.0, 0.0));
        assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
    }
}

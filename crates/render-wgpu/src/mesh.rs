//! CPU tessellation of scene geometry into indexed triangle lists.
//!
//! Front faces wind counter-clockwise.

use basicworld_scene::Geometry;
use bytemuck::{Pod, Zeroable};
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

pub fn tessellate(geometry: &Geometry) -> (Vec<Vertex>, Vec<u32>) {
    match *geometry {
        Geometry::Sphere {
            radius,
            width_segments,
            height_segments,
        } => sphere_mesh(radius, width_segments, height_segments),
        Geometry::Plane { width, height } => plane_mesh(width, height),
    }
}

/// UV sphere. Rows run from the north pole (+Y) down; columns start at -X
/// and sweep toward +Z.
pub fn sphere_mesh(
    radius: f32,
    width_segments: u32,
    height_segments: u32,
) -> (Vec<Vertex>, Vec<u32>) {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let columns = width_segments + 1;

    let mut vertices = Vec::with_capacity((columns * (height_segments + 1)) as usize);
    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let normal = [
                -(u * TAU).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * TAU).sin() * (v * PI).sin(),
            ];
            vertices.push(Vertex {
                position: normal.map(|n| n * radius),
                normal,
            });
        }
    }

    let at = |ix: u32, iy: u32| iy * columns + ix;
    let mut indices = Vec::with_capacity((6 * width_segments * (height_segments - 1)) as usize);
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = at(ix + 1, iy);
            let b = at(ix, iy);
            let c = at(ix, iy + 1);
            let d = at(ix + 1, iy + 1);
            // The pole rows collapse to a single triangle per quad.
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    (vertices, indices)
}

/// Single quad in the XY plane facing +Z, centred on the origin.
pub fn plane_mesh(width: f32, height: f32) -> (Vec<Vertex>, Vec<u32>) {
    let (hw, hh) = (width / 2.0, height / 2.0);
    let normal = [0.0, 0.0, 1.0];
    #[rustfmt::skip]
    let vertices = vec![
        Vertex { position: [-hw,  hh, 0.0], normal },
        Vertex { position: [ hw,  hh, 0.0], normal },
        Vertex { position: [-hw, -hh, 0.0], normal },
        Vertex { position: [ hw, -hh, 0.0], normal },
    ];
    let indices = vec![0, 2, 1, 2, 3, 1];
    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn triangle_normals(vertices: &[Vertex], indices: &[u32]) -> Vec<(Vec3, Vec3)> {
        indices
            .chunks_exact(3)
            .map(|t| {
                let p = |i: u32| Vec3::from_array(vertices[i as usize].position);
                let (a, b, c) = (p(t[0]), p(t[1]), p(t[2]));
                ((b - a).cross(c - a), (a + b + c) / 3.0)
            })
            .collect()
    }

    #[test]
    fn sphere_counts() {
        let (v, i) = sphere_mesh(2.0, 32, 32);
        assert_eq!(v.len(), 33 * 33);
        assert_eq!(i.len(), 6 * 32 * 31);
        assert!(i.iter().all(|&idx| (idx as usize) < v.len()));
    }

    #[test]
    fn sphere_vertices_sit_on_radius() {
        let (v, _) = sphere_mesh(5000.0, 16, 12);
        for vertex in &v {
            let p = Vec3::from_array(vertex.position);
            assert!((p.length() - 5000.0).abs() < 0.5);
            let n = Vec3::from_array(vertex.normal);
            assert!((n.length() - 1.0).abs() < 1e-4);
        }
        assert_eq!(v[0].position[1], 5000.0);
    }

    #[test]
    fn sphere_faces_wind_outward() {
        let (v, i) = sphere_mesh(2.0, 12, 8);
        for (normal, centroid) in triangle_normals(&v, &i) {
            assert!(normal.length() > 0.0);
            assert!(normal.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn plane_faces_positive_z() {
        let (v, i) = plane_mesh(10.0, 4.0);
        assert_eq!(v.len(), 4);
        for (normal, _) in triangle_normals(&v, &i) {
            assert!(normal.z > 0.0);
        }
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        assert_eq!(xs, vec![-5.0, 5.0, -5.0, 5.0]);
    }

    #[test]
    fn tessellate_dispatches_on_geometry() {
        let (v, _) = tessellate(&Geometry::Plane {
            width: 1.0,
            height: 1.0,
        });
        assert_eq!(v.len(), 4);
        let (v, _) = tessellate(&Geometry::Sphere {
            radius: 1.0,
            width_segments: 4,
            height_segments: 4,
        });
        assert_eq!(v.len(), 25);
    }
}

//! Mesh data structures and primitive generation.

use crate::vertex::Vertex;
use glam::{Vec2, Vec3};
use wgpu::util::DeviceExt;

/// A GPU mesh with vertex and index buffers.
pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_indices: u32,
}

impl Mesh {
    /// Create a mesh from vertex and index data.
    pub fn new(device: &wgpu::Device, vertices: &[Vertex], indices: &[u32]) -> Self {
        Self::from_pod(device, vertices, indices)
    }

    /// Upload any Pod vertex type (terrain and star vertices come from
    /// procgen with their own layouts).
    pub fn from_pod<T: bytemuck::Pod>(device: &wgpu::Device, vertices: &[T], indices: &[u32]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            num_indices: indices.len() as u32,
        }
    }

    /// Create a unit cube centered at origin (city blocks).
    pub fn cube(device: &wgpu::Device) -> Self {
        let vertices = [
            // Front face
            Vertex::new([-0.5, -0.5, 0.5], [0.0, 0.0, 1.0], [0.0, 1.0]),
            Vertex::new([0.5, -0.5, 0.5], [0.0, 0.0, 1.0], [1.0, 1.0]),
            Vertex::new([0.5, 0.5, 0.5], [0.0, 0.0, 1.0], [1.0, 0.0]),
            Vertex::new([-0.5, 0.5, 0.5], [0.0, 0.0, 1.0], [0.0, 0.0]),
            // Back face
            Vertex::new([0.5, -0.5, -0.5], [0.0, 0.0, -1.0], [0.0, 1.0]),
            Vertex::new([-0.5, -0.5, -0.5], [0.0, 0.0, -1.0], [1.0, 1.0]),
            Vertex::new([-0.5, 0.5, -0.5], [0.0, 0.0, -1.0], [1.0, 0.0]),
            Vertex::new([0.5, 0.5, -0.5], [0.0, 0.0, -1.0], [0.0, 0.0]),
            // Top face
            Vertex::new([-0.5, 0.5, 0.5], [0.0, 1.0, 0.0], [0.0, 1.0]),
            Vertex::new([0.5, 0.5, 0.5], [0.0, 1.0, 0.0], [1.0, 1.0]),
            Vertex::new([0.5, 0.5, -0.5], [0.0, 1.0, 0.0], [1.0, 0.0]),
            Vertex::new([-0.5, 0.5, -0.5], [0.0, 1.0, 0.0], [0.0, 0.0]),
            // Bottom face
            Vertex::new([-0.5, -0.5, -0.5], [0.0, -1.0, 0.0], [0.0, 1.0]),
            Vertex::new([0.5, -0.5, -0.5], [0.0, -1.0, 0.0], [1.0, 1.0]),
            Vertex::new([0.5, -0.5, 0.5], [0.0, -1.0, 0.0], [1.0, 0.0]),
            Vertex::new([-0.5, -0.5, 0.5], [0.0, -1.0, 0.0], [0.0, 0.0]),
            // Right face
            Vertex::new([0.5, -0.5, 0.5], [1.0, 0.0, 0.0], [0.0, 1.0]),
            Vertex::new([0.5, -0.5, -0.5], [1.0, 0.0, 0.0], [1.0, 1.0]),
            Vertex::new([0.5, 0.5, -0.5], [1.0, 0.0, 0.0], [1.0, 0.0]),
            Vertex::new([0.5, 0.5, 0.5], [1.0, 0.0, 0.0], [0.0, 0.0]),
            // Left face
            Vertex::new([-0.5, -0.5, -0.5], [-1.0, 0.0, 0.0], [0.0, 1.0]),
            Vertex::new([-0.5, -0.5, 0.5], [-1.0, 0.0, 0.0], [1.0, 1.0]),
            Vertex::new([-0.5, 0.5, 0.5], [-1.0, 0.0, 0.0], [1.0, 0.0]),
            Vertex::new([-0.5, 0.5, -0.5], [-1.0, 0.0, 0.0], [0.0, 0.0]),
        ];

        #[rustfmt::skip]
        let indices: [u32; 36] = [
            0, 1, 2, 2, 3, 0,       // Front
            4, 5, 6, 6, 7, 4,       // Back
            8, 9, 10, 10, 11, 8,    // Top
            12, 13, 14, 14, 15, 12, // Bottom
            16, 17, 18, 18, 19, 16, // Right
            20, 21, 22, 22, 23, 20, // Left
        ];

        Self::new(device, &vertices, &indices)
    }

    /// Create a billboard quad (XY plane, facing +Z) for particles.
    pub fn billboard_quad(device: &wgpu::Device, size: f32) -> Self {
        let half = size / 2.0;
        let vertices = [
            Vertex::new([-half, -half, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
            Vertex::new([half, -half, 0.0], [0.0, 0.0, 1.0], [1.0, 1.0]),
            Vertex::new([half, half, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0]),
            Vertex::new([-half, half, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
        ];
        let indices: [u32; 6] = [0, 1, 2, 2, 3, 0];
        Self::new(device, &vertices, &indices)
    }

    /// The TR-3B hull: a triangular prism extruded along Z.
    ///
    /// Shape vertices match the craft profile: nose at (0, 30), wingtips
    /// at (±26, -15), extruded to ±1.5. UVs map the shape bounding box to
    /// 0..1 so the metamaterial interference pattern tiles over the hull.
    pub fn tri_hull(device: &wgpu::Device) -> Self {
        let nose = Vec2::new(0.0, 30.0);
        let left = Vec2::new(-26.0, -15.0);
        let right = Vec2::new(26.0, -15.0);
        let half_depth = 1.5_f32;

        let uv = |p: Vec2| -> [f32; 2] {
            [(p.x + 26.0) / 52.0, 1.0 - (p.y + 15.0) / 45.0]
        };

        let mut vertices = Vec::new();
        let mut indices: Vec<u32> = Vec::new();

        // Front face (+Z) and back face (-Z)
        for (z, normal, winding) in [
            (half_depth, [0.0, 0.0, 1.0], [0u32, 1, 2]),
            (-half_depth, [0.0, 0.0, -1.0], [0u32, 2, 1]),
        ] {
            let base = vertices.len() as u32;
            for p in [nose, left, right] {
                vertices.push(Vertex::new([p.x, p.y, z], normal, uv(p)));
            }
            indices.extend(winding.iter().map(|i| base + i));
        }

        // Side walls, one quad per edge with an outward flat normal.
        for (a, b) in [(nose, left), (left, right), (right, nose)] {
            let edge = b - a;
            let normal = Vec2::new(edge.y, -edge.x).normalize();
            let n = [normal.x, normal.y, 0.0];
            let base = vertices.len() as u32;
            vertices.push(Vertex::new([a.x, a.y, half_depth], n, uv(a)));
            vertices.push(Vertex::new([b.x, b.y, half_depth], n, uv(b)));
            vertices.push(Vertex::new([b.x, b.y, -half_depth], n, uv(b)));
            vertices.push(Vertex::new([a.x, a.y, -half_depth], n, uv(a)));
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self::new(device, &vertices, &indices)
    }

    /// Torus for the plasma rings (ring radius 7.6, tube radius 0.5 to
    /// match the hull-vertex ring arrays).
    pub fn torus(
        device: &wgpu::Device,
        ring_radius: f32,
        tube_radius: f32,
        radial_segments: u32,
        tubular_segments: u32,
    ) -> Self {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32;
            let tube_angle = v * std::f32::consts::TAU;
            for i in 0..=tubular_segments {
                let u = i as f32 / tubular_segments as f32;
                let ring_angle = u * std::f32::consts::TAU;

                let cx = ring_radius * ring_angle.cos();
                let cy = ring_radius * ring_angle.sin();

                let x = (ring_radius + tube_radius * tube_angle.cos()) * ring_angle.cos();
                let y = (ring_radius + tube_radius * tube_angle.cos()) * ring_angle.sin();
                let z = tube_radius * tube_angle.sin();

                let normal = Vec3::new(x - cx, y - cy, z).normalize();
                vertices.push(Vertex::new([x, y, z], normal.into(), [u, v]));
            }
        }

        let stride = tubular_segments + 1;
        for j in 0..radial_segments {
            for i in 0..tubular_segments {
                let a = j * stride + i;
                let b = a + stride;

                indices.push(a);
                indices.push(b);
                indices.push(a + 1);

                indices.push(a + 1);
                indices.push(b);
                indices.push(b + 1);
            }
        }

        Self::new(device, &vertices, &indices)
    }

    /// Faceted unit icosahedron for asteroids (flat normals for the
    /// chunky rock look; scaled per instance).
    pub fn asteroid(device: &wgpu::Device) -> Self {
        let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;
        let raw: [[f32; 3]; 12] = [
            [-1.0, phi, 0.0],
            [1.0, phi, 0.0],
            [-1.0, -phi, 0.0],
            [1.0, -phi, 0.0],
            [0.0, -1.0, phi],
            [0.0, 1.0, phi],
            [0.0, -1.0, -phi],
            [0.0, 1.0, -phi],
            [phi, 0.0, -1.0],
            [phi, 0.0, 1.0],
            [-phi, 0.0, -1.0],
            [-phi, 0.0, 1.0],
        ];
        #[rustfmt::skip]
        let faces: [[usize; 3]; 20] = [
            [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
            [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
            [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
            [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
        ];

        let corners: Vec<Vec3> = raw
            .iter()
            .map(|p| Vec3::from_array(*p).normalize())
            .collect();

        let mut vertices = Vec::with_capacity(faces.len() * 3);
        let mut indices = Vec::with_capacity(faces.len() * 3);
        for face in faces {
            let a = corners[face[0]];
            let b = corners[face[1]];
            let c = corners[face[2]];
            let normal = (b - a).cross(c - a).normalize();
            for p in [a, b, c] {
                indices.push(vertices.len() as u32);
                vertices.push(Vertex::new(p.into(), normal.into(), [0.0, 0.0]));
            }
        }

        Self::new(device, &vertices, &indices)
    }

    /// Create a UV sphere (cloaking field shell, glow orbs).
    pub fn sphere(device: &wgpu::Device, radius: f32, segments: u32, rings: u32) -> Self {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for ring in 0..=rings {
            let phi = std::f32::consts::PI * ring as f32 / rings as f32;
            let y = radius * phi.cos();
            let ring_radius = radius * phi.sin();

            for segment in 0..=segments {
                let theta = 2.0 * std::f32::consts::PI * segment as f32 / segments as f32;
                let x = ring_radius * theta.cos();
                let z = ring_radius * theta.sin();

                let position = [x, y, z];
                let normal = Vec3::new(x, y, z).normalize_or_zero();
                let uv = [
                    segment as f32 / segments as f32,
                    ring as f32 / rings as f32,
                ];

                vertices.push(Vertex::new(position, normal.into(), uv));
            }
        }

        for ring in 0..rings {
            for segment in 0..segments {
                let current = ring * (segments + 1) + segment;
                let next = current + segments + 1;

                indices.push(current);
                indices.push(next);
                indices.push(current + 1);

                indices.push(current + 1);
                indices.push(next);
                indices.push(next + 1);
            }
        }

        Self::new(device, &vertices, &indices)
    }
}

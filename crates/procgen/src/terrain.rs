//! Terrain generation: one heightfield per mission, three height functions.
//!
//! **Seed-based determinism:** all noise is derived from the mission seed so
//! the same seed always produces the same terrain at every (x, z).

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use noise::{NoiseFn, Perlin};

/// Derive a deterministic u32 noise seed from a world seed and an offset.
/// Same (seed, offset) always gives the same result so terrain is reproducible.
#[inline]
fn deterministic_noise_seed(seed: u64, offset: u64) -> u32 {
    ((seed.wrapping_add(offset))
        .wrapping_mul(0x9e3779b97f4a7c15_u64)
        .wrapping_add(offset.wrapping_mul(0x6c078965_u64))
        >> 32) as u32
}

/// Which height function and ground tint a mission uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainKind {
    /// Rolling ridges with fine detail.
    Mountain,
    /// Low undulation plus block-shaped building clusters.
    Urban,
    /// Nearly flat, gentle undulation (asteroid-field floor).
    DeepSpace,
}

impl TerrainKind {
    /// Ground tint for this kind.
    pub fn ground_color(&self) -> [f32; 4] {
        match self {
            TerrainKind::Urban => [0.267, 0.267, 0.267, 1.0],
            TerrainKind::DeepSpace => [0.2, 0.2, 0.2, 1.0],
            TerrainKind::Mountain => [0.133, 0.545, 0.133, 1.0],
        }
    }
}

/// Vertex for the terrain mesh.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

/// Configuration for terrain generation.
#[derive(Debug, Clone)]
pub struct TerrainConfig {
    /// Size of terrain in world units (square).
    pub size: f32,
    /// Number of vertices per side.
    pub resolution: u32,
    /// Height function selector.
    pub kind: TerrainKind,
    /// Seed for the building-height noise.
    pub seed: u64,
    /// World Y of the terrain base plane.
    pub base_y: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            size: 1000.0,
            resolution: 65,
            kind: TerrainKind::Mountain,
            seed: 0,
            base_y: -100.0,
        }
    }
}

/// Generated terrain data ready for GPU upload.
#[derive(Debug)]
pub struct TerrainData {
    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u32>,
    pub heightmap: Vec<f32>,
    pub config: TerrainConfig,
}

impl TerrainData {
    /// Generate terrain from configuration.
    pub fn generate(config: TerrainConfig) -> Self {
        let building_noise = Perlin::new(deterministic_noise_seed(config.seed, 0));

        let res = config.resolution as usize;
        let step = config.size / (config.resolution - 1) as f32;
        let half = config.size / 2.0;
        let color = config.kind.ground_color();

        let mut vertices = Vec::with_capacity(res * res);
        let mut heightmap = Vec::with_capacity(res * res);

        for iz in 0..res {
            for ix in 0..res {
                let x = ix as f32 * step - half;
                let z = iz as f32 * step - half;
                let height = Self::height_at(config.kind, &building_noise, x, z);
                heightmap.push(height);
                vertices.push(TerrainVertex {
                    position: [x, config.base_y + height, z],
                    normal: [0.0, 1.0, 0.0],
                    uv: [
                        ix as f32 / (config.resolution - 1) as f32,
                        iz as f32 / (config.resolution - 1) as f32,
                    ],
                    color,
                });
            }
        }

        let mut indices = Vec::with_capacity((res - 1) * (res - 1) * 6);
        for iz in 0..(res - 1) {
            for ix in 0..(res - 1) {
                let top_left = (iz * res + ix) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((iz + 1) * res + ix) as u32;
                let bottom_right = bottom_left + 1;

                indices.push(top_left);
                indices.push(bottom_left);
                indices.push(top_right);

                indices.push(top_right);
                indices.push(bottom_left);
                indices.push(bottom_right);
            }
        }

        Self::calculate_normals(&mut vertices, res);

        Self {
            vertices,
            indices,
            heightmap,
            config,
        }
    }

    /// Height function per terrain kind.
    ///
    /// Urban mixes a low swell with Perlin-sampled block heights; deep
    /// space is a gentle undulation; mountain layers two ridge frequencies.
    fn height_at(kind: TerrainKind, building_noise: &Perlin, x: f32, z: f32) -> f32 {
        match kind {
            TerrainKind::Urban => {
                let swell = (x * 0.01).sin() * (z * 0.01).cos() * 20.0;
                // Perlin in [-1, 1] -> [0, 1]; sampled on a coarse grid the
                // clusters read as a skyline.
                let block =
                    (building_noise.get([(x * 0.05) as f64, (z * 0.05) as f64]) + 1.0) * 0.5;
                swell + block as f32 * 50.0
            }
            TerrainKind::DeepSpace => (x * 0.005).sin() * (z * 0.005).cos() * 5.0,
            TerrainKind::Mountain => {
                (x * 0.02).sin() * (z * 0.02).cos() * 30.0
                    + (x * 0.1).sin() * (z * 0.1).cos() * 10.0
            }
        }
    }

    fn calculate_normals(vertices: &mut [TerrainVertex], resolution: usize) {
        let mut normals: Vec<Vec3> = vec![Vec3::ZERO; vertices.len()];

        for z in 0..(resolution - 1) {
            for x in 0..(resolution - 1) {
                let i0 = z * resolution + x;
                let i1 = i0 + 1;
                let i2 = (z + 1) * resolution + x;
                let i3 = i2 + 1;

                let v0: Vec3 = vertices[i0].position.into();
                let v1: Vec3 = vertices[i1].position.into();
                let v2: Vec3 = vertices[i2].position.into();
                let v3: Vec3 = vertices[i3].position.into();

                let n1 = (v2 - v0).cross(v1 - v0).normalize();
                normals[i0] += n1;
                normals[i2] += n1;
                normals[i1] += n1;

                let n2 = (v3 - v1).cross(v2 - v1).normalize();
                normals[i1] += n2;
                normals[i2] += n2;
                normals[i3] += n2;
            }
        }

        for (i, vertex) in vertices.iter_mut().enumerate() {
            let n = normals[i].normalize();
            vertex.normal = [n.x, n.y, n.z];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Same seed and config must produce identical heightmaps.
    #[test]
    fn terrain_deterministic_same_seed() {
        let config = TerrainConfig {
            size: 200.0,
            resolution: 17,
            kind: TerrainKind::Urban,
            seed: 98765,
            ..Default::default()
        };
        let a = TerrainData::generate(config.clone());
        let b = TerrainData::generate(config);
        assert_eq!(a.heightmap.len(), b.heightmap.len());
        for (i, (&ha, &hb)) in a.heightmap.iter().zip(b.heightmap.iter()).enumerate() {
            assert_eq!(ha, hb, "heightmap[{}] should match for same seed", i);
        }
    }

    /// Different seeds must produce different urban skylines.
    #[test]
    fn urban_different_seed_different_heights() {
        let config_a = TerrainConfig {
            size: 200.0,
            resolution: 17,
            kind: TerrainKind::Urban,
            seed: 11111,
            ..Default::default()
        };
        let config_b = TerrainConfig {
            seed: 22222,
            ..config_a.clone()
        };
        let a = TerrainData::generate(config_a);
        let b = TerrainData::generate(config_b);
        assert_ne!(a.heightmap, b.heightmap);
    }

    /// The three kinds produce visibly different fields from the same seed.
    #[test]
    fn kinds_produce_distinct_terrain() {
        let base = TerrainConfig {
            size: 200.0,
            resolution: 17,
            seed: 7,
            ..Default::default()
        };
        let mountain = TerrainData::generate(TerrainConfig {
            kind: TerrainKind::Mountain,
            ..base.clone()
        });
        let deep = TerrainData::generate(TerrainConfig {
            kind: TerrainKind::DeepSpace,
            ..base.clone()
        });
        assert_ne!(mountain.heightmap, deep.heightmap);

        // Deep space terrain stays within its gentle amplitude.
        assert!(deep.heightmap.iter().all(|h| h.abs() <= 5.0 + 1e-3));
    }

    #[test]
    fn index_count_matches_grid() {
        let data = TerrainData::generate(TerrainConfig {
            size: 100.0,
            resolution: 9,
            ..Default::default()
        });
        assert_eq!(data.vertices.len(), 81);
        assert_eq!(data.indices.len(), 8 * 8 * 6);
    }
}

//! Mission-specific scene dressing: city blocks and asteroid fields.

use engine_core::Transform;
use glam::{Quat, Vec3};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::TerrainKind;

/// One placed dressing object (unit mesh scaled/positioned by transform).
#[derive(Debug, Clone, Copy)]
pub struct DressingInstance {
    pub transform: Transform,
    pub color: [f32; 4],
}

/// Scene dressing for a mission: which unit mesh to instance, and where.
#[derive(Debug)]
pub enum Dressing {
    /// Unit-cube instances (city blocks with lit-window tint).
    Blocks(Vec<DressingInstance>),
    /// Unit-dodecahedron instances (asteroids).
    Asteroids(Vec<DressingInstance>),
    /// Mountain missions carry no dressing.
    None,
}

impl Dressing {
    /// Generate dressing for a terrain kind, deterministic per seed.
    pub fn generate(kind: TerrainKind, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        match kind {
            TerrainKind::Urban => Self::Blocks(city_blocks(&mut rng)),
            TerrainKind::DeepSpace => Self::Asteroids(asteroid_field(&mut rng)),
            TerrainKind::Mountain => Self::None,
        }
    }

    /// Instances to draw, if any.
    pub fn instances(&self) -> &[DressingInstance] {
        match self {
            Dressing::Blocks(list) | Dressing::Asteroids(list) => list,
            Dressing::None => &[],
        }
    }
}

/// 50 tower blocks scattered over the city, 10-50 units tall.
fn city_blocks(rng: &mut StdRng) -> Vec<DressingInstance> {
    (0..50)
        .map(|_| {
            let x = (rng.gen::<f32>() - 0.5) * 800.0;
            let z = (rng.gen::<f32>() - 0.5) * 800.0;
            let y = -90.0 + rng.gen::<f32>() * 60.0;
            let height = rng.gen::<f32>() * 40.0 + 10.0;
            DressingInstance {
                transform: Transform {
                    position: Vec3::new(x, y, z),
                    rotation: Quat::IDENTITY,
                    scale: Vec3::new(5.0, height, 5.0),
                },
                color: [0.267, 0.267, 0.267, 1.0],
            }
        })
        .collect()
}

/// 20 asteroids drifting through the play volume, radius 5-25.
fn asteroid_field(rng: &mut StdRng) -> Vec<DressingInstance> {
    (0..20)
        .map(|_| {
            let x = (rng.gen::<f32>() - 0.5) * 2000.0;
            let y = (rng.gen::<f32>() - 0.5) * 500.0;
            let z = (rng.gen::<f32>() - 0.5) * 2000.0;
            let radius = rng.gen::<f32>() * 20.0 + 5.0;
            let spin = Quat::from_euler(
                glam::EulerRot::XYZ,
                rng.gen::<f32>() * std::f32::consts::TAU,
                rng.gen::<f32>() * std::f32::consts::TAU,
                rng.gen::<f32>() * std::f32::consts::TAU,
            );
            DressingInstance {
                transform: Transform {
                    position: Vec3::new(x, y, z),
                    rotation: spin,
                    scale: Vec3::splat(radius),
                },
                color: [0.4, 0.4, 0.4, 1.0],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urban_gets_fifty_blocks() {
        let dressing = Dressing::generate(TerrainKind::Urban, 42);
        assert!(matches!(dressing, Dressing::Blocks(_)));
        assert_eq!(dressing.instances().len(), 50);
        for block in dressing.instances() {
            let height = block.transform.scale.y;
            assert!((10.0..=50.0).contains(&height));
        }
    }

    #[test]
    fn deepspace_gets_twenty_asteroids() {
        let dressing = Dressing::generate(TerrainKind::DeepSpace, 42);
        assert!(matches!(dressing, Dressing::Asteroids(_)));
        assert_eq!(dressing.instances().len(), 20);
    }

    #[test]
    fn mountain_has_no_dressing() {
        let dressing = Dressing::generate(TerrainKind::Mountain, 42);
        assert!(dressing.instances().is_empty());
    }

    #[test]
    fn dressing_deterministic_per_seed() {
        let a = Dressing::generate(TerrainKind::Urban, 9);
        let b = Dressing::generate(TerrainKind::Urban, 9);
        for (ia, ib) in a.instances().iter().zip(b.instances()) {
            assert_eq!(ia.transform.position, ib.transform.position);
            assert_eq!(ia.transform.scale, ib.transform.scale);
        }
    }
}

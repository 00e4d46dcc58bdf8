//! Frame-state particle systems: plasma exhaust and atmospheric dust.
//!
//! Buffers are fixed-size, sized by the quality level at creation, and
//! not reallocated on a mid-session level change (only when the scene is
//! rebuilt for a new mission).

use glam::{Vec2, Vec3};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Plasma ring centers in hull-local coordinates (XY plane), one per
/// hull vertex.
pub const RING_CENTERS: [Vec2; 3] = [
    Vec2::new(0.0, 15.0),
    Vec2::new(-13.0, -7.5),
    Vec2::new(13.0, -7.5),
];

/// Ring-local Z plane of the plasma arrays.
pub const RING_Z: f32 = -1.0;

/// One exhaust particle orbiting its ring.
#[derive(Debug, Clone, Copy)]
pub struct PlasmaParticle {
    /// Hull-local position.
    pub position: Vec3,
    /// Which ring this particle orbits.
    pub ring: usize,
    /// Z drift rate.
    pub velocity_z: f32,
}

/// Exhaust particles circling the three plasma rings.
#[derive(Debug)]
pub struct PlasmaExhaust {
    pub particles: Vec<PlasmaParticle>,
}

impl PlasmaExhaust {
    /// Allocate `count` particles (quality-level sized), deterministic per seed.
    pub fn new(count: u32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = (0..count)
            .map(|_| {
                let ring = rng.gen_range(0..RING_CENTERS.len());
                let center = RING_CENTERS[ring];
                let angle = rng.gen::<f32>() * std::f32::consts::TAU;
                let radius = 6.0 + rng.gen::<f32>() * 3.0;
                PlasmaParticle {
                    position: Vec3::new(
                        center.x + angle.cos() * radius,
                        center.y + angle.sin() * radius,
                        RING_Z + rng.gen::<f32>() * 2.0,
                    ),
                    ring,
                    velocity_z: (rng.gen::<f32>() - 0.5) * 0.01,
                }
            })
            .collect();
        Self { particles }
    }

    /// Advance the circular motion: angular speed scales with thrust,
    /// particles drift in Z and wrap back once they stray past |z| > 5.
    pub fn update(&mut self, dt: f32, thrust: f32) {
        let speed = thrust * 2.0;
        for p in &mut self.particles {
            let center = RING_CENTERS[p.ring];
            let offset = Vec2::new(p.position.x - center.x, p.position.y - center.y);
            let angle = offset.y.atan2(offset.x) + dt * speed;
            let radius = offset.length();
            p.position.x = center.x + angle.cos() * radius;
            p.position.y = center.y + angle.sin() * radius;
            p.position.z += p.velocity_z * dt * 10.0;
            if p.position.z.abs() > 5.0 {
                p.position.z = RING_Z;
            }
        }
    }
}

/// Static ambient dust suspended over the terrain. Skipped entirely at
/// the lowest quality tier (count 0).
#[derive(Debug)]
pub struct AtmosphereField {
    pub positions: Vec<Vec3>,
}

impl AtmosphereField {
    pub fn new(count: u32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let positions = (0..count)
            .map(|_| {
                Vec3::new(
                    (rng.gen::<f32>() - 0.5) * 2000.0,
                    rng.gen::<f32>() * 200.0,
                    (rng.gen::<f32>() - 0.5) * 2000.0,
                )
            })
            .collect();
        Self { positions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhaust_buffer_is_fixed_size() {
        let mut exhaust = PlasmaExhaust::new(500, 1);
        assert_eq!(exhaust.particles.len(), 500);
        for _ in 0..100 {
            exhaust.update(0.016, 1.0);
        }
        assert_eq!(exhaust.particles.len(), 500);
    }

    #[test]
    fn particles_orbit_their_ring() {
        let mut exhaust = PlasmaExhaust::new(64, 2);
        let radii_before: Vec<f32> = exhaust
            .particles
            .iter()
            .map(|p| {
                let c = RING_CENTERS[p.ring];
                Vec2::new(p.position.x - c.x, p.position.y - c.y).length()
            })
            .collect();
        exhaust.update(0.016, 1.0);
        for (p, r_before) in exhaust.particles.iter().zip(radii_before) {
            let c = RING_CENTERS[p.ring];
            let r_after = Vec2::new(p.position.x - c.x, p.position.y - c.y).length();
            assert!((r_after - r_before).abs() < 1e-3, "orbit radius preserved");
        }
    }

    #[test]
    fn zero_thrust_freezes_rotation() {
        let mut exhaust = PlasmaExhaust::new(16, 3);
        let xy_before: Vec<(f32, f32)> = exhaust
            .particles
            .iter()
            .map(|p| (p.position.x, p.position.y))
            .collect();
        exhaust.update(0.016, 0.0);
        for (p, (x, y)) in exhaust.particles.iter().zip(xy_before) {
            assert!((p.position.x - x).abs() < 1e-6);
            assert!((p.position.y - y).abs() < 1e-6);
        }
    }

    #[test]
    fn drifting_particles_wrap_in_z() {
        let mut exhaust = PlasmaExhaust::new(256, 4);
        for _ in 0..20_000 {
            exhaust.update(0.016, 1.0);
        }
        assert!(exhaust.particles.iter().all(|p| p.position.z.abs() <= 5.0));
    }

    #[test]
    fn atmosphere_respects_count() {
        assert_eq!(AtmosphereField::new(0, 5).positions.len(), 0);
        let field = AtmosphereField::new(500, 5);
        assert_eq!(field.positions.len(), 500);
        for p in &field.positions {
            assert!((0.0..=200.0).contains(&p.y));
        }
    }
}

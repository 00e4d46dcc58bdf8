//! Background star field: a point cloud in a deep spherical shell.

use bytemuck::{Pod, Zeroable};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// One star, rendered as a GPU point.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct StarVertex {
    pub position: [f32; 3],
    /// Brightness 0-1; the shader fades dim stars.
    pub brightness: f32,
    pub color: [f32; 4],
}

/// Outer radius of the star shell.
const SHELL_DEPTH: f32 = 500.0;
/// Inner radius; stars never spawn inside the play volume.
const SHELL_INNER: f32 = 250.0;

/// Generate `count` stars in a shell around the origin, deterministic per seed.
/// Count comes from the quality table (5000 / 3000 / 1500).
pub fn generate_stars(count: u32, seed: u64) -> Vec<StarVertex> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            // Uniform direction on the sphere.
            let theta = rng.gen::<f32>() * std::f32::consts::TAU;
            let cos_phi = rng.gen::<f32>() * 2.0 - 1.0;
            let sin_phi = (1.0 - cos_phi * cos_phi).sqrt();
            let dir = [sin_phi * theta.cos(), cos_phi, sin_phi * theta.sin()];

            let radius = SHELL_INNER + rng.gen::<f32>() * (SHELL_DEPTH - SHELL_INNER);
            let brightness = 0.3 + rng.gen::<f32>() * 0.7;

            // Mild blue/white saturation variance.
            let warm = rng.gen::<f32>() * 0.5;
            let color = [1.0 - warm * 0.2, 1.0 - warm * 0.1, 1.0, 1.0];

            StarVertex {
                position: [dir[0] * radius, dir[1] * radius, dir[2] * radius],
                brightness,
                color,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_stay_in_shell() {
        let stars = generate_stars(500, 3);
        assert_eq!(stars.len(), 500);
        for star in &stars {
            let r = (star.position[0].powi(2)
                + star.position[1].powi(2)
                + star.position[2].powi(2))
            .sqrt();
            assert!(r >= SHELL_INNER - 1e-3 && r <= SHELL_DEPTH + 1e-3);
            assert!((0.3..=1.0).contains(&star.brightness));
        }
    }

    #[test]
    fn star_field_deterministic_per_seed() {
        let a = generate_stars(100, 11);
        let b = generate_stars(100, 11);
        for (sa, sb) in a.iter().zip(&b) {
            assert_eq!(sa.position, sb.position);
        }
    }
}

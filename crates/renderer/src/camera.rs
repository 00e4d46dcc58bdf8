//! Chase camera that follows the spacecraft.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Follow camera: eases toward an offset behind/above the target and
/// always looks at it.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    /// Point the camera looks at (the spacecraft).
    pub target: Vec3,
    /// Offset from the target the camera settles into.
    pub follow_offset: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 5.0, 10.0),
            target: Vec3::ZERO,
            follow_offset: Vec3::new(0.0, 5.0, 10.0),
            fov_degrees: 75.0,
            near: 0.1,
            far: 10_000.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl Camera {
    /// Update aspect ratio (call on window resize).
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Ease toward the follow position for `target`. Lerp factor is
    /// `2 * dt`, matching the feel of the follow rig.
    pub fn follow(&mut self, target: Vec3, dt: f32) {
        let desired = target + self.follow_offset;
        let t = (dt * 2.0).clamp(0.0, 1.0);
        self.position = self.position.lerp(desired, t);
        self.target = target;
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        let up = Vec3::Y;
        Mat4::look_at_rh(self.position, self.target, up)
    }

    /// Get the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Camera uniform data for GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub position: [f32; 4], // w unused, padding
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
            proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 4],
        }
    }

    pub fn update(&mut self, camera: &Camera) {
        self.view = camera.view_matrix().to_cols_array_2d();
        self.proj = camera.projection_matrix().to_cols_array_2d();
        self.view_proj = camera.view_projection_matrix().to_cols_array_2d();
        let pos = camera.position;
        self.position = [pos.x, pos.y, pos.z, 1.0];
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_eases_toward_offset_target() {
        let mut camera = Camera::default();
        camera.position = Vec3::ZERO;
        let target = Vec3::new(10.0, 0.0, 0.0);
        camera.follow(target, 0.1);
        let desired = target + camera.follow_offset;
        // Moved 20% of the way (2 * dt).
        let expected = Vec3::ZERO.lerp(desired, 0.2);
        assert!((camera.position - expected).length() < 1e-4);
        assert_eq!(camera.target, target);
    }

    #[test]
    fn large_dt_clamps_to_target() {
        let mut camera = Camera::default();
        let target = Vec3::new(0.0, 2.0, -50.0);
        camera.follow(target, 10.0);
        assert!((camera.position - (target + camera.follow_offset)).length() < 1e-4);
    }
}

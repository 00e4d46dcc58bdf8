//! Spacecraft pose and render transform math.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Position plus Euler rotation for the spacecraft.
///
/// The control mapping is defined in per-axis radian steps, so the pose
/// carries Euler angles directly rather than a quaternion. Patches always
/// replace the whole pose; there is no per-field merge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub position: Vec3,
    /// Euler rotation in radians, applied XYZ.
    pub rotation: Vec3,
}

impl Pose {
    pub fn new(position: Vec3, rotation: Vec3) -> Self {
        Self { position, rotation }
    }

    /// Model matrix for rendering.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.quat(), self.position)
    }

    /// Rotation as a quaternion (XYZ order).
    pub fn quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// Heading in degrees for the HUD, wrapped to [0, 360).
    pub fn heading_degrees(&self) -> f32 {
        self.rotation.y.to_degrees().rem_euclid(360.0)
    }
}

/// A 3D transform for scene objects (dressing, rings, particles).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create the model matrix for this transform.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_wraps_to_positive_degrees() {
        let mut pose = Pose::default();
        pose.rotation.y = -std::f32::consts::FRAC_PI_2;
        assert!((pose.heading_degrees() - 270.0).abs() < 1e-3);
    }

    #[test]
    fn default_pose_is_origin() {
        let pose = Pose::default();
        assert_eq!(pose.position, Vec3::ZERO);
        assert_eq!(pose.rotation, Vec3::ZERO);
        assert_eq!(pose.to_matrix(), Mat4::IDENTITY);
    }
}

//! Node transforms: a position plus an Euler rotation.

use glam::{Mat4, Quat, Vec3};

/// Build a rotation from Euler angles (radians) applied in X, Y, Z order.
///
/// The resulting matrix is `Rx * Ry * Rz`, so a vector is rotated about Z
/// first and about X last.
#[inline]
pub fn euler_xyz(angles: Vec3) -> Quat {
    Quat::from_rotation_x(angles.x) * Quat::from_rotation_y(angles.y) * Quat::from_rotation_z(angles.z)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians, XYZ order.
    pub rotation: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Local-to-parent matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(euler_xyz(self.rotation), self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn euler_order_applies_z_before_x() {
        // Z quarter turn maps +X to +Y, then X quarter turn maps +Y to +Z.
        let q = euler_xyz(Vec3::new(FRAC_PI_2, 0.0, FRAC_PI_2));
        let v = q * Vec3::X;
        assert!((v - Vec3::Z).length() < 1e-5, "got {v:?}");
    }

    #[test]
    fn matrix_rotates_then_translates() {
        let t = Transform::at(Vec3::new(1.0, 2.0, 3.0)).with_rotation(Vec3::new(0.0, 0.0, FRAC_PI_2));
        let p = t.matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(1.0, 3.0, 3.0)).length() < 1e-5, "got {p:?}");
    }
}

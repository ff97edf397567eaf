use nalgebra::{Matrix3, Quaternion, UnitQuaternion};
use serde::{Deserialize, Serialize};

use super::{lift_point, lift_vector, Point2, Vec2, Vec3};

/// The fixed world axis every frame uses as its `right` direction.
///
/// Curves live in the z = 0 plane, so pointing `right` out of that plane
/// keeps the profile's local x axis perpendicular to the path.
pub const FRAME_RIGHT: Vec3 = Vec3::new(0.0, 0.0, -1.0);

/// Position and orthonormal basis at a parameter along a curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedFrame {
    pub position: Point2,
    pub forward: Vec3,
    pub up: Vec3,
    pub right: Vec3,
    pub rotation: UnitQuaternion<f64>,
}

impl OrientedFrame {
    /// Frame at `position` whose forward axis follows `tangent`.
    ///
    /// A zero tangent gives a zero up vector and the identity rotation.
    pub fn from_tangent(position: Point2, tangent: &Vec2) -> Self {
        let forward = lift_vector(tangent);
        if forward == Vec3::zeros() {
            return Self::identity_at(position);
        }
        let up = forward.cross(&FRAME_RIGHT);
        Self {
            position,
            forward,
            up,
            right: FRAME_RIGHT,
            rotation: quaternion_from_basis(&Matrix3::from_columns(&[FRAME_RIGHT, up, forward])),
        }
    }

    /// A frame at `position` with no rotation.
    pub fn identity_at(position: Point2) -> Self {
        Self {
            position,
            forward: Vec3::zeros(),
            up: Vec3::zeros(),
            right: FRAME_RIGHT,
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Map a point from frame-local coordinates to world space.
    pub fn local_to_world(&self, local: &Vec3) -> Vec3 {
        lift_point(&self.position) + self.local_to_world_direction(local)
    }

    /// Rotate a direction from frame-local coordinates to world space.
    pub fn local_to_world_direction(&self, local: &Vec3) -> Vec3 {
        self.rotation * local
    }
}

/// `+1` for any non-negative input (including `-0.0`), `-1` otherwise.
fn sign_non_negative(v: f64) -> f64 {
    if v >= 0.0 { 1.0 } else { -1.0 }
}

/// Rotation matrix to quaternion using the per-component trace form with
/// sign correction from the off-diagonal differences.
///
/// Each vector component takes the sign of its antisymmetric term. For a
/// half-turn (w = 0) those terms vanish and the component signs stay
/// positive, which can pick the mirrored half-turn axis; sweeps rely on this
/// exact behavior, so do not swap in a branch-on-largest-component variant.
pub fn quaternion_from_basis(m: &Matrix3<f64>) -> UnitQuaternion<f64> {
    let w = (1.0 + m[(0, 0)] + m[(1, 1)] + m[(2, 2)]).max(0.0).sqrt() / 2.0;
    let mut x = (1.0 + m[(0, 0)] - m[(1, 1)] - m[(2, 2)]).max(0.0).sqrt() / 2.0;
    let mut y = (1.0 - m[(0, 0)] + m[(1, 1)] - m[(2, 2)]).max(0.0).sqrt() / 2.0;
    let mut z = (1.0 - m[(0, 0)] - m[(1, 1)] + m[(2, 2)]).max(0.0).sqrt() / 2.0;
    x *= sign_non_negative(x * (m[(2, 1)] - m[(1, 2)]));
    y *= sign_non_negative(y * (m[(0, 2)] - m[(2, 0)]));
    z *= sign_non_negative(z * (m[(1, 0)] - m[(0, 1)]));
    UnitQuaternion::new_unchecked(Quaternion::new(w, x, y, z))
}

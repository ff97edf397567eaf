pub mod bezier;
pub mod frame;
pub mod hull;
pub mod matrix;

/// A point in the 2D editing plane.
pub type Point2 = nalgebra::Point2<f64>;
/// A direction in the 2D editing plane.
pub type Vec2 = nalgebra::Vector2<f64>;
/// A direction or position in 3D world space.
pub type Vec3 = nalgebra::Vector3<f64>;

/// Lengths below this are treated as zero when normalizing.
pub const NORMALIZE_EPSILON: f64 = 1e-12;

/// Lift a planar point into world space at z = 0.
pub fn lift_point(p: &Point2) -> Vec3 {
    Vec3::new(p.x, p.y, 0.0)
}

/// Lift a planar direction into world space at z = 0.
pub fn lift_vector(v: &Vec2) -> Vec3 {
    Vec3::new(v.x, v.y, 0.0)
}

/// Normalize `v`, returning the zero vector for near-zero input.
pub fn normalized_or_zero(v: &Vec2) -> Vec2 {
    v.try_normalize(NORMALIZE_EPSILON).unwrap_or_else(Vec2::zeros)
}

/// 3D counterpart of [`normalized_or_zero`].
pub fn normalized_or_zero3(v: &Vec3) -> Vec3 {
    v.try_normalize(NORMALIZE_EPSILON).unwrap_or_else(Vec3::zeros)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lift_point_sits_on_plane() {
        let p = lift_point(&Point2::new(3.0, -2.0));
        assert_eq!(p, Vec3::new(3.0, -2.0, 0.0));
    }

    #[test]
    fn test_normalized_or_zero() {
        let n = normalized_or_zero(&Vec2::new(3.0, 4.0));
        assert!((n.norm() - 1.0).abs() < 1e-12);
        assert_eq!(normalized_or_zero(&Vec2::zeros()), Vec2::zeros());
        assert_eq!(normalized_or_zero3(&Vec3::zeros()), Vec3::zeros());
    }
}

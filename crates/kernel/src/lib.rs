pub mod geometry;
pub mod curve;
pub mod editor;
pub mod gesture;
pub mod config;
pub mod error;

// Re-export the core types at crate root for convenience.
pub use config::{EditorConfig, EditorMode, GestureSpeeds};
pub use curve::{Curve, Parameterization};
pub use editor::{ControlPoint, ControlPointId, CurveId, CurveSet};
pub use error::{ConfigError, KernelError};
pub use geometry::frame::OrientedFrame;
pub use geometry::matrix::Matrix3x3;
pub use geometry::{Point2, Vec2, Vec3};
pub use gesture::{gesture_matrix, GestureSnapshot, TransformKind};

/// Global tolerance configuration for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Points closer than this are considered coincident (world units).
    pub coincidence: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            coincidence: 1e-7,
        }
    }
}

impl Tolerance {
    pub fn is_zero_length(&self, length: f64) -> bool {
        length.abs() < self.coincidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerance_checks() {
        let tol = Tolerance::default();
        assert!(tol.is_zero_length(-1e-8));
        assert!(!tol.is_zero_length(1e-3));
    }
}

//! Transform gestures over a captured set of control points.
//!
//! A gesture begins with a [`GestureSnapshot`] and is then updated with the
//! cursor position each frame. Every update builds one matrix from the
//! snapshot and the cursor, so positions never drift from repeated updates.

use serde::{Deserialize, Serialize};

use crate::config::GestureSpeeds;
use crate::editor::ControlPointId;
use crate::geometry::matrix::Matrix3x3;
use crate::geometry::Point2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformKind {
    Translate,
    Scale,
    Rotate,
    Shear,
}

impl TransformKind {
    /// Tool selection key: `t`, `s`, `r` or `h` (any case).
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            't' => Some(TransformKind::Translate),
            's' => Some(TransformKind::Scale),
            'r' => Some(TransformKind::Rotate),
            'h' => Some(TransformKind::Shear),
            _ => None,
        }
    }
}

/// Pivot and original positions recorded when a gesture starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureSnapshot {
    pub pivot: Point2,
    pub originals: Vec<(ControlPointId, Point2)>,
}

impl GestureSnapshot {
    /// Mean of the original positions, or the origin when empty.
    pub fn centroid(&self) -> Point2 {
        if self.originals.is_empty() {
            return Point2::origin();
        }
        let sum = self
            .originals
            .iter()
            .fold(nalgebra::Vector2::zeros(), |acc, (_, p)| acc + p.coords);
        Point2::from(sum / self.originals.len() as f64)
    }
}

/// Matrix taking the snapshot's original positions to their positions for
/// the given cursor.
///
/// Scale is uniform and driven only by the horizontal cursor offset; moving
/// left of the pivot shrinks, and far enough left mirrors through the pivot.
pub fn gesture_matrix(
    kind: TransformKind,
    snapshot: &GestureSnapshot,
    cursor: &Point2,
    speeds: &GestureSpeeds,
) -> Matrix3x3 {
    let pivot = snapshot.pivot;
    let delta = cursor - pivot;
    match kind {
        TransformKind::Translate => {
            let d = delta * speeds.translate;
            Matrix3x3::translation(d.x, d.y)
        }
        TransformKind::Scale => {
            let factor = 1.0 + delta.x * speeds.scale;
            Matrix3x3::about_pivot(&pivot, &Matrix3x3::uniform_scaling(factor))
        }
        TransformKind::Rotate => {
            let degrees = delta.y.atan2(delta.x).to_degrees();
            Matrix3x3::about_pivot(&pivot, &Matrix3x3::rotation_z(degrees))
        }
        TransformKind::Shear => {
            let k = delta * speeds.shear;
            Matrix3x3::about_pivot(&pivot, &Matrix3x3::shear(k.x, k.y))
        }
    }
}

//! Curve evaluation over an ordered control-point snapshot.

use nalgebra::UnitQuaternion;
use serde::{Deserialize, Serialize};

use crate::geometry::frame::OrientedFrame;
use crate::geometry::{bezier, hull, normalized_or_zero, Point2, Vec2, Vec3};

/// How a parameter `t` in `[0, 1]` maps onto the control points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Parameterization {
    /// One global Bezier curve through De Casteljau.
    #[default]
    Bezier,
    /// Piecewise-linear walk over the control polygon by arc length.
    Polygon,
}

/// An evaluable curve: an owned copy of the control points plus topology.
///
/// The points are a snapshot; moving the original control points afterwards
/// does not affect a curve that is already being evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    points: Vec<Point2>,
    pub parameterization: Parameterization,
    /// Treat the first point as also following the last one.
    pub closed: bool,
}

impl Curve {
    pub fn new(points: Vec<Point2>, parameterization: Parameterization) -> Self {
        Self {
            points,
            parameterization,
            closed: false,
        }
    }

    pub fn bezier(points: Vec<Point2>) -> Self {
        Self::new(points, Parameterization::Bezier)
    }

    pub fn polygon(points: Vec<Point2>) -> Self {
        Self::new(points, Parameterization::Polygon)
    }

    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Points as evaluated: the stored sequence, plus the first point again
    /// when the curve is closed.
    pub fn evaluation_points(&self) -> Vec<Point2> {
        let mut pts = self.points.clone();
        if self.closed {
            if let Some(first) = self.points.first() {
                pts.push(*first);
            }
        }
        pts
    }

    /// Position at `t`. Fewer than two control points give the origin.
    pub fn position_at(&self, t: f64) -> Point2 {
        if self.points.len() < 2 {
            return Point2::origin();
        }
        let pts = self.evaluation_points();
        match self.parameterization {
            Parameterization::Bezier => bezier::point_at(&pts, t),
            Parameterization::Polygon => polygon_walk(&pts, t).position,
        }
    }

    /// Unit tangent at `t`, or zero when undefined.
    ///
    /// A Bezier tangent needs at least three control points; a polygon
    /// tangent is defined from two.
    pub fn tangent_at(&self, t: f64) -> Vec2 {
        match self.parameterization {
            Parameterization::Bezier => {
                if self.points.len() < 3 {
                    return Vec2::zeros();
                }
                bezier::tangent_at(&self.evaluation_points(), t)
            }
            Parameterization::Polygon => {
                if self.points.len() < 2 {
                    return Vec2::zeros();
                }
                polygon_walk(&self.evaluation_points(), t).direction
            }
        }
    }

    /// Oriented frame at `t`.
    pub fn frame_at(&self, t: f64) -> OrientedFrame {
        OrientedFrame::from_tangent(self.position_at(t), &self.tangent_at(t))
    }

    pub fn up_at(&self, t: f64) -> Vec3 {
        self.frame_at(t).up
    }

    pub fn rotation_at(&self, t: f64) -> UnitQuaternion<f64> {
        self.frame_at(t).rotation
    }

    /// Preview polyline sampled every `1 / step_count` in `t`.
    pub fn sample(&self, step_count: usize) -> Vec<Point2> {
        if step_count == 0 || self.points.len() < 2 {
            return Vec::new();
        }
        let step = 1.0 / step_count as f64;
        match self.parameterization {
            Parameterization::Bezier => bezier::sample_curve(&self.evaluation_points(), step),
            Parameterization::Polygon => {
                let pts = self.evaluation_points();
                let step = step as f32;
                let mut samples = Vec::new();
                let mut t = 0.0f32;
                while t <= 1.0 {
                    samples.push(polygon_walk(&pts, t as f64).position);
                    t += step;
                }
                samples
            }
        }
    }

    /// Length of the control polygon, closing edge included when closed.
    pub fn length(&self) -> f64 {
        polyline_length(&self.evaluation_points())
    }

    /// Convex hull of the control points.
    pub fn convex_hull(&self) -> Vec<Point2> {
        hull::convex_hull(&self.points)
    }
}

/// Sum of consecutive distances.
pub fn polyline_length(points: &[Point2]) -> f64 {
    points.windows(2).map(|w| nalgebra::distance(&w[0], &w[1])).sum()
}

#[derive(Debug, Clone, Copy)]
struct WalkResult {
    position: Point2,
    direction: Vec2,
}

/// Travel `t` of the way along the polyline by arc length.
///
/// Zero-length segments never contain the target. If accumulated rounding
/// leaves the target past the last segment, the walk clamps to the final
/// point and the direction of the last non-degenerate segment.
fn polygon_walk(points: &[Point2], t: f64) -> WalkResult {
    let Some(first) = points.first() else {
        return WalkResult {
            position: Point2::origin(),
            direction: Vec2::zeros(),
        };
    };
    let total = polyline_length(points);
    if total <= 0.0 {
        return WalkResult {
            position: *first,
            direction: Vec2::zeros(),
        };
    }

    let target = t * total;
    let mut travelled = 0.0;
    let mut last_direction = Vec2::zeros();
    for w in points.windows(2) {
        let segment = w[1] - w[0];
        let len = segment.norm();
        if len <= 0.0 {
            continue;
        }
        let direction = normalized_or_zero(&segment);
        if travelled + len >= target {
            let local = ((target - travelled) / len).clamp(0.0, 1.0);
            return WalkResult {
                position: w[0] + segment * local,
                direction,
            };
        }
        travelled += len;
        last_direction = direction;
    }

    WalkResult {
        position: points[points.len() - 1],
        direction: last_direction,
    }
}

//! De Casteljau evaluation of a single global Bezier curve.
//!
//! Every control point participates in every evaluation (no splitting into
//! cubic segments), so one evaluation costs O(n²) for n control points.

use super::{NORMALIZE_EPSILON, Point2, Vec2};

/// One reduction pass: `p[i] = (1 - t) * p[i] + t * p[i + 1]`, then drop the last point.
fn reduce(points: &mut Vec<Point2>, t: f64) {
    let one_minus_t = 1.0 - t;
    for i in 0..points.len() - 1 {
        points[i] = Point2::from(points[i].coords * one_minus_t + points[i + 1].coords * t);
    }
    points.pop();
}

/// Evaluate the curve at `t`.
///
/// A single control point is returned unchanged; an empty set returns the origin.
pub fn point_at(points: &[Point2], t: f64) -> Point2 {
    if points.is_empty() {
        return Point2::origin();
    }
    let mut working = points.to_vec();
    while working.len() > 1 {
        reduce(&mut working, t);
    }
    working[0]
}

/// Unit tangent at `t`: the reduction stops at two points and returns the
/// normalized direction between them.
///
/// Returns the zero vector with fewer than two points or when the last two
/// reduced points coincide.
pub fn tangent_at(points: &[Point2], t: f64) -> Vec2 {
    if points.len() < 2 {
        return Vec2::zeros();
    }
    let mut working = points.to_vec();
    while working.len() > 2 {
        reduce(&mut working, t);
    }
    (working[1] - working[0])
        .try_normalize(NORMALIZE_EPSILON)
        .unwrap_or_else(Vec2::zeros)
}

/// Sample the curve from `t = 0` while `t <= 1`, stepping by `step`.
///
/// `t` is accumulated in `f32`, so the final sample can land just short of 1
/// and the sample count matches what an accumulating single-precision loop
/// produces (for `step = 0.1` that is 10 samples, not 11).
pub fn sample_curve(points: &[Point2], step: f64) -> Vec<Point2> {
    if points.is_empty() || !step.is_finite() || step <= 0.0 {
        return Vec::new();
    }
    let step = step as f32;
    if step <= 0.0 {
        return Vec::new();
    }
    let mut samples = Vec::new();
    let mut t = 0.0f32;
    while t <= 1.0 {
        samples.push(point_at(points, t as f64));
        t += step;
    }
    samples
}

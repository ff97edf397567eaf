//! Graham scan convex hull for planar point sets.

use std::cmp::Ordering;

use approx::relative_eq;

use super::Point2;

const APPROX_EPSILON: f64 = 1e-9;
const APPROX_RELATIVE: f64 = 1e-6;

fn nearly_equal(a: f64, b: f64) -> bool {
    relative_eq!(a, b, epsilon = APPROX_EPSILON, max_relative = APPROX_RELATIVE)
}

fn points_nearly_equal(a: &Point2, b: &Point2) -> bool {
    nearly_equal(a.x, b.x) && nearly_equal(a.y, b.y)
}

/// Which point, if any, to drop from the boundary when `p3` is considered
/// after the hull edge `p1 -> p2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Removal {
    None,
    MidPoint,
    EndPoint,
}

/// `(p2 - p1) x (p3 - p1)`, snapped to zero when both products agree.
fn signed_area(p1: &Point2, p2: &Point2, p3: &Point2) -> f64 {
    let cross1 = (p2.x - p1.x) * (p3.y - p1.y);
    let cross2 = (p2.y - p1.y) * (p3.x - p1.x);
    if nearly_equal(cross1, cross2) {
        0.0
    } else {
        cross1 - cross2
    }
}

fn which_to_remove(p1: &Point2, p2: &Point2, p3: &Point2) -> Removal {
    let cross = signed_area(p1, p2, p3);
    if cross < 0.0 {
        return Removal::MidPoint;
    }
    if cross > 0.0 {
        return Removal::None;
    }
    // Collinear: keep whichever of p2/p3 lies farther along the edge.
    let dot = (p3.x - p2.x) * (p2.x - p1.x) + (p3.y - p2.y) * (p2.y - p1.y);
    if nearly_equal(dot, 0.0) || dot > 0.0 {
        Removal::MidPoint
    } else {
        Removal::EndPoint
    }
}

/// Index of the lowest point, ties broken by the smallest x.
fn pivot_index(points: &[Point2]) -> usize {
    (1..points.len()).fold(0, |min, cur| {
        let (a, b) = (&points[cur], &points[min]);
        if a.y < b.y || (a.y == b.y && a.x < b.x) {
            cur
        } else {
            min
        }
    })
}

/// Compute the convex hull of `input`.
///
/// The hull is returned counter-clockwise starting at the lowest (then
/// leftmost) point. Interior and collinear boundary points are dropped;
/// for collinear input only the two extremes remain. Fewer than two points
/// are returned unchanged. Points at exactly equal polar angles keep their
/// input order before the scan; the result does not depend on that order.
pub fn convex_hull(input: &[Point2]) -> Vec<Point2> {
    if input.len() < 2 {
        return input.to_vec();
    }

    let pivot_idx = pivot_index(input);
    let pivot = input[pivot_idx];

    let mut by_angle: Vec<(f64, Point2)> = input
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != pivot_idx)
        .map(|(_, p)| ((p.y - pivot.y).atan2(p.x - pivot.x), *p))
        .collect();
    by_angle.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    let mut points = Vec::with_capacity(input.len());
    points.push(pivot);
    points.extend(by_angle.into_iter().map(|(_, p)| p));

    // points[..=top] is the current boundary.
    let mut top = 0usize;
    for i in 1..points.len() {
        let mut keep = true;
        if top == 0 {
            keep = !points_nearly_equal(&points[0], &points[i]);
        } else {
            loop {
                match which_to_remove(&points[top - 1], &points[top], &points[i]) {
                    Removal::None => break,
                    Removal::MidPoint => {
                        top -= 1;
                        if top == 0 {
                            break;
                        }
                    }
                    Removal::EndPoint => {
                        keep = false;
                        break;
                    }
                }
            }
        }

        if keep {
            top += 1;
            points.swap(top, i);
        }
    }

    // The scan never tests the closing edge back to the pivot. A nearer
    // point on the last ray can trail a farther one there.
    while top >= 2 && signed_area(&points[top - 1], &points[top], &points[0]) == 0.0 {
        top -= 1;
    }

    points.truncate(top + 1);
    points
}

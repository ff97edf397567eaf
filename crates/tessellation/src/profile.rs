//! 2D cross-sections swept or revolved into meshes.
//!
//! A profile is a vertex array plus a line-index list. The line list is a
//! strip: consecutive entries form edges, `-1` entries break the strip, and
//! a vertex's multiplicity says how far the stitch cursor advances after an
//! edge starting at that vertex.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use sweep_kernel::{Curve, Point2, Vec2};

use crate::stitch::StitchEdges;

/// Line-index value meaning "no edge here".
pub const SENTINEL: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileVertex {
    pub point: Point2,
    pub normal: Vec2,
    /// Texture coordinate along the profile.
    pub uv: f64,
    pub multiplicity: usize,
}

impl ProfileVertex {
    pub fn new(point: Point2, normal: Vec2) -> Self {
        Self {
            point,
            normal,
            uv: 0.0,
            multiplicity: 1,
        }
    }

    pub fn with_multiplicity(mut self, multiplicity: usize) -> Self {
        self.multiplicity = multiplicity;
        self
    }

    pub fn with_uv(mut self, uv: f64) -> Self {
        self.uv = uv;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("Line index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        position: usize,
        index: i32,
        vertex_count: usize,
    },

    #[error("Vertex {vertex} has zero multiplicity")]
    ZeroMultiplicity { vertex: usize },

    #[error("Vertex {vertex} has multiplicity {multiplicity}, more than the {line_count} line entries")]
    MultiplicityTooLarge {
        vertex: usize,
        multiplicity: usize,
        line_count: usize,
    },

    #[error("Circle needs at least 3 points, got {point_count}")]
    TooFewCirclePoints { point_count: usize },

    #[error("Circle radius must be finite and positive, got {radius}")]
    InvalidRadius { radius: f64 },
}

/// A validated cross-section: every line index is `-1` or a vertex index,
/// and every multiplicity is at least 1 and at most the line list length.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CrossSection2D {
    vertices: Vec<ProfileVertex>,
    line_indices: Vec<i32>,
}

impl CrossSection2D {
    pub fn new(vertices: Vec<ProfileVertex>, line_indices: Vec<i32>) -> Result<Self, ProfileError> {
        if let Some(vertex) = vertices.iter().position(|v| v.multiplicity == 0) {
            return Err(ProfileError::ZeroMultiplicity { vertex });
        }
        let line_count = line_indices.len();
        if let Some((vertex, v)) = vertices
            .iter()
            .enumerate()
            .find(|(_, v)| v.multiplicity > line_count.max(1))
        {
            return Err(ProfileError::MultiplicityTooLarge {
                vertex,
                multiplicity: v.multiplicity,
                line_count,
            });
        }
        let vertex_count = vertices.len();
        for (position, &index) in line_indices.iter().enumerate() {
            let valid = index == SENTINEL || (index >= 0 && (index as usize) < vertex_count);
            if !valid {
                return Err(ProfileError::IndexOutOfRange {
                    position,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(Self {
            vertices,
            line_indices,
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Concatenate shapes into one profile.
    ///
    /// Each shape's indices are offset by the number of vertices before it,
    /// and a sentinel separates consecutive shapes so no edge joins them.
    pub fn from_shapes(shapes: &[Shape]) -> Result<Self, ProfileError> {
        let mut vertices = Vec::new();
        let mut line_indices = Vec::new();
        for shape in shapes {
            let (shape_vertices, shape_lines) = shape.build()?;
            if shape_vertices.is_empty() {
                continue;
            }
            let offset = vertices.len() as i32;
            if !line_indices.is_empty() {
                line_indices.push(SENTINEL);
            }
            line_indices.extend(
                shape_lines
                    .iter()
                    .map(|&i| if i == SENTINEL { SENTINEL } else { i + offset }),
            );
            vertices.extend(shape_vertices);
        }
        Self::new(vertices, line_indices)
    }

    /// Sample `curve` into an open profile of `samples` vertices, using
    /// each frame's up vector as the vertex normal.
    ///
    /// Fewer than two samples or fewer than two control points give an empty
    /// profile.
    pub fn from_curve(curve: &Curve, samples: usize) -> Self {
        if samples < 2 || curve.point_count() < 2 {
            warn!(samples, points = curve.point_count(), "profile curve too small to sample");
            return Self::empty();
        }
        let vertices: Vec<ProfileVertex> = (0..samples)
            .map(|i| {
                let t = i as f64 / (samples - 1) as f64;
                let frame = curve.frame_at(t);
                ProfileVertex::new(frame.position, Vec2::new(frame.up.x, frame.up.y)).with_uv(t)
            })
            .collect();
        let line_indices = (0..samples as i32).collect();
        Self {
            vertices,
            line_indices,
        }
    }

    pub fn vertices(&self) -> &[ProfileVertex] {
        &self.vertices
    }

    pub fn line_indices(&self) -> &[i32] {
        &self.line_indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn line_count(&self) -> usize {
        self.line_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Edges `(a, b)` the stitcher will connect between rings.
    pub fn edges(&self) -> StitchEdges<'_> {
        StitchEdges::new(self)
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }
}

/// One building block of a composite profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Regular polygon approximating a circle, wound clockwise.
    Circle {
        center: Point2,
        radius: f64,
        point_count: usize,
    },
    /// Explicit vertices with shape-local line indices.
    Hand {
        vertices: Vec<ProfileVertex>,
        line_indices: Vec<i32>,
    },
}

impl Shape {
    pub fn circle(center: Point2, radius: f64, point_count: usize) -> Self {
        Shape::Circle {
            center,
            radius,
            point_count,
        }
    }

    /// Vertices and shape-local line indices.
    pub fn build(&self) -> Result<(Vec<ProfileVertex>, Vec<i32>), ProfileError> {
        match self {
            Shape::Circle {
                center,
                radius,
                point_count,
            } => circle_vertices(center, *radius, *point_count),
            Shape::Hand {
                vertices,
                line_indices,
            } => Ok((vertices.clone(), line_indices.clone())),
        }
    }
}

fn circle_vertices(
    center: &Point2,
    radius: f64,
    point_count: usize,
) -> Result<(Vec<ProfileVertex>, Vec<i32>), ProfileError> {
    if point_count < 3 {
        return Err(ProfileError::TooFewCirclePoints { point_count });
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(ProfileError::InvalidRadius { radius });
    }
    let mut vertices: Vec<ProfileVertex> = (0..point_count)
        .map(|i| {
            let angle = (i as f64 * 360.0 / point_count as f64).to_radians();
            let dir = Vec2::new(angle.cos(), angle.sin());
            ProfileVertex::new(center + dir * radius, dir)
        })
        .collect();
    vertices.reverse();
    for (i, v) in vertices.iter_mut().enumerate() {
        v.uv = i as f64 / point_count as f64;
    }
    let mut line_indices: Vec<i32> = (0..point_count as i32).collect();
    line_indices.push(0);
    Ok((vertices, line_indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_circle_is_clockwise_with_outward_normals() {
        let (verts, lines) = Shape::circle(Point2::new(1.0, 0.0), 2.0, 4).build().unwrap();
        assert_eq!(verts.len(), 4);
        assert_eq!(lines, vec![0, 1, 2, 3, 0]);
        // Emitted in reverse: 270, 180, 90, 0 degrees.
        assert_relative_eq!(verts[0].point, Point2::new(1.0, -2.0), epsilon = 1e-12);
        assert_relative_eq!(verts[1].point, Point2::new(-1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(verts[3].point, Point2::new(3.0, 0.0), epsilon = 1e-12);
        for v in &verts {
            let outward = (v.point - Point2::new(1.0, 0.0)) / 2.0;
            assert_relative_eq!(v.normal, outward, epsilon = 1e-12);
            assert_eq!(v.multiplicity, 1);
        }
        let signed_area: f64 = (0..4)
            .map(|i| {
                let (a, b) = (verts[i].point, verts[(i + 1) % 4].point);
                a.x * b.y - b.x * a.y
            })
            .sum();
        assert!(signed_area < 0.0);
    }

    #[test]
    fn test_circle_rejects_bad_input() {
        assert_eq!(
            Shape::circle(Point2::origin(), 1.0, 2).build(),
            Err(ProfileError::TooFewCirclePoints { point_count: 2 })
        );
        assert!(matches!(
            Shape::circle(Point2::origin(), 0.0, 8).build(),
            Err(ProfileError::InvalidRadius { .. })
        ));
    }

    #[test]
    fn test_new_validates_indices_and_multiplicity() {
        let v = ProfileVertex::new(Point2::origin(), Vec2::x());
        assert!(CrossSection2D::new(vec![v, v], vec![0, 1, -1, 1]).is_ok());
        assert_eq!(
            CrossSection2D::new(vec![v, v], vec![0, 2]),
            Err(ProfileError::IndexOutOfRange {
                position: 1,
                index: 2,
                vertex_count: 2
            })
        );
        assert!(matches!(
            CrossSection2D::new(vec![v], vec![0, -2]),
            Err(ProfileError::IndexOutOfRange { index: -2, .. })
        ));
        assert_eq!(
            CrossSection2D::new(vec![v, v.with_multiplicity(0)], vec![0, 1]),
            Err(ProfileError::ZeroMultiplicity { vertex: 1 })
        );
    }

    #[test]
    fn test_new_rejects_multiplicity_past_line_list() {
        let v = ProfileVertex::new(Point2::origin(), Vec2::x());
        assert_eq!(
            CrossSection2D::new(vec![v, v.with_multiplicity(usize::MAX), v], vec![0, 1, 2]),
            Err(ProfileError::MultiplicityTooLarge {
                vertex: 1,
                multiplicity: usize::MAX,
                line_count: 3
            })
        );
        assert!(matches!(
            CrossSection2D::new(vec![v.with_multiplicity(2)], vec![]),
            Err(ProfileError::MultiplicityTooLarge { line_count: 0, .. })
        ));
        assert!(CrossSection2D::new(vec![v], vec![]).is_ok());
        let widest = CrossSection2D::new(
            vec![v, v.with_multiplicity(3), v],
            vec![0, 1, 2],
        ).unwrap();
        assert_eq!(widest.edges().collect::<Vec<_>>(), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_from_shapes_offsets_and_separates() {
        let profile = CrossSection2D::from_shapes(&[
            Shape::circle(Point2::new(-3.0, 0.0), 1.0, 4),
            Shape::circle(Point2::new(3.0, 0.0), 1.0, 4),
        ])
        .unwrap();
        assert_eq!(profile.vertex_count(), 8);
        assert_eq!(profile.line_indices(), &[0, 1, 2, 3, 0, -1, 4, 5, 6, 7, 4]);
        let edges: Vec<_> = profile.edges().collect();
        assert_eq!(edges.len(), 8);
        assert!(!edges.contains(&(3, 4)));
        assert!(!edges.contains(&(0, 4)));
        assert!(edges.contains(&(7, 4)));
    }

    #[test]
    fn test_from_shapes_keeps_hand_sentinels() {
        let v = ProfileVertex::new(Point2::origin(), Vec2::y());
        let hand = Shape::Hand {
            vertices: vec![v, v, v],
            line_indices: vec![0, 1, -1, 1, 2],
        };
        let profile =
            CrossSection2D::from_shapes(&[Shape::circle(Point2::origin(), 1.0, 3), hand]).unwrap();
        assert_eq!(profile.line_indices(), &[0, 1, 2, 0, -1, 3, 4, -1, 4, 5]);
    }

    #[test]
    fn test_from_shapes_validates_hand_indices() {
        let v = ProfileVertex::new(Point2::origin(), Vec2::y());
        let hand = Shape::Hand {
            vertices: vec![v],
            line_indices: vec![0, 3],
        };
        assert!(matches!(
            CrossSection2D::from_shapes(&[hand]),
            Err(ProfileError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_from_curve_samples_open_strip() {
        let curve = Curve::bezier(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 0.0),
        ]);
        let profile = CrossSection2D::from_curve(&curve, 10);
        assert_eq!(profile.vertex_count(), 10);
        assert_eq!(profile.line_indices(), (0..10).collect::<Vec<i32>>().as_slice());
        assert_eq!(profile.edge_count(), 9);
        assert_relative_eq!(profile.vertices()[0].point, Point2::new(0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(profile.vertices()[9].point, Point2::new(2.0, 0.0), epsilon = 1e-12);
        // Middle sample: tangent +x, so the normal is +y.
        let mid = CrossSection2D::from_curve(&curve, 3);
        assert_relative_eq!(mid.vertices()[1].normal, Vec2::new(0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_from_curve_degenerate() {
        let curve = Curve::bezier(vec![Point2::origin()]);
        assert!(CrossSection2D::from_curve(&curve, 10).is_empty());
        let curve = Curve::bezier(vec![Point2::origin(), Point2::new(1.0, 0.0)]);
        assert!(CrossSection2D::from_curve(&curve, 1).is_empty());
    }
}

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use sweep_kernel::geometry::normalized_or_zero3;
use sweep_kernel::{Curve, EditorConfig, Vec3};

use crate::mesh::TriangleMesh;
use crate::profile::CrossSection2D;
use crate::stitch::stitch_rings;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepOptions {
    /// Number of profile copies along the path, ends included.
    pub rings: usize,
    /// Profile scale on the first ring.
    pub start_scale: f64,
    /// Profile scale on the last ring.
    pub end_scale: f64,
    /// Emit per-vertex normals.
    pub normals: bool,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl SweepOptions {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            rings: config.ring_count,
            start_scale: config.start_scale,
            end_scale: config.final_scale,
            normals: true,
        }
    }
}

/// Sweep a profile along a path curve.
///
/// Ring `r` sits at `t = r / (rings - 1)` on the path, with the profile
/// scaled by the linear blend of the start and end scales. The profile's
/// local x maps to the frame's right axis and local y to its up axis.
///
/// # Arguments
///
/// * `path` - The curve the profile follows.
/// * `profile` - The cross-section placed at every ring.
/// * `options` - Ring count, scale range and normal output.
///
/// # Returns
///
/// A mesh of `rings * vertex_count` vertices; empty when `rings < 2` or the
/// profile has no vertices.
#[instrument(
    skip(path, profile),
    fields(path_points = path.point_count(), profile_vertices = profile.vertex_count())
)]
pub fn sweep(path: &Curve, profile: &CrossSection2D, options: &SweepOptions) -> TriangleMesh {
    if options.rings < 2 || profile.is_empty() {
        warn!(rings = options.rings, "sweep needs at least two rings and a non-empty profile");
        return TriangleMesh::new();
    }

    let ring_size = profile.vertex_count();
    let mut mesh = TriangleMesh::with_capacity(
        options.rings * ring_size,
        2 * (options.rings - 1) * profile.edge_count(),
    );

    for ring in 0..options.rings {
        let t = ring as f64 / (options.rings - 1) as f64;
        let scale = options.start_scale + (options.end_scale - options.start_scale) * t;
        let frame = path.frame_at(t);
        for v in profile.vertices() {
            let local = Vec3::new(v.point.x * scale, v.point.y * scale, 0.0);
            let position = frame.local_to_world(&local);
            let normal = options.normals.then(|| {
                let local_normal = Vec3::new(v.normal.x, v.normal.y, 0.0);
                normalized_or_zero3(&frame.local_to_world_direction(&local_normal))
            });
            mesh.add_vertex(&position, normal.as_ref(), (v.uv, t));
        }
    }
    debug!(vertices = mesh.vertex_count(), "placed sweep rings");

    stitch_rings(&mut mesh, profile, options.rings);

    info!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "sweep mesh built"
    );
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Shape;
    use sweep_kernel::Point2;

    fn straight_path() -> Curve {
        Curve::polygon(vec![Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)])
    }

    fn circle(n: usize) -> CrossSection2D {
        CrossSection2D::from_shapes(&[Shape::circle(Point2::origin(), 1.0, n)]).unwrap()
    }

    #[test]
    fn test_counts() {
        let options = SweepOptions {
            rings: 5,
            ..SweepOptions::default()
        };
        let mesh = sweep(&straight_path(), &circle(6), &options);
        assert_eq!(mesh.vertex_count(), 30);
        assert_eq!(mesh.triangle_count(), 2 * 4 * 6);
        assert_eq!(mesh.normals.len(), mesh.positions.len());
    }

    #[test]
    fn test_degenerate_inputs_give_empty_mesh() {
        let one_ring = SweepOptions {
            rings: 1,
            ..SweepOptions::default()
        };
        assert!(sweep(&straight_path(), &circle(4), &one_ring).is_empty());
        let empty = CrossSection2D::empty();
        assert!(sweep(&straight_path(), &empty, &SweepOptions::default()).is_empty());
    }

    #[test]
    fn test_scale_interpolates_along_path() {
        let options = SweepOptions {
            rings: 3,
            start_scale: 2.0,
            end_scale: 1.0,
            normals: false,
        };
        let mesh = sweep(&straight_path(), &circle(4), &options);
        assert!(!mesh.has_normals());
        // Vertex 0 of each ring is the profile point (0, -1); local y maps to world y.
        assert!((mesh.position(0).y + 2.0).abs() < 1e-6);
        assert!((mesh.position(4).y + 1.5).abs() < 1e-6);
        assert!((mesh.position(8).y + 1.0).abs() < 1e-6);
        assert!((mesh.position(4).x - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_profile_x_maps_out_of_plane() {
        let options = SweepOptions {
            rings: 2,
            start_scale: 1.0,
            end_scale: 1.0,
            normals: true,
        };
        let mesh = sweep(&straight_path(), &circle(4), &options);
        // Local (1, 0) is vertex 3 after reversal; it lands on world -z.
        let p = mesh.position(3);
        assert!(p.x.abs() < 1e-6 && p.y.abs() < 1e-6 && (p.z + 1.0).abs() < 1e-6);
        let n = mesh.normal(3).unwrap();
        assert!((n - Vec3::new(0.0, 0.0, -1.0)).norm() < 1e-6);
    }
}

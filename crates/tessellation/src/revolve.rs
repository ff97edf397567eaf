use std::f64::consts::PI;

use nalgebra::{Unit, UnitQuaternion};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use sweep_kernel::geometry::normalized_or_zero3;
use sweep_kernel::{EditorConfig, Vec3};

use crate::mesh::TriangleMesh;
use crate::profile::CrossSection2D;
use crate::stitch::stitch_rings;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevolutionOptions {
    /// Number of profile copies around the axis; first and last coincide.
    pub rings: usize,
    /// Axis through the origin the profile turns around.
    pub axis: Vec3,
    /// Emit per-vertex normals.
    pub normals: bool,
}

impl Default for RevolutionOptions {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl RevolutionOptions {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            rings: config.ring_count,
            axis: config.revolution_axis,
            normals: true,
        }
    }
}

/// Rotation carrying +Y onto `axis`. Opposite axes turn half way about X.
fn align_to_axis(axis: &Unit<Vec3>) -> UnitQuaternion<f64> {
    UnitQuaternion::rotation_between(&Vec3::y(), axis.as_ref())
        .unwrap_or_else(|| UnitQuaternion::from_axis_angle(&Vec3::x_axis(), PI))
}

/// Revolve a profile a full turn around an axis through the origin.
///
/// The profile's x is the distance from the axis and its y the height along
/// it. Ring `r` is at angle `a = 360° * r / (rings - 1)`: profile point
/// `(x, y)` lands at `align * (x cos a, y, x sin a)`. The radial direction is
/// `+X` of the aligned frame turned about the axis by the remaining angle
/// `360° - a`, which is where the ring's points lie.
///
/// # Arguments
///
/// * `profile` - Cross-section in the half-plane containing the axis.
/// * `options` - Ring count, axis and normal output. A zero axis falls back to +Y.
#[instrument(skip(profile), fields(profile_vertices = profile.vertex_count()))]
pub fn revolve(profile: &CrossSection2D, options: &RevolutionOptions) -> TriangleMesh {
    if options.rings < 2 || profile.is_empty() {
        warn!(rings = options.rings, "revolution needs at least two rings and a non-empty profile");
        return TriangleMesh::new();
    }
    let axis = Unit::try_new(options.axis, f64::EPSILON).unwrap_or_else(|| {
        warn!(axis = ?options.axis, "degenerate revolution axis, using +Y");
        Vec3::y_axis()
    });
    let align = align_to_axis(&axis);
    let reference = align * Vec3::x();

    let ring_size = profile.vertex_count();
    let mut mesh = TriangleMesh::with_capacity(
        options.rings * ring_size,
        2 * (options.rings - 1) * profile.edge_count(),
    );

    for ring in 0..options.rings {
        let t = ring as f64 / (options.rings - 1) as f64;
        let (sin, cos) = (360.0 * t).to_radians().sin_cos();
        let remaining = UnitQuaternion::from_axis_angle(&axis, (360.0 * (1.0 - t)).to_radians());
        let radial = remaining * reference;
        for v in profile.vertices() {
            let local = Vec3::new(v.point.x * cos, v.point.y, v.point.x * sin);
            let position = align * local;
            let normal = options.normals.then(|| {
                normalized_or_zero3(&(radial * v.normal.x + axis.into_inner() * v.normal.y))
            });
            mesh.add_vertex(&position, normal.as_ref(), (v.uv, t));
        }
    }
    debug!(vertices = mesh.vertex_count(), "placed revolution rings");

    stitch_rings(&mut mesh, profile, options.rings);

    info!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "revolution mesh built"
    );
    mesh
}

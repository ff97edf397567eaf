//! End-to-end sweep and revolution checks over the public API.

use sweep_kernel::{Curve, CurveSet, EditorConfig, EditorMode, Parameterization, Point2, Vec3};
use sweep_tessellation::{
    mesh_to_obj, revolve, sweep, validate_mesh, CrossSection2D, Extrusion, RevolutionOptions,
    Shape, SweepOptions, TriangleMesh,
};

fn straight_path() -> Curve {
    Curve::polygon(vec![Point2::new(0.0, 0.0), Point2::new(5.0, 0.0), Point2::new(10.0, 0.0)])
}

fn unit_scale(rings: usize) -> SweepOptions {
    SweepOptions {
        rings,
        start_scale: 1.0,
        end_scale: 1.0,
        normals: true,
    }
}

fn centroid(mesh: &TriangleMesh, t: usize) -> Vec3 {
    let [a, b, c] = mesh.triangle(t);
    (mesh.position(a) + mesh.position(b) + mesh.position(c)) / 3.0
}

// ---------------------------------------------------------------------------
// Counts
// ---------------------------------------------------------------------------

#[test]
fn test_sweep_vertex_and_triangle_counts() {
    let profile = CrossSection2D::from_shapes(&[Shape::circle(Point2::origin(), 1.0, 6)]).unwrap();
    for rings in [2, 3, 20] {
        let mesh = sweep(
            &straight_path(),
            &profile,
            &SweepOptions { rings, ..SweepOptions::default() },
        );
        assert_eq!(mesh.vertex_count(), profile.vertex_count() * rings);
        assert_eq!(mesh.triangle_count(), 2 * (rings - 1) * profile.edge_count());
    }
}

#[test]
fn test_open_tube_boundary_is_the_two_end_rings() {
    let profile = CrossSection2D::from_shapes(&[Shape::circle(Point2::origin(), 1.0, 6)]).unwrap();
    let mesh = sweep(&straight_path(), &profile, &unit_scale(5));
    let report = validate_mesh(&mesh);
    assert_eq!(report.boundary_edges, 12);
    assert_eq!(report.non_manifold_edges, 0);
    assert_eq!(report.degenerate_triangles, 0);
    assert!(!report.is_watertight());
}

// ---------------------------------------------------------------------------
// Composite profiles
// ---------------------------------------------------------------------------

#[test]
fn test_composite_profile_never_links_shapes() {
    let profile = CrossSection2D::from_shapes(&[
        Shape::circle(Point2::new(0.0, -2.0), 1.0, 4),
        Shape::circle(Point2::new(0.0, 2.0), 1.0, 4),
    ])
    .unwrap();
    assert_eq!(profile.vertex_count(), 8);

    let rings = 6;
    let mesh = sweep(&straight_path(), &profile, &unit_scale(rings));
    assert_eq!(mesh.vertex_count(), 8 * rings);
    assert_eq!(mesh.triangle_count(), 2 * (rings - 1) * 8);
    for t in 0..mesh.triangle_count() {
        let local = mesh.triangle(t).map(|i| i % 8);
        let first_shape = local.iter().all(|&i| i < 4);
        let second_shape = local.iter().all(|&i| i >= 4);
        assert!(first_shape || second_shape, "triangle {t} joins shapes: {local:?}");
    }
}

// ---------------------------------------------------------------------------
// Orientation
// ---------------------------------------------------------------------------

#[test]
fn test_sweep_normals_point_away_from_path() {
    let profile = CrossSection2D::from_shapes(&[Shape::circle(Point2::origin(), 1.0, 8)]).unwrap();
    let mesh = sweep(&straight_path(), &profile, &unit_scale(10));
    for t in 0..mesh.triangle_count() {
        let c = centroid(&mesh, t);
        let outward = Vec3::new(0.0, c.y, c.z);
        assert!(mesh.face_normal(t).dot(&outward) > 0.0, "triangle {t} faces inward");
    }
    for i in 0..mesh.vertex_count() {
        let p = mesh.position(i);
        let n = mesh.normal(i).unwrap();
        assert!((n.norm() - 1.0).abs() < 1e-5);
        assert!(n.dot(&Vec3::new(0.0, p.y, p.z)) > 0.0);
    }
}

#[test]
fn test_revolution_normals_point_away_from_tube_center() {
    let profile =
        CrossSection2D::from_shapes(&[Shape::circle(Point2::new(3.0, 0.0), 1.0, 8)]).unwrap();
    let options = RevolutionOptions {
        rings: 16,
        ..RevolutionOptions::default()
    };
    let mesh = revolve(&profile, &options);
    for t in 0..mesh.triangle_count() {
        let c = centroid(&mesh, t);
        let center = Vec3::new(c.x, 0.0, c.z).normalize() * 3.0;
        assert!(mesh.face_normal(t).dot(&(c - center)) > 0.0, "triangle {t} faces inward");
    }
    for i in 0..mesh.vertex_count() {
        let p = mesh.position(i);
        let center = Vec3::new(p.x, 0.0, p.z).normalize() * 3.0;
        assert!(mesh.normal(i).unwrap().dot(&(p - center)) > 0.0);
    }
}

#[test]
fn test_revolution_first_and_last_rings_coincide() {
    let profile =
        CrossSection2D::from_shapes(&[Shape::circle(Point2::new(3.0, 0.0), 1.0, 8)]).unwrap();
    let options = RevolutionOptions::default();
    let mesh = revolve(&profile, &options);
    let n = profile.vertex_count();
    for i in 0..n {
        let first = mesh.position(i);
        let last = mesh.position((options.rings - 1) * n + i);
        assert!((first - last).norm() < 1e-5, "vertex {i}: {first:?} vs {last:?}");
    }
}

// ---------------------------------------------------------------------------
// Editor to mesh
// ---------------------------------------------------------------------------

#[test]
fn test_editor_curves_drive_extrusion() {
    let config = EditorConfig::default();
    let mut set = CurveSet::from_config(&config);
    for p in [(0.0, 0.0), (3.0, 4.0), (6.0, 0.0)] {
        set.append_point(Point2::new(p.0, p.1));
    }
    let path_id = set.current_curve_id();
    set.new_curve().unwrap();
    for p in [(1.0, -1.0), (2.0, 0.0), (1.0, 1.0)] {
        set.append_point(Point2::new(p.0, p.1));
    }
    let profile_curve = set.current_curve(config.profile_parameterization, config.close_profile);
    let profile = CrossSection2D::from_curve(&profile_curve, config.profile_samples);
    let path = set
        .curve(path_id, config.sweep_parameterization, config.close_sweep_path)
        .unwrap();

    let sweep_mesh = Extrusion::for_mode(EditorMode::General, &path, &config)
        .unwrap()
        .build(&profile);
    assert_eq!(sweep_mesh.vertex_count(), config.profile_samples * config.ring_count);
    assert_eq!(
        sweep_mesh.triangle_count(),
        2 * (config.ring_count - 1) * (config.profile_samples - 1)
    );

    let vase = Extrusion::for_mode(EditorMode::Revolution, &path, &config)
        .unwrap()
        .build(&profile);
    assert_eq!(vase.vertex_count(), sweep_mesh.vertex_count());

    let obj = mesh_to_obj(&vase);
    assert_eq!(obj.lines().filter(|l| l.starts_with("f ")).count(), vase.triangle_count());
}

#[test]
fn test_polygon_path_sweep_follows_corners() {
    let path = Curve::polygon(vec![
        Point2::new(0.0, 0.0),
        Point2::new(4.0, 0.0),
        Point2::new(4.0, 4.0),
    ]);
    assert_eq!(path.parameterization, Parameterization::Polygon);
    let profile = CrossSection2D::from_shapes(&[Shape::circle(Point2::origin(), 0.5, 4)]).unwrap();
    let mesh = sweep(&path, &profile, &unit_scale(3));
    let (lo, hi) = mesh.bounds().unwrap();
    assert!(lo.x > -1e-5 && hi.x < 4.5 + 1e-5);
    assert!(hi.y > 4.0 - 1e-5);
}

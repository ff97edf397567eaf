//! Generate SVG renders and OBJ exports of demo sweeps and revolutions.

use std::error::Error;
use std::fs;

use sweep_kernel::{
    gesture_matrix, Curve, CurveSet, EditorConfig, EditorMode, GestureSnapshot, GestureSpeeds,
    Point2, TransformKind, Vec2, Vec3,
};
use sweep_tessellation::{
    mesh_to_obj, revolve, sweep, validate_mesh, CrossSection2D, Extrusion, RevolutionOptions,
    Shape, SweepOptions, TriangleMesh,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const RENDER_DIR: &str = "docs/renders";
const EXPORT_DIR: &str = "docs/exports";

/// Simple isometric projection: 3D -> 2D
fn project(p: &Vec3) -> (f64, f64) {
    let angle_x: f64 = 0.6;
    let angle_y: f64 = 0.8;
    let rx = p.x * angle_y.cos() + p.z * angle_y.sin();
    let rz = -p.x * angle_y.sin() + p.z * angle_y.cos();
    let py = p.y * angle_x.cos() - rz * angle_x.sin();
    (rx, -py)
}

struct ProjectedTriangle {
    corners: [(f64, f64); 3],
    depth: f64,
    brightness: f64,
    is_backface: bool,
}

fn mesh_to_svg(mesh: &TriangleMesh, width: f64, height: f64, title: &str) -> String {
    if mesh.indices.is_empty() {
        return format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\">\
             <text x=\"10\" y=\"20\" font-family=\"monospace\" font-size=\"14\" fill=\"#ccc\">{title} (empty)</text>\
             </svg>"
        );
    }

    let projected: Vec<(f64, f64)> = (0..mesh.vertex_count())
        .map(|i| project(&mesh.position(i)))
        .collect();
    let (min_x, max_x, min_y, max_y) = projected.iter().fold(
        (f64::MAX, f64::MIN, f64::MAX, f64::MIN),
        |(x0, x1, y0, y1), &(x, y)| (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
    );

    let padding = 40.0;
    let avail_w = width - 2.0 * padding;
    let avail_h = height - 2.0 * padding - 25.0;
    let data_w = (max_x - min_x).max(0.001);
    let data_h = (max_y - min_y).max(0.001);
    let scale = (avail_w / data_w).min(avail_h / data_h);
    let offset_x = padding + (avail_w - data_w * scale) / 2.0;
    let offset_y = padding + 25.0 + (avail_h - data_h * scale) / 2.0;
    let to_screen =
        |(px, py): (f64, f64)| ((px - min_x) * scale + offset_x, (py - min_y) * scale + offset_y);

    let light = Vec3::new(0.3, 0.8, 0.5).normalize();
    let view = Vec3::new(0.8f64.sin(), 0.0, 0.8f64.cos());

    let mut tris: Vec<ProjectedTriangle> = (0..mesh.triangle_count())
        .map(|t| {
            let [a, b, c] = mesh.triangle(t);
            let normal = mesh.face_normal(t);
            let unit = normal.try_normalize(1e-12).unwrap_or_else(Vec3::zeros);
            let center = (mesh.position(a) + mesh.position(b) + mesh.position(c)) / 3.0;
            // Back faces (inside surface visible) are drawn red so winding problems stand out.
            let (p0, p1, p2) = (projected[a], projected[b], projected[c]);
            let signed_area = (p1.0 - p0.0) * (p2.1 - p0.1) - (p2.0 - p0.0) * (p1.1 - p0.1);
            ProjectedTriangle {
                corners: [to_screen(p0), to_screen(p1), to_screen(p2)],
                depth: center.dot(&view),
                brightness: 0.3 + 0.7 * unit.dot(&light).abs().min(1.0),
                is_backface: signed_area > 0.0,
            }
        })
        .collect();

    // Far triangles first.
    tris.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    let num_tris = tris.len();
    let stroke_width = if num_tris > 200 { 0.2 } else { 0.5 };
    let stroke_color = if num_tris > 200 { "#222240" } else { "#2a2a4a" };

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" style=\"background:#1a1a2e\">\n\
         <text x=\"{}\" y=\"20\" font-family=\"monospace\" font-size=\"13\" fill=\"#8892b0\" text-anchor=\"middle\">{title}</text>\n",
        width / 2.0
    );

    for tri in &tris {
        let b = tri.brightness;
        let (r, g, bl) = if tri.is_backface {
            ((220.0 * b) as u8, (80.0 * b) as u8, (60.0 * b) as u8)
        } else {
            ((100.0 * b) as u8, (160.0 * b) as u8, (220.0 * b) as u8)
        };
        let [(x0, y0), (x1, y1), (x2, y2)] = tri.corners;
        svg.push_str(&format!(
            "  <polygon points=\"{x0:.1},{y0:.1} {x1:.1},{y1:.1} {x2:.1},{y2:.1}\" \
             fill=\"rgb({r},{g},{bl})\" stroke=\"{stroke_color}\" stroke-width=\"{stroke_width}\"/>\n"
        ));
    }

    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" font-family=\"monospace\" font-size=\"10\" fill=\"#5a6080\" \
         text-anchor=\"middle\">{} triangles, {} vertices</text>\n",
        width / 2.0,
        height - 8.0,
        num_tris,
        mesh.vertex_count()
    ));

    svg.push_str("</svg>\n");
    svg
}

/// Plot a curve's control polygon, hull and sampled preview in the editing plane.
fn curve_to_svg(curve: &Curve, steps: usize, width: f64, height: f64, title: &str) -> String {
    let preview = curve.sample(steps);
    let hull = curve.convex_hull();
    let (min_x, max_x, min_y, max_y) = curve.points().iter().chain(&preview).fold(
        (f64::MAX, f64::MIN, f64::MAX, f64::MIN),
        |(x0, x1, y0, y1), p| (x0.min(p.x), x1.max(p.x), y0.min(p.y), y1.max(p.y)),
    );
    let padding = 40.0;
    let scale = ((width - 2.0 * padding) / (max_x - min_x).max(0.001))
        .min((height - 2.0 * padding - 25.0) / (max_y - min_y).max(0.001));
    // Plane y points up, screen y points down.
    let to_screen = |p: &Point2| {
        (
            (p.x - min_x) * scale + padding,
            height - padding - (p.y - min_y) * scale,
        )
    };
    let points_attr = |pts: &[Point2]| {
        pts.iter()
            .map(|p| {
                let (x, y) = to_screen(p);
                format!("{x:.1},{y:.1}")
            })
            .collect::<Vec<_>>()
            .join(" ")
    };

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
         style=\"background:#1a1a2e\">\n\
         <text x=\"{}\" y=\"20\" font-family=\"monospace\" font-size=\"13\" fill=\"#8892b0\" \
         text-anchor=\"middle\">{title}</text>\n",
        width / 2.0
    );
    svg.push_str(&format!(
        "  <polygon points=\"{}\" fill=\"#23264a\" stroke=\"#3a3f70\" stroke-width=\"1\"/>\n",
        points_attr(&hull)
    ));
    svg.push_str(&format!(
        "  <polyline points=\"{}\" fill=\"none\" stroke=\"#5a6080\" stroke-dasharray=\"4 3\"/>\n",
        points_attr(curve.points())
    ));
    svg.push_str(&format!(
        "  <polyline points=\"{}\" fill=\"none\" stroke=\"#64a0dc\" stroke-width=\"2\"/>\n",
        points_attr(&preview)
    ));
    for p in curve.points() {
        let (x, y) = to_screen(p);
        svg.push_str(&format!(
            "  <circle cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"4\" fill=\"#dc5040\"/>\n"
        ));
    }
    svg.push_str("</svg>\n");
    svg
}

/// Validate and print mesh quality info.
fn validate_and_report(name: &str, mesh: &TriangleMesh) {
    let val = validate_mesh(mesh);
    let watertight = if val.is_watertight() { "watertight" } else { "open" };
    println!(
        "  {name}: {tris} tris, {verts} verts, {watertight}, degenerate={degenerate}",
        tris = mesh.triangle_count(),
        verts = mesh.vertex_count(),
        degenerate = val.degenerate_triangles,
    );
    if val.boundary_edges > 0 || val.non_manifold_edges > 0 {
        println!(
            "    boundary_edges={}, non_manifold={}",
            val.boundary_edges, val.non_manifold_edges
        );
    }
}

fn write_outputs(name: &str, title: &str, mesh: &TriangleMesh) -> Result<(), Box<dyn Error>> {
    fs::write(format!("{RENDER_DIR}/{name}.svg"), mesh_to_svg(mesh, 400.0, 300.0, title))?;
    fs::write(format!("{EXPORT_DIR}/{name}.obj"), mesh_to_obj(mesh))?;
    validate_and_report(name, mesh);
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    fs::create_dir_all(RENDER_DIR)?;
    fs::create_dir_all(EXPORT_DIR)?;

    let config = EditorConfig::default();

    println!("=== Sweeps ===");

    // 1. Tapered tube along a Bezier arch
    {
        let path = Curve::bezier(vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 8.0),
            Point2::new(10.0, 8.0),
            Point2::new(14.0, 0.0),
        ]);
        let profile = CrossSection2D::from_shapes(&[Shape::circle(Point2::origin(), 1.5, 24)])?;
        let options = SweepOptions {
            rings: 48,
            ..SweepOptions::from_config(&config)
        };
        let mesh = sweep(&path, &profile, &options);
        write_outputs("tapered_arch", "Tapered Sweep (48 rings)", &mesh)?;
    }

    // 2. Two tubes from one composite profile
    {
        let path = Curve::polygon(vec![
            Point2::new(0.0, 0.0),
            Point2::new(8.0, 0.0),
            Point2::new(8.0, 6.0),
        ]);
        let profile = CrossSection2D::from_shapes(&[
            Shape::circle(Point2::new(0.0, -1.5), 0.8, 16),
            Shape::circle(Point2::new(0.0, 1.5), 0.8, 16),
        ])?;
        let options = SweepOptions {
            rings: 32,
            start_scale: 1.0,
            end_scale: 1.0,
            normals: true,
        };
        let mesh = sweep(&path, &profile, &options);
        write_outputs("twin_tubes", "Composite Profile Sweep", &mesh)?;
    }

    println!("\n=== Revolutions ===");

    // 3. Torus from an offset circle
    {
        let profile =
            CrossSection2D::from_shapes(&[Shape::circle(Point2::new(5.0, 0.0), 1.5, 24)])?;
        let options = RevolutionOptions {
            rings: 64,
            ..RevolutionOptions::from_config(&config)
        };
        write_outputs("torus", "Revolved Circle (64 rings)", &revolve(&profile, &options))?;
    }

    // 4. Vase from a sampled Bezier profile
    {
        let profile_curve = Curve::bezier(vec![
            Point2::new(3.0, 0.0),
            Point2::new(6.0, 3.0),
            Point2::new(2.0, 8.0),
            Point2::new(4.0, 12.0),
        ]);
        let profile = CrossSection2D::from_curve(&profile_curve, 32);
        let options = RevolutionOptions {
            rings: 64,
            ..RevolutionOptions::from_config(&config)
        };
        write_outputs("vase", "Revolved Bezier Profile", &revolve(&profile, &options))?;
    }

    println!("\n=== Editor Session ===");

    // 5. Curves placed and transformed through the editor, then extruded
    //    for each viewing mode.
    {
        let mut set = CurveSet::from_config(&config);
        for (x, y) in [(0.0, 0.0), (3.0, 5.0), (7.0, -2.0), (10.0, 3.0)] {
            set.append_point(Point2::new(x, y));
        }
        let path_id = set.current_curve_id();

        let ids = set.control_points(path_id).to_vec();
        let snapshot = set.begin_gesture(&ids, Point2::origin());
        let snapshot = GestureSnapshot {
            pivot: snapshot.centroid(),
            ..snapshot
        };
        let cursor = snapshot.pivot + Vec2::new(1.0, 1.0);
        let speeds = GestureSpeeds::default();
        let rotate = gesture_matrix(TransformKind::Rotate, &snapshot, &cursor, &speeds);
        set.apply_gesture(&snapshot, &rotate);

        if set.new_curve().is_some() {
            for (x, y) in [(1.0, -1.0), (2.0, 0.0), (1.0, 1.0)] {
                set.append_point(Point2::new(x, y));
            }
        }
        let profile_curve =
            set.current_curve(config.profile_parameterization, config.close_profile);
        let profile = CrossSection2D::from_curve(&profile_curve, config.profile_samples);

        let Some(path) =
            set.curve(path_id, config.sweep_parameterization, config.close_sweep_path)
        else {
            return Err("path curve missing".into());
        };
        info!(hull = path.convex_hull().len(), length = path.length(), "editor path ready");
        fs::write(
            format!("{RENDER_DIR}/editor_path.svg"),
            curve_to_svg(&path, config.steps, 400.0, 300.0, "Editor Path Preview"),
        )?;

        let modes = [
            (EditorMode::General, "editor_sweep"),
            (EditorMode::Revolution, "editor_revolution"),
        ];
        for (mode, name) in modes {
            if let Some(extrusion) = Extrusion::for_mode(mode, &path, &config) {
                write_outputs(name, &format!("Editor {mode:?}"), &extrusion.build(&profile))?;
            }
        }
    }

    println!("\nWrote renders to {RENDER_DIR}/ and exports to {EXPORT_DIR}/");
    Ok(())
}

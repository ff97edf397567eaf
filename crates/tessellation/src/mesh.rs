use std::collections::HashMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use sweep_kernel::{Tolerance, Vec3};

/// A triangle mesh for rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// Vertex positions [x, y, z, x, y, z, ...]
    pub positions: Vec<f32>,
    /// Vertex normals [nx, ny, nz, ...]; empty when normals were not requested.
    pub normals: Vec<f32>,
    /// Texture coordinates [u, v, ...]: profile coordinate, then ring parameter.
    pub uvs: Vec<f32>,
    /// Triangle indices [i0, i1, i2, ...]
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices * 3),
            normals: Vec::with_capacity(vertices * 3),
            uvs: Vec::with_capacity(vertices * 2),
            indices: Vec::with_capacity(triangles * 3),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    pub fn add_vertex(&mut self, pos: &Vec3, normal: Option<&Vec3>, uv: (f64, f64)) -> u32 {
        let idx = self.vertex_count() as u32;
        self.positions.push(pos.x as f32);
        self.positions.push(pos.y as f32);
        self.positions.push(pos.z as f32);
        if let Some(n) = normal {
            self.normals.push(n.x as f32);
            self.normals.push(n.y as f32);
            self.normals.push(n.z as f32);
        }
        self.uvs.push(uv.0 as f32);
        self.uvs.push(uv.1 as f32);
        idx
    }

    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::new(
            self.positions[i * 3] as f64,
            self.positions[i * 3 + 1] as f64,
            self.positions[i * 3 + 2] as f64,
        )
    }

    pub fn normal(&self, i: usize) -> Option<Vec3> {
        if !self.has_normals() {
            return None;
        }
        Some(Vec3::new(
            self.normals[i * 3] as f64,
            self.normals[i * 3 + 1] as f64,
            self.normals[i * 3 + 2] as f64,
        ))
    }

    pub fn triangle(&self, t: usize) -> [usize; 3] {
        [
            self.indices[t * 3] as usize,
            self.indices[t * 3 + 1] as usize,
            self.indices[t * 3 + 2] as usize,
        ]
    }

    /// Unnormalized geometric normal of triangle `t`, following its winding.
    pub fn face_normal(&self, t: usize) -> Vec3 {
        let [a, b, c] = self.triangle(t);
        let (pa, pb, pc) = (self.position(a), self.position(b), self.position(c));
        (pb - pa).cross(&(pc - pa))
    }

    /// Axis-aligned bounds as (min, max), or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        if self.is_empty() {
            return None;
        }
        let first = self.position(0);
        Some((1..self.vertex_count()).fold((first, first), |(lo, hi), i| {
            let p = self.position(i);
            (lo.inf(&p), hi.sup(&p))
        }))
    }
}

/// Write `mesh` as Wavefront OBJ text.
pub fn mesh_to_obj(mesh: &TriangleMesh) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "# {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    for p in mesh.positions.chunks_exact(3) {
        let _ = writeln!(out, "v {} {} {}", p[0], p[1], p[2]);
    }
    for uv in mesh.uvs.chunks_exact(2) {
        let _ = writeln!(out, "vt {} {}", uv[0], uv[1]);
    }
    for n in mesh.normals.chunks_exact(3) {
        let _ = writeln!(out, "vn {} {} {}", n[0], n[1], n[2]);
    }
    let has_uvs = mesh.uvs.len() / 2 == mesh.vertex_count();
    for tri in mesh.indices.chunks_exact(3) {
        // OBJ indices are 1-based.
        let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
        let _ = match (has_uvs, mesh.has_normals()) {
            (true, true) => writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}"),
            (true, false) => writeln!(out, "f {a}/{a} {b}/{b} {c}/{c}"),
            (false, true) => writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}"),
            (false, false) => writeln!(out, "f {a} {b} {c}"),
        };
    }
    out
}

/// Edge-level and geometric summary of a triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshValidation {
    /// Edges used by exactly one triangle.
    pub boundary_edges: usize,
    /// Edges used by three or more triangles.
    pub non_manifold_edges: usize,
    /// Triangles with (near) zero area.
    pub degenerate_triangles: usize,
    /// Triangles referencing a vertex that does not exist.
    pub out_of_range_indices: usize,
    /// Signed volume from the divergence theorem; only meaningful when watertight.
    pub signed_volume: f64,
}

impl MeshValidation {
    pub fn is_watertight(&self) -> bool {
        self.boundary_edges == 0 && self.non_manifold_edges == 0
    }
}

/// Count boundary and non-manifold edges, degenerate triangles, and the
/// enclosed signed volume.
///
/// Edges are keyed by vertex index, so coincident but unwelded vertices
/// (such as the seam of a closed sweep) count as boundary.
pub fn validate_mesh(mesh: &TriangleMesh) -> MeshValidation {
    let tol = Tolerance::default();
    let vertex_count = mesh.vertex_count();
    let mut report = MeshValidation::default();
    let mut edge_uses: HashMap<(usize, usize), usize> = HashMap::new();

    for t in 0..mesh.triangle_count() {
        let tri = mesh.triangle(t);
        if tri.iter().any(|&i| i >= vertex_count) {
            report.out_of_range_indices += 1;
            continue;
        }
        for k in 0..3 {
            let (a, b) = (tri[k], tri[(k + 1) % 3]);
            *edge_uses.entry((a.min(b), a.max(b))).or_insert(0) += 1;
        }
        let n = mesh.face_normal(t);
        if tol.is_zero_length(n.norm()) {
            report.degenerate_triangles += 1;
        }
        let (pa, pb, pc) = (mesh.position(tri[0]), mesh.position(tri[1]), mesh.position(tri[2]));
        report.signed_volume += pa.dot(&pb.cross(&pc)) / 6.0;
    }

    for &uses in edge_uses.values() {
        match uses {
            1 => report.boundary_edges += 1,
            2 => {}
            _ => report.non_manifold_edges += 1,
        }
    }
    report
}

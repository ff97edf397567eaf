use crate::mesh::TriangleMesh;
use crate::profile::{CrossSection2D, SENTINEL};

/// Walks a profile's line list and yields the edges to stitch.
///
/// An edge starts at each cursor position whose entry and successor are
/// both real indices; the cursor then advances by the start vertex's
/// multiplicity. A sentinel on either side advances the cursor by one.
#[derive(Debug, Clone)]
pub struct StitchEdges<'a> {
    profile: &'a CrossSection2D,
    line: usize,
}

impl<'a> StitchEdges<'a> {
    pub fn new(profile: &'a CrossSection2D) -> Self {
        Self { profile, line: 0 }
    }
}

impl Iterator for StitchEdges<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let lines = self.profile.line_indices();
        while self.line + 1 < lines.len() {
            let (a, b) = (lines[self.line], lines[self.line + 1]);
            if a == SENTINEL || b == SENTINEL {
                self.line += 1;
                continue;
            }
            let (a, b) = (a as usize, b as usize);
            self.line = self.line.saturating_add(self.profile.vertices()[a].multiplicity);
            return Some((a, b));
        }
        None
    }
}

/// Connect ring `ring` to ring `ring + 1` with two triangles per edge:
/// `(current_a, next_a, next_b)` and `(current_a, next_b, current_b)`.
pub fn stitch_rings(mesh: &mut TriangleMesh, profile: &CrossSection2D, rings: usize) {
    let ring_size = profile.vertex_count();
    for ring in 0..rings.saturating_sub(1) {
        let root = ring * ring_size;
        let root_next = root + ring_size;
        for (a, b) in profile.edges() {
            debug_assert!(a < ring_size && b < ring_size);
            let current_a = (root + a) as u32;
            let current_b = (root + b) as u32;
            let next_a = (root_next + a) as u32;
            let next_b = (root_next + b) as u32;
            mesh.add_triangle(current_a, next_a, next_b);
            mesh.add_triangle(current_a, next_b, current_b);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileVertex;
    use sweep_kernel::{Point2, Vec2};

    fn vertices(multiplicities: &[usize]) -> Vec<ProfileVertex> {
        multiplicities
            .iter()
            .enumerate()
            .map(|(i, &m)| {
                ProfileVertex::new(Point2::new(i as f64, 0.0), Vec2::y()).with_multiplicity(m)
            })
            .collect()
    }

    #[test]
    fn test_strip_with_unit_multiplicity() {
        let profile = CrossSection2D::new(vertices(&[1, 1, 1]), vec![0, 1, 2]).unwrap();
        assert_eq!(profile.edges().collect::<Vec<_>>(), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_multiplicity_two_makes_disjoint_segments() {
        // Hard corners: pairs (0,1) and (2,3) only.
        let profile = CrossSection2D::new(vertices(&[2, 1, 2, 1]), vec![0, 1, 2, 3]).unwrap();
        assert_eq!(profile.edges().collect::<Vec<_>>(), vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn test_sentinels_are_skipped() {
        let profile =
            CrossSection2D::new(vertices(&[1, 1, 1, 1]), vec![-1, 0, 1, -1, -1, 2, 3, -1]).unwrap();
        assert_eq!(profile.edges().collect::<Vec<_>>(), vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn test_short_line_lists_have_no_edges() {
        let profile = CrossSection2D::new(vertices(&[1]), vec![0]).unwrap();
        assert_eq!(profile.edge_count(), 0);
        assert_eq!(CrossSection2D::empty().edge_count(), 0);
    }

    #[test]
    fn test_stitch_rings_triangle_layout() {
        let profile = CrossSection2D::new(vertices(&[1, 1]), vec![0, 1]).unwrap();
        let mut mesh = TriangleMesh::new();
        stitch_rings(&mut mesh, &profile, 3);
        assert_eq!(mesh.indices, vec![0, 2, 3, 0, 3, 1, 2, 4, 5, 2, 5, 3]);
        let mut none = TriangleMesh::new();
        stitch_rings(&mut none, &profile, 1);
        assert!(none.indices.is_empty());
    }
}

use serde::{Deserialize, Serialize};

use sweep_kernel::{Curve, EditorConfig, EditorMode};

use crate::mesh::TriangleMesh;
use crate::profile::CrossSection2D;
use crate::revolve::{revolve, RevolutionOptions};
use crate::sweep::{sweep, SweepOptions};

/// The mesh builder active for an editor mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Extrusion {
    Sweep { path: Curve, options: SweepOptions },
    Revolution { options: RevolutionOptions },
}

impl Extrusion {
    /// Pick the builder for `mode`. The 2D editing modes build no mesh.
    pub fn for_mode(mode: EditorMode, path: &Curve, config: &EditorConfig) -> Option<Self> {
        match mode {
            EditorMode::General => Some(Extrusion::Sweep {
                path: path.clone(),
                options: SweepOptions::from_config(config),
            }),
            EditorMode::Revolution => Some(Extrusion::Revolution {
                options: RevolutionOptions::from_config(config),
            }),
            EditorMode::SweepPath | EditorMode::Profile2D => None,
        }
    }

    pub fn build(&self, profile: &CrossSection2D) -> TriangleMesh {
        match self {
            Extrusion::Sweep { path, options } => sweep(path, profile, options),
            Extrusion::Revolution { options } => revolve(profile, options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Shape;
    use sweep_kernel::Point2;

    #[test]
    fn test_for_mode_dispatch() {
        let path = Curve::polygon(vec![Point2::origin(), Point2::new(4.0, 0.0)]);
        let config = EditorConfig::default();
        assert!(matches!(
            Extrusion::for_mode(EditorMode::General, &path, &config),
            Some(Extrusion::Sweep { .. })
        ));
        assert!(matches!(
            Extrusion::for_mode(EditorMode::Revolution, &path, &config),
            Some(Extrusion::Revolution { .. })
        ));
        assert!(Extrusion::for_mode(EditorMode::SweepPath, &path, &config).is_none());
        assert!(Extrusion::for_mode(EditorMode::Profile2D, &path, &config).is_none());
    }

    #[test]
    fn test_build_uses_config_ring_count() {
        let path = Curve::polygon(vec![Point2::origin(), Point2::new(4.0, 0.0)]);
        let config = EditorConfig {
            ring_count: 7,
            ..EditorConfig::default()
        };
        let profile =
            CrossSection2D::from_shapes(&[Shape::circle(Point2::new(2.0, 0.0), 0.5, 5)]).unwrap();
        for mode in [EditorMode::General, EditorMode::Revolution] {
            let mesh = Extrusion::for_mode(mode, &path, &config).unwrap().build(&profile);
            assert_eq!(mesh.vertex_count(), 7 * 5);
            assert_eq!(mesh.triangle_count(), 2 * 6 * 5);
        }
    }

    #[test]
    fn test_extrusion_survives_json() {
        let path = Curve::bezier(vec![
            Point2::origin(),
            Point2::new(1.0, 2.0),
            Point2::new(3.0, 0.0),
        ]);
        let extrusion = Extrusion::for_mode(
            EditorMode::General,
            &path,
            &EditorConfig::default(),
        ).unwrap();
        let json = serde_json::to_string(&extrusion).unwrap();
        let back: Extrusion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, extrusion);
    }
}

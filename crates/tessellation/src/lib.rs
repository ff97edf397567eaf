//! Mesh generation from curves and 2D cross-sections.

pub mod extrusion;
pub mod mesh;
pub mod profile;
pub mod revolve;
pub mod stitch;
pub mod sweep;

pub use extrusion::Extrusion;
pub use mesh::{mesh_to_obj, validate_mesh, MeshValidation, TriangleMesh};
pub use profile::{CrossSection2D, ProfileError, ProfileVertex, Shape, SENTINEL};
pub use revolve::{revolve, RevolutionOptions};
pub use stitch::stitch_rings;
pub use sweep::{sweep, SweepOptions};

//! Visibility polygons from a 2D point light.
//!
//! Pipeline: occluder loops → edge/vertex extraction → per-vertex raycast
//! resolution → angular bucketing → triangle-fan assembly. The output is an
//! ordered list of triangles sharing the light origin as apex, together
//! tiling the region visible from the light.
//!
//! Numeric policy
//! - Every point/scalar comparison routes through the tolerance predicates in
//!   `geom`, with the epsilons centralized in `CastCfg`. Raycast round-off at
//!   shared vertices is disambiguated by adjacency lookups in `sweep`, never
//!   by epsilon comparison alone.
//! - Geometric ambiguities degrade into `diag::Diagnostic` entries rather
//!   than errors; a computation always yields a usable fan.

pub mod diag;
pub mod geom;
pub mod occluder;
pub mod raycast;
pub mod sweep;
pub mod visibility;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Convenience re-exports for the common entry points.
pub use geom::{CastCfg, Segment, Triangle};
pub use nalgebra::Vector2 as Vec2;
pub use visibility::{compute_visibility, Visibility};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::diag::Diagnostic;
    pub use crate::geom::{CastCfg, Segment, Triangle};
    pub use crate::occluder::rand::{draw_scene, ReplayToken, SceneCfg, VertexCount};
    pub use crate::occluder::{EdgeId, OccluderError, OccluderSet};
    pub use crate::raycast::{RayCaster, RayHit, SegmentCaster};
    pub use crate::sweep::{Bucket, LightRay};
    pub use crate::visibility::{compute_visibility, compute_visibility_with, Visibility};
    pub use nalgebra::Vector2 as Vec2;
}

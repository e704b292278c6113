//! 2D geometry primitives for the light-cast pipeline.
//!
//! Purpose
//! - Centralize the tolerances (`CastCfg`) and the point/segment predicates
//!   every other module routes through, so adjacency queries, sweep
//!   resolution, and bound search can never disagree on what "the same
//!   point" means.
//!
//! Code cross-refs: `occluder::OccluderSet`, `sweep`, `visibility`.

mod predicates;
mod types;

pub use predicates::{
    angle_of, approx_eq, distance, line_contains_point, point_approx_eq, segment_contains_point,
};
pub use types::{CastCfg, Segment, Triangle};

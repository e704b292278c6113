//! Diagnostics surfaced by a computation.
//!
//! Collected as a side list and returned with the fan, never raised as
//! control flow: the computation runs every frame and must always produce
//! some usable polygon, so unresolvable cases degrade output instead of
//! aborting it.

use std::fmt;

use nalgebra::Vector2;

/// Non-fatal degradations of one visibility computation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Diagnostic {
    /// A per-vertex cast that was expected to strike the boundary missed;
    /// the vertex was skipped and the fan omits its ray.
    MissingHit { vertex: Vector2<f64> },
    /// No edge-compatible point pair between two adjacent angular buckets;
    /// the fan has a hole there. Carries each bucket's furthest point.
    UnresolvedBound { a: Vector2<f64>, b: Vector2<f64> },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingHit { vertex } => {
                write!(f, "no hit casting toward vertex ({}, {})", vertex.x, vertex.y)
            }
            Diagnostic::UnresolvedBound { a, b } => write!(
                f,
                "no common edge between bounds ({}, {}) and ({}, {})",
                a.x, a.y, b.x, b.y
            ),
        }
    }
}

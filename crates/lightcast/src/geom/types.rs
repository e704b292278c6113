//! Tolerances and value types shared across the pipeline.
//!
//! - `CastCfg`: centralizes epsilons for point coincidence, corner probes,
//!   angular bucketing, and parallel-ray guards.
//! - `Segment`, `Triangle`: the edge and output primitives.

use nalgebra::Vector2;

use super::predicates::point_approx_eq;

/// Cast configuration (tolerances and probe offsets).
#[derive(Clone, Copy, Debug)]
pub struct CastCfg {
    /// Point-coincidence and line/segment containment tolerance, fixed at
    /// the 1e-3 scale of the domain's coordinate units: raycast round-off
    /// stays well under it, distinct occluder vertices well over it.
    pub eps_point: f64,
    /// Offset stepped along the ray when probing past a corner.
    pub probe_offset: f64,
    /// Angular tolerance for merging rays into one bucket.
    pub eps_angle: f64,
    /// Determinant guard for parallel ray/segment pairs.
    pub eps_det: f64,
}

impl Default for CastCfg {
    fn default() -> Self {
        Self {
            eps_point: 1e-3,
            probe_offset: 1e-2,
            eps_angle: 1e-6,
            eps_det: 1e-12,
        }
    }
}

/// One occluder edge, directed in loop traversal order.
///
/// Invariant: `a != b` (zero-length edges are rejected at occluder build).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: Vector2<f64>,
    pub b: Vector2<f64>,
}

impl Segment {
    #[inline]
    pub fn new(a: Vector2<f64>, b: Vector2<f64>) -> Self {
        Self { a, b }
    }

    /// Same wall regardless of traversal direction.
    #[inline]
    pub fn same_wall(&self, other: &Segment, eps: f64) -> bool {
        (point_approx_eq(self.a, other.a, eps) && point_approx_eq(self.b, other.b, eps))
            || (point_approx_eq(self.a, other.b, eps) && point_approx_eq(self.b, other.a, eps))
    }

    /// The endpoint that is not `v`, or `None` if `v` matches neither end.
    #[inline]
    pub fn other_end(&self, v: Vector2<f64>, eps: f64) -> Option<Vector2<f64>> {
        if point_approx_eq(self.a, v, eps) {
            Some(self.b)
        } else if point_approx_eq(self.b, v, eps) {
            Some(self.a)
        } else {
            None
        }
    }
}

/// One fan triangle: light origin plus two boundary points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub apex: Vector2<f64>,
    pub a: Vector2<f64>,
    pub b: Vector2<f64>,
}

impl Triangle {
    /// Unsigned area.
    #[inline]
    pub fn area(&self) -> f64 {
        let u = self.a - self.apex;
        let v = self.b - self.apex;
        0.5 * (u.x * v.y - u.y * v.x).abs()
    }
}

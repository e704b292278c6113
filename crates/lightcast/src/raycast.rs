//! Ray query service: nearest intersection against the frozen edge set.
//!
//! The sweep consumes ray casting as a black box behind `RayCaster`, so
//! tests can substitute a failing or scripted service. `SegmentCaster` is
//! the default implementation: a linear scan solving each ray/segment pair
//! in cross-product form and keeping the nearest forward hit.

use nalgebra::Vector2;

use crate::geom::{CastCfg, Segment};
use crate::occluder::EdgeId;

/// Hits closer than this along the ray count as the cast origin itself and
/// are skipped, so a cast started on an edge does not report its own start.
const MIN_T: f64 = 1e-9;

/// Slack on the segment parameter: an exact endpoint hit lands a few ulps
/// outside [0, 1] in rotated coordinates, and must still count on at least
/// one of the edges meeting at the endpoint.
const S_EPS: f64 = 1e-9;

/// Nearest intersection of a cast ray: where it struck, and which edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub point: Vector2<f64>,
    pub edge: EdgeId,
}

/// The ray query service the sweep engine runs on.
pub trait RayCaster {
    /// Nearest intersection from `origin` along `dir` (unit length), or
    /// `None` if the ray escapes the scene.
    fn cast(&self, origin: Vector2<f64>, dir: Vector2<f64>) -> Option<RayHit>;
}

/// Default caster over an edge slice.
#[derive(Clone, Copy, Debug)]
pub struct SegmentCaster<'a> {
    edges: &'a [Segment],
    eps_det: f64,
}

impl<'a> SegmentCaster<'a> {
    pub fn new(edges: &'a [Segment], cfg: CastCfg) -> Self {
        Self {
            edges,
            eps_det: cfg.eps_det,
        }
    }
}

impl RayCaster for SegmentCaster<'_> {
    fn cast(&self, origin: Vector2<f64>, dir: Vector2<f64>) -> Option<RayHit> {
        let mut best: Option<(f64, RayHit)> = None;
        for (i, seg) in self.edges.iter().enumerate() {
            if let Some((point, t)) = ray_segment_intersection(origin, dir, seg, self.eps_det) {
                if best.as_ref().is_none_or(|(bt, _)| t < *bt) {
                    best = Some((
                        t,
                        RayHit {
                            point,
                            edge: EdgeId(i),
                        },
                    ));
                }
            }
        }
        best.map(|(_, hit)| hit)
    }
}

/// Solve `origin + t·dir = seg.a + s·(seg.b − seg.a)` for `t > 0`, `s ∈ [0, 1]`.
///
/// Parallel pairs report nothing — a cast running flush along an edge is
/// resolved by adjacency in the sweep, not here.
fn ray_segment_intersection(
    origin: Vector2<f64>,
    dir: Vector2<f64>,
    seg: &Segment,
    eps_det: f64,
) -> Option<(Vector2<f64>, f64)> {
    let seg_dir = seg.b - seg.a;
    let det = dir.x * seg_dir.y - dir.y * seg_dir.x;
    if det.abs() < eps_det {
        return None;
    }
    let delta = seg.a - origin;
    let t = (delta.x * seg_dir.y - delta.y * seg_dir.x) / det;
    let s = (delta.x * dir.y - delta.y * dir.x) / det;
    if t > MIN_T && (-S_EPS..=1.0 + S_EPS).contains(&s) {
        Some((origin + dir * t, t))
    } else {
        None
    }
}

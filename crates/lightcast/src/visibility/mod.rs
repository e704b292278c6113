//! Visibility polygon assembly: angular buckets → triangle fan.
//!
//! Purpose
//! - Walk consecutive angular buckets, find the bounding edge of the visible
//!   region between each pair, and emit one triangle (light origin + two
//!   boundary points) per pair. A pure one-shot pass; nothing persists
//!   across invocations.
//!
//! Why degrade instead of fail
//! - The computation runs every frame and must always yield a usable fan, so
//!   a bucket pair with no edge-compatible bound produces a diagnostic and a
//!   hole, never an error.
//!
//! Code cross-refs: `sweep::{sweep, Bucket, LightRay}`, `geom::Triangle`.

use nalgebra::Vector2;

use crate::diag::Diagnostic;
use crate::geom::{segment_contains_point, CastCfg, Segment, Triangle};
use crate::occluder::OccluderSet;
use crate::raycast::{RayCaster, SegmentCaster};
use crate::sweep::{sweep, Bucket};

/// The assembled fan for one light position, plus everything that degraded.
///
/// Triangles are ordered counter-clockwise around the origin and rebuilt
/// from scratch on every computation.
#[derive(Clone, Debug)]
pub struct Visibility {
    pub origin: Vector2<f64>,
    pub triangles: Vec<Triangle>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Visibility {
    /// Total area covered by the fan.
    pub fn area(&self) -> f64 {
        self.triangles.iter().map(Triangle::area).sum()
    }
}

/// Compute the visibility polygon around `light` with the default caster
/// over the occluder edge set.
pub fn compute_visibility(
    light: Vector2<f64>,
    occluders: &OccluderSet,
    cfg: CastCfg,
) -> Visibility {
    let caster = SegmentCaster::new(occluders.edges(), cfg);
    compute_visibility_with(&caster, light, occluders, cfg)
}

/// Same, with a caller-supplied ray service.
pub fn compute_visibility_with<C: RayCaster>(
    caster: &C,
    light: Vector2<f64>,
    occluders: &OccluderSet,
    cfg: CastCfg,
) -> Visibility {
    let mut diagnostics = Vec::new();
    let buckets = sweep(caster, occluders, light, cfg, &mut diagnostics);
    let mut triangles = Vec::new();
    if buckets.len() >= 2 {
        for i in 0..buckets.len() {
            let j = (i + 1) % buckets.len();
            match bound_between(&buckets[i], &buckets[j], occluders.edges(), cfg) {
                Some((a, b)) => triangles.push(Triangle {
                    apex: light,
                    a,
                    b,
                }),
                None => diagnostics.push(Diagnostic::UnresolvedBound {
                    a: bucket_furthest(&buckets[i]),
                    b: bucket_furthest(&buckets[j]),
                }),
            }
        }
    }
    Visibility {
        origin: light,
        triangles,
        diagnostics,
    }
}

/// Nearest compatible pair of boundary points across two adjacent buckets:
/// both points must lie on one common occluder edge. Ray pairs are tried
/// nearest-first, point combinations near-to-far.
fn bound_between(
    a: &Bucket,
    b: &Bucket,
    edges: &[Segment],
    cfg: CastCfg,
) -> Option<(Vector2<f64>, Vector2<f64>)> {
    for ra in &a.rays {
        for rb in &b.rays {
            let combos = [
                (ra.first_point(), rb.first_point()),
                (ra.furthest_point(), rb.first_point()),
                (ra.first_point(), rb.furthest_point()),
                (ra.furthest_point(), rb.furthest_point()),
            ];
            for (pa, pb) in combos {
                if on_common_edge(pa, pb, edges, cfg) {
                    return Some((pa, pb));
                }
            }
        }
    }
    None
}

fn on_common_edge(p: Vector2<f64>, q: Vector2<f64>, edges: &[Segment], cfg: CastCfg) -> bool {
    edges.iter().any(|e| {
        segment_contains_point(e, p, cfg.eps_point) && segment_contains_point(e, q, cfg.eps_point)
    })
}

fn bucket_furthest(bucket: &Bucket) -> Vector2<f64> {
    // rays are sorted nearest-first, so the last one reaches furthest
    match bucket.rays.last() {
        Some(r) => r.furthest_point(),
        None => Vector2::zeros(),
    }
}

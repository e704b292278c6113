//! Angular sweep: one resolved ray per occluder vertex, bucketed by angle.
//!
//! Purpose
//! - Determine, for every obstacle vertex, the true visible extent of the
//!   ray from the light through it. Raycasting against a polygon boundary is
//!   ambiguous exactly at shared vertices — the reported hit may land on
//!   either adjacent edge, or pass straight through to a farther surface —
//!   so the resolution below disambiguates with adjacency lookups rather
//!   than epsilon comparison alone, which is unstable where edges meet at
//!   shallow angles.
//!
//! Code cross-refs: `raycast::RayCaster`, `occluder::OccluderSet`,
//! `visibility` (consumes the buckets).

use nalgebra::Vector2;

use crate::diag::Diagnostic;
use crate::geom::{angle_of, distance, line_contains_point, point_approx_eq, CastCfg};
use crate::occluder::OccluderSet;
use crate::raycast::RayCaster;

/// One angular sample from the light.
///
/// `Double` means sight continues past the near boundary point to a farther
/// surface (corner pass-through); the variant carries both points so the
/// assembler can pick whichever pair shares a wall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightRay {
    Single(Vector2<f64>),
    Double {
        near: Vector2<f64>,
        far: Vector2<f64>,
    },
}

impl LightRay {
    /// Nearest boundary point along this direction.
    #[inline]
    pub fn first_point(&self) -> Vector2<f64> {
        match *self {
            LightRay::Single(p) => p,
            LightRay::Double { near, .. } => near,
        }
    }

    /// Farthest boundary point reached by looking past a corner.
    #[inline]
    pub fn furthest_point(&self) -> Vector2<f64> {
        match *self {
            LightRay::Single(p) => p,
            LightRay::Double { far, .. } => far,
        }
    }
}

/// Rays sharing one angle from the light, nearest first.
#[derive(Clone, Debug)]
pub struct Bucket {
    pub angle: f64,
    pub rays: Vec<LightRay>,
}

/// Resolve every occluder vertex and bucket the surviving rays by angle,
/// ascending (counter-clockwise).
pub fn sweep<C: RayCaster>(
    caster: &C,
    occluders: &OccluderSet,
    light: Vector2<f64>,
    cfg: CastCfg,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Bucket> {
    let mut rays: Vec<(f64, LightRay)> = Vec::with_capacity(occluders.vertices().len());
    for &vertex in occluders.vertices() {
        if let Some(ray) = resolve_vertex(caster, occluders, light, vertex, cfg, diagnostics) {
            rays.push((angle_of(vertex - light), ray));
        }
    }
    rays.sort_by(|x, y| x.0.partial_cmp(&y.0).unwrap_or(std::cmp::Ordering::Equal));
    bucket_rays(rays, light, cfg)
}

/// Resolve one vertex: cast, classify the terminal point(s), probe corners.
pub fn resolve_vertex<C: RayCaster>(
    caster: &C,
    occluders: &OccluderSet,
    light: Vector2<f64>,
    vertex: Vector2<f64>,
    cfg: CastCfg,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<LightRay> {
    let offset = vertex - light;
    let len = offset.norm();
    if len <= cfg.eps_point {
        // the light sits on this vertex; there is no direction to cast along
        return None;
    }
    let dir = offset / len;

    let hit = match caster.cast(light, dir) {
        Some(h) => h,
        None => {
            // every vertex lies on a boundary the ray is guaranteed to cross
            diagnostics.push(Diagnostic::MissingHit { vertex });
            return None;
        }
    };

    if !point_approx_eq(hit.point, vertex, cfg.eps_point) {
        if distance(light, hit.point) > distance(light, vertex) {
            // the cast grazed past the vertex and struck a farther surface
            return Some(LightRay::Double {
                near: vertex,
                far: hit.point,
            });
        }
        // Blocked before the vertex. An adjacent edge collinear with the
        // cast line means the cast slid along a flush wall and the vertex is
        // still reachable; anything else is a genuine occlusion.
        let flush = occluders.edges_adjacent_to(vertex).find(|e| {
            line_contains_point(e, light, cfg.eps_point)
                && line_contains_point(e, hit.point, cfg.eps_point)
        });
        let flush = match flush {
            Some(e) => *e,
            None => return None,
        };
        let resume = flush.other_end(vertex, cfg.eps_point)?;
        let far = caster
            .cast(resume + dir * cfg.probe_offset, dir)
            .map(|h| h.point);
        return Some(match far {
            Some(far) => LightRay::Double { near: vertex, far },
            None => LightRay::Single(vertex),
        });
    }

    // The cast terminated on the vertex. Probe just past the corner to see
    // whether sight continues beyond it.
    let first = hit.point;
    if let Some(next) = caster.cast(vertex + dir * cfg.probe_offset, dir) {
        if distance(next.point, first) > cfg.probe_offset * 2.0 {
            return Some(LightRay::Double {
                near: first,
                far: next.point,
            });
        }
    }
    // Flush corner: an adjacent edge runs along the ray beyond the vertex,
    // so the probe started on top of it; continue from its far endpoint.
    if let Some(far) = flush_corner_continuation(caster, occluders, light, vertex, dir, cfg) {
        return Some(LightRay::Double { near: first, far });
    }
    Some(LightRay::Single(first))
}

fn flush_corner_continuation<C: RayCaster>(
    caster: &C,
    occluders: &OccluderSet,
    light: Vector2<f64>,
    vertex: Vector2<f64>,
    dir: Vector2<f64>,
    cfg: CastCfg,
) -> Option<Vector2<f64>> {
    let along = occluders.edges_adjacent_to(vertex).find_map(|e| {
        if !line_contains_point(e, light, cfg.eps_point) {
            return None;
        }
        let other = e.other_end(vertex, cfg.eps_point)?;
        // only an edge extending forward of the vertex can carry sight onward
        if (other - vertex).dot(&dir) > 0.0 {
            Some(other)
        } else {
            None
        }
    })?;
    caster
        .cast(along + dir * cfg.probe_offset, dir)
        .map(|h| h.point)
}

/// Group angle-sorted rays into buckets and order each bucket nearest
/// furthest-point first (nearer rays are visually in front).
fn bucket_rays(
    rays: Vec<(f64, LightRay)>,
    light: Vector2<f64>,
    cfg: CastCfg,
) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = Vec::new();
    for (angle, ray) in rays {
        match buckets.last_mut() {
            Some(b) if (angle - b.angle).abs() <= cfg.eps_angle => b.rays.push(ray),
            _ => buckets.push(Bucket {
                angle,
                rays: vec![ray],
            }),
        }
    }
    for b in &mut buckets {
        b.rays.sort_by(|x, y| {
            let dx = distance(light, x.furthest_point());
            let dy = distance(light, y.furthest_point());
            dx.partial_cmp(&dy).unwrap_or(std::cmp::Ordering::Equal)
        });
    }
    buckets
}

#[cfg(test)]
mod tests;

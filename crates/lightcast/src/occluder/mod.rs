//! Occluder model: closed polygon loops, their edge set, and adjacency.
//!
//! Purpose
//! - Turn caller-supplied vertex loops into the read-only universe the sweep
//!   casts against: a deduplicated vertex list and an edge list with stable
//!   ids, built once per computation.
//!
//! Why strict validation
//! - Loops with fewer than 3 vertices or zero-length edges are rejected
//!   here, before any ray is cast; the sweep and the raycaster never have to
//!   defend against degenerate input.
//!
//! Code cross-refs: `geom::{Segment, CastCfg}`, `raycast::SegmentCaster`.

pub mod rand;

use nalgebra::Vector2;
use thiserror::Error;

use crate::geom::{point_approx_eq, CastCfg, Segment};

/// Index into the edge set; stable for the lifetime of one `OccluderSet`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeId(pub usize);

/// Rejected occluder input.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum OccluderError {
    #[error("occluder loop {index} has {got} vertices, need at least 3")]
    TooFewVertices { index: usize, got: usize },
    #[error("occluder loop {index} has a zero-length edge at vertex {vertex}")]
    ZeroLengthEdge { index: usize, vertex: usize },
}

/// The frozen obstacle universe for one computation.
///
/// Loops are implicitly closed: edge `i` connects vertex `i` to vertex
/// `(i+1) mod N`, with no duplicate final vertex.
#[derive(Clone, Debug)]
pub struct OccluderSet {
    edges: Vec<Segment>,
    vertices: Vec<Vector2<f64>>,
    eps: f64,
}

impl OccluderSet {
    /// Build from closed loops. Duplicate walls across loops coalesce into
    /// one edge; vertices dedup by exact identity, since they originate from
    /// stable loop data rather than raycast output.
    pub fn from_loops(
        loops: &[Vec<Vector2<f64>>],
        cfg: CastCfg,
    ) -> Result<Self, OccluderError> {
        let eps = cfg.eps_point;
        for (index, lp) in loops.iter().enumerate() {
            if lp.len() < 3 {
                return Err(OccluderError::TooFewVertices {
                    index,
                    got: lp.len(),
                });
            }
            for (vertex, p) in lp.iter().enumerate() {
                let q = lp[(vertex + 1) % lp.len()];
                if point_approx_eq(*p, q, eps) {
                    return Err(OccluderError::ZeroLengthEdge { index, vertex });
                }
            }
        }
        let mut edges: Vec<Segment> = Vec::new();
        let mut vertices: Vec<Vector2<f64>> = Vec::new();
        for lp in loops {
            for (i, p) in lp.iter().enumerate() {
                let seg = Segment::new(*p, lp[(i + 1) % lp.len()]);
                if !edges.iter().any(|e| e.same_wall(&seg, eps)) {
                    edges.push(seg);
                }
                if !vertices.contains(p) {
                    vertices.push(*p);
                }
            }
        }
        Ok(Self {
            edges,
            vertices,
            eps,
        })
    }

    #[inline]
    pub fn edges(&self) -> &[Segment] {
        &self.edges
    }

    #[inline]
    pub fn vertices(&self) -> &[Vector2<f64>] {
        &self.vertices
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Segment {
        &self.edges[id.0]
    }

    /// Every edge with an endpoint at `v`, by the same tolerance predicate
    /// the sweep compares points with.
    pub fn edges_adjacent_to(
        &self,
        v: Vector2<f64>,
    ) -> impl Iterator<Item = &Segment> + '_ {
        let eps = self.eps;
        self.edges
            .iter()
            .filter(move |e| point_approx_eq(e.a, v, eps) || point_approx_eq(e.b, v, eps))
    }
}

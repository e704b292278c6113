use std::cell::RefCell;
use std::collections::VecDeque;

use super::*;
use crate::geom::CastCfg;
use crate::occluder::{EdgeId, OccluderSet};
use crate::raycast::{RayHit, SegmentCaster};
use nalgebra::{vector, Vector2};

fn set(loops: &[Vec<Vector2<f64>>]) -> OccluderSet {
    OccluderSet::from_loops(loops, CastCfg::default()).expect("valid loops")
}

fn square(size: f64) -> Vec<Vector2<f64>> {
    vec![
        vector![0.0, 0.0],
        vector![size, 0.0],
        vector![size, size],
        vector![0.0, size],
    ]
}

/// L-shaped obstacle: a long bottom arm and a tall left arm meeting at the
/// notch corner (2,2); convex arm tips at (2,6) and (6,2).
fn l_shape() -> Vec<Vector2<f64>> {
    vec![
        vector![0.0, 0.0],
        vector![6.0, 0.0],
        vector![6.0, 2.0],
        vector![2.0, 2.0],
        vector![2.0, 6.0],
        vector![0.0, 6.0],
    ]
}

/// Far wall up and left of the L, crossing the ray that grazes (2,6)
/// from a light at (4,4).
fn far_wall() -> Vec<Vector2<f64>> {
    vec![vector![-8.0, 6.0], vector![0.0, 14.0], vector![-9.0, 14.0]]
}

/// Caster that replays a fixed response sequence, ignoring the query.
struct Scripted(RefCell<VecDeque<Option<RayHit>>>);

impl Scripted {
    fn new(responses: Vec<Option<RayHit>>) -> Self {
        Self(RefCell::new(responses.into()))
    }
}

impl RayCaster for Scripted {
    fn cast(&self, _origin: Vector2<f64>, _dir: Vector2<f64>) -> Option<RayHit> {
        self.0.borrow_mut().pop_front().flatten()
    }
}

#[test]
fn square_center_yields_four_single_corner_rays() {
    let occ = set(&[square(10.0)]);
    let cfg = CastCfg::default();
    let light = vector![5.0, 5.0];
    let caster = SegmentCaster::new(occ.edges(), cfg);
    let mut diags = Vec::new();
    let buckets = sweep(&caster, &occ, light, cfg, &mut diags);
    assert!(diags.is_empty());
    assert_eq!(buckets.len(), 4);
    for b in &buckets {
        assert_eq!(b.rays.len(), 1);
        let ray = b.rays[0];
        assert!(matches!(ray, LightRay::Single(_)));
        let p = ray.first_point();
        assert!(
            occ.vertices().iter().any(|v| (v - p).norm() < 1e-3),
            "ray should terminate on a corner, got {p:?}"
        );
    }
    // buckets come out in ascending (counter-clockwise) angular order
    for w in buckets.windows(2) {
        assert!(w[0].angle < w[1].angle);
    }
}

#[test]
fn tangent_corner_with_surface_beyond_is_double() {
    let occ = set(&[l_shape(), far_wall()]);
    let cfg = CastCfg::default();
    let light = vector![4.0, 4.0];
    let caster = SegmentCaster::new(occ.edges(), cfg);
    let mut diags = Vec::new();
    let ray = resolve_vertex(&caster, &occ, light, vector![2.0, 6.0], cfg, &mut diags)
        .expect("grazed corner resolves");
    assert!(diags.is_empty());
    match ray {
        LightRay::Double { near, far } => {
            assert!((near - vector![2.0, 6.0]).norm() < 1e-3);
            // the continuation lands on the far wall at (-3, 11)
            assert!((far - vector![-3.0, 11.0]).norm() < 1e-6);
        }
        LightRay::Single(_) => panic!("expected a two-point ray"),
    }
}

#[test]
fn tangent_corner_with_nothing_beyond_is_single() {
    let occ = set(&[l_shape()]);
    let cfg = CastCfg::default();
    let light = vector![4.0, 4.0];
    let caster = SegmentCaster::new(occ.edges(), cfg);
    let mut diags = Vec::new();
    let ray = resolve_vertex(&caster, &occ, light, vector![2.0, 6.0], cfg, &mut diags)
        .expect("corner resolves");
    assert!(diags.is_empty());
    assert_eq!(ray, LightRay::Single(vector![2.0, 6.0]));
}

#[test]
fn collinear_vertices_share_one_bucket_nearest_first() {
    // box whose top wall lies along the cast line from the light at the
    // origin: corners at distance 2 and 5 on the same ray
    let flush_box = vec![
        vector![2.0, 0.0],
        vector![5.0, 0.0],
        vector![5.0, -2.0],
        vector![2.0, -2.0],
    ];
    let occ = set(&[flush_box]);
    let cfg = CastCfg::default();
    let light = vector![0.0, 0.0];
    let caster = SegmentCaster::new(occ.edges(), cfg);
    let mut diags = Vec::new();
    let buckets = sweep(&caster, &occ, light, cfg, &mut diags);
    assert!(diags.is_empty());
    let flush = buckets
        .iter()
        .find(|b| b.angle.abs() <= cfg.eps_angle)
        .expect("bucket along the flush wall");
    assert_eq!(flush.rays.len(), 2);
    assert!((flush.rays[0].first_point() - vector![2.0, 0.0]).norm() < 1e-3);
    assert!((flush.rays[1].first_point() - vector![5.0, 0.0]).norm() < 1e-3);
    // the near corner sees through to the far one along the wall
    assert!((flush.rays[0].furthest_point() - vector![5.0, 0.0]).norm() < 1e-3);
}

#[test]
fn blocked_vertex_behind_a_flush_wall_stays_reachable() {
    let flush_box = vec![
        vector![2.0, 0.0],
        vector![5.0, 0.0],
        vector![5.0, -2.0],
        vector![2.0, -2.0],
    ];
    let occ = set(&[flush_box]);
    let cfg = CastCfg::default();
    let caster = SegmentCaster::new(occ.edges(), cfg);
    let mut diags = Vec::new();
    // the cast toward (5,0) terminates at (2,0); the flush wall explains it
    let ray = resolve_vertex(
        &caster,
        &occ,
        vector![0.0, 0.0],
        vector![5.0, 0.0],
        cfg,
        &mut diags,
    )
    .expect("far corner stays reachable");
    assert!(diags.is_empty());
    assert!((ray.first_point() - vector![5.0, 0.0]).norm() < 1e-3);
}

#[test]
fn occluded_vertex_is_discarded_without_diagnostics() {
    let flush_box = vec![
        vector![2.0, 0.0],
        vector![5.0, 0.0],
        vector![5.0, -2.0],
        vector![2.0, -2.0],
    ];
    let occ = set(&[flush_box]);
    let cfg = CastCfg::default();
    let caster = SegmentCaster::new(occ.edges(), cfg);
    let mut diags = Vec::new();
    // (5,-2) hides behind the box's near wall as seen from the origin
    let ray = resolve_vertex(
        &caster,
        &occ,
        vector![0.0, 0.0],
        vector![5.0, -2.0],
        cfg,
        &mut diags,
    );
    assert_eq!(ray, None);
    assert!(diags.is_empty());
}

#[test]
fn light_on_a_vertex_skips_it_quietly() {
    let triangle = vec![vector![0.0, 0.0], vector![4.0, 0.0], vector![0.0, 4.0]];
    let occ = set(&[triangle]);
    let cfg = CastCfg::default();
    let light = vector![0.0, 0.0];
    let caster = SegmentCaster::new(occ.edges(), cfg);
    let mut diags = Vec::new();
    let buckets = sweep(&caster, &occ, light, cfg, &mut diags);
    assert!(diags.is_empty());
    let rays: usize = buckets.iter().map(|b| b.rays.len()).sum();
    assert_eq!(rays, 2);
}

#[test]
fn grazed_past_hit_becomes_double() {
    let occ = set(&[square(10.0)]);
    let cfg = CastCfg::default();
    // the service reports a hit beyond the vertex on the same ray
    let caster = Scripted::new(vec![Some(RayHit {
        point: vector![12.0, 12.0],
        edge: EdgeId(0),
    })]);
    let mut diags = Vec::new();
    let ray = resolve_vertex(
        &caster,
        &occ,
        vector![5.0, 5.0],
        vector![10.0, 10.0],
        cfg,
        &mut diags,
    )
    .expect("vertex with a surface beyond resolves");
    assert_eq!(
        ray,
        LightRay::Double {
            near: vector![10.0, 10.0],
            far: vector![12.0, 12.0],
        }
    );
    assert!(diags.is_empty());
}

#[test]
fn unexplained_near_hit_discards_the_ray() {
    let occ = set(&[square(10.0)]);
    let cfg = CastCfg::default();
    // nearer hit with no flush wall to explain it: genuinely occluded
    let caster = Scripted::new(vec![Some(RayHit {
        point: vector![7.0, 7.0],
        edge: EdgeId(0),
    })]);
    let mut diags = Vec::new();
    let ray = resolve_vertex(
        &caster,
        &occ,
        vector![5.0, 5.0],
        vector![10.0, 10.0],
        cfg,
        &mut diags,
    );
    assert_eq!(ray, None);
    assert!(diags.is_empty());
}

#[test]
fn missed_cast_reports_one_diagnostic() {
    let occ = set(&[square(10.0)]);
    let cfg = CastCfg::default();
    let caster = Scripted::new(vec![None]);
    let mut diags = Vec::new();
    let ray = resolve_vertex(
        &caster,
        &occ,
        vector![5.0, 5.0],
        vector![10.0, 10.0],
        cfg,
        &mut diags,
    );
    assert_eq!(ray, None);
    assert_eq!(
        diags,
        vec![Diagnostic::MissingHit {
            vertex: vector![10.0, 10.0]
        }]
    );
}

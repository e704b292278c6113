//! Pure point/segment predicates with explicit tolerances.

use nalgebra::Vector2;

use super::types::Segment;

/// Euclidean distance.
#[inline]
pub fn distance(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    (a - b).norm()
}

/// Scalar tolerance comparison.
#[inline]
pub fn approx_eq(x: f64, y: f64, eps: f64) -> bool {
    (x - y).abs() <= eps
}

/// Point coincidence within `eps`.
#[inline]
pub fn point_approx_eq(p: Vector2<f64>, q: Vector2<f64>, eps: f64) -> bool {
    distance(p, q) <= eps
}

/// Angle of `v` from the positive x-axis via atan2, in [-π, π].
#[inline]
pub fn angle_of(v: Vector2<f64>) -> f64 {
    v.y.atan2(v.x)
}

/// Whether `p` lies on the infinite line through `seg`.
///
/// The vertical (undefined-slope) case is handled explicitly; everything
/// else uses the slope form, so the tolerance is measured in y units.
pub fn line_contains_point(seg: &Segment, p: Vector2<f64>, eps: f64) -> bool {
    let dx = seg.b.x - seg.a.x;
    if dx.abs() <= eps {
        return (p.x - seg.a.x).abs() <= eps;
    }
    let slope = (seg.b.y - seg.a.y) / dx;
    let y_on_line = seg.a.y + slope * (p.x - seg.a.x);
    approx_eq(p.y, y_on_line, eps)
}

/// Whether `p` lies on `seg` itself: on the line, and each coordinate inside
/// the endpoint bounds (tolerance-inclusive).
pub fn segment_contains_point(seg: &Segment, p: Vector2<f64>, eps: f64) -> bool {
    if !line_contains_point(seg, p, eps) {
        return false;
    }
    let (lo_x, hi_x) = if seg.a.x <= seg.b.x {
        (seg.a.x, seg.b.x)
    } else {
        (seg.b.x, seg.a.x)
    };
    let (lo_y, hi_y) = if seg.a.y <= seg.b.y {
        (seg.a.y, seg.b.y)
    } else {
        (seg.b.y, seg.a.y)
    };
    p.x >= lo_x - eps && p.x <= hi_x + eps && p.y >= lo_y - eps && p.y <= hi_y + eps
}

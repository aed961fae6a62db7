//! Geometry helpers for connector routing and arrowheads.
//!
//! All functions are pure and operate on axis-aligned rectangles in
//! canvas coordinates.

use kurbo::{Point, Rect, Vec2};
use thiserror::Error;

/// Tolerance used when comparing an intersection against an edge span.
const SPAN_EPSILON: f64 = 1e-9;

/// Half-angle between the shaft and each barb of an arrowhead (60°).
const ARROWHEAD_SPREAD: f64 = std::f64::consts::FRAC_PI_3;

/// Degenerate inputs to the intersection math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("segment has zero length")]
    ZeroLength,
    #[error("segment does not cross the rectangle boundary")]
    NoCrossing,
}

/// Find where the segment `p1 -> p2` crosses the boundary of `rect`.
///
/// Edges are tested left, right, top, bottom and the first qualifying
/// crossing wins. A crossing only qualifies if it lies on the segment
/// (not beyond either end) and within the edge span.
pub fn intersect_segment_rect(p1: Point, p2: Point, rect: Rect) -> Result<Point, GeometryError> {
    let rect = rect.abs();
    let d = p2 - p1;

    if d.hypot2() < f64::EPSILON * f64::EPSILON {
        return Err(GeometryError::ZeroLength);
    }

    if d.x == 0.0 {
        return vertical_crossing(p1, p2, rect);
    }

    let on_segment = |t: f64| (-SPAN_EPSILON..=1.0 + SPAN_EPSILON).contains(&t);
    let in_span = |v: f64, lo: f64, hi: f64| v >= lo - SPAN_EPSILON && v <= hi + SPAN_EPSILON;

    for x in [rect.x0, rect.x1] {
        let t = (x - p1.x) / d.x;
        let y = p1.y + t * d.y;
        if on_segment(t) && in_span(y, rect.y0, rect.y1) {
            return Ok(Point::new(x, y));
        }
    }

    if d.y != 0.0 {
        for y in [rect.y0, rect.y1] {
            let t = (y - p1.y) / d.y;
            let x = p1.x + t * d.x;
            if on_segment(t) && in_span(x, rect.x0, rect.x1) {
                return Ok(Point::new(x, y));
            }
        }
    }

    Err(GeometryError::NoCrossing)
}

/// Vertical segments never meet the left/right edges in a useful way, so
/// pick the horizontal edge nearest the target instead.
fn vertical_crossing(p1: Point, p2: Point, rect: Rect) -> Result<Point, GeometryError> {
    if p1.x < rect.x0 - SPAN_EPSILON || p1.x > rect.x1 + SPAN_EPSILON {
        return Err(GeometryError::NoCrossing);
    }
    let y = if p2.y >= rect.y1 {
        rect.y1
    } else if p2.y <= rect.y0 {
        rect.y0
    } else if (p2.y - rect.y0) < (rect.y1 - p2.y) {
        rect.y0
    } else {
        rect.y1
    };
    Ok(Point::new(p1.x, y))
}

/// Point where the segment `p1 -> p2` meets the boundary of `rect`.
///
/// Returns `p1` unchanged when no crossing exists; callers treat that as
/// a degenerate connector rather than an error.
pub fn line_rect_intersection(p1: Point, p2: Point, rect: Rect) -> Point {
    match intersect_segment_rect(p1, p2, rect) {
        Ok(point) => point,
        Err(err) => {
            log::trace!("no boundary crossing for {p1:?} -> {p2:?} against {rect:?}: {err}");
            p1
        }
    }
}

/// Approximate closest points between two rectangles.
///
/// Each rectangle's center is clamped into the other's span per axis.
/// Returns `(point_on_a, point_on_b)`.
pub fn nearest_boundary_points(a: Rect, b: Rect) -> (Point, Point) {
    let (a, b) = (a.abs(), b.abs());
    let clamp_into = |p: Point, r: Rect| Point::new(p.x.clamp(r.x0, r.x1), p.y.clamp(r.y0, r.y1));
    (clamp_into(b.center(), a), clamp_into(a.center(), b))
}

/// Angle in radians of the direction `from -> to` (y grows downward).
pub fn line_angle(from: Point, to: Point) -> f64 {
    (to - from).atan2()
}

/// Triangle for an arrowhead whose tip sits at `tip` and points along `angle`.
///
/// The two barbs are the reversed direction rotated by ±60° and scaled to `size`.
pub fn arrowhead_polygon(tip: Point, angle: f64, size: f64) -> [Point; 3] {
    let back = angle + std::f64::consts::PI;
    let left = tip + Vec2::from_angle(back + ARROWHEAD_SPREAD) * size;
    let right = tip + Vec2::from_angle(back - ARROWHEAD_SPREAD) * size;
    [tip, left, right]
}

/// Inclusive containment test (edges count as inside).
pub fn rect_contains(rect: Rect, point: Point) -> bool {
    let rect = rect.abs();
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// True when `point` lies on the boundary of `rect` within `tolerance`.
pub fn on_boundary(point: Point, rect: Rect, tolerance: f64) -> bool {
    let rect = rect.abs();
    let within = rect_contains(rect.inflate(tolerance, tolerance), point);
    let near_edge = (point.x - rect.x0).abs() <= tolerance
        || (point.x - rect.x1).abs() <= tolerance
        || (point.y - rect.y0).abs() <= tolerance
        || (point.y - rect.y1).abs() <= tolerance;
    within && near_edge
}

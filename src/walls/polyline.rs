//! Polyline type and the small amount of plane geometry the cleanup stages need.
use nalgebra::Point2;

/// Ordered `(x, y)` vertices in image pixels.
pub type Polyline = Vec<Point2<f32>>;

/// Points closer than this are treated as the same vertex.
pub const COINCIDENT_EPS: f32 = 1e-4;

/// Sum of consecutive vertex distances.
pub fn arc_length(line: &[Point2<f32>]) -> f32 {
    line.windows(2).map(|w| nalgebra::distance(&w[0], &w[1])).sum()
}

/// Distance from `p` to the infinite line through `a` and `b`; falls back to
/// the point distance when `a == b`.
pub fn line_distance(p: &Point2<f32>, a: &Point2<f32>, b: &Point2<f32>) -> f32 {
    let ab = b - a;
    let len = ab.norm();
    if len <= COINCIDENT_EPS {
        return nalgebra::distance(p, a);
    }
    let ap = p - a;
    (ab.x * ap.y - ab.y * ap.x).abs() / len
}

/// Closest point to `p` on the segment `[a, b]`.
pub fn closest_point_on_segment(p: &Point2<f32>, a: &Point2<f32>, b: &Point2<f32>) -> Point2<f32> {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 <= COINCIDENT_EPS * COINCIDENT_EPS {
        return *a;
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    a + ab * t
}

/// Distance from `p` to the nearest point of `line` (segments, not just vertices).
pub fn distance_to_polyline(p: &Point2<f32>, line: &[Point2<f32>]) -> f32 {
    match line {
        [] => f32::INFINITY,
        [only] => nalgebra::distance(p, only),
        _ => line
            .windows(2)
            .map(|w| nalgebra::distance(p, &closest_point_on_segment(p, &w[0], &w[1])))
            .fold(f32::INFINITY, f32::min),
    }
}

/// Mean over `from`'s vertices of their distance to `to`.
pub fn mean_distance_to(from: &[Point2<f32>], to: &[Point2<f32>]) -> f32 {
    if from.is_empty() {
        return f32::INFINITY;
    }
    from.iter().map(|p| distance_to_polyline(p, to)).sum::<f32>() / from.len() as f32
}

/// Drop consecutive duplicate vertices in place.
pub fn dedup_vertices(line: &mut Polyline) {
    line.dedup_by(|b, a| nalgebra::distance(a, b) <= COINCIDENT_EPS);
}

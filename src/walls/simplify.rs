//! Vertex reduction: Ramer–Douglas–Peucker and collinear-vertex removal.
use super::polyline::{line_distance, Polyline};
use nalgebra::Point2;

/// Recursive Ramer–Douglas–Peucker simplification.
///
/// Polylines with fewer than three points, and `epsilon == 0`, return an
/// unchanged copy. The result is a fixed point: simplifying it again with
/// the same `epsilon` removes nothing.
pub fn simplify_rdp(points: &[Point2<f32>], epsilon: f32) -> Polyline {
    if points.len() < 3 || epsilon <= 0.0 {
        return points.to_vec();
    }
    let first = &points[0];
    let last = &points[points.len() - 1];

    let mut max_dist = 0.0f32;
    let mut max_idx = 0usize;
    for (i, p) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let d = line_distance(p, first, last);
        if d > max_dist {
            max_dist = d;
            max_idx = i;
        }
    }

    if max_dist > epsilon {
        let mut left = simplify_rdp(&points[..=max_idx], epsilon);
        let right = simplify_rdp(&points[max_idx..], epsilon);
        left.pop();
        left.extend(right);
        left
    } else {
        vec![*first, *last]
    }
}

/// Repeatedly drop interior vertices lying within `tolerance` of the line
/// through their surviving neighbors, until a pass removes nothing.
///
/// Returns the number of vertices removed. Endpoints are never touched.
pub fn remove_collinear(line: &mut Polyline, tolerance: f32) -> usize {
    if tolerance <= 0.0 {
        return 0;
    }
    let mut removed = 0;
    loop {
        let before = removed;
        let mut i = 1;
        while i + 1 < line.len() {
            if line_distance(&line[i], &line[i - 1], &line[i + 1]) < tolerance {
                line.remove(i);
                removed += 1;
            } else {
                i += 1;
            }
        }
        if removed == before {
            return removed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point2<f32> {
        Point2::new(x, y)
    }

    fn staircase(n: usize) -> Polyline {
        (0..n).map(|i| p(i as f32, (i / 4) as f32)).collect()
    }

    #[test]
    fn collapses_near_straight_runs() {
        let line: Polyline = (0..50).map(|i| p(i as f32, if i % 2 == 0 { 0.0 } else { 0.5 })).collect();
        let simplified = simplify_rdp(&line, 1.0);
        assert_eq!(simplified, vec![p(0.0, 0.0), p(49.0, 0.5)]);
    }

    #[test]
    fn keeps_corners() {
        let mut line: Polyline = (0..=20).map(|i| p(i as f32, 0.0)).collect();
        line.extend((1..=20).map(|i| p(20.0, i as f32)));
        let simplified = simplify_rdp(&line, 1.0);
        assert_eq!(simplified, vec![p(0.0, 0.0), p(20.0, 0.0), p(20.0, 20.0)]);
    }

    #[test]
    fn is_idempotent() {
        for eps in [0.5f32, 1.0, 2.5] {
            let once = simplify_rdp(&staircase(80), eps);
            let twice = simplify_rdp(&once, eps);
            assert_eq!(once, twice, "eps {eps}");
        }
    }

    #[test]
    fn short_or_disabled_inputs_pass_through() {
        let two = vec![p(0.0, 0.0), p(5.0, 5.0)];
        assert_eq!(simplify_rdp(&two, 3.0), two);
        let wiggly = staircase(12);
        assert_eq!(simplify_rdp(&wiggly, 0.0), wiggly);
    }

    #[test]
    fn collinear_cleanup_is_iterative_and_keeps_endpoints() {
        let mut line = vec![p(0.0, 0.0), p(10.0, 0.4), p(20.0, 0.0), p(30.0, 0.3), p(40.0, 0.0), p(40.0, 20.0)];
        let removed = remove_collinear(&mut line, 1.0);
        assert_eq!(removed, 3);
        assert_eq!(line, vec![p(0.0, 0.0), p(40.0, 0.0), p(40.0, 20.0)]);
        assert_eq!(remove_collinear(&mut line, 1.0), 0);
        assert_eq!(remove_collinear(&mut line, 0.0), 0);
    }
}

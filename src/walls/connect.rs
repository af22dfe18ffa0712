//! Gap connection between traced polylines.
//!
//! 1. Endpoint–endpoint merging, repeated until a full scan merges nothing.
//! 2. One pass of endpoint→segment snapping that turns near misses into
//!    T-junctions: the target gains a vertex and the source is extended to it.
use super::polyline::{closest_point_on_segment, Polyline, COINCIDENT_EPS};
use log::debug;
use nalgebra::Point2;

/// How two polylines are chained when their endpoints meet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Join {
    /// `a.end` meets `b.start`: `a + b`.
    EndStart,
    /// `a.end` meets `b.end`: `a + rev(b)`.
    EndEnd,
    /// `a.start` meets `b.start`: `rev(a) + b`.
    StartStart,
    /// `a.start` meets `b.end`: `b + a`.
    StartEnd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum End {
    Start,
    Last,
}

fn endpoint(line: &[Point2<f32>], end: End) -> Point2<f32> {
    match end {
        End::Start => line[0],
        End::Last => line[line.len() - 1],
    }
}

/// Closest endpoint pairing of `a` and `b`, if within `snap`.
fn closest_join(a: &[Point2<f32>], b: &[Point2<f32>], snap: f32) -> Option<Join> {
    let (a0, a1) = (endpoint(a, End::Start), endpoint(a, End::Last));
    let (b0, b1) = (endpoint(b, End::Start), endpoint(b, End::Last));
    [
        (Join::EndStart, nalgebra::distance(&a1, &b0)),
        (Join::EndEnd, nalgebra::distance(&a1, &b1)),
        (Join::StartStart, nalgebra::distance(&a0, &b0)),
        (Join::StartEnd, nalgebra::distance(&a0, &b1)),
    ]
    .into_iter()
    .filter(|&(_, d)| d <= snap)
    .fold(None, |best: Option<(Join, f32)>, cand| match best {
        Some(b) if b.1 <= cand.1 => Some(b),
        _ => Some(cand),
    })
    .map(|(join, _)| join)
}

fn chain(mut head: Polyline, tail: Polyline) -> Polyline {
    let mut tail = tail.into_iter().peekable();
    if let (Some(last), Some(first)) = (head.last(), tail.peek()) {
        if nalgebra::distance(last, first) <= COINCIDENT_EPS {
            tail.next();
        }
    }
    head.extend(tail);
    head
}

fn join(a: Polyline, mut b: Polyline, how: Join) -> Polyline {
    match how {
        Join::EndStart => chain(a, b),
        Join::EndEnd => {
            b.reverse();
            chain(a, b)
        }
        Join::StartStart => {
            let mut a = a;
            a.reverse();
            chain(a, b)
        }
        Join::StartEnd => chain(b, a),
    }
}

/// Merge polylines whose endpoints lie within `snap` until nothing changes.
pub fn merge_endpoints(polylines: Vec<Polyline>, snap: f32) -> Vec<Polyline> {
    let mut lines: Vec<Polyline> = polylines.into_iter().filter(|l| !l.is_empty()).collect();
    let mut passes = 0usize;
    loop {
        passes += 1;
        let mut merged = false;
        let mut i = 0;
        while i < lines.len() {
            let mut j = i + 1;
            while j < lines.len() {
                match closest_join(&lines[i], &lines[j], snap) {
                    Some(how) => {
                        let other = lines.remove(j);
                        let this = std::mem::take(&mut lines[i]);
                        lines[i] = join(this, other, how);
                        merged = true;
                    }
                    None => j += 1,
                }
            }
            i += 1;
        }
        if !merged {
            debug!("merge_endpoints settled after {passes} passes, {} polylines", lines.len());
            return lines;
        }
    }
}

/// Globally closest point on any segment of a polyline other than `source`.
fn closest_on_others(
    lines: &[Polyline],
    source: usize,
    p: &Point2<f32>,
) -> Option<(f32, usize, usize, Point2<f32>)> {
    let mut best: Option<(f32, usize, usize, Point2<f32>)> = None;
    for (j, line) in lines.iter().enumerate() {
        if j == source || line.len() < 2 {
            continue;
        }
        for (s, seg) in line.windows(2).enumerate() {
            let q = closest_point_on_segment(p, &seg[0], &seg[1]);
            let d = nalgebra::distance(p, &q);
            if best.map_or(true, |b| d < b.0) {
                best = Some((d, j, s, q));
            }
        }
    }
    best
}

/// Single pass of endpoint→segment snapping. Returns the number of snaps.
pub fn insert_t_junctions(lines: &mut [Polyline], snap: f32) -> usize {
    let mut snaps = 0;
    for i in 0..lines.len() {
        if lines[i].is_empty() {
            continue;
        }
        for end in [End::Start, End::Last] {
            let p = endpoint(&lines[i], end);
            let Some((d, j, s, q)) = closest_on_others(lines, i, &p) else {
                continue;
            };
            if d > snap || d <= COINCIDENT_EPS {
                continue;
            }
            let target = &mut lines[j];
            let is_vertex = nalgebra::distance(&q, &target[s]) <= COINCIDENT_EPS
                || nalgebra::distance(&q, &target[s + 1]) <= COINCIDENT_EPS;
            if !is_vertex {
                target.insert(s + 1, q);
            }
            match end {
                End::Start => lines[i].insert(0, q),
                End::Last => lines[i].push(q),
            }
            snaps += 1;
        }
    }
    snaps
}

/// Bridge small gaps: endpoint merging to a fixed point, then one T-junction pass.
///
/// A `snap` of zero disables both steps.
pub fn connect_polylines(polylines: Vec<Polyline>, snap: f32) -> Vec<Polyline> {
    if snap <= 0.0 {
        return polylines;
    }
    let mut lines = merge_endpoints(polylines, snap);
    let snaps = insert_t_junctions(&mut lines, snap);
    debug!("connect_polylines: {} polylines, {snaps} T-junction snaps", lines.len());
    lines
}

//! Walk the skeleton graph into raw pixel polylines.
//!
//! Endpoints (degree 1) seed the walks; each walk follows the single unvisited
//! neighbor until it steps onto a pixel whose degree is not 2 or runs out of
//! unvisited neighbors. Whatever is left afterwards has no endpoint, i.e. it is
//! a closed loop (or a chain between junctions), and is traced from its first
//! pixel in raster order.
use super::polyline::Polyline;
use super::skeleton::Skeleton;
use nalgebra::Point2;
use std::collections::HashSet;

fn walk(skel: &Skeleton, start: (i32, i32), visited: &mut HashSet<(i32, i32)>) -> Vec<(i32, i32)> {
    let mut path = vec![start];
    visited.insert(start);
    let mut cur = start;
    loop {
        let Some(next) = skel.neighbors(cur).find(|q| !visited.contains(q)) else {
            break;
        };
        visited.insert(next);
        path.push(next);
        cur = next;
        if skel.degree(next) != 2 {
            break;
        }
    }
    path
}

fn to_polyline(path: &[(i32, i32)]) -> Polyline {
    path.iter()
        .map(|&(x, y)| Point2::new(x as f32, y as f32))
        .collect()
}

fn adjacent(a: (i32, i32), b: (i32, i32)) -> bool {
    a != b && (a.0 - b.0).abs() <= 1 && (a.1 - b.1).abs() <= 1
}

/// Trace every skeleton pixel into polylines of at least two points.
pub fn trace_polylines(skel: &Skeleton) -> Vec<Polyline> {
    let pixels = skel.sorted_pixels();
    let mut visited = HashSet::with_capacity(pixels.len());
    let mut out = Vec::new();

    for &p in &pixels {
        if visited.contains(&p) || skel.degree(p) != 1 {
            continue;
        }
        let path = walk(skel, p, &mut visited);
        if path.len() >= 2 {
            out.push(to_polyline(&path));
        }
    }

    for &p in &pixels {
        if visited.contains(&p) {
            continue;
        }
        let mut path = walk(skel, p, &mut visited);
        if path.len() > 2 && adjacent(path[path.len() - 1], path[0]) {
            path.push(path[0]);
        }
        if path.len() >= 2 {
            out.push(to_polyline(&path));
        }
    }

    out
}

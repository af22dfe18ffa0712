//! Post-connection cleanup: stub pruning, parallel duplicates, final invariants.
use super::polyline::{arc_length, dedup_vertices, mean_distance_to, Polyline};
use log::debug;

/// Drop polylines whose arc length is below `min_length`.
pub fn prune_short(polylines: Vec<Polyline>, min_length: f32) -> Vec<Polyline> {
    let before = polylines.len();
    let kept: Vec<Polyline> = polylines
        .into_iter()
        .filter(|l| arc_length(l) >= min_length)
        .collect();
    debug!("prune_short: {} -> {} (min_length={min_length})", before, kept.len());
    kept
}

/// Average of the two directed mean nearest-point distances.
pub fn symmetric_mean_distance(a: &Polyline, b: &Polyline) -> f32 {
    0.5 * (mean_distance_to(a, b) + mean_distance_to(b, a))
}

/// Discard the shorter member of every pair whose symmetric mean distance is
/// below `distance`. Longer polylines win; survivors keep their input order.
/// A `distance` of zero disables the stage.
pub fn remove_parallel_duplicates(polylines: Vec<Polyline>, distance: f32) -> Vec<Polyline> {
    if distance <= 0.0 || polylines.len() < 2 {
        return polylines;
    }
    let lengths: Vec<f32> = polylines.iter().map(|l| arc_length(l)).collect();
    let mut order: Vec<usize> = (0..polylines.len()).collect();
    order.sort_by(|&a, &b| lengths[b].total_cmp(&lengths[a]));

    let mut discarded = vec![false; polylines.len()];
    for (rank, &longer) in order.iter().enumerate() {
        if discarded[longer] {
            continue;
        }
        for &shorter in &order[rank + 1..] {
            if discarded[shorter] {
                continue;
            }
            if symmetric_mean_distance(&polylines[shorter], &polylines[longer]) < distance {
                discarded[shorter] = true;
            }
        }
    }

    let removed = discarded.iter().filter(|&&d| d).count();
    debug!("remove_parallel_duplicates: dropped {removed} of {}", polylines.len());
    polylines
        .into_iter()
        .zip(discarded)
        .filter_map(|(l, gone)| (!gone).then_some(l))
        .collect()
}

/// Enforce output invariants: no consecutive duplicate vertices, at least two
/// points, arc length at least `min_length`.
pub fn finalize(polylines: Vec<Polyline>, min_length: f32) -> Vec<Polyline> {
    polylines
        .into_iter()
        .filter_map(|mut l| {
            dedup_vertices(&mut l);
            (l.len() >= 2 && arc_length(&l) >= min_length).then_some(l)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    fn seg(x0: f32, y0: f32, x1: f32, y1: f32) -> Polyline {
        vec![Point2::new(x0, y0), Point2::new(x1, y1)]
    }

    #[test]
    fn short_stubs_are_dropped() {
        let lines = vec![seg(0.0, 0.0, 5.0, 0.0), seg(0.0, 10.0, 50.0, 10.0), seg(0.0, 20.0, 0.0, 30.0)];
        let kept = prune_short(lines, 10.0);
        assert_eq!(kept, vec![seg(0.0, 10.0, 50.0, 10.0), seg(0.0, 20.0, 0.0, 30.0)]);
    }

    #[test]
    fn parallel_twin_collapses_to_the_longer_one() {
        let short = seg(10.0, 12.0, 190.0, 12.0);
        let long = seg(0.0, 0.0, 200.0, 0.0);
        let far = seg(0.0, 100.0, 200.0, 100.0);
        let kept = remove_parallel_duplicates(vec![short, long.clone(), far.clone()], 15.0);
        assert_eq!(kept, vec![long, far]);
    }

    #[test]
    fn distant_lines_survive_and_zero_disables() {
        let a = seg(0.0, 0.0, 200.0, 0.0);
        let b = seg(0.0, 40.0, 200.0, 40.0);
        assert_eq!(remove_parallel_duplicates(vec![a.clone(), b.clone()], 15.0).len(), 2);
        let twin = seg(0.0, 1.0, 200.0, 1.0);
        assert_eq!(remove_parallel_duplicates(vec![a, twin], 0.0).len(), 2);
    }

    #[test]
    fn finalize_removes_degenerate_lines() {
        let mut dup = seg(0.0, 0.0, 20.0, 0.0);
        dup.insert(1, Point2::new(0.0, 0.0));
        let collapsed = seg(3.0, 3.0, 3.0, 3.0);
        let out = finalize(vec![dup, collapsed], 0.0);
        assert_eq!(out, vec![seg(0.0, 0.0, 20.0, 0.0)]);
    }
}

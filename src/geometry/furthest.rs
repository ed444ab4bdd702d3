//! Furthest pairwise distance of a point set.
//!
//! Used as the spatial spread of a group. Small sets are measured exactly;
//! larger sets are first reduced to their convex hull vertices, since the
//! furthest pair of any point set is always a pair of hull vertices.

use super::hull::ConvexHull;
use super::{bounds, distance};

/// Up to this many distinct points the exact O(n²) comparison is used directly.
pub const EXACT_PAIRWISE_LIMIT: usize = 10;

/// Maximum pairwise Euclidean distance of `points`.
///
/// - empty input → `-1.0`
/// - a single distinct point → `0.0`
/// - 1D points → `max - min`
///
/// Duplicate points are removed and constant axes dropped before measuring.
/// Hull failures (degenerate or unsupported input) are absorbed: all distinct
/// points are then compared.
pub fn furthest_distance(points: &[Vec<f64>]) -> f64 {
    let distinct = distinct_points(points);

    match distinct.len() {
        0 => return -1.0,
        1 => return 0.0,
        _ => {}
    }
    let distinct = drop_constant_axes(distinct);

    if distinct[0].len() == 1 {
        let (lo, hi) = distinct
            .iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));
        return hi - lo;
    }

    if distinct.len() <= EXACT_PAIRWISE_LIMIT {
        let all: Vec<usize> = (0..distinct.len()).collect();
        return max_pairwise_distance(&distinct, &all);
    }

    let candidates = match ConvexHull::compute(&distinct) {
        Ok(hull) => hull.vertices().to_vec(),
        Err(err) => {
            tracing::trace!(%err, n = distinct.len(), "hull unavailable, comparing all points");
            (0..distinct.len()).collect()
        }
    };
    max_pairwise_distance(&distinct, &candidates)
}

/// Sorted, deduplicated copy of the input.
fn distinct_points(points: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let mut distinct = points.to_vec();
    distinct.sort_by(|a, b| {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| x.total_cmp(y))
            .find(|o| o.is_ne())
            .unwrap_or(a.len().cmp(&b.len()))
    });
    distinct.dedup();
    distinct
}

/// Project out axes on which every point has the same coordinate.
///
/// Flat placements (constant height) then take the 2D hull path.
fn drop_constant_axes(points: Vec<Vec<f64>>) -> Vec<Vec<f64>> {
    let varying: Vec<usize> = bounds(&points)
        .iter()
        .enumerate()
        .filter(|(_, (lo, hi))| lo != hi)
        .map(|(a, _)| a)
        .collect();
    if varying.len() == points[0].len() {
        return points;
    }
    points
        .iter()
        .map(|p| varying.iter().map(|&a| p[a]).collect())
        .collect()
}

/// Exact maximum distance over the pairs of `indices`.
fn max_pairwise_distance(points: &[Vec<f64>], indices: &[usize]) -> f64 {
    let mut best_sq = 0.0f64;
    for (k, &i) in indices.iter().enumerate() {
        for &j in &indices[k + 1..] {
            let d: f64 = points[i]
                .iter()
                .zip(points[j].iter())
                .map(|(a, b)| (a - b) * (a - b))
                .sum();
            best_sq = best_sq.max(d);
        }
    }
    best_sq.sqrt()
}

/// Brute-force reference: exact maximum over all pairs, duplicates included.
pub fn furthest_distance_exact(points: &[Vec<f64>]) -> f64 {
    if points.is_empty() {
        return -1.0;
    }
    let mut best = 0.0f64;
    for (k, a) in points.iter().enumerate() {
        for b in &points[k + 1..] {
            best = best.max(distance(a, b));
        }
    }
    best
}

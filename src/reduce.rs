//! Point thinning by spatial grouping.
//!
//! Dense placements (grass, debris) are grouped so that no group is wider
//! than `resolution`; one member per group survives and carries the group
//! size as its weight.

use crate::cluster::Strategy;
use crate::error::Result;
use crate::geometry::{centroid, distance};
use crate::metrics::{group_members, DistanceAggregate};
use crate::search::{ConstrainedSearch, SearchConfig};

/// Default maximum group width.
pub const DEFAULT_RESOLUTION: f64 = 30.0;

/// Weight per point: the group size for the member nearest its group's
/// centroid, 0 for every other member.
///
/// The weights sum to `points.len()`. Ties go to the lower point index.
pub fn representatives(points: &[Vec<f64>], resolution: f64) -> Result<Vec<usize>> {
    representatives_with(&ConstrainedSearch::default(), points, resolution)
}

/// [`representatives`] with a caller-configured search.
pub fn representatives_with(
    search: &ConstrainedSearch,
    points: &[Vec<f64>],
    resolution: f64,
) -> Result<Vec<usize>> {
    if points.is_empty() {
        return Ok(Vec::new());
    }
    let config = SearchConfig::new(resolution)
        .with_strategy(Strategy::Balanced)
        .with_aggregate(DistanceAggregate::Max);
    let outcome = search.search(points, &config)?;

    let mut weights = vec![0usize; points.len()];
    for members in group_members(&outcome.result.assignment) {
        let mid = centroid(points, &members);
        let mut best = members[0];
        let mut best_distance = f64::INFINITY;
        for &i in &members {
            let d = distance(&points[i], &mid);
            if d < best_distance {
                best = i;
                best_distance = d;
            }
        }
        weights[best] = members.len();
    }
    tracing::debug!(
        points = points.len(),
        kept = weights.iter().filter(|&&w| w > 0).count(),
        "reduced points"
    );
    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_one_point_per_clump() {
        let points = vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![2.0, 0.0],
            vec![500.0, 0.0],
            vec![501.0, 0.0],
        ];
        let weights = representatives(&points, DEFAULT_RESOLUTION).unwrap();
        assert_eq!(weights, vec![0, 3, 0, 2, 0]);
    }

    #[test]
    fn weights_sum_to_point_count() {
        let points: Vec<Vec<f64>> = (0..40)
            .map(|i| vec![(i % 8) as f64 * 17.0, (i / 8) as f64 * 23.0, 0.0])
            .collect();
        let weights = representatives(&points, 40.0).unwrap();
        assert_eq!(weights.iter().sum::<usize>(), 40);
    }

    #[test]
    fn empty_input() {
        assert!(representatives(&[], 10.0).unwrap().is_empty());
    }
}

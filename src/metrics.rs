//! Group statistics over a cluster assignment.
//!
//! The constrained search judges a partition by two numbers: the largest
//! group's member count and an aggregate of the per-group furthest distances.
//!
//! | Aggregate | Formula | Used for |
//! |-----------|---------|----------|
//! | [`DistanceAggregate::WeightedMean`] | Σ nₖ·dₖ / Σ nₖ | LOD and tiling levels |
//! | [`DistanceAggregate::Max`] | max dₖ | Point thinning |
//!
//! # Example
//!
//! ```rust
//! use lodgroup::metrics::{group_sizes, is_contiguous};
//!
//! let labels = [0, 0, 1, 2, 1];
//! assert_eq!(group_sizes(&labels), vec![2, 2, 1]);
//! assert!(is_contiguous(&labels));
//! ```

use crate::geometry::furthest_distance;

/// How per-group furthest distances are folded into one number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistanceAggregate {
    /// Mean of the group distances, weighted by group size.
    #[default]
    WeightedMean,
    /// Largest group distance.
    Max,
}

impl DistanceAggregate {
    /// Aggregate `distances` (indexed by group) with `sizes` as weights.
    pub fn apply(self, sizes: &[usize], distances: &[f64]) -> f64 {
        match self {
            DistanceAggregate::WeightedMean => weighted_mean(sizes, distances),
            DistanceAggregate::Max => distances.iter().copied().fold(0.0, f64::max),
        }
    }
}

/// A partition of a point set with its quality numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterResult {
    /// Group id per point, contiguous from 0.
    pub assignment: Vec<usize>,
    /// Member count of the largest group.
    pub max_group_size: usize,
    /// Furthest pairwise distance per group, indexed by group id.
    pub furthest_distances: Vec<f64>,
}

impl ClusterResult {
    /// Measure an assignment over `points`.
    pub fn measure(points: &[Vec<f64>], assignment: Vec<usize>) -> Self {
        let sizes = group_sizes(&assignment);
        let furthest_distances = group_members(&assignment)
            .iter()
            .map(|members| {
                let pts: Vec<Vec<f64>> = members.iter().map(|&i| points[i].clone()).collect();
                furthest_distance(&pts)
            })
            .collect();

        Self {
            max_group_size: sizes.iter().copied().max().unwrap_or(0),
            assignment,
            furthest_distances,
        }
    }

    /// Number of groups.
    pub fn n_groups(&self) -> usize {
        self.furthest_distances.len()
    }

    /// Member count per group.
    pub fn group_sizes(&self) -> Vec<usize> {
        group_sizes(&self.assignment)
    }

    /// Aggregate furthest distance of the partition.
    pub fn aggregate_distance(&self, aggregate: DistanceAggregate) -> f64 {
        aggregate.apply(&self.group_sizes(), &self.furthest_distances)
    }
}

/// Member count per group id.
pub fn group_sizes(labels: &[usize]) -> Vec<usize> {
    let n_groups = labels.iter().max().map_or(0, |&m| m + 1);
    let mut sizes = vec![0usize; n_groups];
    for &l in labels {
        sizes[l] += 1;
    }
    sizes
}

/// Point indices per group id, ascending within each group.
pub fn group_members(labels: &[usize]) -> Vec<Vec<usize>> {
    let n_groups = labels.iter().max().map_or(0, |&m| m + 1);
    let mut members = vec![Vec::new(); n_groups];
    for (i, &l) in labels.iter().enumerate() {
        members[l].push(i);
    }
    members
}

/// Size-weighted mean of per-group values. Zero for an empty partition.
pub fn weighted_mean(sizes: &[usize], values: &[f64]) -> f64 {
    let total: usize = sizes.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let weighted: f64 = sizes
        .iter()
        .zip(values.iter())
        .map(|(&n, &v)| n as f64 * v)
        .sum();
    weighted / total as f64
}

/// Whether the ids form `0..=max` with every id used.
pub fn is_contiguous(labels: &[usize]) -> bool {
    group_sizes(labels).iter().all(|&n| n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_mean_uses_sizes() {
        assert_eq!(weighted_mean(&[3, 1], &[10.0, 50.0]), 20.0);
        assert_eq!(weighted_mean(&[], &[]), 0.0);
    }

    #[test]
    fn aggregates() {
        let sizes = [1, 3];
        let d = [40.0, 0.0];
        assert_eq!(DistanceAggregate::WeightedMean.apply(&sizes, &d), 10.0);
        assert_eq!(DistanceAggregate::Max.apply(&sizes, &d), 40.0);
    }

    #[test]
    fn contiguity() {
        assert!(is_contiguous(&[0, 1, 1, 2]));
        assert!(!is_contiguous(&[0, 2, 2]));
        assert!(is_contiguous(&[]));
    }

    #[test]
    fn measure_collects_sizes_and_distances() {
        let points = vec![vec![0.0, 0.0], vec![3.0, 4.0], vec![100.0, 0.0]];
        let result = ClusterResult::measure(&points, vec![0, 0, 1]);
        assert_eq!(result.n_groups(), 2);
        assert_eq!(result.max_group_size, 2);
        assert_eq!(result.furthest_distances, vec![5.0, 0.0]);
        assert_eq!(result.group_sizes(), vec![2, 1]);
    }
}

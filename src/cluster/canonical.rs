//! Canonical relabeling of raw cluster labels.
//!
//! Backends hand back labels whose numbering depends on their internal
//! randomness (k-means seeding) or on merge order. Only the *partition* is
//! meaningful, so labels are renumbered by a spatial sort of the group
//! centroids:
//!
//! - 1D points: ascending centroid value.
//! - 2D/3D points: each centroid falls in a coarse grid cell, with
//!   `ceil(extent_a / Σ extent * k)` steps on axis `a`. The sort key is
//!   `(-g1, g0, g2.., -c1, c0, c2..)` over grid coordinates `g` and raw
//!   centroid coordinates `c`: grid rows from high to low axis-1 values,
//!   left to right within a row, raw coordinates as the tie-break.
//!
//! Remaining ties (identical centroids) fall back to the smallest member
//! index, which is itself label-independent.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::geometry::{bounds, centroid};

/// Renumber `labels` into canonical, contiguous group ids `0..k`.
///
/// Fails with [`Error::ClusteringInconsistency`] when the labels do not use
/// exactly `k` distinct values.
pub fn canonicalize(points: &[Vec<f64>], labels: &[usize], k: usize) -> Result<Vec<usize>> {
    let mut members: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, &label) in labels.iter().enumerate() {
        members.entry(label).or_default().push(i);
    }
    if members.len() != k {
        return Err(Error::ClusteringInconsistency {
            requested: k,
            produced: members.len(),
        });
    }

    let groups: Vec<(usize, Vec<usize>)> = members.into_iter().collect();
    let centroids: Vec<Vec<f64>> = groups
        .iter()
        .map(|(_, idx)| centroid(points, idx))
        .collect();
    let keys = sort_keys(points, &centroids);

    let mut order: Vec<usize> = (0..groups.len()).collect();
    order.sort_by(|&a, &b| {
        compare_keys(&keys[a], &keys[b]).then(groups[a].1[0].cmp(&groups[b].1[0]))
    });

    let mut new_id = vec![0usize; groups.len()];
    for (rank, &g) in order.iter().enumerate() {
        new_id[g] = rank;
    }

    let mut relabel: BTreeMap<usize, usize> = BTreeMap::new();
    for (g, (raw, _)) in groups.iter().enumerate() {
        relabel.insert(*raw, new_id[g]);
    }
    Ok(labels.iter().map(|l| relabel[l]).collect())
}

/// Composite sort key per group centroid, most significant component first.
fn sort_keys(points: &[Vec<f64>], centroids: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let dim = centroids.first().map_or(0, Vec::len);
    if dim < 2 {
        return centroids.to_vec();
    }

    let k = centroids.len() as f64;
    let extents: Vec<(f64, f64)> = bounds(points)
        .into_iter()
        .map(|(lo, hi)| {
            let extent = hi - lo;
            (lo, if extent > 0.0 { extent } else { 1.0 })
        })
        .collect();
    let total: f64 = extents.iter().map(|(_, e)| e).sum();
    let steps: Vec<f64> = extents
        .iter()
        .map(|(_, e)| (e / total * k).ceil().max(1.0))
        .collect();

    centroids
        .iter()
        .map(|c| {
            let grid: Vec<f64> = (0..dim)
                .map(|a| {
                    let (lo, extent) = extents[a];
                    ((c[a] - lo) / extent * steps[a])
                        .floor()
                        .clamp(0.0, steps[a] - 1.0)
                })
                .collect();

            let mut key = Vec::with_capacity(2 * dim);
            for coords in [&grid, c] {
                key.push(-coords[1]);
                key.push(coords[0]);
                key.extend_from_slice(&coords[2..]);
            }
            key
        })
        .collect()
}

fn compare_keys(a: &[f64], b: &[f64]) -> Ordering {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| x.total_cmp(y))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_dimensional_orders_by_value() {
        let points: Vec<Vec<f64>> = [50.0, 10.0, 51.0, 11.0, 90.0]
            .iter()
            .map(|&x| vec![x])
            .collect();
        let labels = [7, 3, 7, 3, 1];
        assert_eq!(canonicalize(&points, &labels, 3).unwrap(), vec![1, 0, 1, 0, 2]);
    }

    #[test]
    fn grid_rows_run_from_high_to_low_axis_one() {
        // Four groups on the corners of a square.
        let points = vec![
            vec![0.0, 0.0],
            vec![100.0, 0.0],
            vec![0.0, 100.0],
            vec![100.0, 100.0],
        ];
        let labels = [0, 1, 2, 3];
        // Top row (y = 100) first, left to right, then the bottom row.
        assert_eq!(canonicalize(&points, &labels, 4).unwrap(), vec![2, 3, 0, 1]);
    }

    #[test]
    fn permuted_labels_give_same_result() {
        let points: Vec<Vec<f64>> = (0..12)
            .map(|i| vec![(i / 4) as f64 * 1000.0 + (i % 4) as f64, (i % 2) as f64])
            .collect();
        let a: Vec<usize> = (0..12).map(|i| i / 4).collect();
        let b: Vec<usize> = (0..12).map(|i| [2, 0, 1][i / 4]).collect();
        assert_eq!(
            canonicalize(&points, &a, 3).unwrap(),
            canonicalize(&points, &b, 3).unwrap()
        );
    }

    #[test]
    fn count_mismatch_is_reported() {
        let points = vec![vec![0.0], vec![1.0], vec![2.0]];
        assert_eq!(
            canonicalize(&points, &[0, 0, 2], 3),
            Err(Error::ClusteringInconsistency {
                requested: 3,
                produced: 2
            })
        );
    }

    #[test]
    fn identical_centroids_break_ties_by_member_index() {
        let points = vec![vec![1.0, 1.0], vec![1.0, 1.0], vec![5.0, 5.0]];
        let labels = [4, 2, 9];
        let ids = canonicalize(&points, &labels, 3).unwrap();
        // Points 0 and 1 coincide; point 0's group ranks first among them.
        assert!(ids[0] < ids[1]);
    }
}

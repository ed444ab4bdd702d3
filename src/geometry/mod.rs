//! Geometric primitives over point sets.
//!
//! Points are plain `Vec<f64>` rows (1, 2 or 3 components). The main entry
//! point is [`furthest_distance`], the spread measure used by the constrained
//! search; [`ConvexHull`] exists to make it cheap on large groups.

mod furthest;
mod hull;

pub use furthest::{furthest_distance, furthest_distance_exact, EXACT_PAIRWISE_LIMIT};
pub use hull::ConvexHull;

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Arithmetic mean of the points selected by `indices`.
///
/// Returns an empty vector when `indices` is empty.
pub fn centroid(points: &[Vec<f64>], indices: &[usize]) -> Vec<f64> {
    let Some(&first) = indices.first() else {
        return Vec::new();
    };
    let mut sum = vec![0.0; points[first].len()];
    for &i in indices {
        for (s, x) in sum.iter_mut().zip(points[i].iter()) {
            *s += x;
        }
    }
    let n = indices.len() as f64;
    sum.iter_mut().for_each(|s| *s /= n);
    sum
}

/// Per-axis `(min, max)` of a non-empty point set.
pub fn bounds(points: &[Vec<f64>]) -> Vec<(f64, f64)> {
    let dim = points.first().map_or(0, Vec::len);
    (0..dim)
        .map(|a| {
            points.iter().fold((f64::MAX, f64::MIN), |(lo, hi), p| {
                (lo.min(p[a]), hi.max(p[a]))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroid_of_subset() {
        let points = vec![vec![0.0, 0.0], vec![2.0, 4.0], vec![100.0, 100.0]];
        assert_eq!(centroid(&points, &[0, 1]), vec![1.0, 2.0]);
        assert!(centroid(&points, &[]).is_empty());
    }

    #[test]
    fn bounds_per_axis() {
        let points = vec![vec![1.0, -3.0], vec![-2.0, 5.0]];
        assert_eq!(bounds(&points), vec![(-2.0, 1.0), (-3.0, 5.0)]);
    }
}

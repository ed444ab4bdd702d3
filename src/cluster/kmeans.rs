//! K-means clustering, the balanced strategy.
//!
//! Partitions data into k clusters by minimizing **within-cluster sum of squares**
//! (WCSS):
//!
//! ```text
//! WCSS = Σₖ Σᵢ∈Cₖ ||xᵢ - μₖ||²
//! ```
//!
//! # Lloyd's Algorithm
//!
//! 1. Initialize k centroids via k-means++
//! 2. **Assign**: Each point → nearest centroid
//! 3. **Update**: Each centroid → mean of assigned points
//! 4. Repeat until the centroid shift drops below the tolerance
//!
//! Lloyd only finds a local minimum, so the fit is restarted `n_init` times
//! from different seeds and the run with the lowest WCSS wins.
//!
//! # Failure Modes
//!
//! - **Empty clusters**: a centroid that loses all points is re-seeded on a
//!   random point. If the final assignment still leaves it empty, the labels
//!   use fewer than k ids; the engine reports that as a
//!   [`crate::Error::ClusteringInconsistency`].
//! - **Fewer distinct points than k**: same outcome, duplicates cannot be split.

use super::traits::{Clustering, DEFAULT_SEED};
use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// K-means clustering algorithm.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    /// Maximum iterations per run.
    max_iter: usize,
    /// Number of restarts; the lowest-WCSS run is kept.
    n_init: usize,
    /// Convergence tolerance on the squared centroid shift.
    tol: f64,
    /// Random seed.
    seed: Option<u64>,
}

impl Kmeans {
    /// Create a new K-means clusterer.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: 300,
            n_init: 10,
            tol: 1e-8,
            seed: None,
        }
    }

    /// Set maximum iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the number of restarts (at least one run is always made).
    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init.max(1);
        self
    }

    /// Set convergence tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Seed used by [`Clustering::fit_predict`]; defaults to [`DEFAULT_SEED`].
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Initialize centroids using k-means++ algorithm.
    fn init_centroids(&self, data: &Array2<f64>, rng: &mut dyn RngCore) -> Array2<f64> {
        let n = data.nrows();
        let d = data.ncols();
        let mut centroids = Array2::zeros((self.k, d));

        // First centroid: random point
        let first = rng.random_range(0..n);
        centroids.row_mut(0).assign(&data.row(first));

        // Remaining centroids: k-means++ selection
        for i in 1..self.k {
            let distances: Vec<f64> = (0..n)
                .map(|j| {
                    let point = data.row(j);
                    (0..i)
                        .map(|c| Self::squared_distance(&point, &centroids.row(c)))
                        .fold(f64::MAX, f64::min)
                })
                .collect();

            // Sample proportional to squared distance
            let total: f64 = distances.iter().sum();
            if total == 0.0 {
                let idx = rng.random_range(0..n);
                centroids.row_mut(i).assign(&data.row(idx));
                continue;
            }

            let threshold = rng.random::<f64>() * total;
            let mut cumsum = 0.0;
            let mut selected = n - 1;

            for (j, &d) in distances.iter().enumerate() {
                cumsum += d;
                if cumsum >= threshold {
                    selected = j;
                    break;
                }
            }

            centroids.row_mut(i).assign(&data.row(selected));
        }

        centroids
    }

    /// Compute squared Euclidean distance.
    fn squared_distance(a: &ArrayView1<'_, f64>, b: &ArrayView1<'_, f64>) -> f64 {
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
    }

    /// Nearest centroid for every row, plus the summed squared distance.
    fn assign(&self, data: &Array2<f64>, centroids: &Array2<f64>, labels: &mut [usize]) -> f64 {
        let nearest = |i: usize| {
            let point = data.row(i);
            let mut best_cluster = 0;
            let mut best_dist = f64::MAX;
            for k in 0..self.k {
                let dist = Self::squared_distance(&point, &centroids.row(k));
                if dist < best_dist {
                    best_dist = dist;
                    best_cluster = k;
                }
            }
            (best_cluster, best_dist)
        };

        #[cfg(feature = "parallel")]
        let rows = labels.par_iter_mut();
        #[cfg(not(feature = "parallel"))]
        let rows = labels.iter_mut();

        // Collected in row order so the WCSS sum doesn't depend on scheduling.
        let dists: Vec<f64> = rows
            .enumerate()
            .map(|(i, label)| {
                let (cluster, dist) = nearest(i);
                *label = cluster;
                dist
            })
            .collect();
        dists.iter().sum()
    }

    /// One Lloyd run from a k-means++ start. Returns labels and WCSS.
    fn run_once(&self, data: &Array2<f64>, rng: &mut dyn RngCore) -> (Vec<usize>, f64) {
        let n = data.nrows();
        let d = data.ncols();

        let mut centroids = self.init_centroids(data, rng);
        let mut labels = vec![0usize; n];

        for _iter in 0..self.max_iter {
            self.assign(data, &centroids, &mut labels);

            // Update step
            let mut new_centroids = Array2::zeros((self.k, d));
            let mut counts = vec![0usize; self.k];

            for (i, &k) in labels.iter().enumerate() {
                for j in 0..d {
                    new_centroids[[k, j]] += data[[i, j]];
                }
                counts[k] += 1;
            }

            for (k, &count) in counts.iter().enumerate() {
                if count > 0 {
                    for j in 0..d {
                        new_centroids[[k, j]] /= count as f64;
                    }
                } else {
                    // Empty cluster: reinitialize randomly
                    let idx = rng.random_range(0..n);
                    new_centroids.row_mut(k).assign(&data.row(idx));
                }
            }

            let shift: f64 = centroids
                .iter()
                .zip(new_centroids.iter())
                .map(|(a, b)| (a - b).powi(2))
                .sum();

            centroids = new_centroids;

            if shift <= self.tol {
                break;
            }
        }

        let inertia = self.assign(data, &centroids, &mut labels);
        (labels, inertia)
    }
}

impl Clustering for Kmeans {
    fn fit_predict_with(&self, data: &[Vec<f64>], rng: &mut dyn RngCore) -> Result<Vec<usize>> {
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }

        let n = data.len();
        let d = data[0].len();

        if self.k == 0 || self.k > n {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: n,
            });
        }

        // Convert to ndarray
        let mut flat: Vec<f64> = Vec::with_capacity(n * d);
        for point in data {
            if point.len() != d {
                return Err(Error::DimensionMismatch {
                    expected: d,
                    found: point.len(),
                });
            }
            flat.extend(point);
        }
        let data_arr = Array2::from_shape_vec((n, d), flat).map_err(|_| Error::DimensionMismatch {
            expected: d,
            found: 0,
        })?;

        let mut best: Option<(Vec<usize>, f64)> = None;
        for _ in 0..self.n_init.max(1) {
            let (labels, inertia) = self.run_once(&data_arr, rng);
            if best.as_ref().is_none_or(|(_, b)| inertia < *b) {
                best = Some((labels, inertia));
            }
        }

        best.map(|(labels, _)| labels).ok_or(Error::EmptyInput)
    }

    /// Seeds from [`Kmeans::with_seed`], or [`DEFAULT_SEED`] when unset.
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>> {
        let mut rng = StdRng::seed_from_u64(self.seed.unwrap_or(DEFAULT_SEED));
        self.fit_predict_with(data, &mut rng)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

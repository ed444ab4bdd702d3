//! Fixed-count clustering with canonical group ids.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use super::canonical::canonicalize;
use super::hierarchical::{HierarchicalClustering, Linkage};
use super::kmeans::Kmeans;
use super::traits::{Clustering, DEFAULT_SEED};
use crate::error::{Error, Result};
use crate::metrics::ClusterResult;

/// Which backend partitions the points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// K-means: variance minimizing, near-equal group sizes.
    #[default]
    Balanced,
    /// Agglomerative linkage: tolerates unequal group sizes.
    Uneven,
}

/// Partitions points into a requested number of groups.
///
/// Whatever backend runs, the returned ids are canonical (see
/// [`canonicalize`]), so equal partitions always produce equal output.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterEngine {
    seed: u64,
    n_init: usize,
    max_iter: usize,
    linkage: Linkage,
}

impl Default for ClusterEngine {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            n_init: 10,
            max_iter: 300,
            linkage: Linkage::Complete,
        }
    }
}

impl ClusterEngine {
    /// Create an engine with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed for the balanced backend, reset at every top-level call.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// K-means restarts per clustering call.
    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init.max(1);
        self
    }

    /// K-means iteration limit per restart.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Linkage used by the uneven backend.
    pub fn with_linkage(mut self, linkage: Linkage) -> Self {
        self.linkage = linkage;
        self
    }

    /// The configured seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fresh RNG for one top-level invocation.
    pub(crate) fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }

    /// Partition `points` into exactly `k` groups.
    pub fn cluster(&self, points: &[Vec<f64>], k: usize, strategy: Strategy) -> Result<Vec<usize>> {
        let mut rng = self.rng();
        self.cluster_with(points, k, strategy, &mut rng)
    }

    /// Partition into `k` groups and measure group sizes and spreads.
    pub fn cluster_with_stats(
        &self,
        points: &[Vec<f64>],
        k: usize,
        strategy: Strategy,
    ) -> Result<ClusterResult> {
        let assignment = self.cluster(points, k, strategy)?;
        Ok(ClusterResult::measure(points, assignment))
    }

    /// Partition drawing randomness from a caller-owned RNG.
    pub(crate) fn cluster_with(
        &self,
        points: &[Vec<f64>],
        k: usize,
        strategy: Strategy,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>> {
        let n = points.len();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        if k == 0 {
            return Err(Error::InvalidConstraint {
                name: "group_count",
                message: "at least one group must be requested",
            });
        }
        if k > n {
            return Err(Error::InvalidClusterCount {
                requested: k,
                n_items: n,
            });
        }
        let dim = points[0].len();
        if let Some(p) = points.iter().find(|p| p.len() != dim) {
            return Err(Error::DimensionMismatch {
                expected: dim,
                found: p.len(),
            });
        }

        if k == 1 {
            return Ok(vec![0; n]);
        }
        if k == n {
            return Ok((0..n).collect());
        }

        let raw = match strategy {
            Strategy::Balanced => Kmeans::new(k)
                .with_n_init(self.n_init)
                .with_max_iter(self.max_iter)
                .fit_predict_with(points, rng)?,
            Strategy::Uneven => HierarchicalClustering::new(k)
                .with_linkage(self.linkage)
                .fit_predict_with(points, rng)?,
        };

        canonicalize(points, &raw, k)
    }
}

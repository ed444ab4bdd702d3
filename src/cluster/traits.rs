//! Clustering traits.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::error::Result;

/// Seed used when a backend is asked to cluster without an explicit RNG.
pub const DEFAULT_SEED: u64 = 0;

/// Trait for clustering backends.
///
/// Labels returned by a backend are raw: they lie in `0..n_clusters()` but
/// carry no ordering guarantee and may leave some ids unused. Use
/// [`crate::cluster::ClusterEngine`] for canonical, contiguous ids.
pub trait Clustering {
    /// Fit the model to data and return raw cluster labels, drawing any
    /// randomness from `rng`.
    fn fit_predict_with(&self, data: &[Vec<f64>], rng: &mut dyn RngCore) -> Result<Vec<usize>>;

    /// Fit the model to data and return raw cluster labels.
    ///
    /// Uses a fresh RNG seeded with [`DEFAULT_SEED`].
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>> {
        let mut rng = StdRng::seed_from_u64(DEFAULT_SEED);
        self.fit_predict_with(data, &mut rng)
    }

    /// Get the number of clusters.
    fn n_clusters(&self) -> usize;
}

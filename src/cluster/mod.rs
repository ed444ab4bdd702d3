//! Fixed-count clustering of points and scalars.
//!
//! [`ClusterEngine::cluster`] partitions a point set into exactly `k` groups
//! with one of two interchangeable backends:
//!
//! | Strategy | Backend | Group sizes |
//! |----------|---------|-------------|
//! | [`Strategy::Balanced`] | [`Kmeans`] (k-means++, restarts) | Near-equal |
//! | [`Strategy::Uneven`] | [`HierarchicalClustering`] (complete linkage) | Whatever the data dictates |
//!
//! ### K-means
//!
//! Assign each point to the nearest centroid, move centroids to the mean of
//! their points, repeat. Minimizes within-group variance, which pushes group
//! sizes toward each other. Seeded randomly, so raw labels depend on the RNG.
//!
//! ### Hierarchical (agglomerative) clustering
//!
//! Start with every point as its own group and repeatedly merge the two
//! closest groups. With complete linkage the merge height equals the merged
//! group's furthest distance, so groups stay compact even when their sizes
//! differ a lot. Required for 1D threshold grouping.
//!
//! ## Canonical ids
//!
//! Backend labels are never returned directly. [`canonicalize`] renumbers
//! groups by a spatial sort of their centroids, so two runs that find the
//! same partition return identical ids regardless of seeding.
//!
//! ## Usage
//!
//! ```rust
//! use lodgroup::cluster::{ClusterEngine, Strategy};
//!
//! let points = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ];
//!
//! let labels = ClusterEngine::new().cluster(&points, 2, Strategy::Balanced).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[2]);
//! ```

mod canonical;
mod dendrogram;
mod engine;
mod hierarchical;
mod kmeans;
mod traits;

pub use canonical::canonicalize;
pub use dendrogram::{Dendrogram, Merge};
pub use engine::{ClusterEngine, Strategy};
pub use hierarchical::{HierarchicalClustering, Linkage};
pub use kmeans::Kmeans;
pub use traits::{Clustering, DEFAULT_SEED};

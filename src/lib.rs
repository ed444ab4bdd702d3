//! # lodgroup
//!
//! Constrained spatial clustering and multi-level LOD hierarchies for placed
//! map entities.
//!
//! - [`geometry`]: furthest pairwise distance of a point set (convex hull
//!   backed, exact on small inputs).
//! - [`cluster`]: partition into exactly `k` groups with canonical,
//!   reproducible group ids.
//! - [`search`]: smallest `k` satisfying a group size cap and a spread cap.
//! - [`hierarchy`]: per-parent re-clustering into a fixed list of levels,
//!   plus a proxy forest over the result.
//! - [`reduce`] and [`naming`]: point thinning and tile names built on the above.
//!
//! ```rust
//! use lodgroup::{search, Strategy};
//!
//! let mut points = Vec::new();
//! for cx in [0.0, 1500.0, 3000.0] {
//!     for j in 0..4 {
//!         points.push(vec![cx + j as f64 * 3.0, 0.0]);
//!     }
//! }
//!
//! let result = search(&points, Some(5), 50.0, Strategy::Balanced).unwrap();
//! assert_eq!(result.n_groups(), 3);
//! assert_eq!(result.assignment[..4], [0; 4]);
//! ```

pub mod cluster;
/// Error types used across `lodgroup`.
pub mod error;
pub mod geometry;
pub mod hierarchy;
pub mod metrics;
pub mod naming;
pub mod reduce;
pub mod search;

pub use cluster::{ClusterEngine, Clustering, HierarchicalClustering, Kmeans, Linkage, Strategy};
pub use error::{Error, Result};
pub use geometry::furthest_distance;
pub use hierarchy::{
    validate_paths, HierarchyBuilder, HierarchyConfig, HierarchyPath, LevelConfig, ProxyForest,
    ProxyNode,
};
pub use metrics::{ClusterResult, DistanceAggregate};
pub use naming::tile_name;
pub use search::{search, ConstrainedSearch, SearchConfig, SearchOutcome, SearchTrace};

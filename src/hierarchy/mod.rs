//! Multi-level LOD hierarchies over point sets.
//!
//! # Levels
//!
//! A hierarchy is a fixed list of levels, coarsest first. Each level
//! re-clusters the members of every group of the level above with the
//! constrained search, so a level-ℓ group never straddles two level-(ℓ-1)
//! groups:
//!
//! ```text
//! level 0   [        0        ] [      1      ]     max distance 2800
//! level 1   [   0   ] [   1   ] [      2      ]     max distance 1400
//! ...
//! level 4   [0][1][2] [3][4]    [5][6][7][8]        max distance 420, ≤ 255 members
//! ```
//!
//! Group ids are global per level: the groups of parent `p` follow those of
//! parents `0..p`. Each point gets one [`HierarchyPath`], finest id first.
//!
//! A level can group by position or by a scalar attribute (e.g. a culling
//! distance). Attribute levels always use the uneven backend.
//!
//! # Proxy forest
//!
//! [`ProxyForest`] turns paths back into nodes (members, centroid, spread,
//! parent, children) for consumers that render one proxy per group.
//!
//! # Example
//!
//! ```rust
//! use lodgroup::hierarchy::{HierarchyBuilder, HierarchyConfig, ProxyForest, validate_paths};
//!
//! let points: Vec<Vec<f64>> = (0..8).map(|i| vec![i as f64 * 400.0, 0.0]).collect();
//! let config = HierarchyConfig::map_tiles();
//! let paths = HierarchyBuilder::new(config.clone()).build(&points, None).unwrap();
//!
//! assert!(validate_paths(&paths, config.depth()).is_clean());
//! let forest = ProxyForest::from_paths(&paths, &points).unwrap();
//! assert_eq!(forest.depth(), 2);
//! ```

mod builder;
mod forest;
mod node;
mod validate;

pub use builder::{Criterion, HierarchyBuilder, HierarchyConfig, HierarchyPath, LevelConfig};
pub use forest::ProxyForest;
pub use node::ProxyNode;
pub use validate::{validate_paths, Severity, ValidationIssue, ValidationReport};

//! Level-by-level construction of hierarchy paths.

use rand::RngCore;

use crate::cluster::{ClusterEngine, Strategy};
use crate::error::{Error, Result};
use crate::metrics::group_members;
use crate::search::{ConstrainedSearch, SearchConfig};

/// Group ids of one point, one per level, finest level first.
pub type HierarchyPath = Vec<usize>;

/// What a level clusters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Criterion {
    /// Spatial position.
    Position,
    /// A per-point scalar (e.g. a culling distance), compared by absolute difference.
    Attribute,
}

/// Constraints for one hierarchy level.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelConfig {
    /// What the level clusters on.
    pub criterion: Criterion,
    /// Maximum size-weighted furthest distance within groups.
    pub max_distance: f64,
    /// Maximum members per group; `None` is unlimited.
    pub max_group_size: Option<usize>,
    /// Clustering backend. Attribute levels always use [`Strategy::Uneven`].
    pub strategy: Strategy,
}

impl LevelConfig {
    /// A level grouping by position.
    pub fn position(max_distance: f64) -> Self {
        Self {
            criterion: Criterion::Position,
            max_distance,
            max_group_size: None,
            strategy: Strategy::Balanced,
        }
    }

    /// A level grouping by the scalar attribute.
    pub fn attribute(max_difference: f64) -> Self {
        Self {
            criterion: Criterion::Attribute,
            max_distance: max_difference,
            max_group_size: None,
            strategy: Strategy::Uneven,
        }
    }

    /// Cap the member count per group.
    pub fn with_max_group_size(mut self, max_group_size: usize) -> Self {
        self.max_group_size = Some(max_group_size);
        self
    }

    /// Set the clustering backend.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Backend actually used for this level.
    pub fn effective_strategy(&self) -> Strategy {
        match self.criterion {
            Criterion::Attribute => Strategy::Uneven,
            Criterion::Position => self.strategy,
        }
    }

    fn search_config(&self) -> SearchConfig {
        let mut config = SearchConfig::new(self.max_distance).with_strategy(self.effective_strategy());
        config.max_group_size = self.max_group_size;
        config
    }
}

/// Ordered level list, coarsest first.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HierarchyConfig {
    levels: Vec<LevelConfig>,
}

impl HierarchyConfig {
    /// Custom levels, coarsest first.
    pub fn new(levels: Vec<LevelConfig>) -> Self {
        Self { levels }
    }

    /// Five-level LOD hierarchy.
    ///
    /// | Level | Groups by | Max distance | Max size |
    /// |-------|-----------|--------------|----------|
    /// | 0 | position | 2800 | - |
    /// | 1 | position | 1400 | - |
    /// | 2 | position | 700 | - |
    /// | 3 | attribute | 60 | - |
    /// | 4 | position | 420 | 255 |
    pub fn lod() -> Self {
        Self::new(vec![
            LevelConfig::position(2800.0),
            LevelConfig::position(1400.0),
            LevelConfig::position(700.0),
            LevelConfig::attribute(60.0),
            LevelConfig::position(420.0)
                .with_max_group_size(255)
                .with_strategy(Strategy::Uneven),
        ])
    }

    /// Two-level map tiling: tile groups, then tiles.
    pub fn map_tiles() -> Self {
        Self::new(vec![
            LevelConfig::position(1800.0),
            LevelConfig::position(600.0),
        ])
    }

    /// Levels, coarsest first.
    pub fn levels(&self) -> &[LevelConfig] {
        &self.levels
    }

    /// Number of levels.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    fn needs_attributes(&self) -> bool {
        self.levels.iter().any(|l| l.criterion == Criterion::Attribute)
    }
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self::lod()
    }
}

/// Builds hierarchy paths by repeated constrained clustering.
///
/// Each level re-clusters the members of every group of the level above
/// independently. Group ids are global per level: the groups of parent `p`
/// are offset by the total group count of parents `0..p`.
#[derive(Debug, Clone, Default)]
pub struct HierarchyBuilder {
    config: HierarchyConfig,
    search: ConstrainedSearch,
}

impl HierarchyBuilder {
    /// Builder for the given levels with a default engine.
    pub fn new(config: HierarchyConfig) -> Self {
        Self {
            config,
            search: ConstrainedSearch::default(),
        }
    }

    /// Use a specific clustering engine.
    pub fn with_engine(mut self, engine: ClusterEngine) -> Self {
        self.search = ConstrainedSearch::new(engine);
        self
    }

    /// The level configuration.
    pub fn config(&self) -> &HierarchyConfig {
        &self.config
    }

    /// One path per point, each with one id per level, finest first.
    ///
    /// `attributes` is required when any level groups by attribute and must
    /// then have one value per point.
    #[tracing::instrument(level = "debug", skip_all, fields(n = points.len(), levels = self.config.depth()))]
    pub fn build(
        &self,
        points: &[Vec<f64>],
        attributes: Option<&[f64]>,
    ) -> Result<Vec<HierarchyPath>> {
        let n = points.len();
        if let Some(attrs) = attributes {
            if attrs.len() != n {
                return Err(Error::LengthMismatch {
                    points: n,
                    attributes: attrs.len(),
                });
            }
        }
        if n == 0 {
            return Ok(Vec::new());
        }
        let dim = points[0].len();
        if let Some(p) = points.iter().find(|p| p.len() != dim) {
            return Err(Error::DimensionMismatch {
                expected: dim,
                found: p.len(),
            });
        }
        let attributes = match attributes {
            Some(attrs) => attrs,
            None if self.config.needs_attributes() => {
                return Err(Error::InvalidParameter {
                    name: "attributes",
                    message: "required by attribute levels",
                })
            }
            None => &[],
        };

        let mut rng = self.search.engine().rng();
        let mut parents = vec![0usize; n];
        let mut paths: Vec<HierarchyPath> = vec![Vec::with_capacity(self.config.depth()); n];

        for (level, config) in self.config.levels.iter().enumerate() {
            parents = self.build_level(points, attributes, &parents, config, &mut rng)
                .map_err(|(parent, e)| e.at_level(level, parent))?;
            tracing::info!(
                level,
                groups = parents.iter().max().map_or(0, |&m| m + 1),
                "built level"
            );
            for (path, &group) in paths.iter_mut().zip(&parents) {
                path.push(group);
            }
        }

        for path in &mut paths {
            path.reverse();
        }
        Ok(paths)
    }

    /// Global group id per point at one level, or the failing parent and error.
    fn build_level(
        &self,
        points: &[Vec<f64>],
        attributes: &[f64],
        parents: &[usize],
        config: &LevelConfig,
        rng: &mut dyn RngCore,
    ) -> std::result::Result<Vec<usize>, (usize, Error)> {
        let search = config.search_config();
        let mut groups = vec![0usize; parents.len()];
        let mut offset = 0;

        for (parent, members) in group_members(parents).iter().enumerate() {
            let local = if members.len() == 1 {
                vec![0]
            } else {
                let subset: Vec<Vec<f64>> = match config.criterion {
                    Criterion::Position => members.iter().map(|&i| points[i].clone()).collect(),
                    Criterion::Attribute => members.iter().map(|&i| vec![attributes[i]]).collect(),
                };
                self.search
                    .search_with(&subset, &search, rng)
                    .map_err(|e| (parent, e))?
                    .result
                    .assignment
            };

            for (&i, &l) in members.iter().zip(&local) {
                groups[i] = offset + l;
            }
            offset += local.iter().max().map_or(0, |&m| m + 1);
        }
        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two towns 5000 apart, each with two streets 1000 apart.
    fn towns() -> (Vec<Vec<f64>>, Vec<f64>) {
        let mut points = Vec::new();
        let mut attrs = Vec::new();
        for town in [0.0, 5000.0] {
            for street in [0.0, 1000.0] {
                for j in 0..3 {
                    points.push(vec![town + street + j as f64 * 20.0, 0.0, 0.0]);
                    attrs.push(if j == 0 { 300.0 } else { 120.0 });
                }
            }
        }
        (points, attrs)
    }

    #[test]
    fn empty_input_gives_empty_paths() {
        let builder = HierarchyBuilder::new(HierarchyConfig::lod());
        assert_eq!(builder.build(&[], Some(&[])).unwrap(), Vec::<HierarchyPath>::new());
    }

    #[test]
    fn attribute_length_must_match() {
        let (points, _) = towns();
        let builder = HierarchyBuilder::new(HierarchyConfig::lod());
        assert_eq!(
            builder.build(&points, Some(&[1.0, 2.0])),
            Err(Error::LengthMismatch {
                points: 12,
                attributes: 2
            })
        );
        assert!(matches!(
            builder.build(&points, None),
            Err(Error::InvalidParameter { name: "attributes", .. })
        ));
    }

    #[test]
    fn lod_paths_have_five_levels() {
        let (points, attrs) = towns();
        let paths = HierarchyBuilder::new(HierarchyConfig::lod())
            .build(&points, Some(&attrs))
            .unwrap();
        assert_eq!(paths.len(), 12);
        assert!(paths.iter().all(|p| p.len() == 5));

        // Coarsest level separates the towns.
        let coarsest: Vec<usize> = paths.iter().map(|p| p[4]).collect();
        assert_eq!(coarsest[..6], [0; 6]);
        assert_eq!(coarsest[6..], [1; 6]);

        // Level 2 (700) splits streets: four groups in total.
        assert_eq!(paths.iter().map(|p| p[2]).max(), Some(3));

        // Attribute level splits 300 from 120 within each street.
        assert_ne!(paths[0][1], paths[1][1]);
        assert_eq!(paths[1][1], paths[2][1]);
    }

    #[test]
    fn single_member_parents_stay_single() {
        let points = vec![vec![0.0, 0.0], vec![10_000.0, 0.0]];
        let paths = HierarchyBuilder::new(HierarchyConfig::map_tiles())
            .build(&points, None)
            .unwrap();
        assert_eq!(paths, vec![vec![0, 0], vec![1, 1]]);
    }

    #[test]
    fn level_errors_name_level_and_parent() {
        let config = HierarchyConfig::new(vec![
            LevelConfig::position(1.0e6),
            LevelConfig::position(1.0).with_max_group_size(0),
        ]);
        let points = vec![vec![0.0, 0.0], vec![1.0, 0.0]];
        match HierarchyBuilder::new(config).build(&points, None) {
            Err(Error::Level { level, parent, source }) => {
                assert_eq!((level, parent), (1, 0));
                assert!(matches!(*source, Error::InvalidConstraint { .. }));
            }
            other => panic!("expected level error, got {:?}", other),
        }
    }

    #[test]
    fn attribute_levels_force_uneven() {
        let level = LevelConfig::attribute(5.0).with_strategy(Strategy::Balanced);
        assert_eq!(level.effective_strategy(), Strategy::Uneven);
    }
}

//! Arena of proxy nodes built from hierarchy paths.

use super::builder::HierarchyPath;
use super::node::ProxyNode;
use super::validate::validate_paths;
use crate::error::{Error, Result};
use crate::geometry::{centroid, furthest_distance};
use crate::metrics::group_members;

/// All groups of all levels, indexed by level and global group id.
///
/// Level 0 holds the roots; a node's `children` index into the next level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProxyForest {
    levels: Vec<Vec<ProxyNode>>,
}

impl ProxyForest {
    /// Materialize the groups described by `paths` (finest level first).
    ///
    /// Fails with [`Error::InvalidParameter`] if the paths do not validate.
    pub fn from_paths(paths: &[HierarchyPath], points: &[Vec<f64>]) -> Result<Self> {
        if paths.len() != points.len() {
            return Err(Error::InvalidParameter {
                name: "paths",
                message: "need exactly one path per point",
            });
        }
        let Some(depth) = paths.first().map(Vec::len) else {
            return Ok(Self::default());
        };
        let report = validate_paths(paths, depth);
        if !report.is_healthy() {
            tracing::warn!(%report, "rejecting hierarchy paths");
            return Err(Error::InvalidParameter {
                name: "paths",
                message: "paths are incomplete or inconsistent",
            });
        }

        let mut levels: Vec<Vec<ProxyNode>> = Vec::with_capacity(depth);
        for level in 0..depth {
            let index = depth - 1 - level;
            let labels: Vec<usize> = paths.iter().map(|p| p[index]).collect();

            let nodes = group_members(&labels)
                .into_iter()
                .enumerate()
                .map(|(group, members)| {
                    let pts: Vec<Vec<f64>> = members.iter().map(|&i| points[i].clone()).collect();
                    let parent = (level > 0).then(|| paths[members[0]][index + 1]);
                    ProxyNode {
                        level,
                        group,
                        centroid: centroid(points, &members),
                        furthest_distance: furthest_distance(&pts),
                        members,
                        parent,
                        children: Vec::new(),
                        local_index: 0,
                    }
                })
                .collect();
            levels.push(nodes);
        }

        for level in 1..depth {
            let (above, below) = levels.split_at_mut(level);
            let parents = &mut above[level - 1];
            for node in below[0].iter_mut() {
                if let Some(parent) = node.parent {
                    node.local_index = parents[parent].children.len();
                    parents[parent].children.push(node.group);
                }
            }
        }

        Ok(Self { levels })
    }

    /// Number of levels.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Whether the forest has no levels.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Nodes of one level, by group id.
    pub fn level(&self, level: usize) -> &[ProxyNode] {
        self.levels.get(level).map(Vec::as_slice).unwrap_or(&[])
    }

    /// One node.
    pub fn node(&self, level: usize, group: usize) -> Option<&ProxyNode> {
        self.levels.get(level)?.get(group)
    }

    /// The coarsest nodes.
    pub fn roots(&self) -> &[ProxyNode] {
        self.level(0)
    }

    /// Child nodes of `node`.
    pub fn children<'a>(&'a self, node: &'a ProxyNode) -> impl Iterator<Item = &'a ProxyNode> + 'a {
        node.children
            .iter()
            .filter_map(move |&c| self.node(node.level + 1, c))
    }

    /// Parent node of `node`.
    pub fn parent(&self, node: &ProxyNode) -> Option<&ProxyNode> {
        let level = node.level.checked_sub(1)?;
        self.node(level, node.parent?)
    }

    /// All nodes, coarsest level first.
    pub fn iter(&self) -> impl Iterator<Item = &ProxyNode> {
        self.levels.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Vec<HierarchyPath>, Vec<Vec<f64>>) {
        let points = vec![
            vec![0.0, 0.0],
            vec![3.0, 4.0],
            vec![100.0, 0.0],
            vec![500.0, 0.0],
        ];
        // Finest first: coarse {0,1,2} {3}; fine {0,1} {2} {3}.
        let paths = vec![vec![0, 0], vec![0, 0], vec![1, 0], vec![2, 1]];
        (paths, points)
    }

    #[test]
    fn builds_nodes_per_level() {
        let (paths, points) = sample();
        let forest = ProxyForest::from_paths(&paths, &points).unwrap();
        assert_eq!(forest.depth(), 2);
        assert_eq!(forest.roots().len(), 2);
        assert_eq!(forest.level(1).len(), 3);

        let root = &forest.roots()[0];
        assert_eq!(root.members, vec![0, 1, 2]);
        assert_eq!(root.children, vec![0, 1]);
        assert_eq!(root.furthest_distance, 100.0);

        let fine = forest.node(1, 1).unwrap();
        assert_eq!(fine.parent, Some(0));
        assert_eq!(fine.local_index, 1);
        assert_eq!(forest.parent(fine).map(|p| p.group), Some(0));

        let lone = forest.node(1, 2).unwrap();
        assert_eq!(lone.local_index, 0);
        assert_eq!(lone.centroid, vec![500.0, 0.0]);
        assert!(lone.is_leaf());
    }

    #[test]
    fn children_iterate_next_level() {
        let (paths, points) = sample();
        let forest = ProxyForest::from_paths(&paths, &points).unwrap();
        let groups: Vec<usize> = forest.children(&forest.roots()[0]).map(|n| n.group).collect();
        assert_eq!(groups, vec![0, 1]);
        assert_eq!(forest.iter().count(), 5);
    }

    #[test]
    fn rejects_inconsistent_paths() {
        let (mut paths, points) = sample();
        paths[1] = vec![0, 1];
        assert!(matches!(
            ProxyForest::from_paths(&paths, &points),
            Err(Error::InvalidParameter { name: "paths", .. })
        ));
        assert!(ProxyForest::from_paths(&paths[..2], &points).is_err());
    }

    #[test]
    fn empty() {
        let forest = ProxyForest::from_paths(&[], &[]).unwrap();
        assert!(forest.is_empty());
        assert!(forest.roots().is_empty());
    }
}

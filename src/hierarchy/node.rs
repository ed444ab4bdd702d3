//! One group of one hierarchy level.

use core::fmt;

/// A group of points at one level of a [`ProxyForest`](super::ProxyForest).
///
/// Stands in for all its members when rendered at that level's detail.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyNode {
    /// Level index, 0 = coarsest.
    pub level: usize,
    /// Global group id within the level.
    pub group: usize,
    /// Point indices, ascending.
    pub members: Vec<usize>,
    /// Mean of the member positions.
    pub centroid: Vec<f64>,
    /// Furthest distance between two members.
    pub furthest_distance: f64,
    /// Group id at the level above; `None` at level 0.
    pub parent: Option<usize>,
    /// Group ids at the level below.
    pub children: Vec<usize>,
    /// Position among the parent's children.
    pub local_index: usize,
}

impl ProxyNode {
    /// Number of points represented.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the node represents no points.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of child groups at the level below.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Whether this node sits at the finest level.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Draw distance for this node's proxy.
    ///
    /// `base` plus the group's spread, rounded, and kept strictly below `cap`.
    pub fn lod_distance(&self, base: f64, cap: f64) -> f64 {
        (base + self.furthest_distance).round().min(cap - 1.0)
    }
}

impl fmt::Display for ProxyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "L{}[{}]: {} members, spread {:.1}",
            self.level,
            self.group,
            self.members.len(),
            self.furthest_distance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(furthest_distance: f64) -> ProxyNode {
        ProxyNode {
            level: 2,
            group: 7,
            members: vec![3, 4],
            centroid: vec![1.0, 2.0],
            furthest_distance,
            parent: Some(1),
            children: Vec::new(),
            local_index: 0,
        }
    }

    #[test]
    fn lod_distance_rounds_and_caps() {
        assert_eq!(node(12.4).lod_distance(750.0, 1500.0), 762.0);
        assert_eq!(node(900.0).lod_distance(750.0, 1500.0), 1499.0);
    }

    #[test]
    fn display() {
        assert_eq!(node(3.04).to_string(), "L2[7]: 2 members, spread 3.0");
    }
}

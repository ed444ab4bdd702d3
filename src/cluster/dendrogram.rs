//! Dendrogram produced by agglomerative (bottom-up) clustering.
//!
//! Merges are recorded in the order the linkage performed them, which for
//! monotone linkages (complete, average, Ward) is also ascending dissimilarity.
//! Cluster ids follow the SciPy convention: leaves are `0..n`, merge `i`
//! creates cluster `n + i`.

use crate::error::{Error, Result};

/// A dendrogram representing hierarchical cluster merges.
#[derive(Debug, Clone)]
pub struct Dendrogram {
    /// Merge history in linkage order.
    merges: Vec<Merge>,
    /// Number of original items.
    n_items: usize,
}

/// A single merge operation in the dendrogram.
#[derive(Debug, Clone, Copy)]
pub struct Merge {
    /// First cluster being merged (index).
    pub cluster_a: usize,
    /// Second cluster being merged (index).
    pub cluster_b: usize,
    /// Distance/dissimilarity at which merge occurred.
    pub distance: f64,
    /// Size of resulting cluster.
    pub size: usize,
}

impl Dendrogram {
    /// Create a new dendrogram for n items.
    pub fn new(n_items: usize) -> Self {
        Self {
            merges: Vec::with_capacity(n_items.saturating_sub(1)),
            n_items,
        }
    }

    /// Record a merge operation.
    pub fn add_merge(&mut self, cluster_a: usize, cluster_b: usize, distance: f64, size: usize) {
        self.merges.push(Merge {
            cluster_a,
            cluster_b,
            distance,
            size,
        });
    }

    /// Cluster assignments after replaying the first `n_merges` merges.
    ///
    /// Labels are numbered in order of first appearance.
    fn labels_after(&self, n_merges: usize) -> Vec<usize> {
        let total = self.n_items + self.merges.len();
        let mut parent: Vec<usize> = (0..total).collect();

        fn find(parent: &mut [usize], mut x: usize) -> usize {
            while parent[x] != x {
                parent[x] = parent[parent[x]];
                x = parent[x];
            }
            x
        }

        for (i, merge) in self.merges.iter().take(n_merges).enumerate() {
            let merged = self.n_items + i;
            let a = find(&mut parent, merge.cluster_a);
            let b = find(&mut parent, merge.cluster_b);
            parent[a] = merged;
            parent[b] = merged;
        }

        let mut relabel = vec![usize::MAX; total];
        let mut next = 0;
        (0..self.n_items)
            .map(|item| {
                let root = find(&mut parent, item);
                if relabel[root] == usize::MAX {
                    relabel[root] = next;
                    next += 1;
                }
                relabel[root]
            })
            .collect()
    }

    /// Cluster assignments for exactly `k` clusters.
    ///
    /// Replays the first `n - k` merges, so ties in merge distance never
    /// change the resulting count.
    pub fn cut_to_k(&self, k: usize) -> Result<Vec<usize>> {
        if k == 0 || k > self.n_items {
            return Err(Error::InvalidClusterCount {
                requested: k,
                n_items: self.n_items,
            });
        }

        let n_merges = self.n_items - k;
        if n_merges > self.merges.len() {
            return Err(Error::ClusteringInconsistency {
                requested: k,
                produced: self.n_items - self.merges.len(),
            });
        }

        Ok(self.labels_after(n_merges))
    }

    /// Number of original items.
    pub fn n_items(&self) -> usize {
        self.n_items
    }

    /// Number of merges recorded.
    pub fn n_merges(&self) -> usize {
        self.merges.len()
    }

    /// Iterate over merges.
    pub fn merges(&self) -> impl Iterator<Item = &Merge> {
        self.merges.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_leaves() -> Dendrogram {
        let mut dendro = Dendrogram::new(4);
        dendro.add_merge(0, 1, 0.5, 2);
        dendro.add_merge(2, 3, 0.7, 2);
        dendro.add_merge(4, 5, 1.0, 4);
        dendro
    }

    #[test]
    fn test_dendrogram_creation() {
        let dendro = Dendrogram::new(5);
        assert_eq!(dendro.n_items(), 5);
        assert_eq!(dendro.n_merges(), 0);
    }

    #[test]
    fn test_cut_to_k() {
        let dendro = four_leaves();
        assert_eq!(dendro.n_merges(), 3);
        assert_eq!(dendro.cut_to_k(4).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(dendro.cut_to_k(3).unwrap(), vec![0, 0, 1, 2]);
        assert_eq!(dendro.cut_to_k(2).unwrap(), vec![0, 0, 1, 1]);
        assert_eq!(dendro.cut_to_k(1).unwrap(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_cut_with_tied_distances_is_exact() {
        let mut dendro = Dendrogram::new(4);
        dendro.add_merge(0, 1, 1.0, 2);
        dendro.add_merge(2, 3, 1.0, 2);
        dendro.add_merge(4, 5, 2.0, 4);
        assert_eq!(dendro.cut_to_k(3).unwrap(), vec![0, 0, 1, 2]);
    }

    #[test]
    fn test_incomplete_history_is_inconsistent() {
        let mut dendro = Dendrogram::new(3);
        dendro.add_merge(0, 1, 1.0, 2);
        assert_eq!(
            dendro.cut_to_k(1),
            Err(Error::ClusteringInconsistency {
                requested: 1,
                produced: 2
            })
        );
        assert!(dendro.cut_to_k(0).is_err());
    }
}

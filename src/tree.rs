//! Hierarchical cluster tree and the flat cut.
//!
//! The tree is a plain recursive tagged structure, deliberately decoupled
//! from any particular clustering library's node type: adapters at the
//! collaborator boundary convert whatever the external clusterer produces
//! into a [`Dendrogram`]. Built once per corpus, cached, and re-cut every
//! time the user changes the cluster count.
//!
//! Cutting works the way a dendrogram is cut by height: the forest starts as
//! the whole tree, and the root with the greatest merge height is split into
//! its two children until exactly `k` subtrees remain. Each subtree's
//! ordinal position (left to right) becomes the cluster id of every leaf it
//! contains.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Binary merge tree over document indices.
///
/// A leaf is one document index; an internal node records the height at
/// which its two subtrees were merged and the number of leaves beneath it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Dendrogram {
    /// One document.
    Leaf {
        /// Document index.
        index: usize,
    },
    /// Merge of two subtrees.
    Internal {
        /// Merge height (distance at which the children were joined).
        height: f32,
        /// Number of leaves under this node.
        size: usize,
        /// Left subtree.
        left: Box<Dendrogram>,
        /// Right subtree.
        right: Box<Dendrogram>,
    },
}

impl Dendrogram {
    /// Create a leaf for one document index.
    pub fn leaf(index: usize) -> Self {
        Dendrogram::Leaf { index }
    }

    /// Merge two subtrees at the given height.
    pub fn merge(height: f32, left: Dendrogram, right: Dendrogram) -> Self {
        let size = left.size() + right.size();
        Dendrogram::Internal {
            height,
            size,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Number of leaves (documents) under this node.
    pub fn size(&self) -> usize {
        match self {
            Dendrogram::Leaf { .. } => 1,
            Dendrogram::Internal { size, .. } => *size,
        }
    }

    /// Merge height of this node (0.0 for leaves).
    pub fn height(&self) -> f32 {
        match self {
            Dendrogram::Leaf { .. } => 0.0,
            Dendrogram::Internal { height, .. } => *height,
        }
    }

    /// Document indices under this node, in left-to-right order.
    pub fn leaf_indices(&self) -> Vec<usize> {
        let mut indices = Vec::with_capacity(self.size());
        self.collect_leaves(&mut indices);
        indices
    }

    fn collect_leaves(&self, out: &mut Vec<usize>) {
        match self {
            Dendrogram::Leaf { index } => out.push(*index),
            Dendrogram::Internal { left, right, .. } => {
                left.collect_leaves(out);
                right.collect_leaves(out);
            }
        }
    }

    /// Split the tree into exactly `k` subtrees by height.
    ///
    /// Starting from the whole tree, the root with the greatest merge height
    /// is replaced by its two children (left keeping its position) until the
    /// forest holds `k` roots. The result preserves the tree's left-to-right
    /// order, so the grouping is deterministic for a given tree.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidClusterCount`] when `k` is zero or exceeds the number
    /// of leaves.
    pub fn group(&self, k: usize) -> Result<Vec<&Dendrogram>> {
        let n = self.size();
        if k == 0 || k > n {
            return Err(Error::InvalidClusterCount {
                requested: k,
                n_docs: n,
            });
        }

        let mut forest: Vec<&Dendrogram> = vec![self];
        while forest.len() < k {
            // Tallest internal root splits next. Leaves cannot split; with
            // k <= n at least one internal root remains while the loop runs.
            let mut tallest: Option<(usize, f32)> = None;
            for (pos, root) in forest.iter().enumerate() {
                if let Dendrogram::Internal { height, .. } = root {
                    let better = match tallest {
                        Some((_, best)) => *height > best,
                        None => true,
                    };
                    if better {
                        tallest = Some((pos, *height));
                    }
                }
            }

            let Some((pos, _)) = tallest else {
                // Fewer leaves than `size()` claimed: the stored sizes lie.
                return Err(Error::MalformedTree {
                    index: 0,
                    problem: "count disagrees with the tree's declared size",
                });
            };
            let Dendrogram::Internal { left, right, .. } = forest[pos] else {
                unreachable!("tallest position always holds an internal node");
            };
            forest[pos] = left.as_ref();
            forest.insert(pos + 1, right.as_ref());
        }
        Ok(forest)
    }

    /// Cut the tree into a flat assignment of `k` cluster ids.
    ///
    /// The `i`-th entry of the result is the cluster id (`0..k`) of document
    /// `i`. Every id in `0..k` appears at least once by construction of the
    /// cut; `k = 1` puts every document in cluster 0 and `k = n` puts each
    /// in its own.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidClusterCount`] for an out-of-range `k`;
    /// [`Error::MalformedTree`] when the subtrees' leaf indices do not
    /// partition `0..n` exactly (a contract violation by whatever built the
    /// tree).
    pub fn cut(&self, k: usize) -> Result<Vec<usize>> {
        let n = self.size();
        let groups = self.group(k)?;

        let mut assignment = vec![0usize; n];
        let mut seen = vec![false; n];
        for (cluster_id, subtree) in groups.iter().enumerate() {
            for index in subtree.leaf_indices() {
                if index >= n {
                    return Err(Error::MalformedTree {
                        index,
                        problem: "is out of range for this corpus",
                    });
                }
                if seen[index] {
                    return Err(Error::MalformedTree {
                        index,
                        problem: "appears in more than one subtree",
                    });
                }
                seen[index] = true;
                assignment[index] = cluster_id;
            }
        }

        if let Some(index) = seen.iter().position(|covered| !covered) {
            return Err(Error::MalformedTree {
                index,
                problem: "is missing from every subtree",
            });
        }
        Ok(assignment)
    }
}

/// Invert a flat cluster assignment into per-cluster document-id lists.
///
/// One entry per distinct cluster id present in the assignment, keys in
/// ascending order, document indices ascending within each list.
pub fn ids_per_cluster(assignment: &[usize]) -> BTreeMap<usize, Vec<usize>> {
    let mut ids: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (index, &cluster) in assignment.iter().enumerate() {
        ids.entry(cluster).or_default().push(index);
    }
    ids
}

//! Keyword labels for clusters.
//!
//! Each cluster's label is derived from term-frequency statistics: average
//! the term-weight vectors of the cluster's members, rank the vocabulary by
//! the averaged weight, and join the top terms into one short string. The
//! ranking sort is stable, so ties fall back to the original vocabulary
//! order. A single-member cluster uses its own vector as the "average", and
//! a cluster whose members share no vocabulary still labels: zero-weight
//! terms sort last but are not excluded.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::tfidf::TermWeights;

/// Keywords per cluster label used by the library default.
///
/// Interactive callers typically pass a smaller value (5) for tighter chart
/// labels; both are configurations of the same ranking.
pub const DEFAULT_KEYWORDS: usize = 10;

/// Produce one keyword label per cluster, in ascending cluster-id order.
///
/// `members` maps each cluster id to the document indices it owns (the
/// Cluster Indexer's output); `n_keywords` terms are joined with commas.
///
/// # Errors
///
/// [`Error::InvalidParameter`] when `n_keywords` is zero, and
/// [`Error::LengthMismatch`] when a member index has no weight vector (the
/// map and the weights disagree about the corpus).
pub fn cluster_keywords(
    weights: &TermWeights,
    members: &BTreeMap<usize, Vec<usize>>,
    n_keywords: usize,
) -> Result<Vec<String>> {
    if n_keywords == 0 {
        return Err(Error::InvalidParameter {
            name: "n_keywords",
            message: "must be at least 1",
        });
    }

    let vocabulary = weights.vocabulary();
    let mut labels = Vec::with_capacity(members.len());

    for indices in members.values() {
        // Element-wise mean over the cluster's member vectors.
        let mut mean = vec![0.0f32; vocabulary.len()];
        for &index in indices {
            if index >= weights.n_docs() {
                return Err(Error::LengthMismatch {
                    what: "term-weight matrix",
                    expected: index + 1,
                    found: weights.n_docs(),
                });
            }
            for (acc, weight) in mean.iter_mut().zip(weights.document(index)) {
                *acc += weight;
            }
        }
        if !indices.is_empty() {
            let inv = 1.0 / indices.len() as f32;
            for acc in &mut mean {
                *acc *= inv;
            }
        }

        // Stable sort: ties keep original vocabulary order.
        let mut order: Vec<usize> = (0..vocabulary.len()).collect();
        order.sort_by(|&a, &b| mean[b].total_cmp(&mean[a]));

        let label = order
            .iter()
            .take(n_keywords)
            .map(|&term| vocabulary[term].as_str())
            .collect::<Vec<_>>()
            .join(",");
        labels.push(label);
    }

    Ok(labels)
}

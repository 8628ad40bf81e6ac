//! Assembly of the chart-layer records.
//!
//! Joins document metadata, 2-D embedding coordinates and cluster labels
//! into [`PlotPoint`]s, and pairs each cluster's label with the centroid of
//! its points for on-chart text placement. Pure joins over already-resident
//! data; the only arithmetic here is the display scaling.

use std::collections::BTreeMap;

use crate::document::{ClusterCentroid, Document, PlotPoint};
use crate::error::{Error, Result};

/// Default upper bound of the year axis used for the recency opacity.
pub const DEFAULT_MAX_YEAR: i32 = 2022;

/// Join documents, embedding points and per-document cluster labels into
/// plot points.
///
/// Derived fields per document: `log_cit = log10(max(citation_count, 1))`
/// (a zero-citation record plots at size 0 instead of negative infinity),
/// `opacity = (year - min_year) / (max_year - min_year)` clamped to
/// `[0, 1]` with `min_year` the corpus minimum, and `rank` the document's
/// position in the input order.
///
/// # Errors
///
/// [`Error::EmptyCorpus`] for an empty document list;
/// [`Error::LengthMismatch`] when the embedding or label list is not
/// index-aligned with the documents.
pub fn prepare_plot_data(
    documents: &[Document],
    embedding: &[[f32; 2]],
    labels: &[String],
    max_year: i32,
) -> Result<Vec<PlotPoint>> {
    if documents.is_empty() {
        return Err(Error::EmptyCorpus);
    }
    if embedding.len() != documents.len() {
        return Err(Error::LengthMismatch {
            what: "embedding",
            expected: documents.len(),
            found: embedding.len(),
        });
    }
    if labels.len() != documents.len() {
        return Err(Error::LengthMismatch {
            what: "per-document cluster label",
            expected: documents.len(),
            found: labels.len(),
        });
    }

    let min_year = documents
        .iter()
        .map(|doc| doc.year)
        .min()
        .unwrap_or(max_year);
    let year_span = (max_year - min_year) as f32;

    let points = documents
        .iter()
        .zip(embedding)
        .zip(labels)
        .enumerate()
        .map(|(rank, ((doc, &[x, y]), label))| {
            let log_cit = (doc.citation_count.max(1) as f32).log10();
            let opacity = if year_span > 0.0 {
                ((doc.year - min_year) as f32 / year_span).clamp(0.0, 1.0)
            } else {
                1.0
            };
            PlotPoint {
                title: doc.title.clone(),
                abstract_text: doc.abstract_text.clone(),
                url: doc.url.clone(),
                year: doc.year,
                citation_count: doc.citation_count,
                x,
                y,
                log_cit,
                opacity,
                rank,
                cluster: label.clone(),
            }
        })
        .collect();
    Ok(points)
}

/// Pair each cluster's label with the centroid of its member points.
///
/// `members` is the Cluster Indexer's id → indices map; `labels` holds one
/// label per cluster in the same ascending-id order. Output order follows
/// ascending cluster id.
///
/// # Errors
///
/// [`Error::LengthMismatch`] when `labels` and `members` disagree on the
/// number of clusters, or a member index has no plot point.
pub fn prepare_cluster_data(
    members: &BTreeMap<usize, Vec<usize>>,
    labels: &[String],
    points: &[PlotPoint],
) -> Result<Vec<ClusterCentroid>> {
    if labels.len() != members.len() {
        return Err(Error::LengthMismatch {
            what: "cluster label",
            expected: members.len(),
            found: labels.len(),
        });
    }

    let mut centroids = Vec::with_capacity(members.len());
    for (indices, label) in members.values().zip(labels) {
        let mut x = 0.0f32;
        let mut y = 0.0f32;
        for &index in indices {
            let point = points.get(index).ok_or(Error::LengthMismatch {
                what: "plot point",
                expected: index + 1,
                found: points.len(),
            })?;
            x += point.x;
            y += point.y;
        }
        if !indices.is_empty() {
            x /= indices.len() as f32;
            y /= indices.len() as f32;
        }
        centroids.push(ClusterCentroid {
            x,
            y,
            label: label.clone(),
        });
    }
    Ok(centroids)
}

//! Document records and the chart-layer payload types.
//!
//! A [`Document`] is one retrieved record, immutable once fetched. Every
//! derived collection in the pipeline (token lists, sentence vectors,
//! embedding points, cluster assignments, plot points) is index-aligned with
//! the document list: position `i` always refers to the same document. Stage
//! boundaries validate this alignment instead of trusting it silently.

use serde::{Deserialize, Serialize};

/// One retrieved document record (title/abstract pair plus display metadata).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Paper title.
    pub title: String,

    /// Paper abstract. Serialized as `abstract`, which is reserved in Rust.
    #[serde(rename = "abstract")]
    pub abstract_text: String,

    /// Publication year.
    pub year: i32,

    /// Total citation count.
    #[serde(rename = "citationCount")]
    pub citation_count: u64,

    /// Influential citation count.
    #[serde(rename = "influentialCitationCount")]
    pub influential_citation_count: u64,

    /// Canonical URL of the record.
    pub url: String,
}

/// Ordered, normalized word tokens of one document's title + abstract.
///
/// Produced by an external tokenizer (stop words and non-word tokens already
/// removed); this crate only consumes it.
pub type TokenList = Vec<String>;

/// One per-document point record consumed by the chart layer.
///
/// Carries the original display fields through, plus the derived fields the
/// chart encodes: position, size, opacity and cluster color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    /// Paper title (tooltip / click-through).
    pub title: String,

    /// Paper abstract (tooltip / click-through).
    #[serde(rename = "abstract")]
    pub abstract_text: String,

    /// Canonical URL of the record.
    pub url: String,

    /// Publication year.
    pub year: i32,

    /// Total citation count.
    #[serde(rename = "citationCount")]
    pub citation_count: u64,

    /// Embedding x coordinate.
    pub x: f32,

    /// Embedding y coordinate.
    pub y: f32,

    /// Log-scaled citation count used as the mark size:
    /// `log10(max(citation_count, 1))`, so a zero-citation record plots at
    /// size 0 rather than negative infinity.
    #[serde(rename = "logCit")]
    pub log_cit: f32,

    /// Recency in `[0, 1]`: `(year - min_year) / (max_year - min_year)`,
    /// clamped.
    pub opacity: f32,

    /// Position of the document in the retrieval order; a stable secondary
    /// sort key for the chart, never recomputed from any score.
    pub rank: usize,

    /// Keyword label of the owning cluster.
    pub cluster: String,
}

/// Per-cluster centroid record used to place a text label on the chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClusterCentroid {
    /// Mean x of the cluster's plot points.
    pub x: f32,

    /// Mean y of the cluster's plot points.
    pub y: f32,

    /// The cluster's keyword label.
    pub label: String,
}

/// The full chart-layer payload for one cluster-count setting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotData {
    /// One point per document, index-aligned with the document list.
    pub points: Vec<PlotPoint>,

    /// One centroid label per cluster, in ascending cluster-id order.
    pub clusters: Vec<ClusterCentroid>,
}

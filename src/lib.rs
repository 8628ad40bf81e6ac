//! Cluster assembly and keyword labeling for 2-D literature maps.
//!
//! `litmap` turns a set of retrieved document records (title/abstract pairs)
//! into the data behind an interactive scatter visualization: documents are
//! grouped into clusters, each cluster carries a short keyword label, and
//! the cluster count can change on the fly without recomputing the
//! expensive embedding step.
//!
//! ## Pipeline shape
//!
//! Retrieval and tokenization happen upstream; from there:
//!
//! 1. [`vectorize`]: mean-pool pre-trained word vectors into one sentence
//!    vector per document (unknown words skipped, all-unknown documents at
//!    the origin).
//! 2. A dimensionality reducer and a hierarchical clusterer (external
//!    collaborators behind the [`pipeline::Reducer`] and
//!    [`pipeline::TreeBuilder`] seams) produce the 2-D embedding and the
//!    cluster tree. Both are cached in the session [`store`].
//! 3. On every cluster-count change: cut the cached tree into `k` flat
//!    groups ([`tree`]), derive a keyword label per group from term
//!    statistics ([`tfidf`], [`label`]), and assemble the chart records
//!    ([`plot`]).
//!
//! The cheap tail (step 3) is all a "change k" interaction reruns; that is
//! the point of the artifact cache.
//!
//! ## Usage
//!
//! ```rust
//! use litmap::{cluster_keywords, ids_per_cluster, Dendrogram, TermWeights};
//!
//! // A tree over four documents: {0,1} and {2,3}.
//! let tree = Dendrogram::merge(
//!     2.0,
//!     Dendrogram::merge(0.5, Dendrogram::leaf(0), Dendrogram::leaf(1)),
//!     Dendrogram::merge(0.4, Dendrogram::leaf(2), Dendrogram::leaf(3)),
//! );
//!
//! let assignment = tree.cut(2).unwrap();
//! assert_eq!(assignment, vec![0, 0, 1, 1]);
//!
//! let members = ids_per_cluster(&assignment);
//! assert_eq!(members[&0], vec![0, 1]);
//!
//! // Label each cluster from per-document term weights.
//! let tokens: Vec<Vec<String>> = [
//!     vec!["rna", "gene"],
//!     vec!["rna", "expression"],
//!     vec!["brain", "neuron"],
//!     vec!["brain", "cortex"],
//! ]
//! .into_iter()
//! .map(|doc| doc.into_iter().map(String::from).collect())
//! .collect();
//! let weights = TermWeights::from_tokens(&tokens).unwrap();
//! let labels = cluster_keywords(&weights, &members, 2).unwrap();
//! assert_eq!(labels.len(), 2);
//! assert!(labels[0].contains("rna"));
//! assert!(labels[1].contains("brain"));
//! ```
//!
//! For the end-to-end flow (analyze once, then re-cut at interactive speed)
//! see [`pipeline::Pipeline`] and the `pipeline` example.

#![forbid(unsafe_code)]

pub mod document;
pub mod error;
pub mod label;
pub mod linkage;
pub mod pipeline;
pub mod plot;
pub mod store;
pub mod tfidf;
pub mod tree;
pub mod vectorize;

pub use document::{ClusterCentroid, Document, PlotData, PlotPoint, TokenList};
pub use error::{Error, Result};
pub use label::{cluster_keywords, DEFAULT_KEYWORDS};
pub use linkage::SingleLinkage;
pub use pipeline::{Pipeline, PipelineConfig, Reducer, TreeBuilder};
pub use plot::{prepare_cluster_data, prepare_plot_data, DEFAULT_MAX_YEAR};
pub use store::{ArtifactStore, MemoryStore};
pub use tfidf::TermWeights;
pub use tree::{ids_per_cluster, Dendrogram};
pub use vectorize::{cosine_distance, sentence_vector, sentence_vectors, WordVectors};

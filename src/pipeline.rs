//! Pipeline orchestration: full analysis and the cheap recompute path.
//!
//! [`Pipeline::analyze`] runs the expensive front of the pipeline once per
//! query (sentence vectors, 2-D embedding, cluster tree) and caches those
//! artifacts in the session store. [`Pipeline::set_cluster_count`] reruns
//! only the cheap tail (cut → index → label → assemble) against the cached
//! artifacts, which is what makes the cluster-count slider responsive.
//!
//! Everything here is a synchronous, pure computation over already-resident
//! data; one invocation per user action, no shared mutable state between
//! invocations. The external collaborators sit behind two seams:
//! [`Reducer`] (UMAP or any other 2-D projection) and [`TreeBuilder`]
//! (agglomerative/Ward or the in-crate [`SingleLinkage`]).
//!
//! [`SingleLinkage`]: crate::linkage::SingleLinkage

use tracing::{debug, info};

use crate::document::{Document, PlotData, TokenList};
use crate::error::{Error, Result};
use crate::label::{cluster_keywords, DEFAULT_KEYWORDS};
use crate::plot::{prepare_cluster_data, prepare_plot_data, DEFAULT_MAX_YEAR};
use crate::store::{self, artifact, ArtifactStore, MemoryStore};
use crate::tfidf::TermWeights;
use crate::tree::{ids_per_cluster, Dendrogram};
use crate::vectorize::{sentence_vectors, WordVectors};

/// Dimensionality reducer seam (UMAP in the original deployment).
///
/// Given one sentence vector per document, returns one 2-D point per
/// document, index-aligned with the input.
pub trait Reducer {
    /// Project sentence vectors to 2-D embedding points.
    fn reduce(&self, vectors: &[Vec<f32>]) -> Result<Vec<[f32; 2]>>;
}

/// Hierarchical clusterer seam (agglomerative/Ward in the original
/// deployment).
///
/// Given one sentence vector per document, returns a merge tree whose
/// leaves are exactly the document indices `0..n`.
pub trait TreeBuilder {
    /// Build the cluster tree over the corpus.
    fn build(&self, vectors: &[Vec<f32>]) -> Result<Dendrogram>;
}

/// Tunable knobs of the assembly tail.
#[derive(Clone, Copy, Debug)]
pub struct PipelineConfig {
    /// Cluster count used by the initial analysis.
    pub cluster_count: usize,

    /// Keywords per cluster label.
    pub n_keywords: usize,

    /// Upper bound of the year axis for the recency opacity.
    pub max_year: i32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cluster_count: 10,
            n_keywords: DEFAULT_KEYWORDS,
            max_year: DEFAULT_MAX_YEAR,
        }
    }
}

/// The cluster assembly and labeling pipeline for one analysis session.
pub struct Pipeline<R, B, S = MemoryStore> {
    model: WordVectors,
    reducer: R,
    tree_builder: B,
    store: S,
    config: PipelineConfig,
}

impl<R, B> Pipeline<R, B, MemoryStore> {
    /// Create a pipeline with an in-memory artifact store and default
    /// configuration.
    pub fn new(model: WordVectors, reducer: R, tree_builder: B) -> Self {
        Self {
            model,
            reducer,
            tree_builder,
            store: MemoryStore::new(),
            config: PipelineConfig::default(),
        }
    }
}

impl<R, B, S> Pipeline<R, B, S>
where
    R: Reducer,
    B: TreeBuilder,
    S: ArtifactStore,
{
    /// Replace the artifact store (e.g. a host-session-backed one).
    pub fn with_store<S2: ArtifactStore>(self, store: S2) -> Pipeline<R, B, S2> {
        Pipeline {
            model: self.model,
            reducer: self.reducer,
            tree_builder: self.tree_builder,
            store,
            config: self.config,
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full pipeline for a new query.
    ///
    /// Vectorizes the corpus, embeds it, builds the cluster tree, caches
    /// those artifacts (replacing any previous session's), then assembles
    /// plot data for the configured initial cluster count.
    ///
    /// `tokens` must be index-aligned with `documents`: position `i` in
    /// both refers to the same document.
    pub fn analyze(&mut self, documents: Vec<Document>, tokens: Vec<TokenList>) -> Result<PlotData> {
        let n = documents.len();
        if n == 0 {
            return Err(Error::EmptyCorpus);
        }
        if tokens.len() != n {
            return Err(Error::LengthMismatch {
                what: "token list",
                expected: n,
                found: tokens.len(),
            });
        }

        let vectors = sentence_vectors(&tokens, &self.model);
        let embedding = self.reducer.reduce(&vectors)?;
        if embedding.len() != n {
            return Err(Error::LengthMismatch {
                what: "embedding",
                expected: n,
                found: embedding.len(),
            });
        }
        let tree = self.tree_builder.build(&vectors)?;
        if tree.size() != n {
            return Err(Error::LengthMismatch {
                what: "cluster tree",
                expected: n,
                found: tree.size(),
            });
        }

        // New query: the previous session's artifacts all become stale at
        // once. Clear, then write every artifact before the first read.
        self.store.clear();
        store::put(&mut self.store, artifact::DOCUMENTS, &documents)?;
        store::put(&mut self.store, artifact::TOKENS, &tokens)?;
        store::put(&mut self.store, artifact::EMBEDDING, &embedding)?;
        store::put(&mut self.store, artifact::TREE, &tree)?;

        info!(documents = n, dim = self.model.dim(), "analysis artifacts cached");
        self.set_cluster_count(self.config.cluster_count)
    }

    /// Recompute the flat clustering and plot data for a new cluster count.
    ///
    /// Reads only the cached artifacts; the embedding and the tree are not
    /// recomputed. Each call produces an independent result, so a later
    /// call simply supersedes an earlier one.
    ///
    /// # Errors
    ///
    /// [`Error::NoAnalysis`] when no [`analyze`](Pipeline::analyze) call has
    /// cached its artifacts yet, plus any cut, labeling or assembly error.
    pub fn set_cluster_count(&self, k: usize) -> Result<PlotData> {
        let documents: Vec<Document> =
            store::get(&self.store, artifact::DOCUMENTS)?.ok_or(Error::NoAnalysis)?;
        let tokens: Vec<TokenList> =
            store::get(&self.store, artifact::TOKENS)?.ok_or(Error::NoAnalysis)?;
        let embedding: Vec<[f32; 2]> =
            store::get(&self.store, artifact::EMBEDDING)?.ok_or(Error::NoAnalysis)?;
        let tree: Dendrogram = store::get(&self.store, artifact::TREE)?.ok_or(Error::NoAnalysis)?;

        let assignment = tree.cut(k)?;
        let members = ids_per_cluster(&assignment);

        let weights = TermWeights::from_tokens(&tokens)?;
        let labels = cluster_keywords(&weights, &members, self.config.n_keywords)?;

        // The cutter assigns dense ids 0..k, so the assignment entries index
        // straight into the label list.
        let doc_labels: Vec<String> = assignment
            .iter()
            .map(|&cluster| labels[cluster].clone())
            .collect();

        let points = prepare_plot_data(&documents, &embedding, &doc_labels, self.config.max_year)?;
        let clusters = prepare_cluster_data(&members, &labels, &points)?;

        debug!(k, points = points.len(), "recomputed cluster cut");
        Ok(PlotData { points, clusters })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linkage::SingleLinkage;
    use std::cell::Cell;

    /// Test reducer: first two vector components, counting invocations.
    struct HeadReducer {
        calls: Cell<usize>,
    }

    impl HeadReducer {
        fn new() -> Self {
            Self { calls: Cell::new(0) }
        }
    }

    impl Reducer for HeadReducer {
        fn reduce(&self, vectors: &[Vec<f32>]) -> Result<Vec<[f32; 2]>> {
            self.calls.set(self.calls.get() + 1);
            Ok(vectors
                .iter()
                .map(|v| [v.first().copied().unwrap_or(0.0), v.get(1).copied().unwrap_or(0.0)])
                .collect())
        }
    }

    fn doc(title: &str, year: i32, citations: u64) -> Document {
        Document {
            title: title.to_owned(),
            abstract_text: format!("about {title}"),
            year,
            citation_count: citations,
            influential_citation_count: 1,
            url: format!("https://example.org/{title}"),
        }
    }

    fn tokens(words: &[&str]) -> TokenList {
        words.iter().map(|w| (*w).to_owned()).collect()
    }

    /// Two topical groups: rna/gene documents and brain/neuron documents.
    fn corpus() -> (WordVectors, Vec<Document>, Vec<TokenList>) {
        let model = WordVectors::from_pairs([
            ("rna", vec![1.0, 0.0]),
            ("gene", vec![0.9, 0.1]),
            ("brain", vec![0.0, 1.0]),
            ("neuron", vec![0.1, 0.9]),
        ])
        .unwrap();
        let documents = vec![
            doc("rna-one", 2015, 120),
            doc("rna-two", 2018, 40),
            doc("rna-three", 2020, 5),
            doc("brain-one", 2012, 300),
            doc("brain-two", 2021, 0),
            doc("brain-three", 2019, 17),
        ];
        let token_lists = vec![
            tokens(&["rna", "gene", "expression"]),
            tokens(&["gene", "rna"]),
            tokens(&["rna", "sequencing"]),
            tokens(&["brain", "neuron", "cortex"]),
            tokens(&["neuron", "brain"]),
            tokens(&["brain", "memory"]),
        ];
        (model, documents, token_lists)
    }

    #[test]
    fn analyze_produces_aligned_plot_data() {
        let (model, documents, token_lists) = corpus();
        let mut pipeline = Pipeline::new(model, HeadReducer::new(), SingleLinkage::new())
            .with_config(PipelineConfig {
                cluster_count: 2,
                n_keywords: 3,
                max_year: 2022,
            });

        let data = pipeline.analyze(documents, token_lists).unwrap();

        assert_eq!(data.points.len(), 6);
        assert_eq!(data.clusters.len(), 2);
        for (rank, point) in data.points.iter().enumerate() {
            assert_eq!(point.rank, rank);
            assert!(!point.cluster.is_empty());
        }
        // The two topical groups land in different clusters.
        assert_eq!(data.points[0].cluster, data.points[1].cluster);
        assert_eq!(data.points[3].cluster, data.points[4].cluster);
        assert_ne!(data.points[0].cluster, data.points[3].cluster);
    }

    #[test]
    fn changing_k_does_not_rerun_the_reducer() {
        let (model, documents, token_lists) = corpus();
        let mut pipeline = Pipeline::new(model, HeadReducer::new(), SingleLinkage::new())
            .with_config(PipelineConfig {
                cluster_count: 2,
                n_keywords: 2,
                max_year: 2022,
            });

        pipeline.analyze(documents, token_lists).unwrap();
        assert_eq!(pipeline.reducer.calls.get(), 1);

        for k in [1, 3, 6] {
            let data = pipeline.set_cluster_count(k).unwrap();
            assert_eq!(data.clusters.len(), k);
            assert_eq!(data.points.len(), 6);
        }
        assert_eq!(pipeline.reducer.calls.get(), 1, "embedding must stay cached");
    }

    #[test]
    fn recut_is_stable_across_calls() {
        let (model, documents, token_lists) = corpus();
        let mut pipeline = Pipeline::new(model, HeadReducer::new(), SingleLinkage::new())
            .with_config(PipelineConfig {
                cluster_count: 2,
                n_keywords: 2,
                max_year: 2022,
            });

        pipeline.analyze(documents, token_lists).unwrap();
        let first = pipeline.set_cluster_count(3).unwrap();
        let second = pipeline.set_cluster_count(3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn set_cluster_count_before_analyze_fails() {
        let (model, _, _) = corpus();
        let pipeline = Pipeline::new(model, HeadReducer::new(), SingleLinkage::new());
        assert!(matches!(
            pipeline.set_cluster_count(2),
            Err(Error::NoAnalysis)
        ));
    }

    #[test]
    fn invalid_k_propagates_from_the_cutter() {
        let (model, documents, token_lists) = corpus();
        let mut pipeline =
            Pipeline::new(model, HeadReducer::new(), SingleLinkage::new())
                .with_config(PipelineConfig {
                    cluster_count: 2,
                    n_keywords: 2,
                    max_year: 2022,
                });

        pipeline.analyze(documents, token_lists).unwrap();
        assert!(matches!(
            pipeline.set_cluster_count(7),
            Err(Error::InvalidClusterCount { requested: 7, n_docs: 6 })
        ));
    }

    #[test]
    fn misaligned_tokens_are_rejected_up_front() {
        let (model, documents, mut token_lists) = corpus();
        token_lists.pop();
        let mut pipeline =
            Pipeline::new(model, HeadReducer::new(), SingleLinkage::new());
        assert!(matches!(
            pipeline.analyze(documents, token_lists),
            Err(Error::LengthMismatch { what: "token list", .. })
        ));
    }

    #[test]
    fn new_analysis_replaces_the_previous_session() {
        let (model, documents, token_lists) = corpus();
        let mut pipeline = Pipeline::new(model, HeadReducer::new(), SingleLinkage::new())
            .with_config(PipelineConfig {
                cluster_count: 2,
                n_keywords: 2,
                max_year: 2022,
            });

        pipeline.analyze(documents, token_lists).unwrap();

        let small_docs = vec![doc("solo-a", 2020, 3), doc("solo-b", 2021, 8)];
        let small_tokens = vec![tokens(&["rna"]), tokens(&["brain"])];
        pipeline.analyze(small_docs, small_tokens).unwrap();

        // The old six-document tree is gone; k=6 is now out of range.
        assert!(matches!(
            pipeline.set_cluster_count(6),
            Err(Error::InvalidClusterCount { requested: 6, n_docs: 2 })
        ));
    }
}

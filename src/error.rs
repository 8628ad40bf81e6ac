use thiserror::Error;

/// Errors returned by the pipeline stages in this crate.
///
/// Configuration errors ([`Error::EmptyModel`], [`Error::EmptyVocabulary`])
/// and contract violations ([`Error::MalformedTree`], [`Error::LengthMismatch`])
/// abort the current analysis. Per-document degeneracies (a document with no
/// known words, a citation count of zero) are not errors; they are absorbed
/// by defined fallback values at the stage that encounters them.
#[derive(Debug, Error)]
pub enum Error {
    /// The document set is empty.
    #[error("empty corpus")]
    EmptyCorpus,

    /// The word-vector model contains no entries, so the sentence-vector
    /// dimensionality cannot be determined.
    #[error("word-vector model is empty: dimensionality cannot be determined")]
    EmptyModel,

    /// Tokenization left no countable terms anywhere in the corpus.
    #[error("corpus produced an empty vocabulary")]
    EmptyVocabulary,

    /// Requested cluster count is incompatible with the corpus.
    #[error("invalid cluster count: requested {requested}, but corpus has {n_docs} documents")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Number of documents in the corpus.
        n_docs: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// A cut of the cluster tree did not partition the document indices.
    #[error("malformed cluster tree: document index {index} {problem}")]
    MalformedTree {
        /// Offending document index.
        index: usize,
        /// What went wrong with it.
        problem: &'static str,
    },

    /// Two index-aligned collections disagree on length.
    #[error("{what} length mismatch: expected {expected}, found {found}")]
    LengthMismatch {
        /// Which collection is misaligned.
        what: &'static str,
        /// Expected length.
        expected: usize,
        /// Found length.
        found: usize,
    },

    /// The cheap recompute path was invoked before any analysis cached its
    /// artifacts.
    #[error("no cached analysis: run analyze before changing the cluster count")]
    NoAnalysis,

    /// An artifact failed to cross the store boundary.
    #[error("artifact serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;

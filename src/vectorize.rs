//! Sentence vectors from a pre-trained word-vector model.
//!
//! One document becomes one fixed-length vector: the element-wise mean of
//! the word vectors of its tokens, skipping tokens the model does not know.
//! A document whose tokens are all unknown is *not* dropped; it gets the
//! zero vector of the model dimensionality and sits at the origin of vector
//! space, where the embedding step treats it like any other point.

use std::collections::HashMap;

use crate::document::TokenList;
use crate::error::{Error, Result};

/// Word → vector lookup table (a pre-trained word-vector model).
///
/// Every vector has the same dimensionality, fixed at construction. An empty
/// model is rejected up front: without at least one entry the sentence-vector
/// dimensionality cannot be determined, which is a configuration error
/// rather than a per-document one.
#[derive(Clone, Debug)]
pub struct WordVectors {
    vectors: HashMap<String, Vec<f32>>,
    dim: usize,
}

impl WordVectors {
    /// Build a model from a token → vector mapping.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyModel`] when the mapping is empty or the vectors have
    /// zero length; [`Error::LengthMismatch`] when the rows disagree on
    /// dimensionality.
    pub fn new(vectors: HashMap<String, Vec<f32>>) -> Result<Self> {
        let dim = vectors.values().next().map(Vec::len).ok_or(Error::EmptyModel)?;
        if dim == 0 {
            return Err(Error::EmptyModel);
        }
        for vector in vectors.values() {
            if vector.len() != dim {
                return Err(Error::LengthMismatch {
                    what: "word vector",
                    expected: dim,
                    found: vector.len(),
                });
            }
        }
        Ok(Self { vectors, dim })
    }

    /// Build a model from `(token, vector)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        let vectors = pairs
            .into_iter()
            .map(|(token, vector)| (token.into(), vector))
            .collect();
        Self::new(vectors)
    }

    /// Vector dimensionality of the model.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Look up the vector for a token.
    pub fn get(&self, token: &str) -> Option<&[f32]> {
        self.vectors.get(token).map(Vec::as_slice)
    }

    /// Number of tokens in the model.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the model is empty (never true for a constructed model).
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

/// Mean-pool one token list into a sentence vector.
///
/// Tokens absent from the model are skipped. When no token matches, returns
/// the zero vector of the model dimensionality.
pub fn sentence_vector(tokens: &[String], model: &WordVectors) -> Vec<f32> {
    let mut sum = vec![0.0f32; model.dim()];
    let mut matched = 0usize;

    for token in tokens {
        if let Some(vector) = model.get(token) {
            for (acc, x) in sum.iter_mut().zip(vector) {
                *acc += x;
            }
            matched += 1;
        }
    }

    if matched > 0 {
        let inv = 1.0 / matched as f32;
        for acc in &mut sum {
            *acc *= inv;
        }
    }
    sum
}

/// Mean-pool every token list of a corpus, index-aligned with the input.
pub fn sentence_vectors(token_lists: &[TokenList], model: &WordVectors) -> Vec<Vec<f32>> {
    token_lists
        .iter()
        .map(|tokens| sentence_vector(tokens, model))
        .collect()
}

/// Cosine distance `1 - cos(a, b)`.
///
/// Edge cases: `0.0` when both vectors are all-zero, `1.0` when exactly one
/// is. All-unknown documents sit at the origin, so the zero vector must
/// still compare cleanly against every other point.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    match (norm_a > 0.0, norm_b > 0.0) {
        (true, true) => 1.0 - dot / (norm_a.sqrt() * norm_b.sqrt()),
        (false, false) => 0.0,
        _ => 1.0,
    }
}

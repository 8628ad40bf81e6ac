//! Term weighting for the keyword labeler.
//!
//! A [`TermWeights`] holds one dense weight vector per document over a
//! single shared vocabulary, which is exactly the shape the labeler
//! averages over. The default construction is plain TF-IDF:
//! `weight = tf × ln(n_docs / df)`, with the vocabulary ordered by first
//! appearance across the corpus. That order matters downstream: it is the
//! tie-break order when keywords are ranked.
//!
//! Callers with their own weighting engine can build a [`TermWeights`] from
//! raw parts instead; the labeler only relies on the vocabulary/matrix
//! alignment, not on how the weights were produced.

use std::collections::HashMap;

use tracing::debug;

use crate::document::TokenList;
use crate::error::{Error, Result};

/// Per-document term-weight vectors over one shared vocabulary.
#[derive(Clone, Debug, PartialEq)]
pub struct TermWeights {
    vocabulary: Vec<String>,
    weights: Vec<Vec<f32>>,
}

impl TermWeights {
    /// Compute TF-IDF weights for a corpus of token lists.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCorpus`] for an empty corpus and
    /// [`Error::EmptyVocabulary`] when no document contributes a single
    /// term. Blank labels would be the only possible output, so this is
    /// fatal for the corpus rather than silently degraded.
    pub fn from_tokens(token_lists: &[TokenList]) -> Result<Self> {
        if token_lists.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        // Vocabulary in first-appearance order.
        let mut term_index: HashMap<&str, usize> = HashMap::new();
        let mut vocabulary: Vec<String> = Vec::new();
        for tokens in token_lists {
            for token in tokens {
                if !term_index.contains_key(token.as_str()) {
                    term_index.insert(token.as_str(), vocabulary.len());
                    vocabulary.push(token.clone());
                }
            }
        }
        if vocabulary.is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        // Raw term counts per document, and document frequency per term.
        let n_docs = token_lists.len();
        let n_terms = vocabulary.len();
        let mut counts: Vec<Vec<f32>> = Vec::with_capacity(n_docs);
        let mut df = vec![0u32; n_terms];
        for tokens in token_lists {
            let mut row = vec![0.0f32; n_terms];
            for token in tokens {
                row[term_index[token.as_str()]] += 1.0;
            }
            for (term, &count) in row.iter().enumerate() {
                if count > 0.0 {
                    df[term] += 1;
                }
            }
            counts.push(row);
        }

        // tf × ln(n / df). A term in every document weighs zero.
        let idf: Vec<f32> = df
            .iter()
            .map(|&d| (n_docs as f32 / d as f32).ln())
            .collect();
        for row in &mut counts {
            for (weight, factor) in row.iter_mut().zip(&idf) {
                *weight *= factor;
            }
        }

        debug!(
            documents = n_docs,
            terms = n_terms,
            "computed term weights"
        );
        Ok(Self {
            vocabulary,
            weights: counts,
        })
    }

    /// Wrap an externally computed vocabulary and weight matrix.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyVocabulary`] for an empty vocabulary;
    /// [`Error::LengthMismatch`] when any row's length differs from the
    /// vocabulary's.
    pub fn from_parts(vocabulary: Vec<String>, weights: Vec<Vec<f32>>) -> Result<Self> {
        if vocabulary.is_empty() {
            return Err(Error::EmptyVocabulary);
        }
        for row in &weights {
            if row.len() != vocabulary.len() {
                return Err(Error::LengthMismatch {
                    what: "term-weight vector",
                    expected: vocabulary.len(),
                    found: row.len(),
                });
            }
        }
        Ok(Self { vocabulary, weights })
    }

    /// The shared vocabulary, in ranking tie-break order.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// The weight vector of one document.
    pub fn document(&self, index: usize) -> &[f32] {
        &self.weights[index]
    }

    /// Number of documents.
    pub fn n_docs(&self) -> usize {
        self.weights.len()
    }

    /// Number of vocabulary terms.
    pub fn n_terms(&self) -> usize {
        self.vocabulary.len()
    }
}

//! Session-scoped artifact cache.
//!
//! The expensive per-corpus artifacts (documents, token lists, 2-D embedding,
//! cluster tree) are computed once per query and cached here so that changing
//! the cluster count only reruns the cheap tail of the pipeline. The store is
//! an explicit, injectable interface rather than a process-wide singleton:
//! the pipeline owns whichever implementation the caller hands it, and tests
//! substitute [`MemoryStore`] freely.
//!
//! Values are stored as JSON strings, mirroring the string-valued session
//! storage the store abstracts over. [`put`] and [`get`] move typed values
//! across that boundary; `get` distinguishes "never stored" (`Ok(None)`)
//! from a payload that fails to deserialize (`Err`).

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// Logical artifact names, one per cached pipeline product.
pub mod artifact {
    /// The retrieved document records.
    pub const DOCUMENTS: &str = "documents";
    /// Per-document token lists.
    pub const TOKENS: &str = "tokens";
    /// Per-document 2-D embedding points.
    pub const EMBEDDING: &str = "embedding";
    /// The hierarchical cluster tree.
    pub const TREE: &str = "tree";
}

/// A string-valued key/value store scoped to one analysis session.
///
/// Exactly one writer per logical artifact name per session; readers only
/// read artifacts after the corresponding write has completed.
pub trait ArtifactStore {
    /// Store `json` under `name`, replacing any previous value.
    fn put_raw(&mut self, name: &str, json: String);

    /// Return the stored value for `name`, or `None` if never stored.
    fn get_raw(&self, name: &str) -> Option<String>;

    /// Drop every stored artifact (start of a new analysis session).
    fn clear(&mut self);
}

/// In-memory [`ArtifactStore`] backed by a `HashMap`.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored artifacts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no artifacts.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ArtifactStore for MemoryStore {
    fn put_raw(&mut self, name: &str, json: String) {
        self.entries.insert(name.to_owned(), json);
    }

    fn get_raw(&self, name: &str) -> Option<String> {
        self.entries.get(name).cloned()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Serialize `value` and store it under `name`.
pub fn put<S, T>(store: &mut S, name: &str, value: &T) -> Result<()>
where
    S: ArtifactStore + ?Sized,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.put_raw(name, json);
    Ok(())
}

/// Load and deserialize the artifact stored under `name`.
///
/// Returns `Ok(None)` when the artifact was never stored.
pub fn get<S, T>(store: &S, name: &str) -> Result<Option<T>>
where
    S: ArtifactStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get_raw(name) {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

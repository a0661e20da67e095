//! Candidate records and candidate pools.
//!
//! A [`Candidate`] is one known plugin version, either already installed or
//! offered by a registry. Candidates are immutable once built: fields are only
//! reachable through accessors, and the builder methods consume the value.
//! A [`CandidatePool`] is the name-keyed set of candidates from one source; the
//! resolver borrows two of them (installed and registry) and never mutates them.
//!
//! # Loading pools
//!
//! The surrounding plugin manager keeps its indices as JSON. Either of these
//! shapes is accepted by [`CandidatePool::from_json_str`]:
//!
//! ```json
//! [
//!   { "name": "logger", "version": "1.5.0", "dependencies": { "fmt": "^2.0.0" } }
//! ]
//! ```
//!
//! ```json
//! { "logger": { "version": "1.5.0", "dependencies": { "fmt": "^2.0.0" } } }
//! ```
//!
//! The pool's own source tag is stamped on every loaded candidate, so index
//! files do not need to carry it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::core::PlugdepError;

/// Dependency name → constraint expression.
///
/// Ordered by name so that every traversal of declared dependencies, and
/// therefore every resolution result, is deterministic.
pub type DependencyMap = BTreeMap<String, String>;

/// Where a candidate comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateSource {
    /// Currently installed plugin
    Installed,
    /// Available from a registry
    Registry,
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Installed => write!(f, "installed"),
            Self::Registry => write!(f, "registry"),
        }
    }
}

/// One known plugin version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    name: String,
    version: String,
    #[serde(default)]
    dependencies: DependencyMap,
    source: CandidateSource,
}

impl Candidate {
    /// Create a candidate with no dependencies.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        source: CandidateSource,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            dependencies: DependencyMap::new(),
            source,
        }
    }

    /// Create an installed candidate.
    pub fn installed(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::new(name, version, CandidateSource::Installed)
    }

    /// Create a registry candidate.
    pub fn registry(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::new(name, version, CandidateSource::Registry)
    }

    /// Declare a dependency on `name` with the given constraint expression.
    #[must_use]
    pub fn with_dependency(mut self, name: impl Into<String>, constraint: impl Into<String>) -> Self {
        self.dependencies.insert(name.into(), constraint.into());
        self
    }

    /// Replace the declared dependencies.
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: DependencyMap) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Plugin name, unique within its pool.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw version string as recorded.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Declared dependencies of this plugin version.
    pub fn dependencies(&self) -> &DependencyMap {
        &self.dependencies
    }

    /// Source pool tag.
    pub fn source(&self) -> CandidateSource {
        self.source
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} ({})", self.name, self.version, self.source)
    }
}

/// Candidate as written in an index file. The name may come from the
/// surrounding map key, and the source from the pool being loaded.
#[derive(Deserialize)]
struct CandidateEntry {
    #[serde(default)]
    name: Option<String>,
    version: String,
    #[serde(default)]
    dependencies: DependencyMap,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PoolDocument {
    List(Vec<CandidateEntry>),
    Map(BTreeMap<String, CandidateEntry>),
}

/// Name-keyed candidates from a single source.
///
/// Serializes as `{ "source": ..., "candidates": [...] }`. On deserialization
/// every candidate is re-tagged with the pool's source and a repeated name
/// replaces the earlier entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "PoolRecord", from = "PoolRecord")]
pub struct CandidatePool {
    source: CandidateSource,
    candidates: BTreeMap<String, Candidate>,
}

impl CandidatePool {
    /// Create an empty pool for `source`.
    #[must_use]
    pub fn new(source: CandidateSource) -> Self {
        Self {
            source,
            candidates: BTreeMap::new(),
        }
    }

    /// Create an empty installed pool.
    #[must_use]
    pub fn installed() -> Self {
        Self::new(CandidateSource::Installed)
    }

    /// Create an empty registry pool.
    #[must_use]
    pub fn registry() -> Self {
        Self::new(CandidateSource::Registry)
    }

    /// Add a candidate, re-tagging it with this pool's source.
    ///
    /// Returns the candidate previously stored under the same name.
    pub fn insert(&mut self, mut candidate: Candidate) -> Option<Candidate> {
        candidate.source = self.source;
        self.candidates.insert(candidate.name.clone(), candidate)
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, candidate: Candidate) -> Self {
        self.insert(candidate);
        self
    }

    /// Look up a candidate by plugin name.
    pub fn get(&self, name: &str) -> Option<&Candidate> {
        self.candidates.get(name)
    }

    /// Whether a candidate named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.candidates.contains_key(name)
    }

    /// Candidates ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.values()
    }

    /// The source every candidate in this pool carries.
    pub fn source(&self) -> CandidateSource {
        self.source
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the pool has no candidates.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Load a pool from a JSON index (array of candidates or name-keyed object).
    ///
    /// When the same name appears twice the last entry wins. In the object form
    /// the key is authoritative over an embedded `name` field.
    pub fn from_json_str(source: CandidateSource, json: &str) -> Result<Self, PlugdepError> {
        let document: PoolDocument = serde_json::from_str(json)?;
        let mut pool = Self::new(source);

        let entries: Vec<(String, CandidateEntry)> = match document {
            PoolDocument::List(list) => {
                let mut entries = Vec::with_capacity(list.len());
                for entry in list {
                    let Some(name) = entry.name.clone() else {
                        return Err(PlugdepError::Other {
                            message: format!(
                                "candidate with version '{}' has no name",
                                entry.version
                            ),
                        });
                    };
                    entries.push((name, entry));
                }
                entries
            }
            PoolDocument::Map(map) => map.into_iter().collect(),
        };

        for (name, entry) in entries {
            if let Some(embedded) = &entry.name
                && embedded != &name
            {
                tracing::warn!("Index key '{}' overrides embedded candidate name '{}'", name, embedded);
            }

            let candidate =
                Candidate::new(name, entry.version, source).with_dependencies(entry.dependencies);
            if let Some(previous) = pool.insert(candidate) {
                tracing::warn!(
                    "Duplicate {} candidate '{}': replacing version {}",
                    source,
                    previous.name(),
                    previous.version()
                );
            }
        }

        tracing::debug!("Loaded {} {} candidates", pool.len(), source);
        Ok(pool)
    }

    /// Serialize the pool as a JSON array of candidates.
    pub fn to_json_string(&self) -> Result<String, PlugdepError> {
        let list: Vec<&Candidate> = self.iter().collect();
        Ok(serde_json::to_string_pretty(&list)?)
    }
}

/// Serialized form of a [`CandidatePool`].
#[derive(Serialize, Deserialize)]
struct PoolRecord {
    source: CandidateSource,
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl From<CandidatePool> for PoolRecord {
    fn from(pool: CandidatePool) -> Self {
        Self {
            source: pool.source,
            candidates: pool.candidates.into_values().collect(),
        }
    }
}

impl From<PoolRecord> for CandidatePool {
    fn from(record: PoolRecord) -> Self {
        let mut pool = Self::new(record.source);
        for candidate in record.candidates {
            pool.insert(candidate);
        }
        pool
    }
}

impl<'a> IntoIterator for &'a CandidatePool {
    type Item = &'a Candidate;
    type IntoIter = std::collections::btree_map::Values<'a, String, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.values()
    }
}

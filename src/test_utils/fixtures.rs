//! Candidate pool fixtures.

use crate::config::ResolverConfig;
use crate::models::{Candidate, CandidatePool, DependencyMap};
use crate::resolver::{ResolutionResult, Resolver};

/// Build a [`DependencyMap`] from `(name, constraint)` pairs.
pub fn deps(pairs: &[(&str, &str)]) -> DependencyMap {
    pairs.iter().map(|(name, constraint)| (name.to_string(), constraint.to_string())).collect()
}

/// An installed pool and a registry pool built side by side.
#[derive(Debug, Clone)]
pub struct PoolFixture {
    /// Installed candidates
    pub installed: CandidatePool,
    /// Registry candidates
    pub registry: CandidatePool,
}

impl Default for PoolFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl PoolFixture {
    /// Two empty pools.
    pub fn new() -> Self {
        Self {
            installed: CandidatePool::installed(),
            registry: CandidatePool::registry(),
        }
    }

    /// Add an installed candidate.
    #[must_use]
    pub fn installed(mut self, name: &str, version: &str, dependencies: &[(&str, &str)]) -> Self {
        self.installed.insert(Candidate::installed(name, version).with_dependencies(deps(dependencies)));
        self
    }

    /// Add a registry candidate.
    #[must_use]
    pub fn registry(mut self, name: &str, version: &str, dependencies: &[(&str, &str)]) -> Self {
        self.registry.insert(Candidate::registry(name, version).with_dependencies(deps(dependencies)));
        self
    }

    /// Resolver over these pools with the default configuration.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.installed, &self.registry)
    }

    /// Resolver over these pools with `config`.
    pub fn resolver_with(&self, config: ResolverConfig) -> Resolver<'_> {
        Resolver::with_config(&self.installed, &self.registry, config)
    }

    /// Resolve `declared` for `root` with the default configuration.
    pub fn resolve(&self, root: &str, declared: &DependencyMap) -> ResolutionResult {
        self.resolver().resolve_dependencies(root, declared)
    }
}

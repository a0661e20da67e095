//! Dependency resolution for plugins.
//!
//! This module turns a plugin's declared dependency constraints into concrete
//! versions and an installation order, using two caller-supplied candidate
//! pools.
//!
//! # Algorithm
//!
//! [`Resolver::resolve_dependencies`] runs these steps, in order:
//!
//! 1. **Graph building** ([`GraphBuilder`]) - walk the declared dependencies
//!    through both pools, breadth first, visiting each name once.
//! 2. **Cycle detection** ([`CycleDetector`]) - on a cycle, return a single
//!    `CIRCULAR_DEPENDENCY` error immediately; nothing else is attempted.
//! 3. **Version selection** - for each declared `(name, constraint)`, the
//!    installed candidate wins if it satisfies the constraint, otherwise the
//!    registry candidate if it does; if neither, a `DEPENDENCY_NOT_FOUND`
//!    error is recorded and the remaining dependencies are still processed.
//! 4. **Conflict scan** ([`ConflictService`]) - every other installed plugin's
//!    constraint on a resolved name is checked; violations become
//!    `VERSION_CONFLICT` warnings.
//! 5. **Ordering** ([`InstallOrderer`]) - Kahn's algorithm over the graph,
//!    oriented per
//!    [`InstallOrderConvention`](crate::config::InstallOrderConvention).
//!
//! `success` is true iff no errors were recorded. Warnings never fail a
//! resolution.
//!
//! # Install order contract
//!
//! With the default configuration, [`ResolutionResult::install_order`] lists
//! leaf dependencies first and the root last, so an installer can process it
//! front to back. It contains every graph node, including transitive
//! dependencies and the root itself, but never unresolved names.
//!
//! # Concurrency
//!
//! A [`Resolver`] only borrows its pools and holds no mutable state. Calls are
//! independent and the resolver can be shared between threads.
//!
//! # Example
//!
//! ```rust
//! use plugdep::models::{Candidate, CandidatePool, DependencyMap};
//! use plugdep::resolver::{IssueKind, Resolver};
//!
//! let installed = CandidatePool::installed()
//!     .with(Candidate::installed("p", "1.0.0").with_dependency("y", "^2.0.0"));
//! let registry = CandidatePool::registry().with(Candidate::registry("y", "3.0.0"));
//!
//! let mut declared = DependencyMap::new();
//! declared.insert("y".to_string(), "^3.0.0".to_string());
//!
//! let result = Resolver::new(&installed, &registry).resolve_dependencies("root", &declared);
//! assert!(result.success);
//! assert_eq!(result.resolved["y"], "3.0.0");
//! assert_eq!(result.warnings[0].kind, IssueKind::VersionConflict);
//! assert_eq!(result.install_order, vec!["y", "root"]);
//! ```

use crate::config::ResolverConfig;
use crate::core::PlugdepError;
use crate::models::{Candidate, CandidatePool, DependencyMap};

pub mod conflict_service;
pub mod cycle_detector;
pub mod dependency_graph;
pub mod install_order;
pub mod types;

pub use conflict_service::ConflictService;
pub use cycle_detector::CycleDetector;
pub use dependency_graph::{DependencyGraph, DependencyNode, GraphBuilder, NodeOrigin};
pub use install_order::InstallOrderer;
pub use types::{IssueKind, ResolutionIssue, ResolutionResult};

/// Resolves declared dependencies against an installed and a registry pool.
#[derive(Debug, Clone)]
pub struct Resolver<'a> {
    installed: &'a CandidatePool,
    registry: &'a CandidatePool,
    config: ResolverConfig,
}

impl<'a> Resolver<'a> {
    /// Create a resolver with the default configuration.
    pub fn new(installed: &'a CandidatePool, registry: &'a CandidatePool) -> Self {
        Self::with_config(installed, registry, ResolverConfig::default())
    }

    /// Create a resolver with an explicit configuration.
    pub fn with_config(
        installed: &'a CandidatePool,
        registry: &'a CandidatePool,
        config: ResolverConfig,
    ) -> Self {
        Self {
            installed,
            registry,
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve `declared` for the plugin named `root`.
    ///
    /// [`DependencyMap`] is ordered by name, so `DEPENDENCY_NOT_FOUND` errors
    /// come out in dependency-name order, not in the order the caller
    /// declared them.
    ///
    /// # Panics
    ///
    /// Panics if `root` is empty or whitespace. That is a caller programming
    /// error; use [`try_resolve_dependencies`](Self::try_resolve_dependencies)
    /// to get it as an error value instead.
    pub fn resolve_dependencies(&self, root: &str, declared: &DependencyMap) -> ResolutionResult {
        match self.try_resolve_dependencies(root, declared) {
            Ok(result) => result,
            Err(e) => panic!("resolve_dependencies called with invalid input: {e}"),
        }
    }

    /// Resolve `declared` for the plugin named `root`, rejecting an empty root.
    ///
    /// Resolution problems (cycles, missing dependencies, conflicts) are
    /// reported inside the returned [`ResolutionResult`], never as `Err`.
    /// Errors are listed in dependency-name order.
    pub fn try_resolve_dependencies(
        &self,
        root: &str,
        declared: &DependencyMap,
    ) -> Result<ResolutionResult, PlugdepError> {
        if root.trim().is_empty() {
            return Err(PlugdepError::InvalidRootName);
        }

        tracing::debug!("Resolving {} declared dependencies for '{}'", declared.len(), root);

        let graph = self.graph_builder().build(root, declared);

        let cycle = CycleDetector::detect(&graph);
        if !cycle.is_empty() {
            tracing::debug!("Aborting resolution for '{}': dependency cycle", root);
            return Ok(ResolutionResult::cycle(cycle));
        }

        let mut result = ResolutionResult::default();

        for (name, constraint) in declared {
            match self.select_candidate(name, constraint) {
                Some(candidate) => {
                    tracing::debug!("Resolved {} {} -> {}", name, constraint, candidate);
                    result.resolved.insert(name.clone(), candidate.version().to_string());
                }
                None => {
                    tracing::debug!("No candidate for {} {}", name, constraint);
                    result.errors.push(ResolutionIssue::not_found(root, name, constraint));
                }
            }
        }

        if self.config.report_conflicts {
            result.warnings =
                ConflictService::new(self.installed).detect_version_conflicts(root, &result.resolved);
        }

        result.install_order = self.install_order(&graph);
        result.success = result.errors.is_empty();

        tracing::debug!("Resolution for '{}': {}", root, result.summary());
        Ok(result)
    }

    /// Build the dependency graph the resolver would use for `root`.
    pub fn build_graph(&self, root: &str, declared: &DependencyMap) -> DependencyGraph {
        self.graph_builder().build(root, declared)
    }

    fn graph_builder(&self) -> GraphBuilder<'a> {
        GraphBuilder::new(self.installed, self.registry).prefer_installed(self.config.prefer_installed)
    }

    /// First candidate, in pool preference order, whose version satisfies `constraint`.
    fn select_candidate(&self, name: &str, constraint: &str) -> Option<&'a Candidate> {
        self.pools_in_order()
            .into_iter()
            .filter_map(|pool| pool.get(name))
            .find(|candidate| crate::version::satisfies(candidate.version(), constraint))
    }

    fn pools_in_order(&self) -> [&'a CandidatePool; 2] {
        if self.config.prefer_installed {
            [self.installed, self.registry]
        } else {
            [self.registry, self.installed]
        }
    }

    fn install_order(&self, graph: &DependencyGraph) -> Vec<String> {
        self.config.install_order.apply(InstallOrderer::order(graph))
    }
}

/// Convenience wrapper: resolve with default configuration.
pub fn resolve_dependencies(
    installed: &CandidatePool,
    registry: &CandidatePool,
    root: &str,
    declared: &DependencyMap,
) -> ResolutionResult {
    Resolver::new(installed, registry).resolve_dependencies(root, declared)
}

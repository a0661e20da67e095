//! plugdep - dependency resolution for plugin managers
//!
//! Given a plugin's declared dependency constraints and two pools of known
//! candidates (what is installed, what a registry offers), plugdep decides
//! which concrete versions satisfy the constraints, detects circular and
//! unsatisfiable requirements, and produces an installation order.
//!
//! # Architecture Overview
//!
//! The crate is a pure, synchronous library. It never touches the network or
//! the filesystem for plugin data: the surrounding plugin manager loads its
//! indices, hands the pools to a [`resolver::Resolver`], and consumes the
//! returned [`resolver::ResolutionResult`].
//!
//! ```text
//! Resolver::resolve_dependencies(root, declared)
//!     -> GraphBuilder      (walk declared dependencies through both pools)
//!     -> CycleDetector     (abort on the first cycle)
//!     -> ConstraintMatcher (installed pool first, then registry)
//!     -> ConflictService   (other installed plugins' constraints)
//!     -> InstallOrderer    (Kahn's algorithm)
//!     -> ResolutionResult
//! ```
//!
//! # Core Modules
//!
//! - [`version`] - Version parsing, constraint matching and conflict reports
//! - [`models`] - Candidate records and candidate pools
//! - [`resolver`] - Graph construction, cycle detection, ordering and orchestration
//! - [`config`] - Resolver configuration loaded from TOML
//! - [`core`] - Error types and user-friendly error reporting
//!
//! # Example
//!
//! ```rust
//! use plugdep::models::{Candidate, CandidatePool, DependencyMap};
//! use plugdep::resolver::Resolver;
//!
//! let mut installed = CandidatePool::installed();
//! installed.insert(Candidate::installed("logger", "1.5.0"));
//! let registry = CandidatePool::registry();
//!
//! let mut declared = DependencyMap::new();
//! declared.insert("logger".to_string(), "^1.0.0".to_string());
//!
//! let result = Resolver::new(&installed, &registry).resolve_dependencies("my-plugin", &declared);
//! assert!(result.success);
//! assert_eq!(result.resolved["logger"], "1.5.0");
//! ```

// Core functionality modules
pub mod config;
pub mod core;
pub mod resolver;

// Supporting modules
pub mod constants;
pub mod models;
pub mod version;

// test_utils module is available for both unit tests and downstream test suites
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

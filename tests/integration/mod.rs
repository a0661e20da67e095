//! Integration test suite for plugdep
//!
//! End-to-end tests that drive the public API the way a plugin manager would:
//! build or load candidate pools, resolve a plugin's declared dependencies and
//! consume the resolution result.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **config**: Loading `resolver.toml` and its effect on resolution
//! - **pool_files**: JSON candidate indexes on disk
//! - **properties**: Property tests for constraint matching and ordering
//! - **resolution**: Full resolution scenarios

mod config;
mod pool_files;
mod properties;
mod resolution;

//! Constants shared across the resolver.
//!
//! Constraint syntax markers and display separators live here so the
//! matcher, the error types and the report formatting agree on them.

/// Constraint expressions that accept any version.
pub const WILDCARD_CONSTRAINTS: [&str; 2] = ["*", "latest"];

/// Prefix of a caret range (`^1.2.0`: same major, at least 1.2.0).
pub const CARET_PREFIX: char = '^';

/// Prefix of a tilde range (`~1.2.0`: same major.minor, at least 1.2.0).
pub const TILDE_PREFIX: char = '~';

/// Separator used when rendering a dependency cycle.
pub const CYCLE_SEPARATOR: &str = " → ";

/// Default location of the resolver configuration, relative to the plugin directory.
pub const DEFAULT_CONFIG_FILE: &str = "resolver.toml";

/// Deepest level [`DependencyGraph::to_tree_string`](crate::resolver::DependencyGraph::to_tree_string) expands.
pub const MAX_TREE_DEPTH: usize = 256;

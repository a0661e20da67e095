//! Constraint expressions and the satisfaction predicate.
//!
//! # Constraint Syntax Reference
//!
//! | Syntax | Description | Example |
//! |--------|-------------|---------|
//! | `*`, `latest` | Any version | `"*"` |
//! | `^1.2.0` | Same major, at least `1.2.0` | matches `1.2.0`, `1.9.1`, not `2.0.0` |
//! | `~1.2.0` | Same major.minor, at least `1.2.0` | matches `1.2.7`, not `1.3.0` |
//! | anything else | Exact string match on the raw version | `"1.2.0-beta"` |
//!
//! Matching is total: a malformed version or a malformed range yields `false`,
//! never an error. A range whose operand cannot be parsed therefore never
//! matches, and an unparseable candidate version only ever satisfies a
//! wildcard or an identical exact constraint.
//!
//! ```rust
//! use plugdep::version::satisfies;
//!
//! assert!(satisfies("1.2.3", "^1.2.0"));
//! assert!(!satisfies("2.0.0", "^1.2.0"));
//! assert!(satisfies("1.2.5", "~1.2.0"));
//! assert!(!satisfies("1.3.0", "~1.2.0"));
//! assert!(!satisfies("garbage", "^1.0.0"));
//! ```

use std::fmt;

use super::{ParsedVersion, parse_version};
use crate::constants::{CARET_PREFIX, TILDE_PREFIX, WILDCARD_CONSTRAINTS};

/// A parsed constraint expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionConstraint {
    /// `*` or `latest`: every version matches.
    Any,
    /// `^X.Y.Z`: same major, minor.patch at least `Y.Z`.
    Caret(ParsedVersion),
    /// `~X.Y.Z`: same major.minor, patch at least `Z`.
    Tilde(ParsedVersion),
    /// Any other expression, compared verbatim with the raw version string.
    Exact(String),
}

impl VersionConstraint {
    /// Parse a constraint expression.
    ///
    /// Surrounding whitespace is ignored. Returns `None` when a caret or tilde
    /// range has an operand that is not a version.
    #[must_use]
    pub fn parse(expression: &str) -> Option<Self> {
        let expression = expression.trim();

        if WILDCARD_CONSTRAINTS.contains(&expression) {
            return Some(Self::Any);
        }

        if let Some(rest) = expression.strip_prefix(CARET_PREFIX) {
            return parse_version(rest).map(Self::Caret);
        }

        if let Some(rest) = expression.strip_prefix(TILDE_PREFIX) {
            return parse_version(rest).map(Self::Tilde);
        }

        Some(Self::Exact(expression.to_string()))
    }

    /// Check whether a raw version string satisfies this constraint.
    #[must_use]
    pub fn matches(&self, version: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(expected) => version == expected,
            Self::Caret(floor) => parse_version(version).is_some_and(|v| {
                v.major == floor.major
                    && (v.minor > floor.minor || (v.minor == floor.minor && v.patch >= floor.patch))
            }),
            Self::Tilde(floor) => parse_version(version).is_some_and(|v| {
                v.major == floor.major && v.minor == floor.minor && v.patch >= floor.patch
            }),
        }
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "*"),
            Self::Caret(v) => write!(f, "{CARET_PREFIX}{v}"),
            Self::Tilde(v) => write!(f, "{TILDE_PREFIX}{v}"),
            Self::Exact(s) => write!(f, "{s}"),
        }
    }
}

/// Stateless entry point for constraint checks.
pub struct ConstraintMatcher;

impl ConstraintMatcher {
    /// Does `version` satisfy `constraint`? Never fails; malformed input is `false`.
    #[must_use]
    pub fn satisfies(version: &str, constraint: &str) -> bool {
        VersionConstraint::parse(constraint).is_some_and(|c| c.matches(version))
    }

    /// Parse a constraint expression; see [`VersionConstraint::parse`].
    #[must_use]
    pub fn parse(constraint: &str) -> Option<VersionConstraint> {
        VersionConstraint::parse(constraint)
    }
}

/// Shorthand for [`ConstraintMatcher::satisfies`].
#[must_use]
pub fn satisfies(version: &str, constraint: &str) -> bool {
    ConstraintMatcher::satisfies(version, constraint)
}

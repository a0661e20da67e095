//! Version parsing, constraint matching and conflict reporting.
//!
//! # Module Organization
//!
//! - this module - [`ParsedVersion`] and [`parse_version`], the numeric triple parser
//! - [`constraints`] - Constraint expressions and the [`ConstraintMatcher`] predicate
//! - [`conflict`] - Human-readable reports of cross-plugin version conflicts
//!
//! # Version Format
//!
//! A plugin version is a string that begins with three dot-separated integers,
//! optionally followed by pre-release or build text: `1.4.0`, `2.0.0-beta.1`,
//! `3.1.2+build.7`. Only the leading `major.minor.patch` triple takes part in
//! range comparisons; suffixes are ignored. A string that does not start with
//! such a triple has no parsed form.
//!
//! ```rust
//! use plugdep::version::parse_version;
//!
//! let version = parse_version("2.10.3-rc.1").unwrap();
//! assert_eq!((version.major, version.minor, version.patch), (2, 10, 3));
//! assert!(parse_version("v2.10.3").is_none());
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::core::PlugdepError;

pub mod conflict;
pub mod constraints;

pub use conflict::{ConflictingRequirement, VersionConflict};
pub use constraints::{ConstraintMatcher, VersionConstraint, satisfies};

/// Leading `major.minor.patch` triple. ASCII digits only: `\d` would accept
/// other Unicode decimal digits that `u64::from_str` rejects.
static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)").expect("version pattern is a valid regex")
});

/// The numeric `major.minor.patch` components of a version string.
///
/// Ordering compares major, then minor, then patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParsedVersion {
    /// Major version number
    pub major: u64,
    /// Minor version number
    pub minor: u64,
    /// Patch version number
    pub patch: u64,
}

impl ParsedVersion {
    /// Create a version from its components.
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for ParsedVersion {
    type Err = PlugdepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_version(s).ok_or_else(|| PlugdepError::InvalidVersion {
            version: s.to_string(),
        })
    }
}

/// Extract the leading numeric triple of a version string.
///
/// Returns `None` when the string does not begin with three dot-separated
/// integers, or when a component does not fit in a `u64`. Anything after the
/// triple (pre-release, build metadata, trailing garbage) is ignored.
#[must_use]
pub fn parse_version(version: &str) -> Option<ParsedVersion> {
    let captures = VERSION_PATTERN.captures(version)?;

    let component = |index: usize| captures.get(index)?.as_str().parse::<u64>().ok();

    Some(ParsedVersion {
        major: component(1)?,
        minor: component(2)?,
        patch: component(3)?,
    })
}

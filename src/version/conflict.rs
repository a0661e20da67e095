//! Version conflict reporting.
//!
//! A conflict exists when the version chosen for a dependency violates a
//! constraint that some other installed plugin declares on the same name.
//! The resolver records each violation as a warning; this module groups them
//! per dependency for display.

use serde::{Deserialize, Serialize};
use std::fmt;

/// All violated requirements for one dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionConflict {
    /// Dependency whose resolved version is disputed
    pub resource: String,
    /// The version the resolver picked
    pub resolved_version: String,
    /// Every installed plugin whose constraint the resolved version violates
    pub conflicting_requirements: Vec<ConflictingRequirement>,
}

/// One plugin's requirement that the resolved version does not satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictingRequirement {
    /// Plugin declaring the requirement
    pub required_by: String,
    /// The constraint expression it declares
    pub requirement: String,
}

impl VersionConflict {
    /// Start a conflict report for `resource` resolved to `resolved_version`.
    pub fn new(resource: impl Into<String>, resolved_version: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            resolved_version: resolved_version.into(),
            conflicting_requirements: Vec::new(),
        }
    }

    /// Add a violated requirement.
    pub fn add_requirement(&mut self, required_by: &str, requirement: &str) {
        self.conflicting_requirements.push(ConflictingRequirement {
            required_by: required_by.to_string(),
            requirement: requirement.to_string(),
        });
    }

    /// Plugins involved in this conflict, in report order.
    pub fn required_by(&self) -> impl Iterator<Item = &str> {
        self.conflicting_requirements.iter().map(|r| r.required_by.as_str())
    }
}

impl fmt::Display for VersionConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Version conflict for '{}' (resolved to {}):", self.resource, self.resolved_version)?;
        for req in &self.conflicting_requirements {
            writeln!(f, "  - {} requires {}", req.required_by, req.requirement)?;
        }
        Ok(())
    }
}

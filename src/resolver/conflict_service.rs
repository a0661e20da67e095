//! Version conflict scan against other installed plugins.
//!
//! After the root's dependencies have been resolved, every other installed
//! plugin may still hold its own constraint on the same names. A resolved
//! version that violates such a constraint is reported as a
//! `VERSION_CONFLICT` warning; it never changes the chosen version and never
//! fails the resolution.

use std::collections::BTreeMap;

use super::types::ResolutionIssue;
use crate::models::CandidatePool;
use crate::version::satisfies;

/// Scans installed plugins for constraints the resolved versions violate.
pub struct ConflictService<'a> {
    installed: &'a CandidatePool,
}

impl<'a> ConflictService<'a> {
    /// Create a service over the installed pool.
    pub fn new(installed: &'a CandidatePool) -> Self {
        Self {
            installed,
        }
    }

    /// Report conflicts for every `(dependency, version)` in `resolved`.
    ///
    /// The root and the dependency itself are not treated as "other" plugins.
    /// Warnings are ordered by dependency name, then by constraining plugin.
    pub fn detect_version_conflicts(
        &self,
        root: &str,
        resolved: &BTreeMap<String, String>,
    ) -> Vec<ResolutionIssue> {
        let mut warnings = Vec::new();

        for (dependency, version) in resolved {
            for plugin in self.installed {
                if plugin.name() == root || plugin.name() == dependency {
                    continue;
                }

                let Some(requirement) = plugin.dependencies().get(dependency) else {
                    continue;
                };

                if !satisfies(version, requirement) {
                    tracing::warn!(
                        "Version conflict: {} requires {} {}, resolved {}",
                        plugin.name(),
                        dependency,
                        requirement,
                        version
                    );
                    warnings.push(ResolutionIssue::conflict(
                        plugin.name(),
                        dependency,
                        requirement,
                        version,
                    ));
                }
            }
        }

        warnings
    }
}

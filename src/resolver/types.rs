//! Resolution result types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::constants::CYCLE_SEPARATOR;
use crate::core::{ErrorContext, IntoAnyhowWithContext, PlugdepError};
use crate::version::VersionConflict;

/// Category of a resolution problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueKind {
    /// The dependency graph contains a cycle. Fatal for the whole call.
    CircularDependency,
    /// No candidate satisfies a declared constraint.
    DependencyNotFound,
    /// The resolved version violates another installed plugin's constraint.
    VersionConflict,
}

impl IssueKind {
    /// Wire name, e.g. `DEPENDENCY_NOT_FOUND`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CircularDependency => "CIRCULAR_DEPENDENCY",
            Self::DependencyNotFound => "DEPENDENCY_NOT_FOUND",
            Self::VersionConflict => "VERSION_CONFLICT",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One error or warning recorded during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionIssue {
    /// Problem category
    pub kind: IssueKind,
    /// Plugin the problem is attributed to: the root for missing dependencies,
    /// the constraining plugin for conflicts, the first cycle member for cycles
    pub plugin: String,
    /// Dependency the problem concerns, when there is a single one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency: Option<String>,
    /// Constraint involved (declared or violated)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<String>,
    /// Version the resolver picked, for conflicts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_version: Option<String>,
    /// Cycle path, first and last element equal
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cycle: Vec<String>,
    /// Human-readable description
    pub message: String,
}

impl ResolutionIssue {
    /// A dependency cycle was found.
    pub fn circular(cycle: Vec<String>) -> Self {
        let chain = cycle.join(CYCLE_SEPARATOR);
        Self {
            kind: IssueKind::CircularDependency,
            plugin: cycle.first().cloned().unwrap_or_default(),
            dependency: None,
            constraint: None,
            resolved_version: None,
            message: format!("Circular dependency detected: {chain}"),
            cycle,
        }
    }

    /// `dependency` declared by `plugin` with `constraint` could not be resolved.
    pub fn not_found(plugin: &str, dependency: &str, constraint: &str) -> Self {
        Self {
            kind: IssueKind::DependencyNotFound,
            plugin: plugin.to_string(),
            dependency: Some(dependency.to_string()),
            constraint: Some(constraint.to_string()),
            resolved_version: None,
            cycle: Vec::new(),
            message: format!(
                "No installed or registry version of '{dependency}' satisfies '{constraint}'"
            ),
        }
    }

    /// `plugin` requires `dependency` at `constraint`, but `resolved` was chosen.
    pub fn conflict(plugin: &str, dependency: &str, constraint: &str, resolved: &str) -> Self {
        Self {
            kind: IssueKind::VersionConflict,
            plugin: plugin.to_string(),
            dependency: Some(dependency.to_string()),
            constraint: Some(constraint.to_string()),
            resolved_version: Some(resolved.to_string()),
            cycle: Vec::new(),
            message: format!(
                "'{plugin}' requires {dependency} {constraint}, but {dependency} resolved to {resolved}"
            ),
        }
    }

    /// Convert the issue into the matching [`PlugdepError`].
    pub fn to_error(&self) -> PlugdepError {
        let dependency = self.dependency.clone().unwrap_or_default();
        let constraint = self.constraint.clone().unwrap_or_default();

        match self.kind {
            IssueKind::CircularDependency => PlugdepError::CircularDependency {
                chain: self.cycle.join(CYCLE_SEPARATOR),
            },
            IssueKind::DependencyNotFound => PlugdepError::DependencyNotFound {
                name: dependency,
                constraint,
            },
            IssueKind::VersionConflict => PlugdepError::VersionConflict {
                name: dependency,
                required_by: self.plugin.clone(),
                requirement: constraint,
                resolved: self.resolved_version.clone().unwrap_or_default(),
            },
        }
    }
}

impl fmt::Display for ResolutionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// Outcome of one resolution call.
///
/// `success` is true exactly when `errors` is empty; warnings never affect it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// Whether every declared dependency was resolved and no cycle exists
    pub success: bool,
    /// Declared dependency name → chosen version
    pub resolved: BTreeMap<String, String>,
    /// Fatal problems, in discovery order
    pub errors: Vec<ResolutionIssue>,
    /// Non-fatal problems (version conflicts), in discovery order
    pub warnings: Vec<ResolutionIssue>,
    /// Plugin names in processing order
    pub install_order: Vec<String>,
}

impl ResolutionResult {
    /// Result for a graph containing `cycle`: one error, nothing resolved.
    pub fn cycle(cycle: Vec<String>) -> Self {
        Self {
            success: false,
            errors: vec![ResolutionIssue::circular(cycle)],
            ..Self::default()
        }
    }

    /// Whether any error was recorded.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether any warning was recorded.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Errors and warnings of the given kind.
    pub fn issues_of_kind(&self, kind: IssueKind) -> impl Iterator<Item = &ResolutionIssue> {
        self.errors.iter().chain(self.warnings.iter()).filter(move |issue| issue.kind == kind)
    }

    /// Conflict warnings grouped per dependency.
    pub fn conflicts(&self) -> Vec<VersionConflict> {
        let mut grouped: BTreeMap<&str, VersionConflict> = BTreeMap::new();

        for issue in self.issues_of_kind(IssueKind::VersionConflict) {
            let dependency = issue.dependency.as_deref().unwrap_or_default();
            let resolved = issue.resolved_version.as_deref().unwrap_or_default();
            grouped
                .entry(dependency)
                .or_insert_with(|| VersionConflict::new(dependency, resolved))
                .add_requirement(&issue.plugin, issue.constraint.as_deref().unwrap_or_default());
        }

        grouped.into_values().collect()
    }

    /// One-line summary, e.g. `resolved 3 dependencies, 1 error, 0 warnings`.
    pub fn summary(&self) -> String {
        fn plural(count: usize, word: &str) -> String {
            if count == 1 {
                format!("{count} {word}")
            } else {
                format!("{count} {word}s")
            }
        }

        let dependencies = if self.resolved.len() == 1 {
            "1 dependency".to_string()
        } else {
            format!("{} dependencies", self.resolved.len())
        };

        format!(
            "resolved {}, {}, {}",
            dependencies,
            plural(self.errors.len(), "error"),
            plural(self.warnings.len(), "warning")
        )
    }

    /// Turn a failed result into an error, keeping a successful one.
    ///
    /// The first error becomes the returned [`PlugdepError`]; the others are
    /// listed in the attached details.
    pub fn into_result(self) -> anyhow::Result<Self> {
        let Some(first) = self.errors.first() else {
            return Ok(self);
        };

        let error = first.to_error();
        let mut context = ErrorContext::new(first.to_error());
        if self.errors.len() > 1 {
            let others: Vec<String> = self.errors[1..].iter().map(ToString::to_string).collect();
            context = context.with_details(format!("Also: {}", others.join("; ")));
        }

        Err(error.into_anyhow_with_context(context))
    }
}

impl fmt::Display for ResolutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Resolution {}: {}", if self.success { "succeeded" } else { "failed" }, self.summary())?;

        for (name, version) in &self.resolved {
            writeln!(f, "  {name} = {version}")?;
        }
        for issue in &self.errors {
            writeln!(f, "  error: {issue}")?;
        }
        for issue in &self.warnings {
            writeln!(f, "  warning: {issue}")?;
        }
        if !self.install_order.is_empty() {
            writeln!(f, "  install order: {}", self.install_order.join(", "))?;
        }
        Ok(())
    }
}

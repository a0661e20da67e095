//! Resolver configuration.
//!
//! The resolver is configured by a small TOML document, usually
//! `resolver.toml` next to the plugin manager's own settings:
//!
//! ```toml
//! # Order in which ResolutionResult::install_order lists plugins
//! install-order = "dependencies-first"   # or "dependents-first"
//!
//! # Consult installed plugins before the registry
//! prefer-installed = true
//!
//! # Scan other installed plugins for version conflicts
//! report-conflicts = true
//! ```
//!
//! Every key is optional; unknown keys are rejected so that typos surface
//! instead of silently falling back to defaults.
//!
//! # Install order orientation
//!
//! Dependency edges point from a plugin to the plugins it depends on, so the
//! raw topological order produced by [`InstallOrderer`] starts with plugins
//! nothing depends on (usually the root) and ends with leaf dependencies.
//! [`InstallOrderConvention::DependenciesFirst`], the default, reverses that
//! sequence so an installer can walk it front to back and always find a
//! plugin's dependencies already in place.
//!
//! [`InstallOrderer`]: crate::resolver::InstallOrderer

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::PlugdepError;

/// Orientation of [`ResolutionResult::install_order`](crate::resolver::ResolutionResult::install_order).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstallOrderConvention {
    /// Leaf dependencies first, the root last.
    #[default]
    DependenciesFirst,
    /// Raw topological order: the root first, leaf dependencies last.
    DependentsFirst,
}

impl InstallOrderConvention {
    /// Orient a raw (dependents-first) topological order.
    #[must_use]
    pub fn apply(self, mut raw_order: Vec<String>) -> Vec<String> {
        if self == Self::DependenciesFirst {
            raw_order.reverse();
        }
        raw_order
    }
}

/// Options controlling a [`Resolver`](crate::resolver::Resolver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct ResolverConfig {
    /// Orientation of the returned install order.
    pub install_order: InstallOrderConvention,

    /// Look a dependency up among installed plugins before the registry.
    pub prefer_installed: bool,

    /// Report `VERSION_CONFLICT` warnings against other installed plugins.
    pub report_conflicts: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            install_order: InstallOrderConvention::default(),
            prefer_installed: true,
            report_conflicts: true,
        }
    }
}

impl ResolverConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, PlugdepError> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize the configuration to TOML.
    pub fn to_toml_string(&self) -> Result<String, PlugdepError> {
        toml::to_string(self).map_err(|e| PlugdepError::ConfigError {
            message: format!("cannot serialize resolver configuration: {e}"),
        })
    }

    /// Load the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(PlugdepError::from)
            .with_context(|| format!("Failed to read resolver config: {}", path.display()))?;

        let config: Self = toml::from_str(&content).map_err(|e| PlugdepError::ConfigParseError {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;

        tracing::debug!("Loaded resolver config from {}", path.display());
        Ok(config)
    }

    /// Load the configuration at `path`, or the defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No resolver config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.install_order, InstallOrderConvention::DependenciesFirst);
        assert!(config.prefer_installed);
        assert!(config.report_conflicts);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(ResolverConfig::from_toml_str("").unwrap(), ResolverConfig::default());
    }

    #[test]
    fn test_parse_all_keys() {
        let config = ResolverConfig::from_toml_str(
            r#"
install-order = "dependents-first"
prefer-installed = false
report-conflicts = false
"#,
        )
        .unwrap();

        assert_eq!(config.install_order, InstallOrderConvention::DependentsFirst);
        assert!(!config.prefer_installed);
        assert!(!config.report_conflicts);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = ResolverConfig::from_toml_str("prefer-instaled = true").unwrap_err();
        assert!(matches!(err, PlugdepError::TomlError(_)));
    }

    #[test]
    fn test_invalid_convention_rejected() {
        assert!(ResolverConfig::from_toml_str(r#"install-order = "sideways""#).is_err());
    }

    #[test]
    fn test_toml_output_parses_back() {
        let config = ResolverConfig {
            install_order: InstallOrderConvention::DependentsFirst,
            prefer_installed: false,
            report_conflicts: true,
        };

        let text = config.to_toml_string().unwrap();
        assert!(text.contains("install-order = \"dependents-first\""));
        assert_eq!(ResolverConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_apply_convention() {
        let raw = vec!["root".to_string(), "a".to_string(), "b".to_string()];

        assert_eq!(InstallOrderConvention::DependentsFirst.apply(raw.clone()), raw);
        assert_eq!(
            InstallOrderConvention::DependenciesFirst.apply(raw),
            vec!["b".to_string(), "a".to_string(), "root".to_string()]
        );
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("resolver.toml");
        std::fs::write(&path, "report-conflicts = false\n").unwrap();

        let config = ResolverConfig::load(&path).unwrap();
        assert!(!config.report_conflicts);
        assert!(config.prefer_installed);
    }

    #[test]
    fn test_load_reports_parse_errors_with_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("resolver.toml");
        std::fs::write(&path, "install-order = [").unwrap();

        let err = ResolverConfig::load(&path).unwrap_err();
        match err.downcast_ref::<PlugdepError>() {
            Some(PlugdepError::ConfigParseError {
                file,
                ..
            }) => assert!(file.ends_with("resolver.toml")),
            other => panic!("Expected ConfigParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = ResolverConfig::load_or_default(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ResolverConfig::default());
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let temp_dir = TempDir::new().unwrap();
        let err = ResolverConfig::load(&temp_dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read resolver config"));

        match err.downcast_ref::<PlugdepError>() {
            Some(PlugdepError::IoError(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("Expected IoError, got {other:?}"),
        }

        let ctx = crate::core::user_friendly_error(err);
        assert!(ctx.suggestion.is_some());
    }
}

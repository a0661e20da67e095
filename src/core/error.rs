//! Error handling for plugdep
//!
//! The resolver itself reports problems as data: a [`ResolutionResult`] carries
//! its errors and warnings instead of failing. The types in this module cover
//! the remaining failure paths (invalid caller input, configuration loading,
//! pool (de)serialization) and give callers a way to turn resolution issues
//! into regular Rust errors.
//!
//! - [`PlugdepError`] - Enumerated error type for every plugdep failure mode
//! - [`ErrorContext`] - Wrapper adding user-facing suggestions and details
//! - [`user_friendly_error`] - Convert any [`anyhow::Error`] into an [`ErrorContext`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use plugdep::core::{PlugdepError, ErrorContext, user_friendly_error};
//!
//! let error = PlugdepError::DependencyNotFound {
//!     name: "logger".to_string(),
//!     constraint: "^2.0.0".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // colored output on stderr
//! ```
//!
//! [`ResolutionResult`]: crate::resolver::ResolutionResult

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for plugdep operations.
///
/// Variants are grouped by where they originate:
///
/// ## Caller input
/// - [`InvalidRootName`](Self::InvalidRootName) - Resolution requested without a root plugin
/// - [`InvalidVersion`](Self::InvalidVersion) - Explicit version parsing failed
///
/// ## Resolution outcomes
/// - [`CircularDependency`](Self::CircularDependency)
/// - [`DependencyNotFound`](Self::DependencyNotFound)
/// - [`VersionConflict`](Self::VersionConflict)
///
/// ## Configuration and serialization
/// - [`ConfigError`](Self::ConfigError), [`ConfigParseError`](Self::ConfigParseError)
/// - [`IoError`](Self::IoError), [`TomlError`](Self::TomlError), [`JsonError`](Self::JsonError)
#[derive(Error, Debug)]
pub enum PlugdepError {
    /// Resolution was requested with an empty root plugin name.
    ///
    /// This is a caller programming error, not a runtime condition.
    #[error("Root plugin name must not be empty")]
    InvalidRootName,

    /// A version string does not start with a `major.minor.patch` triple.
    #[error("Invalid version '{version}': expected major.minor.patch")]
    InvalidVersion {
        /// The rejected version string
        version: String,
    },

    /// Dependency graph contains a cycle.
    ///
    /// Example: `a → b → c → a`
    #[error("Circular dependency detected: {chain}")]
    CircularDependency {
        /// String representation of the cycle, first and last element equal
        chain: String,
    },

    /// No installed or registry candidate satisfies a declared constraint.
    #[error("Dependency '{name}' not found for constraint '{constraint}'")]
    DependencyNotFound {
        /// Name of the dependency that could not be resolved
        name: String,
        /// The constraint that no candidate satisfied
        constraint: String,
    },

    /// A resolved version violates another installed plugin's constraint.
    #[error("Version conflict for '{name}': {required_by} requires {requirement}, resolved {resolved}")]
    VersionConflict {
        /// Name of the dependency in conflict
        name: String,
        /// Installed plugin declaring the violated constraint
        required_by: String,
        /// The violated constraint expression
        requirement: String,
        /// The version the resolver picked
        resolved: String,
    },

    /// Configuration content is semantically invalid.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Configuration file could not be parsed.
    #[error("Invalid configuration file syntax in {file}")]
    ConfigParseError {
        /// Path of the configuration file
        file: String,
        /// Parser message
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for PlugdepError {
    fn clone(&self) -> Self {
        match self {
            Self::InvalidRootName => Self::InvalidRootName,
            Self::InvalidVersion {
                version,
            } => Self::InvalidVersion {
                version: version.clone(),
            },
            Self::CircularDependency {
                chain,
            } => Self::CircularDependency {
                chain: chain.clone(),
            },
            Self::DependencyNotFound {
                name,
                constraint,
            } => Self::DependencyNotFound {
                name: name.clone(),
                constraint: constraint.clone(),
            },
            Self::VersionConflict {
                name,
                required_by,
                requirement,
                resolved,
            } => Self::VersionConflict {
                name: name.clone(),
                required_by: required_by.clone(),
                requirement: requirement.clone(),
                resolved: resolved.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            Self::ConfigParseError {
                file,
                reason,
            } => Self::ConfigParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            // io, toml and json errors are not Clone; keep their message
            Self::IoError(e) => Self::IoError(std::io::Error::new(e.kind(), e.to_string())),
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::JsonError(e) => Self::Other {
                message: format!("JSON error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error wrapper carrying a suggestion and details for end users.
///
/// ```rust,no_run
/// use plugdep::core::{PlugdepError, ErrorContext};
///
/// let context = ErrorContext::new(PlugdepError::InvalidRootName)
///     .with_suggestion("Pass the name of the plugin being installed")
///     .with_details("The root name anchors the dependency graph");
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying plugdep error
    pub error: PlugdepError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context without suggestion or details.
    #[must_use]
    pub const fn new(error: PlugdepError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add an actionable suggestion (displayed in green).
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error (displayed in yellow).
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details and suggestion to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Extension trait for converting [`PlugdepError`] to [`anyhow::Error`] with context
pub trait IntoAnyhowWithContext {
    /// Convert the error to an [`anyhow::Error`] with the provided context
    fn into_anyhow_with_context(self, context: ErrorContext) -> anyhow::Error;
}

impl IntoAnyhowWithContext for PlugdepError {
    fn into_anyhow_with_context(self, context: ErrorContext) -> anyhow::Error {
        anyhow::Error::new(ErrorContext {
            error: self,
            suggestion: context.suggestion,
            details: context.details,
        })
    }
}

/// Convert any error to a user-friendly [`ErrorContext`].
///
/// Recognizes [`PlugdepError`] (including one already wrapped in an
/// [`ErrorContext`]), [`std::io::Error`] and [`toml::de::Error`]; anything else
/// becomes [`PlugdepError::Other`] with the full cause chain in the message.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(ctx) = error.downcast_ref::<ErrorContext>() {
        return ErrorContext {
            error: ctx.error.clone(),
            suggestion: ctx.suggestion.clone(),
            details: ctx.details.clone(),
        };
    }

    if let Some(plugdep_error) = error.downcast_ref::<PlugdepError>() {
        return create_error_context(plugdep_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(PlugdepError::ConfigError {
                    message: format!("file not found: {io_error}"),
                })
                .with_suggestion("Check that the configuration path exists and is readable")
                .with_details("plugdep only reads its own configuration file; plugin pools are supplied in memory");
            }
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(PlugdepError::ConfigError {
                    message: format!("permission denied: {io_error}"),
                })
                .with_suggestion("Check the ownership and permissions of the configuration file");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(PlugdepError::ConfigParseError {
            file: crate::constants::DEFAULT_CONFIG_FILE.to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax of the resolver configuration")
        .with_details("Valid keys are install-order, prefer-installed and report-conflicts");
    }

    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(PlugdepError::Other {
        message,
    })
}

/// Map each [`PlugdepError`] variant to a context with tailored suggestions.
fn create_error_context(error: PlugdepError) -> ErrorContext {
    let (suggestion, details): (String, Option<&str>) = match &error {
        PlugdepError::InvalidRootName => (
            "Pass the name of the plugin being installed as the resolution root".to_string(),
            None,
        ),
        PlugdepError::InvalidVersion {
            ..
        } => (
            "Use a version of the form MAJOR.MINOR.PATCH, e.g. 1.4.0".to_string(),
            Some("Pre-release and build suffixes are allowed after the numeric triple"),
        ),
        PlugdepError::CircularDependency {
            ..
        } => (
            "Remove one of the dependencies in the cycle so the plugins form a tree".to_string(),
            Some("Plugins in a cycle cannot be given an installation order"),
        ),
        PlugdepError::DependencyNotFound {
            ..
        } => (
            "Install a matching version or relax the constraint (e.g. use ^ or ~ ranges)"
                .to_string(),
            Some(
                "Neither the installed plugins nor the registry offer a version satisfying the constraint",
            ),
        ),
        PlugdepError::VersionConflict {
            required_by,
            ..
        } => (
            format!("Update '{required_by}' or choose a version both plugins accept"),
            Some("Conflicts are warnings: the resolution still succeeds"),
        ),
        PlugdepError::ConfigError {
            ..
        }
        | PlugdepError::ConfigParseError {
            ..
        }
        | PlugdepError::TomlError(_) => (
            "Check the resolver configuration file".to_string(),
            Some("Valid keys are install-order, prefer-installed and report-conflicts"),
        ),
        PlugdepError::JsonError(_) => (
            "Check that the candidate index is a JSON array or a name-keyed object".to_string(),
            None,
        ),
        PlugdepError::IoError(e) => match e.kind() {
            std::io::ErrorKind::NotFound => {
                ("Check that the configuration path exists".to_string(), None)
            }
            std::io::ErrorKind::PermissionDenied => (
                "Check the ownership and permissions of the configuration file".to_string(),
                None,
            ),
            _ => ("Check that the configuration file is readable".to_string(), None),
        },
        PlugdepError::Other {
            ..
        } => (String::new(), None),
    };

    let mut ctx = ErrorContext::new(error);
    if !suggestion.is_empty() {
        ctx.suggestion = Some(suggestion);
    }
    ctx.details = details.map(str::to_string);
    ctx
}

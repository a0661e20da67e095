//! Core types for plugdep
//!
//! The core module holds the crate-wide error vocabulary:
//! - [`PlugdepError`] - Enumerated error types covering plugdep failure modes
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to the user-friendly format
//! - [`IntoAnyhowWithContext`] - Extension trait for error conversion
//!
//! # Error Handling Pattern
//!
//! ```rust
//! use plugdep::core::{PlugdepError, user_friendly_error};
//! use anyhow::Result;
//!
//! fn example_operation() -> Result<String> {
//!     Err(PlugdepError::InvalidRootName.into())
//! }
//!
//! if let Err(e) = example_operation() {
//!     let friendly = user_friendly_error(e);
//!     assert!(friendly.suggestion.is_some());
//! }
//! ```

pub mod error;

pub use error::{ErrorContext, IntoAnyhowWithContext, PlugdepError, user_friendly_error};

//! Test utilities for plugdep
//!
//! Helpers for writing resolver tests: one-time logging setup and compact
//! builders for candidate pools and dependency maps.
//!
//! # Example
//!
//! ```rust,no_run
//! use plugdep::test_utils::{PoolFixture, deps, init_test_logging};
//!
//! init_test_logging(None);
//!
//! let fixture = PoolFixture::new()
//!     .installed("logger", "1.5.0", &[("fmt", "^2.0.0")])
//!     .registry("fmt", "2.3.1", &[]);
//! let result = fixture.resolve("app", &deps(&[("logger", "^1.0.0")]));
//! assert!(result.success);
//! ```

pub mod fixtures;

pub use fixtures::{PoolFixture, deps};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Installs a `tracing_subscriber` fmt subscriber once per process. Uses the
/// given level, or `RUST_LOG` when no level is passed; with neither, logging
/// stays off.
///
/// ```bash
/// RUST_LOG=plugdep=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

//! Cross-cutting error types for Refuge.
//!
//! Domain-specific errors (e.g., `DatabaseError`, `ConfigError`) are defined in
//! their respective crates. The CLI converges everything into `anyhow::Error`.

use thiserror::Error;

/// Errors that can be raised by any Refuge crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input failed validation (empty required field, out-of-range value).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

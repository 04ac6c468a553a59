//! Crate-wide error type.

use thiserror::Error;

/// Catch-all error for this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// `n` was not a valid polycube size (must be `>= 1`).
    #[error("invalid polycube size: {0} (must be >= 1)")]
    InvalidSize(i64),
    /// A data invariant was violated — signals a bug, not a runtime
    /// condition. Never raised in response to malformed external input.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
    /// Error that does not originate from this crate.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

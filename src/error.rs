use thiserror::Error;

/// Unified error type for the index and the estimator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Delete or search of a key that is not in the index.
    #[error("key not found: {0}")]
    KeyNotFound(String),
    /// Add of a key that is already in the index. Nothing was changed.
    #[error("key already exists: {0}")]
    AlreadyExists(String),
    /// Two estimators with different register counts cannot be merged.
    #[error("precision mismatch: {left} vs {right}")]
    PrecisionMismatch { left: u8, right: u8 },
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

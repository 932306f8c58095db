//! Error types for the canonicalization core.

use thiserror::Error;

/// Errors that can surface from canonicalization.
///
/// Malformed URLs and missing path structure are not errors: decomposition
/// is total and absent structure yields absent fields. Only data that is
/// present but corrupt is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanonError {
    /// A `min-*`/`max-*` filter token whose value is not an integer.
    #[error("invalid numeric bound for filter `{key}`: {value:?}")]
    InvalidBound { key: String, value: String },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CanonError>;

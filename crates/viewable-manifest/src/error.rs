//! Error types for manifest materialization.

use thiserror::Error;

/// The error type for manifest handling.
///
/// Resolution and lookup operations never fail; absence is reported through
/// neutral values (`None`, empty collections). Errors arise only at the
/// materialization boundary, when a raw manifest payload is deserialized.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The manifest payload is not valid JSON or does not match the schema.
    #[error("manifest JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The manifest payload has no root node.
    #[error("manifest is empty")]
    Empty,
}

/// A specialized Result type for manifest operations.
pub type Result<T> = std::result::Result<T, ManifestError>;

//! Error types for sheet payload materialization.

use thiserror::Error;

/// The error type for sheet geometry handling.
///
/// As with the manifest crate, geometric queries never fail; invalid
/// viewport ids and degenerate inputs resolve to neutral values. Errors
/// arise only when a 2-D payload is deserialized.
#[derive(Error, Debug)]
pub enum SheetError {
    /// The 2-D payload is not valid JSON or does not match the schema.
    #[error("sheet JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for sheet operations.
pub type Result<T> = std::result::Result<T, SheetError>;

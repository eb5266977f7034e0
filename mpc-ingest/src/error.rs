//! Error types for the import pipeline

use thiserror::Error;

/// Source adapter errors
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Source not configured: {0}")]
    NotConfigured(String),
}

/// Transformer errors (vendor record unusable)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Name reduces to no usable slug (e.g. no ASCII letters or digits)
    #[error("No usable slug for '{0}'")]
    InvalidSlug(String),

    #[error("Invalid record: {0}")]
    Invalid(String),
}

/// Per-item import failure
#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("Storage error: {0}")]
    Storage(#[from] mpc_common::Error),
}

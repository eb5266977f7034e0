//! Internal AI client errors (never surfaced to HTTP callers)

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("No API key configured")]
    NotConfigured,

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

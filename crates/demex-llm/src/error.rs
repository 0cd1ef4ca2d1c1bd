//! Error types for the completion layer.

use thiserror::Error;

/// Errors that can occur while requesting a completion.
#[derive(Error, Debug)]
pub enum LlmError {
    /// The backend could not be reached or returned a transport-level error.
    #[error("communication failed: {0}")]
    Communication(String),

    /// The configured model is not available on the backend.
    #[error("model not available: {0}")]
    ModelNotAvailable(String),

    /// The backend answered with a payload that does not parse.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

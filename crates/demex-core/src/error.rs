//! Error types for the demex-core library.

use thiserror::Error;

use crate::note::validate::ValidationIssue;

/// Main error type for the demex library.
#[derive(Error, Debug)]
pub enum DemexError {
    /// Extraction engine error.
    #[error("extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// Completion backend error.
    #[error("completion error: {0}")]
    Llm(#[from] demex_llm::LlmError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors surfaced by the extraction engine. The engine never panics toward
/// its caller: every phase returns a value or one of these.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// One or more validation rules rejected the note or the order.
    #[error("validation failed: {}", format_issues(.0))]
    Validation(Vec<ValidationIssue>),

    /// Unexpected fault while extracting note fields.
    #[error("parsing failed: {0}")]
    ParsingFailed(String),

    /// Unexpected fault while deriving the device order.
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),

    /// The completion collaborator could not be reached or timed out.
    #[error("upstream unavailable: {0}")]
    Upstream(String),
}

impl ExtractError {
    /// The validation issues carried by this error, if any.
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            ExtractError::Validation(issues) => issues,
            _ => &[],
        }
    }
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for the demex library.
pub type Result<T> = std::result::Result<T, DemexError>;

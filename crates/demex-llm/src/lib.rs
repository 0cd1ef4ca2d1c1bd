//! Text-completion abstraction layer for demex.
//!
//! This crate provides a unified interface for requesting one-shot text
//! completions from an LLM backend:
//! - `OllamaClient` for a local Ollama instance over HTTP
//! - `MockClient` for deterministic tests

mod error;
mod mock;
mod ollama;

pub use error::LlmError;
pub use mock::MockClient;
pub use ollama::{OllamaClient, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};

/// Result type for completion operations.
pub type Result<T> = std::result::Result<T, LlmError>;

/// Trait for text-completion backends.
pub trait CompletionClient: Send + Sync {
    /// Send a prompt and return the raw completion text.
    fn complete(&self, prompt: &str) -> impl std::future::Future<Output = Result<String>> + Send;
}

//! Configuration structures for the demex pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DemexError;

/// Main configuration for the demex pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemexConfig {
    /// Extraction limits and validation bounds.
    pub extraction: ExtractionConfig,

    /// Assisted-extraction (LLM) configuration.
    pub llm: LlmConfig,

    /// Ordering API configuration.
    pub api: ApiConfig,
}

/// Validation bounds applied by the note and order gates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Reject notes shorter than this many bytes.
    pub min_note_length: usize,

    /// Reject notes longer than this many bytes.
    pub max_note_length: usize,

    /// Upper bound for extracted identity fields (name, id, provider).
    pub max_field_length: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_note_length: 10,
            max_note_length: 10_000,
            max_field_length: 120,
        }
    }
}

/// Assisted-extraction configuration. An unset endpoint disables the
/// assisted path entirely; requests then go straight to the rule engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Completion endpoint, e.g. "http://localhost:11434".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Model name to request.
    pub model: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            model: "llama3".to_string(),
            timeout_secs: 30,
        }
    }
}

impl LlmConfig {
    /// True when an endpoint is configured.
    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }
}

/// Ordering API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Submission endpoint for structured orders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Bearer token sent with each submission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Maximum submission attempts.
    pub max_retries: u32,

    /// Base delay for exponential backoff between attempts.
    pub retry_base_delay_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            max_retries: 3,
            retry_base_delay_ms: 500,
        }
    }
}

impl DemexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, DemexError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| DemexError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), DemexError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| DemexError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Overlay `DEMEX_*` environment variables on top of file values.
    pub fn apply_env(&mut self) {
        if let Some(endpoint) = env_var("DEMEX_LLM_ENDPOINT") {
            self.llm.endpoint = Some(endpoint);
        }
        if let Some(model) = env_var("DEMEX_LLM_MODEL") {
            self.llm.model = model;
        }
        if let Some(timeout) = env_var("DEMEX_LLM_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.llm.timeout_secs = timeout;
        }
        if let Some(endpoint) = env_var("DEMEX_API_ENDPOINT") {
            self.api.endpoint = Some(endpoint);
        }
        if let Some(key) = env_var("DEMEX_API_KEY") {
            self.api.api_key = Some(key);
        }
        if let Some(retries) = env_var("DEMEX_API_MAX_RETRIES").and_then(|v| v.parse().ok()) {
            self.api.max_retries = retries;
        }
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

//! Canned completion clients for tests.

use crate::{CompletionClient, LlmError, Result};

/// Test double that returns a fixed completion or a fixed failure.
pub struct MockClient {
    reply: Option<String>,
}

impl MockClient {
    /// A client that always returns `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
        }
    }

    /// A client that always fails with a communication error.
    pub fn failing() -> Self {
        Self { reply: None }
    }
}

impl CompletionClient for MockClient {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(LlmError::Communication("mock failure".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replying_client_returns_canned_text() {
        let client = MockClient::replying("{}");
        assert_eq!(client.complete("prompt").await.unwrap(), "{}");
    }

    #[tokio::test]
    async fn failing_client_errors() {
        let client = MockClient::failing();
        assert!(matches!(
            client.complete("prompt").await,
            Err(LlmError::Communication(_))
        ));
    }
}

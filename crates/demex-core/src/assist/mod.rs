//! LLM-assisted order extraction.
//!
//! The assisted path asks the completion backend for the entire structured
//! order in one call, then re-validates the result with the same gates as
//! the rule-based path. Every failure here is recoverable: the pipeline
//! falls back to rules without surfacing it.

mod prompt;
mod response;

pub use prompt::build_order_prompt;
pub use response::parse_order_completion;

use demex_llm::CompletionClient;
use tracing::debug;

use crate::error::ExtractError;
use crate::models::config::ExtractionConfig;
use crate::note::parser::NoteExtraction;
use crate::note::validate::{validate_note, validate_order};

/// One-shot assisted extractor: prompt, completion, parse, re-validate.
pub struct LlmOrderExtractor<C> {
    client: C,
    limits: ExtractionConfig,
}

impl<C: CompletionClient> LlmOrderExtractor<C> {
    pub fn new(client: C, limits: ExtractionConfig) -> Self {
        Self { client, limits }
    }

    /// Extract a full order from raw note text in a single completion call.
    pub async fn extract(&self, raw_text: &str) -> Result<NoteExtraction, ExtractError> {
        let prompt = build_order_prompt(raw_text);
        debug!(prompt_len = prompt.len(), "requesting assisted extraction");

        let completion = self
            .client
            .complete(&prompt)
            .await
            .map_err(|e| ExtractError::Upstream(e.to_string()))?;

        debug!(completion_len = completion.len(), "received completion");

        let extraction = parse_order_completion(&completion, raw_text)?;

        let mut issues = validate_note(&extraction.note, &self.limits);
        issues.extend(validate_order(&extraction.order, &self.limits));
        if !issues.is_empty() {
            return Err(ExtractError::Validation(issues));
        }
        Ok(extraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::DeviceType;
    use demex_llm::MockClient;

    const RAW: &str =
        "Patient needs a CPAP with full face mask, set at 10 cmH2O. Ordered by Dr. Cameron.";

    #[tokio::test]
    async fn assisted_extraction_round_trip() {
        let completion = r#"{
            "device": "CPAP",
            "ordering_provider": "Dr. Cameron",
            "mask_type": "full face",
            "pressure": "10 cmH2O"
        }"#;
        let extractor =
            LlmOrderExtractor::new(MockClient::replying(completion), ExtractionConfig::default());

        let extraction = extractor.extract(RAW).await.unwrap();
        assert_eq!(extraction.order.device, DeviceType::Cpap);
        assert_eq!(extraction.order.ordering_provider, "Dr. Cameron");
    }

    #[tokio::test]
    async fn transport_failure_is_upstream() {
        let extractor =
            LlmOrderExtractor::new(MockClient::failing(), ExtractionConfig::default());
        let err = extractor.extract(RAW).await.unwrap_err();
        assert!(matches!(err, ExtractError::Upstream(_)));
    }

    #[tokio::test]
    async fn invalid_derived_order_is_a_validation_failure() {
        // CPAP completion without mask or pressure fails the shared gates.
        let extractor = LlmOrderExtractor::new(
            MockClient::replying(r#"{"device": "CPAP"}"#),
            ExtractionConfig::default(),
        );
        let err = extractor.extract(RAW).await.unwrap_err();
        assert!(matches!(err, ExtractError::Validation(_)));
    }
}

//! Extraction strategy selection: assisted path with rule-based fallback.

use std::time::Duration;

use demex_llm::{CompletionClient, OllamaClient};
use tracing::{info, warn};

use crate::assist::LlmOrderExtractor;
use crate::error::ExtractError;
use crate::models::config::DemexConfig;
use crate::note::parser::{NoteExtraction, NoteParser, RuleNoteParser};

/// Orchestrates the two extraction strategies.
///
/// The assisted path is tried at most once per request; any failure on it
/// (transport, timeout, malformed completion, failed validation of the
/// derived order) is logged and recovered by the deterministic rule path.
/// The fallback never re-enters the assisted path within a request.
pub struct OrderPipeline<C> {
    assist: Option<LlmOrderExtractor<C>>,
    parser: RuleNoteParser,
}

impl OrderPipeline<OllamaClient> {
    /// Build a pipeline from configuration. A configured completion
    /// endpoint enables the assisted path; without one every request goes
    /// straight to rules.
    pub fn from_config(config: &DemexConfig) -> Self {
        let parser = RuleNoteParser::new(config.extraction.clone());
        let assist = config.llm.endpoint.as_ref().map(|endpoint| {
            let client = OllamaClient::new(endpoint.clone(), config.llm.model.clone())
                .with_timeout(Duration::from_secs(config.llm.timeout_secs));
            LlmOrderExtractor::new(client, config.extraction.clone())
        });
        Self { assist, parser }
    }
}

impl<C: CompletionClient> OrderPipeline<C> {
    /// A pipeline that only ever runs the rule path.
    pub fn rule_based(parser: RuleNoteParser) -> Self {
        Self {
            assist: None,
            parser,
        }
    }

    /// A pipeline with an assisted path in front of the rule fallback.
    pub fn with_assist(assist: LlmOrderExtractor<C>, parser: RuleNoteParser) -> Self {
        Self {
            assist: Some(assist),
            parser,
        }
    }

    /// Process one note. Stateless and idempotent on the rule path; the
    /// only suspension point is the completion call on the assisted path.
    pub async fn extract(&self, raw_text: &str) -> Result<NoteExtraction, ExtractError> {
        if let Some(assist) = &self.assist {
            match assist.extract(raw_text).await {
                Ok(extraction) => {
                    info!(device = %extraction.order.device, "assisted extraction succeeded");
                    return Ok(extraction);
                }
                Err(e) => {
                    warn!(error = %e, "assisted extraction failed, falling back to rules");
                }
            }
        }
        self.parser.process(raw_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::ExtractionConfig;
    use crate::models::order::DeviceType;
    use demex_llm::MockClient;

    const CPAP_NOTE: &str = "Patient Name: John Smith\n\
        DOB: 03/04/1958\n\
        Patient needs a CPAP with nasal mask, set at 10 cmH2O. Ordered by Dr. Cameron.";

    fn rule_parser() -> RuleNoteParser {
        RuleNoteParser::default()
    }

    #[tokio::test]
    async fn no_assist_goes_straight_to_rules() {
        let pipeline = OrderPipeline::<MockClient>::rule_based(rule_parser());
        let extraction = pipeline.extract(CPAP_NOTE).await.unwrap();
        assert_eq!(extraction.order.device, DeviceType::Cpap);
    }

    #[tokio::test]
    async fn failing_assist_matches_rule_path_exactly() {
        let pipeline = OrderPipeline::with_assist(
            LlmOrderExtractor::new(MockClient::failing(), ExtractionConfig::default()),
            rule_parser(),
        );
        let fallback = pipeline.extract(CPAP_NOTE).await.unwrap();
        let direct = rule_parser().process(CPAP_NOTE).unwrap();

        assert_eq!(
            serde_json::to_string(&fallback.order).unwrap(),
            serde_json::to_string(&direct.order).unwrap()
        );
    }

    #[tokio::test]
    async fn malformed_completion_falls_back() {
        let pipeline = OrderPipeline::with_assist(
            LlmOrderExtractor::new(
                MockClient::replying("no json here"),
                ExtractionConfig::default(),
            ),
            rule_parser(),
        );
        let extraction = pipeline.extract(CPAP_NOTE).await.unwrap();
        assert_eq!(extraction.order.device, DeviceType::Cpap);
        // The fallback re-extracted from the note, rules-style.
        assert_eq!(extraction.order.patient_name, "John Smith");
    }

    #[tokio::test]
    async fn successful_assist_wins() {
        let completion = r#"{
            "device": "CPAP",
            "patient_name": "J. Smith",
            "ordering_provider": "cameron",
            "mask_type": "nasal",
            "pressure": "10 cmH2O"
        }"#;
        let pipeline = OrderPipeline::with_assist(
            LlmOrderExtractor::new(MockClient::replying(completion), ExtractionConfig::default()),
            rule_parser(),
        );

        let extraction = pipeline.extract(CPAP_NOTE).await.unwrap();
        // Assisted values, not rule-extracted ones.
        assert_eq!(extraction.order.patient_name, "J. Smith");
        assert_eq!(extraction.order.ordering_provider, "Dr. cameron");
    }

    #[tokio::test]
    async fn rule_failure_surfaces_when_both_paths_fail() {
        let pipeline = OrderPipeline::with_assist(
            LlmOrderExtractor::new(MockClient::failing(), ExtractionConfig::default()),
            rule_parser(),
        );
        let err = pipeline
            .extract("Follow up for medication review in two weeks.")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Validation(_)));
    }
}

use super::llm::LlmExtractor;
use super::openai::OpenAiClient;
use super::rules::RuleBasedExtractor;
use super::types::{ExtractionResult, RiskFactExtractor};
use super::StructuringError;
use crate::config::Settings;

/// Tries a primary strategy and falls back to the rule engine on any error.
pub struct FallbackExtractor {
    primary: Box<dyn RiskFactExtractor + Send + Sync>,
    fallback: RuleBasedExtractor,
}

impl FallbackExtractor {
    pub fn new(primary: Box<dyn RiskFactExtractor + Send + Sync>) -> Self {
        Self {
            primary,
            fallback: RuleBasedExtractor,
        }
    }

    /// Infallible form of [`RiskFactExtractor::extract`].
    pub fn extract_facts(&self, raw_text: &str, filename: &str) -> ExtractionResult {
        match self.primary.extract(raw_text, filename) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(
                    file = %filename,
                    error = %e,
                    "LLM extraction failed, falling back to rules"
                );
                self.fallback.extract_facts(raw_text, filename)
            }
        }
    }
}

impl RiskFactExtractor for FallbackExtractor {
    fn extract(
        &self,
        raw_text: &str,
        filename: &str,
    ) -> Result<ExtractionResult, StructuringError> {
        Ok(self.extract_facts(raw_text, filename))
    }
}

/// The extraction strategy for `settings`: LLM with rule fallback when an
/// API key is configured, the rule engine alone otherwise.
pub fn extractor_for(settings: &Settings) -> Box<dyn RiskFactExtractor + Send + Sync> {
    let Some(api_key) = settings.llm_api_key.as_deref() else {
        return Box::new(RuleBasedExtractor);
    };

    match OpenAiClient::new(&settings.llm_base_url, api_key, settings.llm_timeout_secs) {
        Ok(client) => Box::new(FallbackExtractor::new(Box::new(LlmExtractor::new(
            Box::new(client),
            settings,
        )))),
        Err(e) => {
            tracing::warn!(error = %e, "Could not build LLM client, using rules only");
            Box::new(RuleBasedExtractor)
        }
    }
}

/// Extract risk facts from document text. Never fails: every LLM problem is
/// absorbed by the rule engine.
pub fn extract_risk_facts(raw_text: &str, filename: &str, settings: &Settings) -> ExtractionResult {
    let extractor = extractor_for(settings);
    let result = extractor
        .extract(raw_text, filename)
        .unwrap_or_else(|e| {
            tracing::warn!(file = %filename, error = %e, "Extraction failed, using rules");
            RuleBasedExtractor.extract_facts(raw_text, filename)
        });

    tracing::info!(
        file = %filename,
        text_length = raw_text.len(),
        strategy = result.strategy().unwrap_or("unknown"),
        lines_of_business = result.fields.lines_of_business.len(),
        "Risk facts extracted"
    );
    result
}

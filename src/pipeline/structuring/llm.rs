use std::collections::BTreeMap;

use super::confidence::{gated_confidence, LLM_CONFIDENCE};
use super::keywords::infer_lines_of_business;
use super::parser::parse_extraction_response;
use super::prompt::build_extraction_system_prompt;
use super::sanitize::sanitize_for_llm;
use super::types::{ExtractionResult, LlmClient, RiskFactExtractor, FIELD_NAMES};
use super::StructuringError;
use crate::config::Settings;
use crate::models::{FieldCitation, FieldValue};

/// Risk fact extraction through a chat-completion LLM.
///
/// Errors on any backend or parse failure; wrap in
/// [`FallbackExtractor`](super::FallbackExtractor) to recover.
pub struct LlmExtractor {
    llm: Box<dyn LlmClient + Send + Sync>,
    model_name: String,
    temperature: f32,
    max_input_chars: usize,
}

impl LlmExtractor {
    pub fn new(llm: Box<dyn LlmClient + Send + Sync>, settings: &Settings) -> Self {
        Self {
            llm,
            model_name: settings.llm_model.clone(),
            temperature: settings.llm_temperature,
            max_input_chars: settings.llm_max_input_chars,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

impl RiskFactExtractor for LlmExtractor {
    fn extract(
        &self,
        raw_text: &str,
        filename: &str,
    ) -> Result<ExtractionResult, StructuringError> {
        let _span = tracing::info_span!("llm_extract", model = %self.model_name).entered();

        // Hints follow the keyword-inferred lines on the full text.
        let hinted = infer_lines_of_business(raw_text);
        let system = build_extraction_system_prompt(&hinted);
        let document = sanitize_for_llm(raw_text, self.max_input_chars);

        let response = self
            .llm
            .generate(&self.model_name, &system, &document, self.temperature)?;
        let fields = parse_extraction_response(&response)?;

        let confidence = gated_confidence(&LLM_CONFIDENCE, &fields);
        let citations = FIELD_NAMES
            .iter()
            .map(|&name| (name.to_string(), vec![FieldCitation::new(filename, None)]))
            .collect();
        let debug = BTreeMap::from([
            ("strategy".to_string(), FieldValue::from("llm")),
            ("model".to_string(), FieldValue::from(self.model_name.as_str())),
        ]);

        tracing::info!(
            lines_of_business = fields.lines_of_business.len(),
            input_chars = document.chars().count(),
            "LLM extraction complete"
        );

        Ok(ExtractionResult {
            fields,
            confidence,
            citations,
            debug,
        })
    }
}

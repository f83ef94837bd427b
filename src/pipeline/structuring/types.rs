use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::StructuringError;
use crate::models::{FieldCitation, FieldValue, LineOfBusiness};

/// Names of the four top-level extracted fields, in output order.
pub const FIELD_NAMES: [&str; 4] = ["insured_name", "revenue", "payroll", "lines_of_business"];

/// Per-LOB open sub-field data (class codes, vehicle counts, ...).
pub type LobFields = BTreeMap<LineOfBusiness, BTreeMap<String, FieldValue>>;

/// Candidate values pulled out of a submission's text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub insured_name: Option<String>,
    pub revenue: Option<f64>,
    pub payroll: Option<f64>,
    /// Deduplicated and sorted.
    #[serde(default)]
    pub lines_of_business: Vec<LineOfBusiness>,
    #[serde(default)]
    pub lob_fields: LobFields,
}

impl ExtractedFields {
    /// Whether the named field carries a value.
    pub fn is_present(&self, field: &str) -> bool {
        match field {
            "insured_name" => self.insured_name.as_deref().is_some_and(|n| !n.is_empty()),
            "revenue" => self.revenue.is_some(),
            "payroll" => self.payroll.is_some(),
            "lines_of_business" => !self.lines_of_business.is_empty(),
            _ => false,
        }
    }
}

/// Output of a single risk fact extraction run.
///
/// Every name in [`FIELD_NAMES`] has an entry in `confidence` and `citations`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub fields: ExtractedFields,
    pub confidence: BTreeMap<String, f64>,
    pub citations: BTreeMap<String, Vec<FieldCitation>>,
    #[serde(default)]
    pub debug: BTreeMap<String, FieldValue>,
}

impl ExtractionResult {
    /// The `debug["strategy"]` tag, if set.
    pub fn strategy(&self) -> Option<&str> {
        self.debug.get("strategy").and_then(FieldValue::as_str)
    }
}

/// A strategy turning raw document text into an [`ExtractionResult`].
pub trait RiskFactExtractor {
    fn extract(&self, raw_text: &str, filename: &str)
        -> Result<ExtractionResult, StructuringError>;
}

/// Chat-completion LLM client abstraction (allows mocking)
pub trait LlmClient {
    /// Send one system + user message pair and return the raw message content.
    fn generate(
        &self,
        model: &str,
        system: &str,
        prompt: &str,
        temperature: f32,
    ) -> Result<String, StructuringError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_checks_each_field() {
        let mut fields = ExtractedFields::default();
        assert!(FIELD_NAMES.iter().all(|f| !fields.is_present(f)));

        fields.insured_name = Some(String::new());
        assert!(!fields.is_present("insured_name"));

        fields.insured_name = Some("Acme".into());
        fields.revenue = Some(0.0);
        fields.lines_of_business = vec![LineOfBusiness::Auto];
        assert!(fields.is_present("insured_name"));
        assert!(fields.is_present("revenue"));
        assert!(!fields.is_present("payroll"));
        assert!(fields.is_present("lines_of_business"));
        assert!(!fields.is_present("unknown"));
    }

    #[test]
    fn strategy_reads_debug_tag() {
        let mut result = ExtractionResult::default();
        assert_eq!(result.strategy(), None);
        result.debug.insert("strategy".into(), FieldValue::from("rules"));
        assert_eq!(result.strategy(), Some("rules"));
    }

    #[test]
    fn lob_fields_serialize_with_code_keys() {
        let mut fields = ExtractedFields::default();
        fields
            .lob_fields
            .entry(LineOfBusiness::WorkersComp)
            .or_default()
            .insert("employee_count".into(), FieldValue::Number(42.0));
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["lob_fields"]["WC"]["employee_count"], 42.0);
    }
}

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::enums::LineOfBusiness;
use super::value::FieldValue;

/// Pointer from an extracted field back to the document text that justified it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCitation {
    pub source_document: String,
    pub page: Option<u32>,
    pub snippet: Option<String>,
}

impl FieldCitation {
    pub fn new(source_document: &str, snippet: Option<String>) -> Self {
        Self {
            source_document: source_document.to_string(),
            page: None,
            snippet,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorLoss {
    pub loss_date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskLocation {
    pub address: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_country() -> String {
    "US".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageRequest {
    pub line_of_business: LineOfBusiness,
    pub limit: Option<String>,
    pub deductible: Option<String>,
}

/// Canonical, versioned snapshot of a submission's risk.
///
/// Built once per pipeline run and never mutated afterwards; a re-run produces
/// a new profile with a higher `version`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub submission_id: String,
    pub insured_name: Option<String>,
    #[serde(default)]
    pub entity_type: Option<String>,
    pub revenue: Option<f64>,
    pub payroll: Option<f64>,
    #[serde(default)]
    pub locations: Vec<RiskLocation>,
    #[serde(default)]
    pub prior_losses: Vec<PriorLoss>,
    #[serde(default)]
    pub lines_of_business: Vec<LineOfBusiness>,
    #[serde(default)]
    pub coverage_requested: Vec<CoverageRequest>,
    #[serde(default)]
    pub underwriting_flags: Vec<String>,
    #[serde(default)]
    pub contradictions: Vec<String>,
    #[serde(default)]
    pub source_citations: BTreeMap<String, Vec<FieldCitation>>,
    #[serde(default)]
    pub field_confidence: BTreeMap<String, f64>,
    pub version: u32,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub metadata: BTreeMap<String, FieldValue>,
}

impl RiskProfile {
    /// Empty version-1 profile for `submission_id`.
    pub fn new(submission_id: impl Into<String>) -> Self {
        Self {
            submission_id: submission_id.into(),
            insured_name: None,
            entity_type: None,
            revenue: None,
            payroll: None,
            locations: vec![],
            prior_losses: vec![],
            lines_of_business: vec![],
            coverage_requested: vec![],
            underwriting_flags: vec![],
            contradictions: vec![],
            source_citations: BTreeMap::new(),
            field_confidence: BTreeMap::new(),
            version: 1,
            updated_at: Utc::now(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn has_line(&self, lob: &LineOfBusiness) -> bool {
        self.lines_of_business.contains(lob)
    }
}

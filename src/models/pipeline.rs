use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::enums::{CompletenessStatus, LineOfBusiness};
use super::risk::RiskProfile;

/// How complete the profile is for one line of business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletenessResult {
    pub line_of_business: LineOfBusiness,
    pub completeness_score: u8,
    pub status: CompletenessStatus,
    #[serde(default)]
    pub missing_fields: Vec<String>,
    #[serde(default)]
    pub blockers: Vec<String>,
}

/// Follow-up questions and the communications built from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub grouped_questions: BTreeMap<LineOfBusiness, Vec<String>>,
    pub email_draft: String,
    pub bullet_summary: Vec<String>,
    pub plain_english: String,
}

/// Everything one pipeline run hands back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub profile: RiskProfile,
    pub completeness: Vec<CompletenessResult>,
    pub questions: QuestionSet,
}

use chrono::Utc;

use super::contradictions::detect_contradictions;
use crate::models::{FieldValue, LineOfBusiness, RiskProfile};
use crate::pipeline::structuring::ExtractionResult;

/// Metadata key holding the extraction strategy's debug bag.
pub const EXTRACTION_METADATA_KEY: &str = "extraction";

/// Build the version-1 canonical profile for a submission.
///
/// Confidence and citations are carried over verbatim; contradictions are
/// computed from the extracted fields.
pub fn build_canonical_profile(submission_id: &str, extraction: &ExtractionResult) -> RiskProfile {
    let mut profile = RiskProfile::new(submission_id);
    apply_extraction(&mut profile, extraction);

    tracing::info!(
        submission_id = %profile.submission_id,
        version = profile.version,
        contradictions = profile.contradictions.len(),
        "Canonical profile built"
    );
    profile
}

/// Next version of `previous` from a fresh extraction.
///
/// Locations, prior losses, coverage requests, entity type and metadata are
/// carried forward; extracted fields are replaced. `previous` is untouched.
pub fn revise_profile(previous: &RiskProfile, extraction: &ExtractionResult) -> RiskProfile {
    let mut profile = RiskProfile {
        version: previous.version.saturating_add(1),
        updated_at: Utc::now(),
        contradictions: vec![],
        ..previous.clone()
    };
    apply_extraction(&mut profile, extraction);

    tracing::info!(
        submission_id = %profile.submission_id,
        version = profile.version,
        contradictions = profile.contradictions.len(),
        "Canonical profile revised"
    );
    profile
}

fn apply_extraction(profile: &mut RiskProfile, extraction: &ExtractionResult) {
    let fields = &extraction.fields;

    profile.insured_name = fields.insured_name.clone();
    profile.revenue = fields.revenue;
    profile.payroll = fields.payroll;
    profile.lines_of_business = unique_lines(&fields.lines_of_business);
    profile.contradictions = detect_contradictions(fields);
    profile.source_citations = extraction.citations.clone();
    profile.field_confidence = extraction.confidence.clone();
    profile.metadata.insert(
        EXTRACTION_METADATA_KEY.to_string(),
        FieldValue::Map(extraction.debug.clone()),
    );
}

/// Drop repeated lines, keeping first-seen order.
fn unique_lines(lines: &[LineOfBusiness]) -> Vec<LineOfBusiness> {
    let mut unique: Vec<LineOfBusiness> = Vec::with_capacity(lines.len());
    for lob in lines {
        if !unique.contains(lob) {
            unique.push(lob.clone());
        }
    }
    unique
}

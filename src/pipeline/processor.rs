//! Submission processing orchestrator.
//!
//! Single entry point that drives the full intake pipeline:
//! text extraction → risk facts → canonical profile → completeness → questions.
//!
//! Engines are injected behind traits so the orchestrator stays testable
//! with mock implementations.

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::Settings;
use crate::models::{FieldValue, PipelineOutput, RiskProfile};
use crate::pipeline::canonical::{build_canonical_profile, revise_profile};
use crate::pipeline::completeness::{generate_question_set, score_missingness};
use crate::pipeline::extraction::{DocumentParseError, DocumentTextExtractor, RawDocument};
use crate::pipeline::structuring::{
    extractor_for, ExtractionResult, RiskFactExtractor, RuleBasedExtractor,
};

pub const SOURCE_SHA256_KEY: &str = "source_sha256";
pub const SOURCE_FILENAME_KEY: &str = "source_filename";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while processing a submission.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Document could not be read: {0}")]
    DocumentParse(#[from] DocumentParseError),

    #[error("Invalid submission id: {0:?}")]
    InvalidSubmissionId(String),
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// New submission id: `sub_` followed by 12 lowercase hex characters.
pub fn generate_submission_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("sub_{}", &hex[..12])
}

/// Lowercase hex SHA-256 of the raw payload.
pub fn compute_payload_sha256(payload: &[u8]) -> String {
    format!("{:x}", Sha256::digest(payload))
}

fn resolve_submission_id(submission_id: Option<&str>) -> Result<String, ProcessingError> {
    match submission_id {
        None => Ok(generate_submission_id()),
        Some(id) if id.trim().is_empty() => Err(ProcessingError::InvalidSubmissionId(id.into())),
        Some(id) => Ok(id.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Runs a submitted document through every pipeline stage.
///
/// Stateless between calls; one processor can serve concurrent submissions.
pub struct SubmissionProcessor {
    text: DocumentTextExtractor,
    facts: Box<dyn RiskFactExtractor + Send + Sync>,
}

impl SubmissionProcessor {
    pub fn new(text: DocumentTextExtractor, facts: Box<dyn RiskFactExtractor + Send + Sync>) -> Self {
        Self { text, facts }
    }

    /// Production engines: default PDF engines and the extraction strategy
    /// selected by `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(DocumentTextExtractor::default(), extractor_for(settings))
    }

    /// Full pipeline for a new submission.
    ///
    /// A fresh `sub_<hex>` id is generated when `submission_id` is `None`.
    pub fn process(
        &self,
        document: &RawDocument,
        submission_id: Option<&str>,
    ) -> Result<PipelineOutput, ProcessingError> {
        let submission_id = resolve_submission_id(submission_id)?;
        let _span = tracing::info_span!("process_submission", submission_id = %submission_id).entered();

        let extraction = self.extract_facts(document)?;
        let mut profile = build_canonical_profile(&submission_id, &extraction);
        record_source(&mut profile, document);

        Ok(self.assess(profile))
    }

    /// Re-run the pipeline on a new document for an existing submission.
    /// Produces the next profile version; `previous` is left as is.
    pub fn revise(
        &self,
        previous: &RiskProfile,
        document: &RawDocument,
    ) -> Result<PipelineOutput, ProcessingError> {
        let _span = tracing::info_span!(
            "revise_submission",
            submission_id = %previous.submission_id,
            version = previous.version
        )
        .entered();

        let extraction = self.extract_facts(document)?;
        let mut profile = revise_profile(previous, &extraction);
        record_source(&mut profile, document);

        Ok(self.assess(profile))
    }

    /// Text extraction then risk fact extraction. Only the first step can fail.
    fn extract_facts(&self, document: &RawDocument) -> Result<ExtractionResult, ProcessingError> {
        let raw_text = self.text.extract_document(document)?;

        let extraction = self
            .facts
            .extract(&raw_text, &document.filename)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Extraction strategy failed, falling back to rules");
                RuleBasedExtractor.extract_facts(&raw_text, &document.filename)
            });

        tracing::info!(
            text_length = raw_text.len(),
            strategy = extraction.strategy().unwrap_or("unknown"),
            "Risk facts extracted"
        );
        Ok(extraction)
    }

    fn assess(&self, profile: RiskProfile) -> PipelineOutput {
        let completeness = score_missingness(&profile);
        let questions = generate_question_set(profile.insured_name.as_deref(), &completeness);

        tracing::info!(
            submission_id = %profile.submission_id,
            version = profile.version,
            lines = completeness.len(),
            questions = questions.bullet_summary.len(),
            contradictions = profile.contradictions.len(),
            "Submission processed"
        );

        PipelineOutput {
            profile,
            completeness,
            questions,
        }
    }
}

fn record_source(profile: &mut RiskProfile, document: &RawDocument) {
    profile.metadata.insert(
        SOURCE_SHA256_KEY.to_string(),
        FieldValue::from(compute_payload_sha256(&document.payload)),
    );
    profile.metadata.insert(
        SOURCE_FILENAME_KEY.to_string(),
        FieldValue::from(document.filename.as_str()),
    );
}

/// Convenience entry point: run the whole pipeline over raw bytes with a
/// generated submission id.
pub fn run_pipeline_bytes(
    filename: &str,
    content_type: Option<&str>,
    payload: &[u8],
    settings: &Settings,
) -> Result<PipelineOutput, ProcessingError> {
    let document = RawDocument::new(filename, content_type, payload);
    SubmissionProcessor::from_settings(settings).process(&document, None)
}

use serde::{Deserialize, Serialize};

use super::DocumentParseError;

/// A submitted document as received from the surrounding service.
/// Never persisted by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    pub filename: String,
    pub content_type: Option<String>,
    pub payload: Vec<u8>,
}

impl RawDocument {
    pub fn new(filename: &str, content_type: Option<&str>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.to_string(),
            content_type: content_type.map(str::to_string),
            payload: payload.into(),
        }
    }
}

/// PDF text engine abstraction (allows mocking for tests).
///
/// Returns one string per page, in page order. Pages without text are
/// returned as empty strings rather than dropped.
pub trait PdfTextEngine {
    fn name(&self) -> &'static str;

    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, DocumentParseError>;
}

use super::email::extract_email_text;
use super::format::{detect_format, DocumentFormat};
use super::pdf::PdfTextExtractor;
use super::sanitize::{decode_utf8_tolerant, strip_null_bytes};
use super::types::RawDocument;
use super::DocumentParseError;

/// Normalizes PDF, email and plain-text payloads into one text blob.
#[derive(Default)]
pub struct DocumentTextExtractor {
    pdf: PdfTextExtractor,
}

impl DocumentTextExtractor {
    pub fn new(pdf: PdfTextExtractor) -> Self {
        Self { pdf }
    }

    pub fn extract(
        &self,
        filename: &str,
        content_type: Option<&str>,
        payload: &[u8],
    ) -> Result<String, DocumentParseError> {
        let format = detect_format(filename, content_type);
        let _span = tracing::info_span!("extract_text", format = format.as_str()).entered();

        let text = match format {
            DocumentFormat::Pdf => self.pdf.extract(payload)?,
            DocumentFormat::Email => extract_email_text(payload)?,
            DocumentFormat::PlainText => decode_utf8_tolerant(payload),
        };
        let text = strip_null_bytes(&text);

        tracing::info!(
            bytes = payload.len(),
            text_length = text.len(),
            "Document text extracted"
        );
        Ok(text)
    }

    pub fn extract_document(&self, document: &RawDocument) -> Result<String, DocumentParseError> {
        self.extract(
            &document.filename,
            document.content_type.as_deref(),
            &document.payload,
        )
    }
}

/// Extract text with the default PDF engines.
pub fn extract_text(
    filename: &str,
    content_type: Option<&str>,
    payload: &[u8],
) -> Result<String, DocumentParseError> {
    DocumentTextExtractor::default().extract(filename, content_type, payload)
}

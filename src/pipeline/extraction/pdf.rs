use std::panic::{self, AssertUnwindSafe};

use super::sanitize::join_non_empty;
use super::types::PdfTextEngine;
use super::DocumentParseError;

/// Layout-aware extraction via the pdf-extract crate.
/// Handles digital PDFs with embedded text layers.
pub struct LayoutPdfEngine;

impl PdfTextEngine for LayoutPdfEngine {
    fn name(&self) -> &'static str {
        "pdf-extract"
    }

    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, DocumentParseError> {
        // pdf-extract panics on some malformed inputs instead of returning Err.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
        }));

        match outcome {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(e)) => Err(DocumentParseError::PdfParsing(e.to_string())),
            Err(_) => Err(DocumentParseError::PdfParsing(
                "pdf-extract aborted on malformed input".into(),
            )),
        }
    }
}

/// Page-by-page text layer extraction via lopdf.
///
/// Less faithful to layout than [`LayoutPdfEngine`] but tolerant of fonts and
/// structures the layout engine gives up on.
pub struct PageTextPdfEngine;

impl PdfTextEngine for PageTextPdfEngine {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, DocumentParseError> {
        let document = lopdf::Document::load_mem(pdf_bytes)
            .map_err(|e| DocumentParseError::PdfParsing(e.to_string()))?;

        let pages = document
            .get_pages()
            .into_keys()
            .map(|page_number| match document.extract_text(&[page_number]) {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!(page = page_number, error = %e, "lopdf: page has no readable text");
                    String::new()
                }
            })
            .collect();

        Ok(pages)
    }
}

/// PDF text extractor with a fallback engine.
///
/// The primary engine runs first; the fallback runs only if the primary
/// produced no non-whitespace text (including when it failed outright).
pub struct PdfTextExtractor {
    primary: Box<dyn PdfTextEngine + Send + Sync>,
    fallback: Box<dyn PdfTextEngine + Send + Sync>,
}

impl PdfTextExtractor {
    pub fn new(
        primary: Box<dyn PdfTextEngine + Send + Sync>,
        fallback: Box<dyn PdfTextEngine + Send + Sync>,
    ) -> Self {
        Self { primary, fallback }
    }

    /// Extract the document's text: non-empty, trimmed page texts joined by
    /// newlines.
    pub fn extract(&self, pdf_bytes: &[u8]) -> Result<String, DocumentParseError> {
        let mut last_error = None;

        let text = match self.primary.extract_pages(pdf_bytes) {
            Ok(pages) => join_non_empty(&pages),
            Err(e) => {
                tracing::warn!(engine = self.primary.name(), error = %e, "Primary PDF engine failed");
                last_error = Some(e);
                String::new()
            }
        };
        if !text.is_empty() {
            return Ok(text);
        }

        tracing::info!(
            primary = self.primary.name(),
            fallback = self.fallback.name(),
            "No text from primary PDF engine, trying fallback"
        );

        let primary_failed = last_error.is_some();
        match self.fallback.extract_pages(pdf_bytes) {
            Ok(pages) => {
                let text = join_non_empty(&pages);
                if text.is_empty() {
                    Err(DocumentParseError::EmptyPdf)
                } else {
                    Ok(text)
                }
            }
            Err(e) if primary_failed => {
                tracing::warn!(engine = self.fallback.name(), error = %e, "Fallback PDF engine failed");
                Err(e)
            }
            Err(e) => {
                // The primary parsed the file and found nothing to read.
                tracing::warn!(engine = self.fallback.name(), error = %e, "Fallback PDF engine failed");
                Err(DocumentParseError::EmptyPdf)
            }
        }
    }
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new(Box::new(LayoutPdfEngine), Box::new(PageTextPdfEngine))
    }
}

pub mod types;
pub mod format;
pub mod sanitize;
pub mod pdf;
pub mod email;
pub mod orchestrator;

pub use types::*;
pub use format::*;
pub use sanitize::*;
pub use pdf::*;
pub use email::*;
pub use orchestrator::*;

use thiserror::Error;

/// Fatal document failure: no text could be derived from the payload.
///
/// This is the only error the pipeline reports back to its caller for
/// problems with the submitted document itself.
#[derive(Error, Debug)]
pub enum DocumentParseError {
    #[error("No extractable text found in PDF")]
    EmptyPdf,

    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("Email parsing failed: {0}")]
    EmailParsing(String),
}

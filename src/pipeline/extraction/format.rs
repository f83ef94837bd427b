use serde::{Deserialize, Serialize};

/// Which extraction path a payload takes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Email,
    PlainText,
}

impl DocumentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Email => "email",
            Self::PlainText => "plain_text",
        }
    }
}

/// Pick the extraction path from the filename suffix or declared content type.
///
/// PDF wins over email, email wins over plain text. Anything unrecognised is
/// treated as text.
pub fn detect_format(filename: &str, content_type: Option<&str>) -> DocumentFormat {
    let lower = filename.to_lowercase();
    let mime = content_type.map(base_mime_type);

    if lower.ends_with(".pdf") || mime.as_deref() == Some("application/pdf") {
        return DocumentFormat::Pdf;
    }
    if lower.ends_with(".eml") || mime.as_deref() == Some("message/rfc822") {
        return DocumentFormat::Email;
    }
    DocumentFormat::PlainText
}

/// "Application/PDF; name=x.pdf" -> "application/pdf"
fn base_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

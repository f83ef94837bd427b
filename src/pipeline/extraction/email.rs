use mailparse::{DispositionType, MailHeaderMap, ParsedMail};

use super::sanitize::join_non_empty;
use super::DocumentParseError;

/// Flatten an RFC 822 message into text.
///
/// Output is the `Subject`, `From` and `To` headers, a blank line, then the
/// plain-text body. For multipart messages only inline `text/plain` parts are
/// kept; HTML alternatives and attachments are ignored.
pub fn extract_email_text(payload: &[u8]) -> Result<String, DocumentParseError> {
    let message = mailparse::parse_mail(payload)
        .map_err(|e| DocumentParseError::EmailParsing(e.to_string()))?;

    let header = |name: &str| message.headers.get_first_value(name).unwrap_or_default();
    let subject = header("Subject");
    let sender = header("From");
    let to = header("To");

    let mut body_parts = Vec::new();
    if is_multipart(&message) {
        collect_plain_text_parts(&message, &mut body_parts)?;
    } else {
        body_parts.push(
            message
                .get_body()
                .map_err(|e| DocumentParseError::EmailParsing(e.to_string()))?,
        );
    }

    let body = join_non_empty(&body_parts);
    Ok(format!("Subject: {subject}\nFrom: {sender}\nTo: {to}\n\n{body}")
        .trim()
        .to_string())
}

fn is_multipart(part: &ParsedMail<'_>) -> bool {
    part.ctype.mimetype.starts_with("multipart/")
}

/// Depth-first walk collecting decoded `text/plain` leaves.
fn collect_plain_text_parts(
    part: &ParsedMail<'_>,
    out: &mut Vec<String>,
) -> Result<(), DocumentParseError> {
    if is_multipart(part) {
        for sub in &part.subparts {
            collect_plain_text_parts(sub, out)?;
        }
        return Ok(());
    }

    if part.ctype.mimetype != "text/plain" {
        return Ok(());
    }
    if part.get_content_disposition().disposition == DispositionType::Attachment {
        return Ok(());
    }

    let text = part
        .get_body()
        .map_err(|e| DocumentParseError::EmailParsing(e.to_string()))?;
    out.push(text);
    Ok(())
}

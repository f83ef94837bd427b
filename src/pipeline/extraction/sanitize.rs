/// Decode bytes as UTF-8, dropping invalid byte sequences instead of
/// replacing them.
pub fn decode_utf8_tolerant(payload: &[u8]) -> String {
    let mut text = String::with_capacity(payload.len());
    for chunk in payload.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

/// Remove NUL characters.
pub fn strip_null_bytes(text: &str) -> String {
    if text.contains('\0') {
        text.replace('\0', "")
    } else {
        text.to_string()
    }
}

/// Trim each part, drop the empty ones, join the rest with newlines.
pub fn join_non_empty<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|p| p.as_ref().trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

// Clean document text before it is sent to the LLM backend.

/// Remove invisible characters and cap the text at `max_chars` characters.
pub fn sanitize_for_llm(raw: &str, max_chars: usize) -> String {
    let cleaned = remove_invisible_chars(raw);
    truncate_chars(&cleaned, max_chars)
}

/// Remove zero-width, bidi-control and C0/C1 control characters.
/// Preserves standard whitespace (space, newline, tab, carriage return).
fn remove_invisible_chars(text: &str) -> String {
    text.chars()
        .filter(|c| {
            if matches!(*c, ' ' | '\n' | '\t' | '\r') {
                return true;
            }
            if matches!(
                *c,
                '\u{200B}'  // Zero-width space
                | '\u{200C}' // Zero-width non-joiner
                | '\u{200D}' // Zero-width joiner
                | '\u{200E}' // Left-to-right mark
                | '\u{200F}' // Right-to-left mark
                | '\u{202A}'..='\u{202E}' // Bidi embeddings and overrides
                | '\u{2060}'..='\u{2064}' // Word joiner and invisible operators
                | '\u{2066}'..='\u{2069}' // Bidi isolates
                | '\u{FEFF}' // BOM / zero-width no-break space
            ) {
                return false;
            }
            !c.is_control()
        })
        .collect()
}

/// First `max_chars` characters of `text`, never splitting a code point.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_unchanged() {
        let input = "Insured: Atlas Fabrication LLC\nRevenue: $5,200,000";
        assert_eq!(sanitize_for_llm(input, 12_000), input);
    }

    #[test]
    fn removes_zero_width_chars() {
        assert_eq!(sanitize_for_llm("At\u{200B}las\u{FEFF}", 100), "Atlas");
    }

    #[test]
    fn removes_bidi_overrides() {
        assert_eq!(sanitize_for_llm("a\u{202E}b\u{2066}c", 100), "abc");
    }

    #[test]
    fn control_chars_removed_whitespace_kept() {
        assert_eq!(sanitize_for_llm("a\u{0007}b\u{0000}\tc\r\n", 100), "ab\tc\r\n");
    }

    #[test]
    fn truncates_by_characters() {
        assert_eq!(sanitize_for_llm("abcdef", 3), "abc");
        // Multi-byte characters count once each.
        assert_eq!(sanitize_for_llm("éééé", 2), "éé");
        assert_eq!(sanitize_for_llm("short", 100), "short");
    }

    #[test]
    fn zero_budget_yields_empty() {
        assert_eq!(sanitize_for_llm("anything", 0), "");
    }
}

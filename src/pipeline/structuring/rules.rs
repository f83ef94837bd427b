use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::confidence::{gated_confidence, RULE_CONFIDENCE};
use super::keywords::match_lob_keywords;
use super::types::{ExtractedFields, ExtractionResult, LobFields, RiskFactExtractor};
use super::StructuringError;
use crate::models::{FieldCitation, FieldValue};

static INSURED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:insured|named insured)\s*[:\-]\s*(.+)$").expect("valid insured regex")
});

static REVENUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:revenue|annual revenue)\s*[:\-]?\s*\$?([0-9,]+(?:\.[0-9]{1,2})?)")
        .expect("valid revenue regex")
});

static PAYROLL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:payroll|annual payroll)\s*[:\-]?\s*\$?([0-9,]+(?:\.[0-9]{1,2})?)")
        .expect("valid payroll regex")
});

/// `lob_fields` key holding the keyword hits behind each detected line.
pub const MATCHED_KEYWORDS_KEY: &str = "matched_keywords";

/// Deterministic keyword and regex extraction. Always available and used as
/// the safety net for the LLM path.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedExtractor;

impl RuleBasedExtractor {
    /// Infallible form of [`RiskFactExtractor::extract`].
    pub fn extract_facts(&self, raw_text: &str, filename: &str) -> ExtractionResult {
        let lines: Vec<&str> = raw_text
            .split(['\r', '\n'])
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let text = lines.join(" ");

        let insured_name = lines
            .iter()
            .find_map(|line| INSURED_NAME.captures(line))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|name| !name.is_empty());

        let (revenue, revenue_snippet) = match_amount(&REVENUE, &text);
        let (payroll, payroll_snippet) = match_amount(&PAYROLL, &text);

        let lob_matches = match_lob_keywords(&text);
        let matched_keywords: Vec<&str> = lob_matches.values().flatten().copied().collect();
        let lines_of_business = lob_matches.keys().cloned().collect();

        let mut lob_fields = LobFields::new();
        for (lob, keywords) in &lob_matches {
            lob_fields.entry(lob.clone()).or_default().insert(
                MATCHED_KEYWORDS_KEY.to_string(),
                FieldValue::from(keywords.clone()),
            );
        }

        let fields = ExtractedFields {
            insured_name,
            revenue,
            payroll,
            lines_of_business,
            lob_fields,
        };

        let lob_snippet = if matched_keywords.is_empty() {
            None
        } else {
            Some(matched_keywords.join(", "))
        };
        let snippets = [
            ("insured_name", fields.insured_name.clone()),
            ("revenue", revenue_snippet),
            ("payroll", payroll_snippet),
            ("lines_of_business", lob_snippet),
        ];
        let citations = snippets
            .into_iter()
            .map(|(name, snippet)| (name.to_string(), vec![FieldCitation::new(filename, snippet)]))
            .collect();

        let confidence = gated_confidence(&RULE_CONFIDENCE, &fields);
        let debug = BTreeMap::from([("strategy".to_string(), FieldValue::from("rules"))]);

        ExtractionResult {
            fields,
            confidence,
            citations,
            debug,
        }
    }
}

impl RiskFactExtractor for RuleBasedExtractor {
    fn extract(
        &self,
        raw_text: &str,
        filename: &str,
    ) -> Result<ExtractionResult, StructuringError> {
        Ok(self.extract_facts(raw_text, filename))
    }
}

/// First match of a money pattern: the parsed amount (separators stripped)
/// and the full matched text. An unparseable or non-finite number still
/// yields the snippet.
fn match_amount(pattern: &Regex, text: &str) -> (Option<f64>, Option<String>) {
    let Some(caps) = pattern.captures(text) else {
        return (None, None);
    };
    let snippet = caps.get(0).map(|m| m.as_str().to_string());
    let amount = caps
        .get(1)
        .and_then(|m| m.as_str().replace(',', "").parse::<f64>().ok())
        .filter(|n| n.is_finite());
    (amount, snippet)
}

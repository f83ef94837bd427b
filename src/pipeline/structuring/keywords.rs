use std::collections::BTreeMap;

use crate::models::LineOfBusiness;

/// Phrases that indicate each line of business, matched case-insensitively.
pub const LOB_KEYWORDS: [(LineOfBusiness, &[&str]); 3] = [
    (
        LineOfBusiness::GeneralLiability,
        &["general liability", "cgl", "premises liability"],
    ),
    (
        LineOfBusiness::WorkersComp,
        &["workers comp", "workers compensation", "wc policy"],
    ),
    (
        LineOfBusiness::Auto,
        &["commercial auto", "fleet", "driver schedule", "auto liability"],
    ),
];

/// Lines of business whose keywords appear in `text`, with the keywords that
/// matched (table order). Iteration order is the LOB sort order.
pub fn match_lob_keywords(text: &str) -> BTreeMap<LineOfBusiness, Vec<&'static str>> {
    let lower = text.to_lowercase();
    let mut matches = BTreeMap::new();
    for (lob, keywords) in &LOB_KEYWORDS {
        let hits: Vec<&'static str> = keywords
            .iter()
            .copied()
            .filter(|k| lower.contains(k))
            .collect();
        if !hits.is_empty() {
            matches.insert(lob.clone(), hits);
        }
    }
    matches
}

/// Keyword-inferred lines of business, deduplicated and sorted.
pub fn infer_lines_of_business(text: &str) -> Vec<LineOfBusiness> {
    match_lob_keywords(text).into_keys().collect()
}

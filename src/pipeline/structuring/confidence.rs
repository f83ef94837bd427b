use std::collections::BTreeMap;

use super::types::{ExtractedFields, FIELD_NAMES};

/// Per-field confidence assigned by the deterministic rule engine.
pub mod rule_confidence {
    pub const INSURED_NAME: f64 = 0.82;
    pub const REVENUE: f64 = 0.78;
    pub const PAYROLL: f64 = 0.78;
    pub const LINES_OF_BUSINESS: f64 = 0.70;
}

/// Per-field confidence assigned to values returned by the LLM.
pub mod llm_confidence {
    pub const INSURED_NAME: f64 = 0.90;
    pub const REVENUE: f64 = 0.86;
    pub const PAYROLL: f64 = 0.86;
    pub const LINES_OF_BUSINESS: f64 = 0.84;
}

/// Confidence values for one strategy, in [`FIELD_NAMES`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceTable {
    pub insured_name: f64,
    pub revenue: f64,
    pub payroll: f64,
    pub lines_of_business: f64,
}

pub const RULE_CONFIDENCE: ConfidenceTable = ConfidenceTable {
    insured_name: rule_confidence::INSURED_NAME,
    revenue: rule_confidence::REVENUE,
    payroll: rule_confidence::PAYROLL,
    lines_of_business: rule_confidence::LINES_OF_BUSINESS,
};

pub const LLM_CONFIDENCE: ConfidenceTable = ConfidenceTable {
    insured_name: llm_confidence::INSURED_NAME,
    revenue: llm_confidence::REVENUE,
    payroll: llm_confidence::PAYROLL,
    lines_of_business: llm_confidence::LINES_OF_BUSINESS,
};

impl ConfidenceTable {
    fn get(&self, field: &str) -> f64 {
        match field {
            "insured_name" => self.insured_name,
            "revenue" => self.revenue,
            "payroll" => self.payroll,
            "lines_of_business" => self.lines_of_business,
            _ => 0.0,
        }
    }
}

/// Confidence map gated on presence: the table value when the field was
/// found, 0.0 otherwise. Always has one entry per field name.
pub fn gated_confidence(table: &ConfidenceTable, fields: &ExtractedFields) -> BTreeMap<String, f64> {
    FIELD_NAMES
        .iter()
        .map(|&name| {
            let value = if fields.is_present(name) {
                table.get(name)
            } else {
                0.0
            };
            (name.to_string(), value)
        })
        .collect()
}

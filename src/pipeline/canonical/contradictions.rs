use crate::models::LineOfBusiness;
use crate::pipeline::structuring::{ExtractedFields, MATCHED_KEYWORDS_KEY};

pub const PAYROLL_EXCEEDS_REVENUE: &str = "Payroll exceeds revenue; verify reported financials.";
pub const AUTO_WITHOUT_DRIVER_SCHEDULE: &str =
    "AUTO coverage indicated but no driver schedule evidence found.";
pub const WC_WITHOUT_PAYROLL: &str = "WC indicated without payroll data.";
pub const INSURED_NAME_INCOMPLETE: &str = "Insured name appears incomplete.";

/// Minimum plausible length of a named insured, in characters.
const MIN_INSURED_NAME_CHARS: usize = 3;

/// Cross-field consistency checks over extracted facts.
///
/// All rules run; messages come back in rule order.
pub fn detect_contradictions(fields: &ExtractedFields) -> Vec<String> {
    let mut contradictions = Vec::new();
    let has_line = |lob: &LineOfBusiness| fields.lines_of_business.contains(lob);

    if let (Some(revenue), Some(payroll)) = (fields.revenue, fields.payroll) {
        if payroll > revenue {
            contradictions.push(PAYROLL_EXCEEDS_REVENUE.to_string());
        }
    }

    if has_line(&LineOfBusiness::Auto) && !has_driver_schedule_evidence(fields) {
        contradictions.push(AUTO_WITHOUT_DRIVER_SCHEDULE.to_string());
    }

    if has_line(&LineOfBusiness::WorkersComp) && fields.payroll.map_or(true, |p| p == 0.0) {
        contradictions.push(WC_WITHOUT_PAYROLL.to_string());
    }

    if let Some(name) = fields.insured_name.as_deref() {
        if !name.is_empty() && name.chars().count() < MIN_INSURED_NAME_CHARS {
            contradictions.push(INSURED_NAME_INCOMPLETE.to_string());
        }
    }

    contradictions
}

/// Any LOB sub-field key or text value mentioning the driver schedule.
/// Keyword hits only show the phrase occurs in the text, so they don't count.
fn has_driver_schedule_evidence(fields: &ExtractedFields) -> bool {
    fields
        .lob_fields
        .values()
        .flatten()
        .filter(|(key, _)| key.as_str() != MATCHED_KEYWORDS_KEY)
        .any(|(key, value)| {
            key.to_lowercase().replace('_', " ").contains("driver schedule")
                || value.mentions("driver schedule")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldValue;

    fn fields() -> ExtractedFields {
        ExtractedFields {
            insured_name: Some("Atlas Fabrication LLC".into()),
            revenue: Some(5_200_000.0),
            payroll: Some(1_800_000.0),
            lines_of_business: vec![LineOfBusiness::GeneralLiability],
            ..Default::default()
        }
    }

    #[test]
    fn consistent_fields_have_no_contradictions() {
        assert!(detect_contradictions(&fields()).is_empty());
    }

    #[test]
    fn payroll_above_revenue_is_flagged() {
        let mut f = fields();
        f.revenue = Some(100.0);
        f.payroll = Some(101.0);
        assert_eq!(detect_contradictions(&f), vec![PAYROLL_EXCEEDS_REVENUE]);
    }

    #[test]
    fn financials_mismatch_both_directions() {
        let mut f = fields();
        f.revenue = Some(1000.0);
        f.payroll = Some(2000.0);
        assert!(detect_contradictions(&f).contains(&PAYROLL_EXCEEDS_REVENUE.to_string()));

        f.revenue = Some(2000.0);
        f.payroll = Some(1000.0);
        assert!(!detect_contradictions(&f).contains(&PAYROLL_EXCEEDS_REVENUE.to_string()));
    }

    #[test]
    fn payroll_equal_or_below_revenue_is_not_flagged() {
        let mut f = fields();
        f.revenue = Some(100.0);
        f.payroll = Some(100.0);
        assert!(detect_contradictions(&f).is_empty());
        f.payroll = Some(99.0);
        assert!(detect_contradictions(&f).is_empty());
    }

    #[test]
    fn payroll_rule_needs_both_values() {
        let mut f = fields();
        f.revenue = None;
        f.payroll = Some(1e9);
        assert!(detect_contradictions(&f).is_empty());
    }

    #[test]
    fn auto_without_evidence_is_flagged() {
        let mut f = fields();
        f.lines_of_business = vec![LineOfBusiness::Auto];
        assert_eq!(detect_contradictions(&f), vec![AUTO_WITHOUT_DRIVER_SCHEDULE]);
    }

    #[test]
    fn auto_with_driver_schedule_key_is_clean() {
        let mut f = fields();
        f.lines_of_business = vec![LineOfBusiness::Auto];
        f.lob_fields
            .entry(LineOfBusiness::Auto)
            .or_default()
            .insert("driver_schedule".into(), FieldValue::Null);
        assert!(detect_contradictions(&f).is_empty());
    }

    #[test]
    fn auto_evidence_may_sit_under_any_lob() {
        let mut f = fields();
        f.lines_of_business = vec![LineOfBusiness::Auto, LineOfBusiness::GeneralLiability];
        f.lob_fields.entry(LineOfBusiness::GeneralLiability).or_default().insert(
            "notes".into(),
            FieldValue::from("Driver schedule provided separately"),
        );
        assert!(detect_contradictions(&f).is_empty());
    }

    #[test]
    fn keyword_hits_are_not_driver_schedule_evidence() {
        let mut f = fields();
        f.lines_of_business = vec![LineOfBusiness::Auto];
        f.lob_fields.entry(LineOfBusiness::Auto).or_default().insert(
            MATCHED_KEYWORDS_KEY.into(),
            FieldValue::from(vec!["fleet", "driver schedule"]),
        );
        assert_eq!(detect_contradictions(&f), vec![AUTO_WITHOUT_DRIVER_SCHEDULE]);
    }

    #[test]
    fn wc_without_payroll_is_flagged() {
        let mut f = fields();
        f.lines_of_business = vec![LineOfBusiness::WorkersComp];
        f.payroll = None;
        assert_eq!(detect_contradictions(&f), vec![WC_WITHOUT_PAYROLL]);
        f.payroll = Some(0.0);
        assert_eq!(detect_contradictions(&f), vec![WC_WITHOUT_PAYROLL]);
    }

    #[test]
    fn short_insured_name_is_flagged() {
        let mut f = fields();
        f.insured_name = Some("AB".into());
        assert_eq!(detect_contradictions(&f), vec![INSURED_NAME_INCOMPLETE]);
        f.insured_name = Some("ABC".into());
        assert!(detect_contradictions(&f).is_empty());
    }

    #[test]
    fn all_rules_fire_in_order() {
        let f = ExtractedFields {
            insured_name: Some("X".into()),
            revenue: Some(10.0),
            payroll: Some(0.0),
            lines_of_business: vec![LineOfBusiness::Auto, LineOfBusiness::WorkersComp],
            ..Default::default()
        };
        // payroll 0 is not above revenue 10, so rule 1 stays quiet.
        assert_eq!(
            detect_contradictions(&f),
            vec![
                AUTO_WITHOUT_DRIVER_SCHEDULE,
                WC_WITHOUT_PAYROLL,
                INSURED_NAME_INCOMPLETE
            ]
        );
    }
}

use crate::models::{CompletenessResult, CompletenessStatus, LineOfBusiness, RiskProfile};

/// Required fields checked for a line of business.
pub fn required_fields(lob: &LineOfBusiness) -> &'static [&'static str] {
    match lob {
        LineOfBusiness::GeneralLiability => &["insured_name", "revenue", "locations"],
        LineOfBusiness::WorkersComp => &["insured_name", "payroll", "locations"],
        LineOfBusiness::Auto => &["insured_name", "locations", "driver_schedule"],
        LineOfBusiness::Other(_) => &["insured_name", "revenue"],
    }
}

/// Whether `field` counts as missing on `profile`.
///
/// The profile has no driver schedule field, so `driver_schedule` is always
/// missing and AUTO submissions always ask for one.
fn is_missing(profile: &RiskProfile, field: &str) -> bool {
    match field {
        "insured_name" => profile.insured_name.as_deref().map_or(true, str::is_empty),
        "revenue" => profile.revenue.is_none(),
        "payroll" => profile.payroll.is_none(),
        "locations" => profile.locations.is_empty(),
        "driver_schedule" => true,
        _ => false,
    }
}

/// Score one LOB's checklist against the profile.
pub fn score_line(profile: &RiskProfile, lob: &LineOfBusiness) -> CompletenessResult {
    let required = required_fields(lob);
    let missing_fields: Vec<String> = required
        .iter()
        .filter(|field| is_missing(profile, field))
        .map(|field| field.to_string())
        .collect();

    let present_ratio = 1.0 - missing_fields.len() as f64 / required.len().max(1) as f64;
    let completeness_score = (present_ratio * 100.0).round().clamp(0.0, 100.0) as u8;
    let blockers = missing_fields
        .iter()
        .map(|field| format!("Missing required field: {field}"))
        .collect();

    CompletenessResult {
        line_of_business: lob.clone(),
        completeness_score,
        status: CompletenessStatus::from_score(completeness_score),
        missing_fields,
        blockers,
    }
}

/// Completeness per line of business on the profile, in profile order.
/// A profile without lines is scored as GL.
pub fn score_missingness(profile: &RiskProfile) -> Vec<CompletenessResult> {
    let default_lines = [LineOfBusiness::GeneralLiability];
    let lines = if profile.lines_of_business.is_empty() {
        &default_lines[..]
    } else {
        &profile.lines_of_business[..]
    };

    let results: Vec<CompletenessResult> = lines.iter().map(|lob| score_line(profile, lob)).collect();

    for result in &results {
        tracing::info!(
            submission_id = %profile.submission_id,
            lob = %result.line_of_business,
            score = result.completeness_score,
            status = result.status.as_str(),
            "Completeness scored"
        );
    }
    results
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::models::RiskLocation;

    fn location() -> RiskLocation {
        RiskLocation {
            address: "12 Mill Rd".into(),
            city: Some("Dayton".into()),
            state: Some("OH".into()),
            postal_code: Some("45402".into()),
            country: "US".into(),
        }
    }

    fn complete_profile(lines: Vec<LineOfBusiness>) -> RiskProfile {
        let mut profile = RiskProfile::new("sub_test");
        profile.insured_name = Some("Atlas Fabrication LLC".into());
        profile.revenue = Some(5_200_000.0);
        profile.payroll = Some(1_800_000.0);
        profile.locations.push(location());
        profile.lines_of_business = lines;
        profile
    }

    #[test]
    fn empty_profile_defaults_to_gl_and_scores_zero() {
        let results = score_missingness(&RiskProfile::new("sub_empty"));
        assert_eq!(results.len(), 1);
        let gl = &results[0];
        assert_eq!(gl.line_of_business, LineOfBusiness::GeneralLiability);
        assert_eq!(gl.completeness_score, 0);
        assert_eq!(gl.status, CompletenessStatus::Red);
        assert_eq!(gl.missing_fields, vec!["insured_name", "revenue", "locations"]);
        assert_eq!(
            gl.blockers,
            vec![
                "Missing required field: insured_name",
                "Missing required field: revenue",
                "Missing required field: locations",
            ]
        );
    }

    #[test]
    fn complete_gl_and_wc_are_green() {
        let results = score_missingness(&complete_profile(vec![
            LineOfBusiness::GeneralLiability,
            LineOfBusiness::WorkersComp,
        ]));
        for result in &results {
            assert_eq!(result.completeness_score, 100);
            assert_eq!(result.status, CompletenessStatus::Green);
            assert!(result.missing_fields.is_empty());
            assert!(result.blockers.is_empty());
        }
    }

    #[test]
    fn auto_always_misses_driver_schedule() {
        let results = score_missingness(&complete_profile(vec![LineOfBusiness::Auto]));
        let auto = &results[0];
        assert_eq!(auto.missing_fields, vec!["driver_schedule"]);
        // 1 - 1/3 = 66.67 rounds to 67.
        assert_eq!(auto.completeness_score, 67);
        assert_eq!(auto.status, CompletenessStatus::Yellow);
    }

    #[test]
    fn missing_locations_scores_two_thirds() {
        let mut profile = complete_profile(vec![LineOfBusiness::WorkersComp]);
        profile.locations.clear();
        let wc = &score_missingness(&profile)[0];
        assert_eq!(wc.missing_fields, vec!["locations"]);
        assert_eq!(wc.completeness_score, 67);
    }

    #[test]
    fn other_lob_uses_generic_checklist() {
        let mut profile = complete_profile(vec![LineOfBusiness::Other("BOP".into())]);
        profile.revenue = None;
        let bop = &score_missingness(&profile)[0];
        assert_eq!(bop.missing_fields, vec!["revenue"]);
        assert_eq!(bop.completeness_score, 50);
        assert_eq!(bop.status, CompletenessStatus::Red);
    }

    #[test]
    fn empty_insured_name_counts_as_missing() {
        let mut profile = complete_profile(vec![LineOfBusiness::GeneralLiability]);
        profile.insured_name = Some(String::new());
        assert_eq!(score_missingness(&profile)[0].missing_fields, vec!["insured_name"]);
    }

    #[test]
    fn zero_revenue_is_present() {
        let mut profile = complete_profile(vec![LineOfBusiness::GeneralLiability]);
        profile.revenue = Some(0.0);
        assert!(score_missingness(&profile)[0].missing_fields.is_empty());
    }

    #[test]
    fn results_follow_profile_line_order() {
        let results = score_missingness(&complete_profile(vec![
            LineOfBusiness::WorkersComp,
            LineOfBusiness::Auto,
        ]));
        let order: Vec<&str> = results.iter().map(|r| r.line_of_business.as_str()).collect();
        assert_eq!(order, vec!["WC", "AUTO"]);
    }

    fn arb_lob() -> impl Strategy<Value = LineOfBusiness> {
        prop_oneof![
            Just(LineOfBusiness::GeneralLiability),
            Just(LineOfBusiness::WorkersComp),
            Just(LineOfBusiness::Auto),
            "[A-Z]{2,4}".prop_map(LineOfBusiness::from),
        ]
    }

    proptest! {
        #[test]
        fn scores_stay_in_bounds(
            name in proptest::option::of("[a-zA-Z ]{0,12}"),
            revenue in proptest::option::of(0.0f64..1e9),
            payroll in proptest::option::of(0.0f64..1e9),
            with_location in any::<bool>(),
            lines in proptest::collection::vec(arb_lob(), 0..4),
        ) {
            let mut profile = RiskProfile::new("sub_prop");
            profile.insured_name = name;
            profile.revenue = revenue;
            profile.payroll = payroll;
            if with_location {
                profile.locations.push(location());
            }
            profile.lines_of_business = lines;

            for result in score_missingness(&profile) {
                prop_assert!(result.completeness_score <= 100);
                prop_assert_eq!(result.status, CompletenessStatus::from_score(result.completeness_score));
                prop_assert_eq!(result.blockers.len(), result.missing_fields.len());
                if result.line_of_business == LineOfBusiness::Auto {
                    prop_assert!(result.missing_fields.iter().any(|f| f == "driver_schedule"));
                }
            }
        }
    }
}

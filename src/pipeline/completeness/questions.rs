use std::collections::BTreeMap;

use crate::models::{CompletenessResult, LineOfBusiness, QuestionSet};

const DEFAULT_INSURED: &str = "your organization";
const COMPLETE_MESSAGE: &str = "Submission appears complete.";
const PLAIN_ENGLISH_PREFIX: &str =
    "We are close to quote-ready. We just need a few missing details to finish your submission: ";

/// Broker-facing prompt asking for a missing field, if one exists.
pub fn question_for_field(field: &str) -> Option<&'static str> {
    match field {
        "driver_schedule" => Some(
            "Please share the current driver schedule and note any drivers added in the last 12 months.",
        ),
        "locations" => Some("Please confirm all operating locations, including complete addresses."),
        "revenue" => Some("Please confirm current annual gross revenue."),
        "payroll" => Some("Please confirm current annual payroll by class code."),
        "insured_name" => {
            Some("Please confirm the exact named insured as it should appear on the policy.")
        }
        _ => None,
    }
}

/// Turn completeness gaps into grouped follow-up questions, an email draft
/// and a plain-language summary.
pub fn generate_question_set(
    insured_name: Option<&str>,
    completeness: &[CompletenessResult],
) -> QuestionSet {
    let mut grouped_questions: BTreeMap<LineOfBusiness, Vec<String>> = BTreeMap::new();
    let mut bullet_summary = Vec::new();

    for result in completeness {
        let prompts: Vec<String> = result
            .missing_fields
            .iter()
            .filter_map(|field| question_for_field(field))
            .map(str::to_string)
            .collect();
        if prompts.is_empty() {
            continue;
        }
        bullet_summary.extend(prompts.iter().cloned());
        grouped_questions
            .entry(result.line_of_business.clone())
            .or_default()
            .extend(prompts);
    }

    let insured = insured_name
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_INSURED);
    let bullets: Vec<String> = bullet_summary.iter().map(|q| format!("- {q}")).collect();
    let email_draft = format!(
        "Subject: Submission follow-up items for {insured}\n\n\
         Hi team,\n\n\
         To finalize underwriting review, please provide the following:\n\
         {}\n\nThanks.",
        bullets.join("\n")
    );

    let plain_english = if bullet_summary.is_empty() {
        COMPLETE_MESSAGE.to_string()
    } else {
        format!("{PLAIN_ENGLISH_PREFIX}{}", bullet_summary.join("; "))
    };

    QuestionSet {
        grouped_questions,
        email_draft,
        bullet_summary,
        plain_english,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CompletenessStatus;

    fn result(lob: LineOfBusiness, missing: &[&str]) -> CompletenessResult {
        CompletenessResult {
            line_of_business: lob,
            completeness_score: 0,
            status: CompletenessStatus::Red,
            missing_fields: missing.iter().map(|f| f.to_string()).collect(),
            blockers: vec![],
        }
    }

    #[test]
    fn empty_submission_asks_three_gl_questions() {
        let set = generate_question_set(
            None,
            &[result(
                LineOfBusiness::GeneralLiability,
                &["insured_name", "revenue", "locations"],
            )],
        );
        assert_eq!(
            set.bullet_summary,
            vec![
                "Please confirm the exact named insured as it should appear on the policy.",
                "Please confirm current annual gross revenue.",
                "Please confirm all operating locations, including complete addresses.",
            ]
        );
        assert_eq!(set.grouped_questions.len(), 1);
        assert_eq!(set.grouped_questions[&LineOfBusiness::GeneralLiability].len(), 3);
        assert_ne!(set.plain_english, "Submission appears complete.");
        assert!(set
            .email_draft
            .starts_with("Subject: Submission follow-up items for your organization\n\n"));
    }

    #[test]
    fn email_draft_matches_template() {
        let set = generate_question_set(
            Some("Atlas Fabrication LLC"),
            &[result(LineOfBusiness::WorkersComp, &["payroll"])],
        );
        assert_eq!(
            set.email_draft,
            "Subject: Submission follow-up items for Atlas Fabrication LLC\n\n\
             Hi team,\n\n\
             To finalize underwriting review, please provide the following:\n\
             - Please confirm current annual payroll by class code.\n\n\
             Thanks."
        );
        assert_eq!(
            set.plain_english,
            "We are close to quote-ready. We just need a few missing details to finish your submission: \
             Please confirm current annual payroll by class code."
        );
    }

    #[test]
    fn no_gaps_means_complete() {
        let set = generate_question_set(
            Some("Atlas"),
            &[result(LineOfBusiness::GeneralLiability, &[])],
        );
        assert!(set.grouped_questions.is_empty());
        assert!(set.bullet_summary.is_empty());
        assert_eq!(set.plain_english, "Submission appears complete.");
    }

    #[test]
    fn bullets_follow_processing_order_while_groups_sort() {
        let set = generate_question_set(
            None,
            &[
                result(LineOfBusiness::WorkersComp, &["locations"]),
                result(LineOfBusiness::Auto, &["driver_schedule"]),
            ],
        );
        assert_eq!(set.bullet_summary[0], question_for_field("locations").unwrap());
        assert_eq!(set.bullet_summary[1], question_for_field("driver_schedule").unwrap());
        let groups: Vec<&str> = set.grouped_questions.keys().map(|l| l.as_str()).collect();
        assert_eq!(groups, vec!["AUTO", "WC"]);
        assert!(set.plain_english.contains("; "));
    }

    #[test]
    fn unknown_fields_have_no_prompt() {
        let set = generate_question_set(None, &[result(LineOfBusiness::Auto, &["vehicle_vin"])]);
        assert!(set.grouped_questions.is_empty());
        assert_eq!(set.plain_english, "Submission appears complete.");
    }

    #[test]
    fn empty_insured_uses_default_greeting() {
        let set = generate_question_set(Some(""), &[]);
        assert!(set.email_draft.contains("for your organization\n"));
    }

    #[test]
    fn insured_name_is_used_as_given() {
        let set = generate_question_set(Some(" Atlas "), &[]);
        assert!(set
            .email_draft
            .starts_with("Subject: Submission follow-up items for  Atlas \n\n"));
    }
}

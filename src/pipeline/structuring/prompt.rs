use crate::models::LineOfBusiness;

pub const EXTRACTION_SYSTEM_PROMPT: &str = r#"
You are an insurance submission intake assistant. Your ONLY role is to extract
underwriting facts that are explicitly present in the submission text.

RULES:
1. Extract ONLY information explicitly stated in the document.
2. If a field is unclear or missing, output null for that field.
3. revenue and payroll are annual US dollar amounts as plain numbers, without
   currency symbols or separators.
4. lines_of_business may only contain "GL", "WC" and "AUTO".
5. Output MUST be a single JSON object and nothing else.
"#;

/// Sub-field names the LLM is asked to fill for each line of business.
pub fn lob_field_hints(lob: &LineOfBusiness) -> &'static [&'static str] {
    match lob {
        LineOfBusiness::GeneralLiability => &[
            "class_codes",
            "premises_description",
            "products_completed_operations",
        ],
        LineOfBusiness::WorkersComp => &["class_codes", "employee_count", "experience_modifier"],
        LineOfBusiness::Auto => &["vehicle_count", "driver_schedule", "radius_of_operation"],
        LineOfBusiness::Other(_) => &[],
    }
}

/// Full system instruction: the fixed rules plus the JSON shape, with
/// `lob_fields` hints for `hinted_lobs` (GL when empty).
pub fn build_extraction_system_prompt(hinted_lobs: &[LineOfBusiness]) -> String {
    let default_lobs = [LineOfBusiness::GeneralLiability];
    let lobs = if hinted_lobs.is_empty() {
        &default_lobs[..]
    } else {
        hinted_lobs
    };

    let hints: Vec<String> = lobs
        .iter()
        .map(|lob| {
            let fields: Vec<String> = lob_field_hints(lob)
                .iter()
                .map(|f| format!("\"{f}\": null"))
                .collect();
            format!("    \"{}\": {{{}}}", lob.as_str(), fields.join(", "))
        })
        .collect();

    format!(
        r#"{EXTRACTION_SYSTEM_PROMPT}
Return strict JSON with exactly these keys:

{{
  "insured_name": "string or null",
  "revenue": "number or null",
  "payroll": "number or null",
  "lines_of_business": ["GL" | "WC" | "AUTO"],
  "lob_fields": {{
{}
  }}
}}

Do not include any other keys."#,
        hints.join(",\n")
    )
}

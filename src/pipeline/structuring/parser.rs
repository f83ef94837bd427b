use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::types::{ExtractedFields, LobFields};
use super::StructuringError;
use crate::models::{FieldValue, LineOfBusiness};

/// Parse the LLM's JSON answer into extracted fields.
///
/// The answer must be one JSON object, optionally wrapped in a code fence.
/// Missing keys and `null` mean "not found"; a present key with the wrong
/// type is an error so the caller can fall back to the rule engine.
pub fn parse_extraction_response(response: &str) -> Result<ExtractedFields, StructuringError> {
    let json_str = strip_code_fence(response);
    let value: Value = serde_json::from_str(json_str)
        .map_err(|e| StructuringError::JsonParsing(e.to_string()))?;
    let Value::Object(obj) = value else {
        return Err(StructuringError::MalformedResponse(
            "Top-level JSON value is not an object".into(),
        ));
    };

    Ok(ExtractedFields {
        insured_name: parse_name(obj.get("insured_name"))?,
        revenue: parse_amount("revenue", obj.get("revenue"))?,
        payroll: parse_amount("payroll", obj.get("payroll"))?,
        lines_of_business: parse_lines(obj.get("lines_of_business"))?,
        lob_fields: parse_lob_fields(obj.get("lob_fields"))?,
    })
}

/// Remove a surrounding ```` ``` ```` / ```` ```json ```` fence if present.
fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the info string (e.g. "json") up to the end of the opening line.
    let body = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    body.trim_end().trim_end_matches("```").trim()
}

fn unexpected(field: &str, reason: impl Into<String>) -> StructuringError {
    StructuringError::UnexpectedShape {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn parse_name(value: Option<&Value>) -> Result<Option<String>, StructuringError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => {
            let name = s.trim();
            Ok((!name.is_empty()).then(|| name.to_string()))
        }
        Some(other) => Err(unexpected("insured_name", format!("expected string, got {other}"))),
    }
}

/// Numbers may arrive as JSON numbers or numeric strings ("$1,200,000").
fn parse_amount(field: &str, value: Option<&Value>) -> Result<Option<f64>, StructuringError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| unexpected(field, "number out of range")),
        Some(Value::String(s)) => {
            let cleaned: String = s
                .chars()
                .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
                .collect();
            if cleaned.is_empty() {
                return Ok(None);
            }
            cleaned
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Some)
                .ok_or_else(|| unexpected(field, format!("not a number: {s:?}")))
        }
        Some(other) => Err(unexpected(field, format!("expected number, got {other}"))),
    }
}

/// Normalized to GL/WC/AUTO (case-insensitive); unknown codes are dropped.
fn parse_lines(value: Option<&Value>) -> Result<Vec<LineOfBusiness>, StructuringError> {
    let items = match value {
        None | Some(Value::Null) => return Ok(vec![]),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(unexpected(
                "lines_of_business",
                format!("expected array, got {other}"),
            ))
        }
    };

    let mut lines = Vec::with_capacity(items.len());
    for item in items {
        let Value::String(code) = item else {
            return Err(unexpected(
                "lines_of_business",
                format!("expected string entry, got {item}"),
            ));
        };
        match LineOfBusiness::parse_supported(code) {
            Some(lob) => lines.push(lob),
            None => tracing::debug!(code = %code, "Dropping unsupported line of business"),
        }
    }
    lines.sort();
    lines.dedup();
    Ok(lines)
}

/// Entries keyed by an unsupported code, or whose value is not an object,
/// are skipped.
fn parse_lob_fields(value: Option<&Value>) -> Result<LobFields, StructuringError> {
    let obj: &Map<String, Value> = match value {
        None | Some(Value::Null) => return Ok(LobFields::new()),
        Some(Value::Object(obj)) => obj,
        Some(other) => return Err(unexpected("lob_fields", format!("expected object, got {other}"))),
    };

    let mut lob_fields = LobFields::new();
    for (code, sub_fields) in obj {
        let (Some(lob), Value::Object(sub_fields)) =
            (LineOfBusiness::parse_supported(code), sub_fields)
        else {
            continue;
        };
        let entry: BTreeMap<String, FieldValue> = sub_fields
            .iter()
            .map(|(k, v)| (k.clone(), FieldValue::from(v.clone())))
            .collect();
        lob_fields.entry(lob).or_default().extend(entry);
    }
    Ok(lob_fields)
}

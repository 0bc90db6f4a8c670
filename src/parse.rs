use crate::error::{ParseError, ParseErrorKind};
use crate::types::FormSchema;

/// Parse a YAML (or JSON) string into an unvalidated form schema.
///
/// Performs deserialization and type mapping only.
/// Does NOT validate the schema or apply normalization.
pub fn parse(input: &str) -> Result<FormSchema, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError {
            kind: ParseErrorKind::Syntax,
            message: "empty input".to_string(),
            path: None,
        });
    }

    check_multi_document(input)?;

    // YAML → serde_json::Value → FormSchema, so both YAML and JSON input
    // share one set of serde mappings.
    let value: serde_json::Value = serde_saphyr::from_str(input).map_err(|e| {
        let msg = e.to_string();
        ParseError {
            kind: classify_saphyr_error(&msg),
            message: msg,
            path: None,
        }
    })?;

    let Some(obj) = value.as_object() else {
        return Err(ParseError {
            kind: ParseErrorKind::TypeMismatch,
            message: "schema root must be a mapping".to_string(),
            path: None,
        });
    };

    for key in obj.keys() {
        if key != "fields" {
            return Err(ParseError {
                kind: ParseErrorKind::TypeMismatch,
                message: format!("unknown top-level field: {}", key),
                path: Some(key.to_string()),
            });
        }
    }

    serde_json::from_value(value).map_err(|e| {
        let msg = e.to_string();
        ParseError {
            kind: classify_json_error(&msg),
            message: msg,
            path: None,
        }
    })
}

/// Check for multiple YAML documents (--- separator).
/// Only matches `---` at column 0 to avoid false positives inside block scalars.
fn check_multi_document(input: &str) -> Result<(), ParseError> {
    let mut doc_count = 0;
    for line in input.lines() {
        if line.starts_with("---") && line[3..].trim().is_empty() {
            doc_count += 1;
            if doc_count > 1 {
                return Err(ParseError {
                    kind: ParseErrorKind::Syntax,
                    message: "multi-document YAML is not supported".to_string(),
                    path: None,
                });
            }
        }
    }
    Ok(())
}

fn classify_saphyr_error(msg: &str) -> ParseErrorKind {
    let lower = msg.to_lowercase();
    if lower.contains("unknown") || lower.contains("variant") {
        ParseErrorKind::UnknownVariant
    } else if lower.contains("type") || lower.contains("invalid") || lower.contains("expected") {
        ParseErrorKind::TypeMismatch
    } else {
        ParseErrorKind::Syntax
    }
}

fn classify_json_error(msg: &str) -> ParseErrorKind {
    let lower = msg.to_lowercase();
    if lower.contains("unknown variant") || lower.contains("unknown field") {
        ParseErrorKind::UnknownVariant
    } else if lower.contains("missing field") || lower.contains("invalid type") {
        ParseErrorKind::TypeMismatch
    } else {
        ParseErrorKind::Syntax
    }
}

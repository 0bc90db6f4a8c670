//! Schema validation against declaration rules V-001 through V-004 and
//! warnings W-001 through W-004.
//!
//! Returns **all** errors and warnings, not just the first. Validation does not
//! modify the schema.

use crate::error::*;
use crate::types::*;
use std::collections::HashSet;

/// Validate a parsed schema. Returns every error and warning found.
pub fn validate(schema: &FormSchema) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let fields = collect_fields(&schema.fields, "fields");

    v003_unique_sibling_attributes(&schema.fields, "fields", &mut errors);

    for entry in &fields {
        if let FieldDeclaration::Container(container) = entry.field {
            v003_unique_sibling_attributes(
                &container.fields,
                &format!("{}.container.fields", entry.path),
                &mut errors,
            );
            v004_container_has_fields(container, &entry.path, &mut errors);
            w002_container_has_dependencies(container, &entry.path, &mut warnings);

            for (i, dependency) in container.dependencies.iter().enumerate() {
                let path = format!("{}.container.dependencies[{}]", entry.path, i);
                v001_declaration_field(dependency, &path, &mut errors);
                v002_single_predicate(dependency, &path, &mut errors);
                w001_declaration_segments(dependency, &path, &mut warnings);
                w003_false_flags(dependency, &path, &mut warnings);
                w004_empty_member_sets(dependency, &path, &mut warnings);
            }
        }
    }

    ValidationResult { errors, warnings }
}

// ─── Helper: walk nested field declarations ──────────────────────────────────

struct FieldEntry<'a> {
    field: &'a FieldDeclaration,
    path: String,
}

fn collect_fields<'a>(fields: &'a [FieldDeclaration], prefix: &str) -> Vec<FieldEntry<'a>> {
    let mut out = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        let path = format!("{}[{}]", prefix, i);
        if let FieldDeclaration::Container(container) = field {
            let nested_prefix = format!("{}.container.fields", path);
            out.push(FieldEntry { field, path });
            out.extend(collect_fields(&container.fields, &nested_prefix));
        } else {
            out.push(FieldEntry { field, path });
        }
    }
    out
}

fn warning(code: &str, path: &str, message: String) -> Diagnostic {
    Diagnostic {
        severity: DiagnosticSeverity::Warning,
        code: code.to_string(),
        path: Some(path.to_string()),
        message,
    }
}

// ─── V-001: Declaration names a field ────────────────────────────────────────

fn v001_declaration_field(dependency: &RuleDeclaration, path: &str, errors: &mut Vec<ValidationError>) {
    let first = dependency.field.split('.').next().unwrap_or_default();
    if first.is_empty() {
        errors.push(ValidationError {
            rule: "V-001".to_string(),
            path: format!("{}.field", path),
            message: format!("dependency '{}' does not name a field", dependency.field),
        });
    }
    if dependency.field.contains('.') && dependency.field.split('.').nth(1).is_some_and(str::is_empty) {
        errors.push(ValidationError {
            rule: "V-001".to_string(),
            path: format!("{}.field", path),
            message: format!("dependency '{}' has an empty property segment", dependency.field),
        });
    }
}

// ─── V-002: Exactly one predicate ────────────────────────────────────────────

fn v002_single_predicate(dependency: &RuleDeclaration, path: &str, errors: &mut Vec<ValidationError>) {
    let keys = dependency.predicate_keys();
    if keys.len() > 1 {
        let names: Vec<&str> = keys.iter().map(|k| k.meta_key()).collect();
        errors.push(ValidationError {
            rule: "V-002".to_string(),
            path: path.to_string(),
            message: format!(
                "dependency on '{}' declares several predicates: {}",
                dependency.field,
                names.join(", ")
            ),
        });
    }
}

// ─── V-003: Unique attributes among siblings ─────────────────────────────────

fn v003_unique_sibling_attributes(
    fields: &[FieldDeclaration],
    prefix: &str,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for (i, field) in fields.iter().enumerate() {
        // Containers commonly share the empty attribute.
        if matches!(field, FieldDeclaration::Container(_)) {
            continue;
        }
        let attribute = field.attribute();
        if !seen.insert(attribute) {
            errors.push(ValidationError {
                rule: "V-003".to_string(),
                path: format!("{}[{}]", prefix, i),
                message: format!("duplicate field attribute '{}'", attribute),
            });
        }
    }
}

// ─── V-004: Containers hold fields ───────────────────────────────────────────

fn v004_container_has_fields(container: &ContainerDeclaration, path: &str, errors: &mut Vec<ValidationError>) {
    if container.fields.is_empty() {
        errors.push(ValidationError {
            rule: "V-004".to_string(),
            path: format!("{}.container.fields", path),
            message: "dependency container must hold at least one field".to_string(),
        });
    }
}

// ─── W-001: Extra declaration segments ───────────────────────────────────────

fn w001_declaration_segments(dependency: &RuleDeclaration, path: &str, warnings: &mut Vec<Diagnostic>) {
    if dependency.field.split('.').count() > 2 {
        warnings.push(warning(
            "W-001",
            &format!("{}.field", path),
            format!(
                "dependency '{}' has more than one '.'; segments after the property are ignored",
                dependency.field
            ),
        ));
    }
}

// ─── W-002: Container without dependencies ───────────────────────────────────

fn w002_container_has_dependencies(
    container: &ContainerDeclaration,
    path: &str,
    warnings: &mut Vec<Diagnostic>,
) {
    if container.dependencies.is_empty() {
        warnings.push(warning(
            "W-002",
            &format!("{}.container.dependencies", path),
            "container has no dependencies; its fields are shown but never validated".to_string(),
        ));
    }
}

// ─── W-003: Flags set to false ───────────────────────────────────────────────

fn w003_false_flags(dependency: &RuleDeclaration, path: &str, warnings: &mut Vec<Diagnostic>) {
    let flags = [
        ("empty", dependency.empty),
        ("notEmpty", dependency.not_empty),
        ("nullOrZero", dependency.null_or_zero),
    ];
    for (key, flag) in flags {
        if flag == Some(false) {
            warnings.push(warning(
                "W-003",
                &format!("{}.{}", path, key),
                format!("'{}: false' still makes this an {} dependency", key, key),
            ));
        }
    }
}

// ─── W-004: Empty member sets ────────────────────────────────────────────────

fn w004_empty_member_sets(dependency: &RuleDeclaration, path: &str, warnings: &mut Vec<Diagnostic>) {
    if dependency.in_values.as_ref().is_some_and(Vec::is_empty) {
        warnings.push(warning(
            "W-004",
            &format!("{}.in", path),
            "empty 'in' list is never satisfied".to_string(),
        ));
    }
    if dependency.not_in_values.as_ref().is_some_and(Vec::is_empty) {
        warnings.push(warning(
            "W-004",
            &format!("{}.notin", path),
            "empty 'notin' list is always satisfied".to_string(),
        ));
    }
}

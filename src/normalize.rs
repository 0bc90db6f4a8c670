use crate::primitives::split_declaration;
use crate::types::*;

/// Normalize a validated schema into its canonical form.
///
/// Dotted dependency declarations are split, rule strings are expanded into
/// lists, and every dependency is reduced to exactly one predicate.
///
/// This is idempotent: `normalize(normalize(schema)) == normalize(schema)`.
pub fn normalize(mut schema: FormSchema) -> FormSchema {
    normalize_fields(&mut schema.fields);
    schema
}

fn normalize_fields(fields: &mut [FieldDeclaration]) {
    for field in fields.iter_mut() {
        match field {
            FieldDeclaration::Input(input) => {
                n002_expand_rules(&mut input.rules);
                n002_expand_rules(&mut input.creation_rules);
                n002_expand_rules(&mut input.update_rules);
            }
            FieldDeclaration::Media(media) => {
                n002_expand_rules(&mut media.rules);
                n002_expand_rules(&mut media.creation_rules);
                n002_expand_rules(&mut media.update_rules);
            }
            FieldDeclaration::Container(container) => {
                for dependency in container.dependencies.iter_mut() {
                    n001_split_declaration(dependency);
                    n003_single_predicate(dependency);
                }
                normalize_fields(&mut container.fields);
            }
        }
    }
}

// ─── N-001: Split dotted declarations ────────────────────────────────────────

fn n001_split_declaration(dependency: &mut RuleDeclaration) {
    let (field, property) = split_declaration(&dependency.field);
    if dependency.property.is_none() {
        dependency.property = Some(property);
    }
    dependency.field = field;
}

// ─── N-002: Expand pipe-delimited rule strings ───────────────────────────────

fn n002_expand_rules(rules: &mut Option<RulesDeclaration>) {
    if let Some(RulesDeclaration::Piped(s)) = rules {
        *rules = Some(RulesDeclaration::List(crate::primitives::split_rule_string(s)));
    }
}

// ─── N-003: One predicate per dependency ─────────────────────────────────────

fn n003_single_predicate(dependency: &mut RuleDeclaration) {
    let keys = dependency.predicate_keys();
    if keys.len() > 1 {
        tracing::warn!(
            field = %dependency.field,
            kept = %keys[0],
            dropped = keys.len() - 1,
            "dependency declares several predicates; keeping the first by precedence"
        );
    }
    *dependency = RuleDeclaration::from(&dependency.to_rule());
}

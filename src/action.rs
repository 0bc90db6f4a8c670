//! Validation of action forms that contain dependency containers.
//!
//! An action marked as having dependencies validates only the fields that
//! are currently reachable: plain fields, plus the children of containers
//! whose dependencies hold for the request.

use crate::enums::RuleSituation;
use crate::field::Field;
use crate::resource::RequestValues;
use crate::rules::RuleSetBuilder;
use crate::types::RuleSet;

/// An action's form.
#[derive(Clone, Debug, Default)]
pub struct Action {
    pub name: String,
    pub fields: Vec<Field>,
    /// Whether validation must honour dependency containers.
    pub has_dependencies: bool,
}

impl Action {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Action {
            name: name.into(),
            fields,
            has_dependencies: false,
        }
    }

    pub fn with_dependencies(mut self) -> Self {
        self.has_dependencies = true;
        self
    }

    /// Creation rules to validate this action's submission with.
    pub fn validation_rules(&self, request: &dyn RequestValues) -> RuleSet {
        let builder = RuleSetBuilder::new(request);
        if self.has_dependencies {
            action_validation_rules(&builder, &self.fields, request)
        } else {
            collect_creation_rules(&builder, self.fields.iter())
        }
    }
}

/// Fields of an action that take part in validation.
///
/// Unsatisfied containers are dropped. Satisfied containers are kept and
/// their children appended after all top-level fields; nested containers
/// are expanded only when satisfied themselves.
pub fn available_fields<'f>(fields: &'f [Field], request: &dyn RequestValues) -> Vec<&'f Field> {
    let mut available = Vec::new();
    let mut children = Vec::new();

    for field in fields {
        match field {
            Field::Container(container) => {
                if container.are_dependencies_satisfied(request) {
                    available.push(field);
                    extract_child_fields(container.fields(), request, &mut children);
                }
            }
            _ => available.push(field),
        }
    }

    tracing::debug!(
        top_level = available.len(),
        children = children.len(),
        "action fields expanded"
    );

    available.extend(children);
    available
}

fn extract_child_fields<'f>(fields: &'f [Field], request: &dyn RequestValues, out: &mut Vec<&'f Field>) {
    for field in fields {
        match field {
            Field::Container(nested) => {
                if nested.are_dependencies_satisfied(request) {
                    extract_child_fields(nested.fields(), request, out);
                }
            }
            _ => out.push(field),
        }
    }
}

/// Creation rules of every available field. A later field's rules replace
/// an earlier entry for the same attribute.
pub fn action_validation_rules(
    builder: &RuleSetBuilder<'_>,
    fields: &[Field],
    request: &dyn RequestValues,
) -> RuleSet {
    collect_creation_rules(builder, available_fields(fields, request).into_iter())
}

fn collect_creation_rules<'f>(builder: &RuleSetBuilder<'_>, fields: impl Iterator<Item = &'f Field>) -> RuleSet {
    let mut rules = RuleSet::new();
    for field in fields {
        rules.extend(builder.field_rules(field, RuleSituation::CreationRules));
    }
    rules
}

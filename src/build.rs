//! [`FormSchema`] → runtime [`Field`]s.

use crate::container::DependencyContainer;
use crate::field::{Field, InputField, MediaCollectionField, RuleSource, SituationalRules};
use crate::types::*;

/// Builds runtime fields from a schema, in declaration order.
///
/// The schema should be normalized first; unnormalized input is accepted and
/// resolved the same way normalization would.
pub fn build_fields(schema: &FormSchema) -> Vec<Field> {
    schema.fields.iter().map(build_field).collect()
}

pub fn build_field(declaration: &FieldDeclaration) -> Field {
    match declaration {
        FieldDeclaration::Input(input) => {
            let mut field = InputField::new(input.attribute.clone());
            if let Some(name) = &input.name {
                field = field.name(name.clone());
            }
            field.rules = situational_rules(&input.rules, &input.creation_rules, &input.update_rules);
            Field::Input(field)
        }
        FieldDeclaration::Media(media) => {
            let mut field = MediaCollectionField::new(media.attribute.clone());
            if let Some(name) = &media.name {
                field = field.name(name.clone());
            }
            if let Some(collection) = &media.collection {
                field = field.collection(collection.clone());
            }
            field.rules = situational_rules(&media.rules, &media.creation_rules, &media.update_rules);
            Field::MediaCollection(field)
        }
        FieldDeclaration::Container(container) => {
            let fields = container.fields.iter().map(build_field).collect();
            let built = container
                .dependencies
                .iter()
                .map(RuleDeclaration::to_rule)
                .fold(
                    DependencyContainer::new(fields).with_attribute(container.attribute.clone()),
                    DependencyContainer::with_rule,
                );
            Field::Container(built)
        }
    }
}

fn situational_rules(
    rules: &Option<RulesDeclaration>,
    creation_rules: &Option<RulesDeclaration>,
    update_rules: &Option<RulesDeclaration>,
) -> SituationalRules {
    SituationalRules {
        rules: rule_source(rules),
        creation_rules: rule_source(creation_rules),
        update_rules: rule_source(update_rules),
    }
}

fn rule_source(rules: &Option<RulesDeclaration>) -> RuleSource {
    rules
        .as_ref()
        .map(|r| RuleSource::from(r.to_list()))
        .unwrap_or_default()
}

//! Field meta for the form front end, and [`FormSchema`] → YAML.

use serde_json::{Map, Value, json};

use crate::container::DependencyContainer;
use crate::error::SerializeError;
use crate::evaluate::DisplayEvaluation;
use crate::field::Field;
use crate::types::{FormSchema, RuleDeclaration};

/// Serialize a schema to a YAML string.
///
/// The schema should typically be normalized before serialization.
pub fn serialize(schema: &FormSchema) -> Result<String, SerializeError> {
    let value = serde_json::to_value(schema).map_err(|e| SerializeError {
        message: format!("failed to convert schema to JSON value: {}", e),
    })?;

    serde_saphyr::to_string(&value).map_err(|e| SerializeError {
        message: format!("failed to serialize to YAML: {}", e),
    })
}

/// Meta the form component renders a container from.
///
/// Each dependency is emitted in its declaration layout. When a display
/// evaluation is supplied, every dependency also carries its `satisfied`
/// flag and nested containers pick up their own evaluation.
pub fn container_meta(container: &DependencyContainer, evaluation: Option<&DisplayEvaluation>) -> Result<Value, SerializeError> {
    let mut dependencies = Vec::with_capacity(container.dependencies().len());
    for (index, rule) in container.dependencies().iter().enumerate() {
        let mut dependency = serde_json::to_value(RuleDeclaration::from(rule)).map_err(|e| SerializeError {
            message: format!("failed to serialize dependency on '{}': {}", rule.field, e),
        })?;
        if let (Some(evaluation), Some(obj)) = (evaluation, dependency.as_object_mut()) {
            obj.insert("satisfied".to_string(), Value::Bool(evaluation.is_satisfied(index)));
        }
        dependencies.push(dependency);
    }

    let mut fields = Vec::with_capacity(container.fields().len());
    for (index, field) in container.fields().iter().enumerate() {
        fields.push(field_meta(field, evaluation.and_then(|e| e.child(index)))?);
    }

    Ok(json!({
        "component": DependencyContainer::COMPONENT,
        "attribute": container.attribute(),
        "showOnIndex": false,
        "fields": fields,
        "dependencies": dependencies,
    }))
}

/// Meta of any field.
pub fn field_meta(field: &Field, evaluation: Option<&DisplayEvaluation>) -> Result<Value, SerializeError> {
    let (component, attribute, name, value) = match field {
        Field::Container(container) => return container_meta(container, evaluation),
        Field::Input(input) => ("text-field", &input.attribute, &input.name, &input.value),
        Field::MediaCollection(media) => ("medialibrary-field", &media.attribute, &media.name, &media.value),
    };

    let mut meta = Map::new();
    meta.insert("component".to_string(), json!(component));
    meta.insert("attribute".to_string(), json!(attribute));
    meta.insert("name".to_string(), json!(name));
    meta.insert("value".to_string(), value.clone().unwrap_or(Value::Null));
    if let Field::MediaCollection(media) = field {
        meta.insert("collection".to_string(), json!(media.collection));
    }
    Ok(Value::Object(meta))
}

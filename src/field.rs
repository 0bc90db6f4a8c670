//! Child fields a container delegates to.
//!
//! Field kinds form a closed set: plain inputs, media collections, and
//! nested dependency containers.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::container::DependencyContainer;
use crate::enums::RuleSituation;
use crate::evaluate::DisplayEvaluation;
use crate::primitives::split_rule_string;
use crate::resource::{Model, RequestValues, Resource};
use crate::types::ValidationRule;

/// Work a field defers until after the model has been saved.
pub type DeferredFill = Box<dyn FnOnce(&mut Model)>;

/// Custom fill logic: `(request, model, attribute)`, optionally deferring work.
pub type FillCallback =
    Arc<dyn Fn(&dyn RequestValues, &mut Model, &str) -> Option<DeferredFill> + Send + Sync>;

/// Transforms a resolved value for display.
pub type DisplayCallback = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Rules computed from the current request.
pub type ComputedRules = Arc<dyn Fn(&dyn RequestValues) -> Vec<ValidationRule> + Send + Sync>;

// ─── Rule sources ───────────────────────────────────────────────────────────

/// Where a field's validation rules come from.
#[derive(Clone)]
pub enum RuleSource {
    Static(Vec<ValidationRule>),
    Computed(ComputedRules),
}

impl RuleSource {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&dyn RequestValues) -> Vec<ValidationRule> + Send + Sync + 'static,
    {
        RuleSource::Computed(Arc::new(f))
    }

    /// The rules for this request.
    pub fn resolve(&self, request: &dyn RequestValues) -> Vec<ValidationRule> {
        match self {
            RuleSource::Static(rules) => rules.clone(),
            RuleSource::Computed(f) => f(request),
        }
    }
}

impl Default for RuleSource {
    fn default() -> Self {
        RuleSource::Static(Vec::new())
    }
}

impl fmt::Debug for RuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSource::Static(rules) => f.debug_tuple("Static").field(rules).finish(),
            RuleSource::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<Vec<ValidationRule>> for RuleSource {
    fn from(rules: Vec<ValidationRule>) -> Self {
        RuleSource::Static(rules)
    }
}

impl From<Vec<&str>> for RuleSource {
    fn from(rules: Vec<&str>) -> Self {
        RuleSource::Static(rules.into_iter().map(ValidationRule::from).collect())
    }
}

impl From<Vec<String>> for RuleSource {
    fn from(rules: Vec<String>) -> Self {
        RuleSource::Static(rules.into_iter().map(ValidationRule::from).collect())
    }
}

/// A pipe-delimited rule string, e.g. `"required|max:255"`.
impl From<&str> for RuleSource {
    fn from(rules: &str) -> Self {
        split_rule_string(rules).into()
    }
}

/// Rule sources for each operation context.
#[derive(Clone, Debug, Default)]
pub struct SituationalRules {
    pub rules: RuleSource,
    pub creation_rules: RuleSource,
    pub update_rules: RuleSource,
}

impl SituationalRules {
    pub fn source(&self, situation: RuleSituation) -> &RuleSource {
        match situation {
            RuleSituation::Rules => &self.rules,
            RuleSituation::CreationRules => &self.creation_rules,
            RuleSituation::UpdateRules => &self.update_rules,
        }
    }
}

// ─── Input field ────────────────────────────────────────────────────────────

/// A plain form input bound to one model attribute.
#[derive(Clone)]
pub struct InputField {
    pub attribute: String,
    pub name: String,
    pub rules: SituationalRules,
    /// Value resolved from the last resource, if any.
    pub value: Option<Value>,
    fill_using: Option<FillCallback>,
    display_using: Option<DisplayCallback>,
}

impl InputField {
    pub fn new(attribute: impl Into<String>) -> Self {
        let attribute = attribute.into();
        InputField {
            name: attribute.clone(),
            attribute,
            rules: SituationalRules::default(),
            value: None,
            fill_using: None,
            display_using: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn rules(mut self, rules: impl Into<RuleSource>) -> Self {
        self.rules.rules = rules.into();
        self
    }

    pub fn creation_rules(mut self, rules: impl Into<RuleSource>) -> Self {
        self.rules.creation_rules = rules.into();
        self
    }

    pub fn update_rules(mut self, rules: impl Into<RuleSource>) -> Self {
        self.rules.update_rules = rules.into();
        self
    }

    pub fn fill_using<F>(mut self, f: F) -> Self
    where
        F: Fn(&dyn RequestValues, &mut Model, &str) -> Option<DeferredFill> + Send + Sync + 'static,
    {
        self.fill_using = Some(Arc::new(f));
        self
    }

    pub fn display_using<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.display_using = Some(Arc::new(f));
        self
    }

    pub fn resolve(&mut self, resource: &dyn Resource, attribute: Option<&str>) {
        self.value = resource.attribute(attribute.unwrap_or(&self.attribute));
    }

    pub fn resolve_for_display(&mut self, resource: &dyn Resource) {
        let value = resource.attribute(&self.attribute);
        self.value = match &self.display_using {
            Some(f) => value.map(|v| f(v)),
            None => value,
        };
    }

    /// Copies the submitted value onto the model, when one was submitted.
    pub fn fill(&self, request: &dyn RequestValues, model: &mut Model) -> Option<DeferredFill> {
        if let Some(f) = &self.fill_using {
            return f(request, model, self.attribute.as_str());
        }
        if request.has(&self.attribute) {
            let value = request.get(&self.attribute).unwrap_or(Value::Null);
            model.set_attribute(self.attribute.clone(), value);
        }
        None
    }
}

impl fmt::Debug for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputField")
            .field("attribute", &self.attribute)
            .field("name", &self.name)
            .field("rules", &self.rules)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

// ─── Media collection field ─────────────────────────────────────────────────

/// A field attaching uploaded media to a named collection.
///
/// Media can only be attached once the model exists, so filling is deferred.
/// Its rules go through a [`crate::rules::MediaRulesNormalizer`].
#[derive(Clone, Debug)]
pub struct MediaCollectionField {
    pub attribute: String,
    pub name: String,
    pub collection: String,
    pub rules: SituationalRules,
    pub value: Option<Value>,
}

impl MediaCollectionField {
    pub fn new(attribute: impl Into<String>) -> Self {
        let attribute = attribute.into();
        MediaCollectionField {
            name: attribute.clone(),
            collection: attribute.clone(),
            attribute,
            rules: SituationalRules::default(),
            value: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn rules(mut self, rules: impl Into<RuleSource>) -> Self {
        self.rules.rules = rules.into();
        self
    }

    pub fn creation_rules(mut self, rules: impl Into<RuleSource>) -> Self {
        self.rules.creation_rules = rules.into();
        self
    }

    pub fn update_rules(mut self, rules: impl Into<RuleSource>) -> Self {
        self.rules.update_rules = rules.into();
        self
    }

    pub fn resolve(&mut self, resource: &dyn Resource, attribute: Option<&str>) {
        self.value = resource.attribute(attribute.unwrap_or(&self.attribute));
    }

    pub fn resolve_for_display(&mut self, resource: &dyn Resource) {
        self.value = resource.attribute(&self.attribute);
    }

    /// Defers attaching the submitted media until the model is saved.
    pub fn fill(&self, request: &dyn RequestValues, _model: &mut Model) -> Option<DeferredFill> {
        if !request.has(&self.attribute) {
            return None;
        }
        let media = request.get(&self.attribute).unwrap_or(Value::Null);
        let attribute = self.attribute.clone();
        let deferred: DeferredFill = Box::new(move |model: &mut Model| {
            model.set_attribute(attribute, media);
        });
        Some(deferred)
    }
}

// ─── Field ──────────────────────────────────────────────────────────────────

/// Any field a container can hold.
#[derive(Clone, Debug)]
pub enum Field {
    Input(InputField),
    MediaCollection(MediaCollectionField),
    Container(DependencyContainer),
}

impl Field {
    pub fn attribute(&self) -> &str {
        match self {
            Field::Input(f) => &f.attribute,
            Field::MediaCollection(f) => &f.attribute,
            Field::Container(c) => c.attribute(),
        }
    }

    /// Resolves the field for display. Containers return their rule evaluation.
    pub fn resolve_for_display(&mut self, resource: &dyn Resource) -> Option<DisplayEvaluation> {
        match self {
            Field::Input(f) => {
                f.resolve_for_display(resource);
                None
            }
            Field::MediaCollection(f) => {
                f.resolve_for_display(resource);
                None
            }
            Field::Container(c) => Some(c.resolve_for_display(resource)),
        }
    }

    pub fn resolve(&mut self, resource: &dyn Resource, attribute: Option<&str>) {
        match self {
            Field::Input(f) => f.resolve(resource, attribute),
            Field::MediaCollection(f) => f.resolve(resource, attribute),
            Field::Container(c) => c.resolve(resource, attribute),
        }
    }

    pub fn fill(&self, request: &dyn RequestValues, model: &mut Model) -> Option<DeferredFill> {
        match self {
            Field::Input(f) => f.fill(request, model),
            Field::MediaCollection(f) => f.fill(request, model),
            Field::Container(c) => Some(c.fill(request, model)),
        }
    }

    pub fn as_container(&self) -> Option<&DependencyContainer> {
        match self {
            Field::Container(c) => Some(c),
            _ => None,
        }
    }
}

impl From<InputField> for Field {
    fn from(field: InputField) -> Self {
        Field::Input(field)
    }
}

impl From<MediaCollectionField> for Field {
    fn from(field: MediaCollectionField) -> Self {
        Field::MediaCollection(field)
    }
}

impl From<DependencyContainer> for Field {
    fn from(container: DependencyContainer) -> Self {
        Field::Container(container)
    }
}

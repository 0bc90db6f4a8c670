//! The dependency container field.
//!
//! A container groups child fields and gates them on dependency rules over
//! sibling field values. Display resolution always resolves every child and
//! reports per-rule satisfaction for the form component to act on; request
//! handling uses the rules to decide whether children contribute validation.

use serde_json::Value;

use crate::evaluate::{DisplayEvaluation, are_dependencies_satisfied, evaluate_for_display};
use crate::field::{DeferredFill, Field};
use crate::resource::{Model, RequestValues, Resource};
use crate::types::{DependencyRule, Predicate};

/// A field that reveals and requires its children only while its
/// dependencies hold.
#[derive(Clone, Debug, Default)]
pub struct DependencyContainer {
    attribute: String,
    fields: Vec<Field>,
    dependencies: Vec<DependencyRule>,
}

impl DependencyContainer {
    /// Component name the form front end registers this field under.
    pub const COMPONENT: &'static str = "dependency-container";

    pub fn new(fields: Vec<Field>) -> Self {
        DependencyContainer {
            attribute: String::new(),
            fields,
            dependencies: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut [Field] {
        &mut self.fields
    }

    pub fn dependencies(&self) -> &[DependencyRule] {
        &self.dependencies
    }

    /// Appends an already-built rule.
    pub fn with_rule(mut self, rule: DependencyRule) -> Self {
        self.dependencies.push(rule);
        self
    }

    // ─── Declaration ────────────────────────────────────────────────────────

    /// Satisfied when `field` loosely equals `value`.
    ///
    /// `field` may be dot-qualified (`"category.slug"`) to compare a property
    /// other than the input itself.
    pub fn depends_on(self, field: &str, value: impl Into<Value>) -> Self {
        self.with_rule(DependencyRule::new(field, Predicate::Equals(value.into())))
    }

    pub fn depends_on_not(self, field: &str, value: impl Into<Value>) -> Self {
        self.with_rule(DependencyRule::new(field, Predicate::NotEquals(value.into())))
    }

    pub fn depends_on_empty(self, field: &str) -> Self {
        self.with_rule(DependencyRule::new(field, Predicate::Empty))
    }

    pub fn depends_on_not_empty(self, field: &str) -> Self {
        self.with_rule(DependencyRule::new(field, Predicate::NotEmpty))
    }

    pub fn depends_on_null_or_zero(self, field: &str) -> Self {
        self.with_rule(DependencyRule::new(field, Predicate::NullOrZero))
    }

    pub fn depends_on_in<I, V>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let items = values.into_iter().map(Into::into).collect();
        self.with_rule(DependencyRule::new(field, Predicate::In(items)))
    }

    pub fn depends_on_not_in<I, V>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let items = values.into_iter().map(Into::into).collect();
        self.with_rule(DependencyRule::new(field, Predicate::NotIn(items)))
    }

    // ─── Resolution ─────────────────────────────────────────────────────────

    /// Resolves every child for display, then evaluates the dependencies.
    ///
    /// Children are resolved whether or not the dependencies hold; hiding is
    /// left to the form component.
    pub fn resolve_for_display(&mut self, resource: &dyn Resource) -> DisplayEvaluation {
        let mut children = std::collections::BTreeMap::new();
        for (index, field) in self.fields.iter_mut().enumerate() {
            if let Some(nested) = field.resolve_for_display(resource) {
                children.insert(index, nested);
            }
        }

        let mut evaluation = self.evaluate_for_display(resource);
        evaluation.children = children;

        tracing::debug!(
            container = %self.attribute,
            satisfied = evaluation.satisfied_count(),
            total = self.dependencies.len(),
            "container resolved for display"
        );

        evaluation
    }

    /// Evaluates the dependencies against a resource without touching children.
    pub fn evaluate_for_display(&self, resource: &dyn Resource) -> DisplayEvaluation {
        evaluate_for_display(&self.dependencies, resource)
    }

    pub fn resolve(&mut self, resource: &dyn Resource, attribute: Option<&str>) {
        for field in &mut self.fields {
            field.resolve(resource, attribute);
        }
    }

    /// Fills every child, returning one callback that runs the children's
    /// deferred work in declaration order.
    pub fn fill(&self, request: &dyn RequestValues, model: &mut Model) -> DeferredFill {
        let callbacks: Vec<DeferredFill> = self
            .fields
            .iter()
            .filter_map(|field| field.fill(request, model))
            .collect();

        Box::new(move |model: &mut Model| {
            for callback in callbacks {
                callback(model);
            }
        })
    }

    // ─── Request handling ───────────────────────────────────────────────────

    /// True when every dependency holds for the request. A container without
    /// dependencies is never satisfied here.
    pub fn are_dependencies_satisfied(&self, request: &dyn RequestValues) -> bool {
        are_dependencies_satisfied(&self.dependencies, request)
    }
}

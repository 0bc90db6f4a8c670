//! Dependency satisfaction, in display mode and in request mode.
//!
//! The two modes deliberately test Empty/NotEmpty differently: display mode
//! looks at the stored value, request mode only at whether the key was
//! submitted. Neither evaluator mutates the rules it is given.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::enums::ResourceKind;
use crate::primitives::{
    is_empty_value, is_null_or_zero, is_null_zero_or_blank, loose_contains, loose_equals,
    type_tag_matches,
};
use crate::resource::{RequestValues, Resource};
use crate::types::{DependencyRule, Predicate};

// ─── Display mode ───────────────────────────────────────────────────────────

/// Per-rule outcome of a display-mode pass over one container.
///
/// `satisfied[i]` belongs to the container's i-th rule. Nested containers
/// report their own evaluation under their child index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DisplayEvaluation {
    pub satisfied: Vec<bool>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<usize, DisplayEvaluation>,
}

impl DisplayEvaluation {
    pub fn is_satisfied(&self, index: usize) -> bool {
        self.satisfied.get(index).copied().unwrap_or(false)
    }

    pub fn satisfied_count(&self) -> usize {
        self.satisfied.iter().filter(|s| **s).count()
    }

    /// True when every rule is satisfied. Vacuously true with no rules.
    pub fn all_satisfied(&self) -> bool {
        self.satisfied.iter().all(|s| *s)
    }

    pub fn child(&self, index: usize) -> Option<&DisplayEvaluation> {
        self.children.get(&index)
    }
}

/// Evaluates one rule against a loaded resource.
///
/// Absent attributes read as null. Equals against a plain map requires the
/// key to be present and non-null. Equals against a model falls back to the
/// `{property}_type` relation tag, which satisfies the rule when it ends with
/// `\{argument}`.
pub fn evaluate_rule_for_display(rule: &DependencyRule, resource: &dyn Resource) -> bool {
    let value = resource.attribute(&rule.property).unwrap_or(Value::Null);

    let satisfied = match &rule.predicate {
        Predicate::Empty => is_empty_value(&value),
        Predicate::NotEmpty => !is_empty_value(&value),
        Predicate::NullOrZero => is_null_or_zero(&value),
        Predicate::NotEquals(expected) => !loose_equals(&value, expected),
        Predicate::In(items) => loose_contains(items, &value),
        Predicate::NotIn(items) => !loose_contains(items, &value),
        Predicate::Equals(expected) => match resource.kind() {
            ResourceKind::Map => !value.is_null() && loose_equals(expected, &value),
            ResourceKind::Model => {
                loose_equals(expected, &value)
                    || resource
                        .attribute(&format!("{}_type", rule.property))
                        .is_some_and(|tag| type_tag_matches(&tag, expected))
            }
        },
    };

    tracing::trace!(
        field = %rule.field,
        property = %rule.property,
        predicate = %rule.kind(),
        satisfied,
        "display rule evaluated"
    );

    satisfied
}

/// Evaluates every rule against a loaded resource, in declaration order.
pub fn evaluate_for_display(rules: &[DependencyRule], resource: &dyn Resource) -> DisplayEvaluation {
    DisplayEvaluation {
        satisfied: rules
            .iter()
            .map(|rule| evaluate_rule_for_display(rule, resource))
            .collect(),
        children: BTreeMap::new(),
    }
}

// ─── Request mode ───────────────────────────────────────────────────────────

/// Evaluates one rule against submitted request values.
///
/// Empty/NotEmpty test key presence only: a submitted `""` is not Empty.
/// NullOrZero additionally accepts `""`. Absent keys read as null.
pub fn evaluate_rule_for_request(rule: &DependencyRule, request: &dyn RequestValues) -> bool {
    let value = || request.get(&rule.property).unwrap_or(Value::Null);

    let satisfied = match &rule.predicate {
        Predicate::Empty => !request.has(&rule.property),
        Predicate::NotEmpty => request.has(&rule.property),
        Predicate::NullOrZero => is_null_zero_or_blank(&value()),
        Predicate::In(items) => loose_contains(items, &value()),
        Predicate::NotIn(items) => !loose_contains(items, &value()),
        Predicate::NotEquals(expected) => !loose_equals(expected, &value()),
        Predicate::Equals(expected) => loose_equals(expected, &value()),
    };

    tracing::trace!(
        field = %rule.field,
        property = %rule.property,
        predicate = %rule.kind(),
        satisfied,
        "request rule evaluated"
    );

    satisfied
}

/// Number of rules satisfied by the request.
pub fn count_satisfied(rules: &[DependencyRule], request: &dyn RequestValues) -> usize {
    rules
        .iter()
        .filter(|rule| evaluate_rule_for_request(rule, request))
        .count()
}

/// True when every rule is satisfied by the request.
///
/// An empty rule list is never satisfied: a container without dependencies
/// contributes no validation rules.
pub fn are_dependencies_satisfied(rules: &[DependencyRule], request: &dyn RequestValues) -> bool {
    if rules.is_empty() {
        return false;
    }
    count_satisfied(rules, request) == rules.len()
}

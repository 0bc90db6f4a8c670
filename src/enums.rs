//! Closed enumerations used throughout the dependency-container type system.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The comparison a dependency rule performs against a property value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateKind {
    Equals,
    NotEquals,
    Empty,
    NotEmpty,
    NullOrZero,
    In,
    NotIn,
}

impl PredicateKind {
    /// Key used for this predicate in the UI meta layout of a rule.
    pub fn meta_key(self) -> &'static str {
        match self {
            PredicateKind::Equals => "value",
            PredicateKind::NotEquals => "not",
            PredicateKind::Empty => "empty",
            PredicateKind::NotEmpty => "notEmpty",
            PredicateKind::NullOrZero => "nullOrZero",
            PredicateKind::In => "in",
            PredicateKind::NotIn => "notin",
        }
    }
}

impl fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.meta_key())
    }
}

/// Operation context a validation rule set is built for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSituation {
    /// Base rules, applied to every operation.
    #[default]
    Rules,
    CreationRules,
    UpdateRules,
}

/// Shape of a resource handed to display-mode evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    /// Plain key-value map; equality is a direct lookup with no relation fallback.
    Map,
    /// Model object; equality may fall back to the `{property}_type` relation tag.
    Model,
}

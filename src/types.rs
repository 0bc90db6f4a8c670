use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::enums::PredicateKind;
use crate::primitives::split_declaration;

// ─── Dependency rule model ──────────────────────────────────────────────────

/// One declared dependency condition on a sibling field.
///
/// Rules are immutable once declared; satisfaction is computed per call by
/// the evaluators in [`crate::evaluate`] and never stored on the rule.
#[derive(Clone, Debug, PartialEq)]
pub struct DependencyRule {
    /// Literal form input name.
    pub field: String,
    /// Property compared against the predicate. Equals `field` unless the
    /// declaration was dot-qualified.
    pub property: String,
    pub predicate: Predicate,
}

impl DependencyRule {
    /// Build a rule from a declaration such as `"type"` or `"category.slug"`.
    pub fn new(declaration: &str, predicate: Predicate) -> Self {
        let (field, property) = split_declaration(declaration);
        DependencyRule {
            field,
            property,
            predicate,
        }
    }

    pub fn kind(&self) -> PredicateKind {
        self.predicate.kind()
    }
}

/// Builds a rule from a predicate kind and its optional argument.
///
/// Equals/NotEquals treat a missing argument as null. In/NotIn accept an
/// array argument as the member set; any other argument becomes a
/// one-element set. Empty/NotEmpty/NullOrZero ignore the argument.
pub fn make_rule(declaration: &str, kind: PredicateKind, argument: Option<Value>) -> DependencyRule {
    let predicate = match kind {
        PredicateKind::Equals => Predicate::Equals(argument.unwrap_or(Value::Null)),
        PredicateKind::NotEquals => Predicate::NotEquals(argument.unwrap_or(Value::Null)),
        PredicateKind::Empty => Predicate::Empty,
        PredicateKind::NotEmpty => Predicate::NotEmpty,
        PredicateKind::NullOrZero => Predicate::NullOrZero,
        PredicateKind::In => Predicate::In(into_member_set(argument)),
        PredicateKind::NotIn => Predicate::NotIn(into_member_set(argument)),
    };
    DependencyRule::new(declaration, predicate)
}

fn into_member_set(argument: Option<Value>) -> Vec<Value> {
    match argument {
        Some(Value::Array(items)) => items,
        Some(other) => vec![other],
        None => vec![],
    }
}

/// The comparison of a rule together with its argument.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    Equals(Value),
    NotEquals(Value),
    Empty,
    NotEmpty,
    NullOrZero,
    In(Vec<Value>),
    NotIn(Vec<Value>),
}

impl Predicate {
    pub fn kind(&self) -> PredicateKind {
        match self {
            Predicate::Equals(_) => PredicateKind::Equals,
            Predicate::NotEquals(_) => PredicateKind::NotEquals,
            Predicate::Empty => PredicateKind::Empty,
            Predicate::NotEmpty => PredicateKind::NotEmpty,
            Predicate::NullOrZero => PredicateKind::NullOrZero,
            Predicate::In(_) => PredicateKind::In,
            Predicate::NotIn(_) => PredicateKind::NotIn,
        }
    }
}

// ─── Rule declaration (UI meta layout) ──────────────────────────────────────

/// Raw, declaration-level form of a dependency rule.
///
/// This is the layout the form component consumes. Predicates are tagged by
/// key presence, so a declaration may carry several of them; normalization
/// reduces it to exactly one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDeclaration {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(default, deserialize_with = "present_value")]
    pub value: Option<Value>,
    #[serde(default, deserialize_with = "present_value", skip_serializing_if = "Option::is_none")]
    pub not: Option<Value>,
    #[serde(default, deserialize_with = "present_flag", skip_serializing_if = "Option::is_none")]
    pub empty: Option<bool>,
    #[serde(
        rename = "notEmpty",
        default,
        deserialize_with = "present_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub not_empty: Option<bool>,
    #[serde(
        rename = "nullOrZero",
        default,
        deserialize_with = "present_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub null_or_zero: Option<bool>,
    #[serde(
        rename = "in",
        default,
        deserialize_with = "present_members",
        skip_serializing_if = "Option::is_none"
    )]
    pub in_values: Option<Vec<Value>>,
    #[serde(
        rename = "notin",
        default,
        deserialize_with = "present_members",
        skip_serializing_if = "Option::is_none"
    )]
    pub not_in_values: Option<Vec<Value>>,
}

// Predicate keys are tagged by presence: a key written as `null` is still
// present. `default` covers the absent case.

fn present_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

fn present_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Option::<bool>::deserialize(deserializer).map(|flag| Some(flag.unwrap_or(true)))
}

fn present_members<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<Value>>, D::Error> {
    Option::<Vec<Value>>::deserialize(deserializer).map(|items| Some(items.unwrap_or_default()))
}

impl RuleDeclaration {
    /// Predicate keys present on this declaration, in display-mode precedence.
    ///
    /// A null `value` counts only when no other key is present, since every
    /// serialized declaration carries a `value` slot.
    pub fn predicate_keys(&self) -> Vec<PredicateKind> {
        let mut keys = Vec::new();
        if self.empty.is_some() {
            keys.push(PredicateKind::Empty);
        }
        if self.not_empty.is_some() {
            keys.push(PredicateKind::NotEmpty);
        }
        if self.null_or_zero.is_some() {
            keys.push(PredicateKind::NullOrZero);
        }
        if self.not.is_some() {
            keys.push(PredicateKind::NotEquals);
        }
        if self.in_values.is_some() {
            keys.push(PredicateKind::In);
        }
        if self.not_in_values.is_some() {
            keys.push(PredicateKind::NotIn);
        }
        if self.value.as_ref().is_some_and(|v| !v.is_null()) || keys.is_empty() {
            keys.push(PredicateKind::Equals);
        }
        keys
    }

    /// Convert into a typed rule. The first predicate key in precedence order wins.
    pub fn to_rule(&self) -> DependencyRule {
        let (field, split_property) = split_declaration(&self.field);
        let property = self.property.clone().unwrap_or(split_property);

        let kind = self
            .predicate_keys()
            .into_iter()
            .next()
            .unwrap_or(PredicateKind::Equals);

        let predicate = match kind {
            PredicateKind::Empty => Predicate::Empty,
            PredicateKind::NotEmpty => Predicate::NotEmpty,
            PredicateKind::NullOrZero => Predicate::NullOrZero,
            PredicateKind::NotEquals => Predicate::NotEquals(self.not.clone().unwrap_or(Value::Null)),
            PredicateKind::In => Predicate::In(self.in_values.clone().unwrap_or_default()),
            PredicateKind::NotIn => Predicate::NotIn(self.not_in_values.clone().unwrap_or_default()),
            PredicateKind::Equals => Predicate::Equals(self.value.clone().unwrap_or(Value::Null)),
        };

        DependencyRule {
            field,
            property,
            predicate,
        }
    }
}

impl From<&DependencyRule> for RuleDeclaration {
    fn from(rule: &DependencyRule) -> Self {
        let mut decl = RuleDeclaration {
            field: rule.field.clone(),
            property: Some(rule.property.clone()),
            ..RuleDeclaration::default()
        };
        match &rule.predicate {
            Predicate::Equals(v) => decl.value = Some(v.clone()),
            Predicate::NotEquals(v) => decl.not = Some(v.clone()),
            Predicate::Empty => decl.empty = Some(true),
            Predicate::NotEmpty => decl.not_empty = Some(true),
            Predicate::NullOrZero => decl.null_or_zero = Some(true),
            Predicate::In(items) => decl.in_values = Some(items.clone()),
            Predicate::NotIn(items) => decl.not_in_values = Some(items.clone()),
        }
        decl
    }
}

// ─── Validation rules ───────────────────────────────────────────────────────

/// A single validation rule handed to the host validator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidationRule {
    /// A named rule such as `required` or `max:255`.
    Named(String),
    /// Rules applied to every item of a media collection.
    MediaCollection {
        collection: String,
        rules: Vec<ValidationRule>,
    },
}

impl From<&str> for ValidationRule {
    fn from(rule: &str) -> Self {
        ValidationRule::Named(rule.to_string())
    }
}

impl From<String> for ValidationRule {
    fn from(rule: String) -> Self {
        ValidationRule::Named(rule)
    }
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationRule::Named(name) => f.write_str(name),
            ValidationRule::MediaCollection { collection, rules } => {
                write!(f, "media:{}[", collection)?;
                for (i, rule) in rules.iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    write!(f, "{}", rule)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Flattened validation rules keyed by field attribute, in declaration order.
pub type RuleSet = IndexMap<String, Vec<ValidationRule>>;

// ─── Form schema ────────────────────────────────────────────────────────────

/// Top-level declarative form document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormSchema {
    #[serde(default)]
    pub fields: Vec<FieldDeclaration>,
}

/// A field declaration, tagged by field kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldDeclaration {
    Input(InputDeclaration),
    Media(MediaDeclaration),
    Container(ContainerDeclaration),
}

impl FieldDeclaration {
    pub fn attribute(&self) -> &str {
        match self {
            FieldDeclaration::Input(d) => &d.attribute,
            FieldDeclaration::Media(d) => &d.attribute,
            FieldDeclaration::Container(d) => &d.attribute,
        }
    }
}

/// Rules written either as a list or as one pipe-delimited string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RulesDeclaration {
    Piped(String),
    List(Vec<String>),
}

impl RulesDeclaration {
    pub fn to_list(&self) -> Vec<String> {
        match self {
            RulesDeclaration::Piped(s) => crate::primitives::split_rule_string(s),
            RulesDeclaration::List(items) => items.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputDeclaration {
    pub attribute: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<RulesDeclaration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_rules: Option<RulesDeclaration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_rules: Option<RulesDeclaration>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MediaDeclaration {
    pub attribute: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Media collection name. Defaults to the attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<RulesDeclaration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_rules: Option<RulesDeclaration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_rules: Option<RulesDeclaration>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContainerDeclaration {
    #[serde(default)]
    pub attribute: String,
    #[serde(default)]
    pub dependencies: Vec<RuleDeclaration>,
    #[serde(default)]
    pub fields: Vec<FieldDeclaration>,
}

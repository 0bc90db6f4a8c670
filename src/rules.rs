//! Situational validation rule sets.
//!
//! A container's rules are built as a tree (one node per child, nested
//! containers as subtrees) and then flattened into one [`RuleSet`] keyed by
//! field attribute. A container whose dependencies do not hold for the
//! request contributes nothing from its children.

use crate::container::DependencyContainer;
use crate::enums::RuleSituation;
use crate::field::{Field, MediaCollectionField};
use crate::resource::RequestValues;
use crate::types::{RuleSet, ValidationRule};

// ─── Media rule normalization ───────────────────────────────────────────────

/// Turns a media field's raw rules into rules the host validator understands.
pub trait MediaRulesNormalizer {
    fn normalize(
        &self,
        rules: Vec<ValidationRule>,
        request: &dyn RequestValues,
        field: &MediaCollectionField,
    ) -> Vec<ValidationRule>;
}

/// Wraps a media field's rules into a single collection rule.
///
/// No rules stay no rules, so an unconstrained media field is dropped from
/// the flattened set like any other.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultMediaRules;

impl MediaRulesNormalizer for DefaultMediaRules {
    fn normalize(
        &self,
        rules: Vec<ValidationRule>,
        _request: &dyn RequestValues,
        field: &MediaCollectionField,
    ) -> Vec<ValidationRule> {
        if rules.is_empty() {
            return rules;
        }
        vec![ValidationRule::MediaCollection {
            collection: field.collection.clone(),
            rules,
        }]
    }
}

// ─── Rule tree ──────────────────────────────────────────────────────────────

/// Unflattened rules of one container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleNode {
    /// Rules for one field attribute.
    Field {
        attribute: String,
        rules: Vec<ValidationRule>,
    },
    /// Rules gathered from a nested container.
    Container(Vec<RuleNode>),
}

/// Flattens a rule tree into a single-level set.
///
/// Nested containers are inlined, empty rule lists are dropped, and a later
/// entry for an attribute replaces the earlier one in place.
pub fn flatten(nodes: &[RuleNode]) -> RuleSet {
    let mut result = RuleSet::new();
    flatten_into(nodes, &mut result);
    result
}

fn flatten_into(nodes: &[RuleNode], result: &mut RuleSet) {
    for node in nodes {
        match node {
            RuleNode::Field { attribute, rules } => {
                if !rules.is_empty() {
                    result.insert(attribute.clone(), rules.clone());
                }
            }
            RuleNode::Container(children) => flatten_into(children, result),
        }
    }
}

/// Deep-merges `extra` into `base`: lists under the same attribute are
/// concatenated (base first), new attributes are appended.
pub fn merge_rule_sets(mut base: RuleSet, extra: RuleSet) -> RuleSet {
    for (attribute, rules) in extra {
        base.entry(attribute).or_default().extend(rules);
    }
    base
}

// ─── Builder ────────────────────────────────────────────────────────────────

/// Builds validation rule sets for one request.
pub struct RuleSetBuilder<'a> {
    request: &'a dyn RequestValues,
    media: &'a dyn MediaRulesNormalizer,
}

impl<'a> RuleSetBuilder<'a> {
    pub fn new(request: &'a dyn RequestValues) -> Self {
        RuleSetBuilder {
            request,
            media: &DefaultMediaRules,
        }
    }

    /// Uses a custom normalizer for media collection rules.
    pub fn with_media_normalizer(mut self, media: &'a dyn MediaRulesNormalizer) -> Self {
        self.media = media;
        self
    }

    /// Rules of one situation only, without merging in the base rules.
    ///
    /// A closed gate (or a container without children) yields
    /// `{container: []}`.
    pub fn situational(&self, container: &DependencyContainer, situation: RuleSituation) -> RuleSet {
        match self.tree(container, situation) {
            Some(nodes) => {
                let rules = flatten(&nodes);
                tracing::debug!(
                    container = %container.attribute(),
                    ?situation,
                    attributes = rules.len(),
                    "container rules built"
                );
                rules
            }
            None => closed_gate(container),
        }
    }

    /// Base rules of the container.
    pub fn rules(&self, container: &DependencyContainer) -> RuleSet {
        self.situational(container, RuleSituation::Rules)
    }

    /// Base rules followed by creation rules.
    pub fn creation_rules(&self, container: &DependencyContainer) -> RuleSet {
        merge_rule_sets(
            self.rules(container),
            self.situational(container, RuleSituation::CreationRules),
        )
    }

    /// Base rules followed by update rules.
    pub fn update_rules(&self, container: &DependencyContainer) -> RuleSet {
        merge_rule_sets(
            self.rules(container),
            self.situational(container, RuleSituation::UpdateRules),
        )
    }

    /// Unflattened rule tree, or `None` when the container contributes nothing.
    pub fn tree(&self, container: &DependencyContainer, situation: RuleSituation) -> Option<Vec<RuleNode>> {
        if container.fields().is_empty() || !container.are_dependencies_satisfied(self.request) {
            tracing::debug!(
                container = %container.attribute(),
                ?situation,
                "container gate closed"
            );
            return None;
        }

        let mut nodes = vec![RuleNode::Field {
            attribute: container.attribute().to_string(),
            rules: Vec::new(),
        }];

        for field in container.fields() {
            nodes.push(self.node(field, situation));
        }

        Some(nodes)
    }

    fn node(&self, field: &Field, situation: RuleSituation) -> RuleNode {
        match field {
            Field::Container(nested) => match self.tree(nested, situation) {
                Some(children) => RuleNode::Container(children),
                None => RuleNode::Field {
                    attribute: nested.attribute().to_string(),
                    rules: Vec::new(),
                },
            },
            Field::MediaCollection(media) => {
                let raw = media.rules.source(situation).resolve(self.request);
                RuleNode::Field {
                    attribute: media.attribute.clone(),
                    rules: self.media.normalize(raw, self.request, media),
                }
            }
            Field::Input(input) => RuleNode::Field {
                attribute: input.attribute.clone(),
                rules: input.rules.source(situation).resolve(self.request),
            },
        }
    }

    /// Rules of any field for one situation, merged with its base rules for
    /// creation and update.
    pub fn field_rules(&self, field: &Field, situation: RuleSituation) -> RuleSet {
        if let Field::Container(container) = field {
            return match situation {
                RuleSituation::Rules => self.rules(container),
                RuleSituation::CreationRules => self.creation_rules(container),
                RuleSituation::UpdateRules => self.update_rules(container),
            };
        }

        let own = |situation| match self.node(field, situation) {
            RuleNode::Field { attribute, rules } => RuleSet::from([(attribute, rules)]),
            RuleNode::Container(children) => flatten(&children),
        };

        match situation {
            RuleSituation::Rules => own(RuleSituation::Rules),
            other => merge_rule_sets(own(RuleSituation::Rules), own(other)),
        }
    }
}

fn closed_gate(container: &DependencyContainer) -> RuleSet {
    RuleSet::from([(container.attribute().to_string(), Vec::new())])
}

// ─── Container shortcuts ────────────────────────────────────────────────────

impl DependencyContainer {
    /// Base validation rules for the request.
    pub fn get_rules(&self, request: &dyn RequestValues) -> RuleSet {
        RuleSetBuilder::new(request).rules(self)
    }

    /// Base plus creation validation rules for the request.
    pub fn get_creation_rules(&self, request: &dyn RequestValues) -> RuleSet {
        RuleSetBuilder::new(request).creation_rules(self)
    }

    /// Base plus update validation rules for the request.
    pub fn get_update_rules(&self, request: &dyn RequestValues) -> RuleSet {
        RuleSetBuilder::new(request).update_rules(self)
    }
}

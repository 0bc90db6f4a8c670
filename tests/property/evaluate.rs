use dependency_container::evaluate::{
    are_dependencies_satisfied, count_satisfied, evaluate_for_display, evaluate_rule_for_display,
    evaluate_rule_for_request,
};
use dependency_container::resource::Model;
use dependency_container::types::{DependencyRule, Predicate};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-5i64..5).prop_map(|n| json!(n)),
        (-5i64..5).prop_map(|n| json!(n.to_string())),
        "[a-c]{0,2}".prop_map(Value::String),
        Just(json!([])),
    ]
}

fn predicate() -> impl Strategy<Value = Predicate> {
    prop_oneof![
        scalar().prop_map(Predicate::Equals),
        scalar().prop_map(Predicate::NotEquals),
        Just(Predicate::Empty),
        Just(Predicate::NotEmpty),
        Just(Predicate::NullOrZero),
        prop::collection::vec(scalar(), 0..3).prop_map(Predicate::In),
        prop::collection::vec(scalar(), 0..3).prop_map(Predicate::NotIn),
    ]
}

fn rule() -> impl Strategy<Value = DependencyRule> {
    ("[a-d]", predicate()).prop_map(|(field, predicate)| DependencyRule::new(&field, predicate))
}

fn values() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map("[a-d]", scalar(), 0..4).prop_map(|m| m.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // Evaluation is a pure function of rules and input.
    #[test]
    fn display_evaluation_is_repeatable(rules in prop::collection::vec(rule(), 0..5), attrs in values()) {
        let model = Model::from(attrs);
        let before = rules.clone();
        let first = evaluate_for_display(&rules, &model);
        let second = evaluate_for_display(&rules, &model);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&rules, &before);
        prop_assert_eq!(first.satisfied.len(), rules.len());
    }

    // Empty and NotEmpty partition every input, in both modes.
    #[test]
    fn empty_and_not_empty_are_complements(field in "[a-d]", attrs in values()) {
        let empty = DependencyRule::new(&field, Predicate::Empty);
        let not_empty = DependencyRule::new(&field, Predicate::NotEmpty);

        prop_assert_ne!(evaluate_rule_for_request(&empty, &attrs), evaluate_rule_for_request(&not_empty, &attrs));

        let model = Model::from(attrs);
        prop_assert_ne!(evaluate_rule_for_display(&empty, &model), evaluate_rule_for_display(&not_empty, &model));
    }

    // In and NotIn over the same members partition every input.
    #[test]
    fn in_and_not_in_are_complements(field in "[a-d]", items in prop::collection::vec(scalar(), 0..4), attrs in values()) {
        let member = DependencyRule::new(&field, Predicate::In(items.clone()));
        let non_member = DependencyRule::new(&field, Predicate::NotIn(items));

        prop_assert_ne!(evaluate_rule_for_request(&member, &attrs), evaluate_rule_for_request(&non_member, &attrs));

        let model = Model::from(attrs);
        prop_assert_ne!(evaluate_rule_for_display(&member, &model), evaluate_rule_for_display(&non_member, &model));
    }

    // Request-mode Empty is absence of the key.
    #[test]
    fn request_empty_is_absence(field in "[a-d]", attrs in values()) {
        let empty = DependencyRule::new(&field, Predicate::Empty);
        prop_assert_eq!(evaluate_rule_for_request(&empty, &attrs), !attrs.contains_key(&field));
    }

    // The gate opens iff there is at least one rule and every rule holds.
    #[test]
    fn aggregate_requires_every_rule(rules in prop::collection::vec(rule(), 0..5), attrs in values()) {
        let satisfied = count_satisfied(&rules, &attrs);
        prop_assert!(satisfied <= rules.len());
        prop_assert_eq!(
            are_dependencies_satisfied(&rules, &attrs),
            !rules.is_empty() && satisfied == rules.len()
        );
    }

    // A model attribute always equals itself.
    #[test]
    fn equals_matches_the_stored_value(field in "[a-d]", value in scalar()) {
        let model = Model::new().with_attribute(field.clone(), value.clone());
        let rule = DependencyRule::new(&field, Predicate::Equals(value));
        prop_assert!(evaluate_rule_for_display(&rule, &model));
    }
}

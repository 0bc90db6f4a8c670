use dependency_container::container::DependencyContainer;
use dependency_container::field::{Field, InputField};
use dependency_container::rules::RuleSetBuilder;
use proptest::prelude::*;
use serde_json::json;

fn child() -> impl Strategy<Value = (String, Vec<String>, Vec<String>)> {
    (
        "[a-e]",
        prop::collection::vec("(required|string|max:[0-9])", 0..3),
        prop::collection::vec("(unique|min:[0-9])", 0..2),
    )
}

fn container(children: Vec<(String, Vec<String>, Vec<String>)>) -> DependencyContainer {
    let fields: Vec<Field> = children
        .into_iter()
        .map(|(attribute, rules, creation)| InputField::new(attribute).rules(rules).creation_rules(creation).into())
        .collect();
    DependencyContainer::new(fields)
        .with_attribute("gate")
        .depends_on("type", "post")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // A closed gate contributes only its own attribute, with no rules.
    #[test]
    fn closed_gate_contributes_nothing(children in prop::collection::vec(child(), 0..4), kind in "[a-z]{0,5}") {
        prop_assume!(kind != "post");
        let c = container(children);
        let request = json!({ "type": kind });

        for rules in [c.get_rules(&request), c.get_creation_rules(&request), c.get_update_rules(&request)] {
            prop_assert_eq!(rules.len(), 1);
            prop_assert!(rules["gate"].is_empty());
        }
    }

    // An open gate never reports an empty rule list.
    #[test]
    fn open_gate_drops_empty_lists(children in prop::collection::vec(child(), 1..4)) {
        let c = container(children);
        let request = json!({ "type": "post" });
        let rules = c.get_rules(&request);
        prop_assert!(rules.values().all(|list| !list.is_empty()));
        prop_assert!(!rules.contains_key("gate"));
    }

    // Creation rules extend the base rules: every base list is a prefix.
    #[test]
    fn creation_rules_extend_base(children in prop::collection::vec(child(), 1..4)) {
        let c = container(children);
        let request = json!({ "type": "post" });
        let base = c.get_rules(&request);
        let creation = c.get_creation_rules(&request);

        for (attribute, rules) in &base {
            let merged = &creation[attribute.as_str()];
            prop_assert!(merged.starts_with(rules), "{}: {:?} does not start with {:?}", attribute, merged, rules);
        }
        prop_assert!(base.keys().zip(creation.keys()).all(|(a, b)| a == b));
    }

    // The builder and the container shortcuts agree.
    #[test]
    fn builder_matches_shortcuts(children in prop::collection::vec(child(), 0..4), open in any::<bool>()) {
        let c = container(children);
        let kind = if open { "post" } else { "page" };
        let request = json!({ "type": kind });
        let builder = RuleSetBuilder::new(&request);
        prop_assert_eq!(builder.rules(&c), c.get_rules(&request));
        prop_assert_eq!(builder.update_rules(&c), c.get_update_rules(&request));
    }
}

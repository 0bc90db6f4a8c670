use dependency_container::primitives::{is_truthy, loose_contains, loose_equals};
use proptest::prelude::*;
use serde_json::{Value, json};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(|n| json!(n)),
        (-1000i64..1000).prop_map(|n| json!(n.to_string())),
        (-100.0f64..100.0).prop_map(|f| json!(f)),
        "[a-z]{0,6}".prop_map(Value::String),
        Just(json!("0")),
        Just(json!("")),
        Just(json!(" 12")),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(2, 8, 3, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..3).prop_map(Value::Array),
            prop::collection::btree_map("[a-c]", inner, 0..3)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // a == b iff b == a
    #[test]
    fn symmetric(a in value(), b in value()) {
        prop_assert_eq!(loose_equals(&a, &b), loose_equals(&b, &a),
            "loose_equals not symmetric for {} and {}", a, b);
    }

    #[test]
    fn reflexive(a in value()) {
        prop_assert!(loose_equals(&a, &a), "{} does not equal itself", a);
    }

    // An integer equals its decimal string form.
    #[test]
    fn integer_equals_its_string(n in any::<i32>()) {
        prop_assert!(loose_equals(&json!(n), &json!(n.to_string())));
        let padded = format!(" {}", n);
        prop_assert!(loose_equals(&json!(n.to_string()), &json!(padded)));
    }

    // Comparing against a boolean tests truthiness.
    #[test]
    fn booleans_compare_truthiness(a in value()) {
        prop_assert_eq!(loose_equals(&Value::Bool(true), &a), is_truthy(&a));
        prop_assert_eq!(loose_equals(&Value::Bool(false), &a), !is_truthy(&a));
    }

    // Null equals the falsy values, except that among strings only "" matches.
    #[test]
    fn null_equals_falsy(a in value()) {
        let expected = match &a {
            Value::String(s) => s.is_empty(),
            other => !is_truthy(other),
        };
        prop_assert_eq!(loose_equals(&Value::Null, &a), expected);
    }

    // Distinct non-numeric strings never compare equal.
    #[test]
    fn non_numeric_strings_compare_bytewise(a in "[a-z]{1,6}", b in "[a-z]{1,6}") {
        prop_assert_eq!(loose_equals(&json!(a), &json!(b)), a == b);
    }

    #[test]
    fn contains_matches_any(items in prop::collection::vec(scalar(), 0..5), v in scalar()) {
        let expected = items.iter().any(|item| loose_equals(item, &v));
        prop_assert_eq!(loose_contains(&items, &v), expected);
    }
}

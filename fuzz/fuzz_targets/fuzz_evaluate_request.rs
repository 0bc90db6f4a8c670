#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use dependency_container::evaluate::{are_dependencies_satisfied, count_satisfied};
use dependency_container::{DependencyRule, Predicate};
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

fn arbitrary_scalar(u: &mut Unstructured<'_>) -> arbitrary::Result<Value> {
    match u.int_in_range(0..=3)? {
        0 => Ok(Value::Null),
        1 => Ok(Value::from(u.int_in_range(-2i64..=2)?)),
        2 => Ok(Value::String(u.choose(&["", "0", "1", "a"])?.to_string())),
        _ => Ok(Value::Bool(bool::arbitrary(u)?)),
    }
}

fn arbitrary_rule(u: &mut Unstructured<'_>) -> arbitrary::Result<DependencyRule> {
    let field = u.choose(&["a", "b", "c"])?.to_string();
    let predicate = match u.int_in_range(0..=6)? {
        0 => Predicate::Equals(arbitrary_scalar(u)?),
        1 => Predicate::NotEquals(arbitrary_scalar(u)?),
        2 => Predicate::Empty,
        3 => Predicate::NotEmpty,
        4 => Predicate::NullOrZero,
        5 => Predicate::In(vec![arbitrary_scalar(u)?, arbitrary_scalar(u)?]),
        _ => Predicate::NotIn(vec![arbitrary_scalar(u)?]),
    };
    Ok(DependencyRule::new(&field, predicate))
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);

    let Ok(count) = u.int_in_range(0..=4) else { return };
    let mut rules = Vec::with_capacity(count);
    for _ in 0..count {
        match arbitrary_rule(&mut u) {
            Ok(rule) => rules.push(rule),
            Err(_) => return,
        }
    }

    let mut request = Map::new();
    for key in ["a", "b", "c"] {
        if let Ok(true) = bool::arbitrary(&mut u) {
            if let Ok(value) = arbitrary_scalar(&mut u) {
                request.insert(key.to_string(), value);
            }
        }
    }

    let satisfied = are_dependencies_satisfied(&rules, &request);
    let counted = count_satisfied(&rules, &request);
    assert!(counted <= rules.len());
    assert_eq!(satisfied, !rules.is_empty() && counted == rules.len());
});

#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use dependency_container::primitives::loose_equals;
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

/// Generate a scalar JSON value from fuzzer bytes.
fn arbitrary_value(u: &mut Unstructured<'_>) -> arbitrary::Result<Value> {
    match u.int_in_range(0..=5)? {
        0 => Ok(Value::Null),
        1 => Ok(Value::Bool(bool::arbitrary(u)?)),
        2 => Ok(Value::from(i64::arbitrary(u)?)),
        3 => {
            let n = f64::arbitrary(u)?;
            Ok(serde_json::Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or(Value::Null))
        }
        4 => Ok(Value::String(String::arbitrary(u)?)),
        _ => {
            let len = u.int_in_range(0..=3)?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(Value::String(String::arbitrary(u)?));
            }
            Ok(Value::Array(items))
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);

    let (a, b) = match (arbitrary_value(&mut u), arbitrary_value(&mut u)) {
        (Ok(a), Ok(b)) => (a, b),
        _ => return,
    };

    assert_eq!(loose_equals(&a, &b), loose_equals(&b, &a), "loose equality must be symmetric");
});

use dependency_container::normalize::normalize;
use dependency_container::parse::parse;

use super::common::{load_suite, values_structurally_equal};

#[derive(Debug, serde::Deserialize)]
struct TestCase {
    name: String,
    id: String,
    input: String,
    expected: String,
}

#[test]
fn normalize_conformance_suite() {
    let cases: Vec<TestCase> = load_suite("normalize.yaml");

    let mut passed = 0;
    let mut failed = 0;

    for case in &cases {
        let schema = match parse(&case.input) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("  FAIL [{}] {}: parse error: {}", case.id, case.name, e);
                failed += 1;
                continue;
            }
        };

        let normalized = normalize(schema);

        let expected_value: serde_json::Value = serde_saphyr::from_str(&case.expected).unwrap();
        let actual_value = serde_json::to_value(&normalized).unwrap();

        if values_structurally_equal(&actual_value, &expected_value) {
            passed += 1;
        } else {
            eprintln!(
                "  FAIL [{}] {}:\n    expected: {}\n    actual:   {}",
                case.id,
                case.name,
                serde_json::to_string_pretty(&expected_value).unwrap(),
                serde_json::to_string_pretty(&actual_value).unwrap()
            );
            failed += 1;
        }
    }

    eprintln!(
        "\nnormalize: {} passed, {} failed out of {} total",
        passed,
        failed,
        cases.len()
    );
    assert_eq!(failed, 0, "{} normalize tests failed", failed);
}

use dependency_container::parse::parse;
use dependency_container::validate::validate;

use super::common::load_suite;

/// A single validation test case from the suite.
#[derive(Debug, serde::Deserialize)]
struct TestCase {
    name: String,
    id: String,
    input: String,
    expected: Expected,
}

#[derive(Debug, serde::Deserialize)]
struct Expected {
    valid: bool,
    #[serde(default)]
    errors: Vec<ExpectedDiagnostic>,
    #[serde(default)]
    warnings: Vec<ExpectedDiagnostic>,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, serde::Deserialize)]
struct ExpectedDiagnostic {
    rule: String,
    path: String,
}

fn sorted(mut items: Vec<ExpectedDiagnostic>) -> Vec<ExpectedDiagnostic> {
    items.sort();
    items
}

#[test]
fn validate_conformance_suite() {
    let cases: Vec<TestCase> = load_suite("validate.yaml");

    let mut passed = 0;
    let mut failed = 0;

    for case in cases {
        let schema = match parse(&case.input) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("  FAIL [{}] {}: parse error: {}", case.id, case.name, e);
                failed += 1;
                continue;
            }
        };

        let result = validate(&schema);

        let errors = sorted(
            result
                .errors
                .iter()
                .map(|e| ExpectedDiagnostic {
                    rule: e.rule.clone(),
                    path: e.path.clone(),
                })
                .collect(),
        );
        let warnings = sorted(
            result
                .warnings
                .iter()
                .map(|w| ExpectedDiagnostic {
                    rule: w.code.clone(),
                    path: w.path.clone().unwrap_or_default(),
                })
                .collect(),
        );

        let expected_errors = sorted(case.expected.errors);
        let expected_warnings = sorted(case.expected.warnings);

        if result.is_valid() == case.expected.valid
            && errors == expected_errors
            && warnings == expected_warnings
        {
            passed += 1;
        } else {
            eprintln!(
                "  FAIL [{}] {}: expected errors {:?} warnings {:?}, got errors {:?} warnings {:?}",
                case.id, case.name, expected_errors, expected_warnings, errors, warnings
            );
            failed += 1;
        }
    }

    eprintln!("\nvalidate: {} passed, {} failed", passed, failed);
    assert_eq!(failed, 0, "{} validate tests failed", failed);
}

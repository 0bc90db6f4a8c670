use dependency_container::error::ParseErrorKind;
use dependency_container::parse::parse;

use super::common::load_suite;

#[derive(Debug, serde::Deserialize)]
struct TestCase {
    name: String,
    id: String,
    input: String,
    expected: String,
}

fn kind_name(kind: &ParseErrorKind) -> &'static str {
    match kind {
        ParseErrorKind::Syntax => "syntax",
        ParseErrorKind::TypeMismatch => "type_mismatch",
        ParseErrorKind::UnknownVariant => "unknown_variant",
    }
}

#[test]
fn parse_conformance_suite() {
    let cases: Vec<TestCase> = load_suite("parse.yaml");

    let mut passed = 0;
    let mut failed = 0;

    for case in &cases {
        let actual = match parse(&case.input) {
            Ok(_) => "ok",
            Err(e) => kind_name(&e.kind),
        };

        if actual == case.expected {
            passed += 1;
        } else {
            eprintln!(
                "  FAIL [{}] {}: expected {}, got {}",
                case.id, case.name, case.expected, actual
            );
            failed += 1;
        }
    }

    eprintln!(
        "\nparse: {} passed, {} failed out of {} total",
        passed,
        failed,
        cases.len()
    );
    assert_eq!(failed, 0, "{} parse tests failed", failed);
}

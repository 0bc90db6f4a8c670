use dependency_container::evaluate::{are_dependencies_satisfied, evaluate_rule_for_request};
use dependency_container::types::*;
use serde_json::{Map, Value};

use super::common::load_suite;

#[derive(Debug, serde::Deserialize)]
struct RequestCase {
    name: String,
    id: String,
    rules: Vec<RuleDeclaration>,
    request: Map<String, Value>,
    expected: Vec<bool>,
    all_satisfied: bool,
}

#[test]
fn request_conformance_suite() {
    let cases: Vec<RequestCase> = load_suite("request.yaml");

    let mut passed = 0;
    let mut failed = 0;

    for case in &cases {
        let rules: Vec<DependencyRule> = case.rules.iter().map(RuleDeclaration::to_rule).collect();

        let per_rule: Vec<bool> = rules
            .iter()
            .map(|rule| evaluate_rule_for_request(rule, &case.request))
            .collect();
        let aggregate = are_dependencies_satisfied(&rules, &case.request);

        if per_rule == case.expected && aggregate == case.all_satisfied {
            passed += 1;
        } else {
            eprintln!(
                "  FAIL [{}] {}: expected {:?} (all: {}), got {:?} (all: {})",
                case.id, case.name, case.expected, case.all_satisfied, per_rule, aggregate
            );
            failed += 1;
        }
    }

    eprintln!(
        "\nrequest: {} passed, {} failed out of {} total",
        passed,
        failed,
        cases.len()
    );
    assert_eq!(failed, 0, "{} request tests failed", failed);
}

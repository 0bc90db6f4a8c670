use dependency_container::evaluate::evaluate_for_display;
use dependency_container::resource::{Model, Resource};
use dependency_container::types::*;
use serde_json::{Map, Value};

use super::common::load_suite;

#[derive(Debug, serde::Deserialize)]
struct DisplayCase {
    name: String,
    id: String,
    rules: Vec<RuleDeclaration>,
    resource: ResourceDef,
    expected: Vec<bool>,
}

#[derive(Debug, serde::Deserialize)]
struct ResourceDef {
    kind: String,
    attributes: Map<String, Value>,
}

#[test]
fn display_conformance_suite() {
    let cases: Vec<DisplayCase> = load_suite("display.yaml");

    let mut passed = 0;
    let mut failed = 0;

    for case in &cases {
        let rules: Vec<DependencyRule> = case.rules.iter().map(RuleDeclaration::to_rule).collect();

        let model;
        let resource: &dyn Resource = match case.resource.kind.as_str() {
            "map" => &case.resource.attributes,
            "model" => {
                model = Model::from(case.resource.attributes.clone());
                &model
            }
            other => panic!("[{}] unknown resource kind: {}", case.id, other),
        };

        let evaluation = evaluate_for_display(&rules, resource);

        if evaluation.satisfied == case.expected {
            passed += 1;
        } else {
            eprintln!(
                "  FAIL [{}] {}: expected {:?}, got {:?}",
                case.id, case.name, case.expected, evaluation.satisfied
            );
            failed += 1;
        }
    }

    eprintln!(
        "\ndisplay: {} passed, {} failed out of {} total",
        passed,
        failed,
        cases.len()
    );
    assert_eq!(failed, 0, "{} display tests failed", failed);
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Structural and semantic checks against a parsed test-case batch.
//!
//! Every violation is collected rather than short-circuiting on the
//! first, so a retry-correction prompt can list all of them at once.

use casecraft_contract::budget::Budget;
use casecraft_contract::endpoint::Endpoint;
use casecraft_contract::test_case::TestCase;

/// Check that every case's method and path match `endpoint`.
fn check_identity(endpoint: &Endpoint, cases: &[TestCase], violations: &mut Vec<String>) {
    for (i, case) in cases.iter().enumerate() {
        if case.method != endpoint.method {
            violations.push(format!(
                "case[{i}] method {} does not match endpoint method {}",
                case.method, endpoint.method
            ));
        }
        if case.path != endpoint.path {
            violations.push(format!(
                "case[{i}] path '{}' does not match endpoint path '{}'",
                case.path, endpoint.path
            ));
        }
    }
}

/// Reject obvious semantic holes: empty names, missing expected status.
fn check_semantic_holes(cases: &[TestCase], violations: &mut Vec<String>) {
    for (i, case) in cases.iter().enumerate() {
        if case.name.trim().is_empty() {
            violations.push(format!("case[{i}] has an empty name"));
        }
        if case.expected_status == 0 {
            violations.push(format!("case[{i}] '{}' is missing expected_status", case.name));
        }
    }
}

/// Check that per-type counts fall within the budget's ±1 tolerance.
fn check_budget(budget: &Budget, cases: &[TestCase], violations: &mut Vec<String>) {
    use casecraft_contract::budget::TestType;
    for test_type in TestType::ALL {
        let actual = cases.iter().filter(|c| c.test_type == test_type).count() as u32;
        if !budget.within_tolerance(test_type, actual) {
            violations.push(format!(
                "{} case count {actual} is outside budget tolerance (required {})",
                test_type.as_str(),
                budget.count_for(test_type)
            ));
        }
    }
}

/// Run every structural and semantic check against `cases`, returning the
/// full list of violations (empty if the batch is valid).
#[must_use]
pub fn check(endpoint: &Endpoint, budget: &Budget, cases: &[TestCase]) -> Vec<String> {
    let mut violations = Vec::new();
    check_identity(endpoint, cases, &mut violations);
    check_semantic_holes(cases, &mut violations);
    check_budget(budget, cases, &mut violations);
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use casecraft_contract::budget::{Priority, TestType};
    use casecraft_contract::endpoint::{AuthRequirement, Method};
    use casecraft_contract::test_case::TestCaseMetadata;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn endpoint() -> Endpoint {
        Endpoint {
            method: Method::Get,
            path: "/users/{id}".into(),
            tags: vec![],
            summary: None,
            description: None,
            parameters: vec![],
            request_body: None,
            responses: BTreeMap::new(),
            auth: AuthRequirement::default(),
        }
    }

    fn budget() -> Budget {
        Budget {
            positive: 1,
            negative: 1,
            boundary: 1,
        }
    }

    fn case(method: Method, path: &str, test_type: TestType, status: u16, name: &str) -> TestCase {
        TestCase {
            name: name.into(),
            description: "d".into(),
            priority: Priority::P0,
            method,
            path: path.into(),
            headers: BTreeMap::new(),
            query_params: BTreeMap::new(),
            body: None,
            expected_status: status,
            expected_response_schema: None,
            test_type,
            tags: vec![],
            metadata: TestCaseMetadata {
                generated_at: Utc::now(),
                api_version: "1.0.0".into(),
                llm_model: "glm-4".into(),
                llm_provider: "glm".into(),
            },
        }
    }

    fn valid_batch() -> Vec<TestCase> {
        vec![
            case(Method::Get, "/users/{id}", TestType::Positive, 200, "ok"),
            case(Method::Get, "/users/{id}", TestType::Negative, 404, "missing"),
            case(Method::Get, "/users/{id}", TestType::Boundary, 400, "boundary"),
        ]
    }

    #[test]
    fn well_formed_batch_has_no_violations() {
        assert!(check(&endpoint(), &budget(), &valid_batch()).is_empty());
    }

    #[test]
    fn mismatched_method_is_flagged() {
        let mut cases = valid_batch();
        cases[0].method = Method::Post;
        let violations = check(&endpoint(), &budget(), &cases);
        assert!(violations.iter().any(|v| v.contains("method")));
    }

    #[test]
    fn empty_name_is_flagged() {
        let mut cases = valid_batch();
        cases[0].name = "  ".into();
        let violations = check(&endpoint(), &budget(), &cases);
        assert!(violations.iter().any(|v| v.contains("empty name")));
    }

    #[test]
    fn zero_expected_status_is_flagged() {
        let mut cases = valid_batch();
        cases[0].expected_status = 0;
        let violations = check(&endpoint(), &budget(), &cases);
        assert!(violations.iter().any(|v| v.contains("expected_status")));
    }

    #[test]
    fn undersupplied_type_violates_budget() {
        let cases = vec![case(Method::Get, "/users/{id}", TestType::Positive, 200, "ok")];
        let violations = check(&endpoint(), &budget(), &cases);
        assert!(violations.iter().any(|v| v.starts_with("negative")));
        assert!(violations.iter().any(|v| v.starts_with("boundary")));
    }

    #[test]
    fn all_violations_accumulate_not_short_circuit() {
        let mut cases = vec![case(Method::Post, "/wrong", TestType::Positive, 0, "")];
        cases[0].name = String::new();
        let violations = check(&endpoint(), &budget(), &cases);
        // method + path + empty name + expected_status + missing negative/boundary
        assert!(violations.len() >= 5, "only got {violations:?}");
    }
}

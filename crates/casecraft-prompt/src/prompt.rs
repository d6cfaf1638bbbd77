// SPDX-License-Identifier: MIT OR Apache-2.0
//! Two-part prompt assembly: a fixed system preamble and a per-endpoint
//! task body.
//!
//! [`build`] is a pure function of its inputs — same endpoint, same
//! budget, same prompt text, every time — so prompt text can be asserted
//! on directly in tests rather than diffed against a snapshot.

use crate::placeholders;
use crate::render;
use casecraft_contract::budget::{Budget, TestType};
use casecraft_contract::endpoint::{AuthSchemeKind, Endpoint, ParamLocation};

/// A fully assembled prompt, split the way the provider clients expect:
/// `system` goes in the request's system-prompt slot, `task` in the first
/// user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    /// System preamble fixing the output contract.
    pub system: String,
    /// Task body describing the endpoint to generate cases for.
    pub task: String,
}

/// Assemble the system preamble and task body for `endpoint` at `budget`.
#[must_use]
pub fn build(endpoint: &Endpoint, budget: &Budget) -> RenderedPrompt {
    RenderedPrompt {
        system: system_prompt(),
        task: task_prompt(endpoint, budget),
    }
}

/// Append a correction suffix to an existing task body listing the
/// validation violations found in the prior attempt, for the scheduler's
/// retry-on-invalid-output path (same provider, same system prompt).
#[must_use]
pub fn build_correction(task: &str, violations: &[String]) -> String {
    let bullets = violations
        .iter()
        .map(|v| format!("- {v}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "{task}\n\n\
        Your previous response did not satisfy the output contract above. \
        Correct it and re-emit the full JSON array; do not repeat these \
        mistakes:\n{bullets}"
    )
}

/// The fixed system preamble. Does not vary across endpoints or runs.
#[must_use]
pub fn system_prompt() -> String {
    format!(
        "You generate API test cases for a REST endpoint. Respond with a \
        single JSON array and nothing else — no prose before or after it, \
        no markdown code fences.\n\
        \n\
        Each array element is an object with exactly these fields:\n\
        - name: string, short human-readable title\n\
        - description: string, what the case exercises\n\
        - priority: one of \"P0\", \"P1\", \"P2\"\n\
        - method: the HTTP method, matching the endpoint under test\n\
        - path: the path under test, matching the endpoint under test\n\
        - headers: object mapping header name to string value\n\
        - query_params: object mapping query parameter name to value\n\
        - body: the request body, or null for bodyless requests\n\
        - expected_status: integer HTTP status code\n\
        - expected_response_schema: a JSON Schema object describing the \
        expected response body, or null\n\
        - test_type: one of \"positive\", \"negative\", \"boundary\"\n\
        - tags: array of strings\n\
        \n\
        Whenever a case needs a credential, use one of these placeholders \
        verbatim rather than inventing a value: {} (valid bearer token), \
        {} (valid user-scoped token), {} (valid admin-scoped token), {} \
        (valid API key), {} (valid HTTP Basic credentials), {} (syntactically \
        plausible but invalid or expired token), {} (syntactically plausible \
        but invalid API key).\n\
        \n\
        Emit cases in descending order of importance: the cases you consider \
        most critical to the endpoint's correctness first, least critical \
        last. The caller slices this order into priority tiers, so ordering \
        has no separate effect beyond where a case lands.",
        placeholders::AUTH_TOKEN,
        placeholders::USER_TOKEN,
        placeholders::ADMIN_TOKEN,
        placeholders::API_KEY,
        placeholders::BASIC_CREDENTIALS,
        placeholders::INVALID_TOKEN,
        placeholders::INVALID_API_KEY,
    )
}

/// The per-endpoint task body: method, path, parameters, body schema,
/// response schemas, and the required case counts per [`TestType`].
#[must_use]
pub fn task_prompt(endpoint: &Endpoint, budget: &Budget) -> String {
    let auth_line = if endpoint.auth.required {
        format!(
            "Authentication required: {}.",
            auth_scheme_label(endpoint.auth.scheme)
        )
    } else {
        "No authentication required.".to_string()
    };

    format!(
        "Endpoint: {} {}\n\
        {}\n\
        \n\
        Path parameters:\n{}\n\
        \n\
        Query parameters:\n{}\n\
        \n\
        Header parameters:\n{}\n\
        \n\
        Request body schema:\n{}\n\
        \n\
        Response schemas by status code:\n{}\n\
        \n\
        Generate exactly:\n\
        - {} positive case(s)\n\
        - {} negative case(s)\n\
        - {} boundary case(s)",
        endpoint.method,
        endpoint.path,
        auth_line,
        render::render_parameters(endpoint, ParamLocation::Path),
        render::render_parameters(endpoint, ParamLocation::Query),
        render::render_parameters(endpoint, ParamLocation::Header),
        render::render_schema(endpoint.request_body.as_ref()),
        render::render_responses(endpoint),
        budget.count_for(TestType::Positive),
        budget.count_for(TestType::Negative),
        budget.count_for(TestType::Boundary),
    )
}

fn auth_scheme_label(scheme: AuthSchemeKind) -> &'static str {
    match scheme {
        AuthSchemeKind::Bearer => "bearer token",
        AuthSchemeKind::ApiKey => "API key",
        AuthSchemeKind::Basic => "HTTP Basic",
        AuthSchemeKind::None => "none",
    }
}

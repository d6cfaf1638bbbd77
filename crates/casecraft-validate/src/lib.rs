// SPDX-License-Identifier: MIT OR Apache-2.0
//! Parses and validates LLM-generated test-case batches for CaseCraft.
//!
//! [`parse::parse_test_cases`] turns a provider's raw response text into a
//! [`Vec<TestCase>`](casecraft_contract::test_case::TestCase);
//! [`rules::check`] runs every structural and semantic rule against the
//! parsed batch and [`validate`] wraps both into the single call the
//! scheduler makes per attempt.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod parse;
pub mod rules;

use casecraft_contract::budget::Budget;
use casecraft_contract::endpoint::Endpoint;
use casecraft_contract::test_case::TestCase;
use casecraft_error::CaseCraftError;

/// Parse and validate a provider's raw response text against `endpoint` and
/// `budget` in one call.
///
/// # Errors
/// Returns [`CaseCraftError::InvalidOutput`] if `raw` does not parse, or
/// [`CaseCraftError::Validation`] with every accumulated violation if it
/// parses but fails a structural or semantic rule.
pub fn validate(
    provider: &str,
    endpoint: &Endpoint,
    budget: &Budget,
    raw: &str,
) -> Result<Vec<TestCase>, CaseCraftError> {
    let cases = parse::parse_test_cases(provider, raw)?;
    let violations = rules::check(endpoint, budget, &cases);
    if violations.is_empty() {
        Ok(cases)
    } else {
        Err(CaseCraftError::Validation {
            endpoint: endpoint.key(),
            violations,
        })
    }
}

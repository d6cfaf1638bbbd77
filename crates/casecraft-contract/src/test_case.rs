// SPDX-License-Identifier: MIT OR Apache-2.0
//! The generated test-case artifact shape (one entry per test, one file per
//! endpoint).

use crate::budget::{Priority, TestType};
use crate::endpoint::Method;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Provenance metadata attached to every generated [`TestCase`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TestCaseMetadata {
    /// UTC timestamp of generation.
    pub generated_at: DateTime<Utc>,
    /// API version declared by the source spec, if any.
    pub api_version: String,
    /// Model identifier that produced this case.
    pub llm_model: String,
    /// Provider name that produced this case.
    pub llm_provider: String,
}

/// A single generated test case.
///
/// Test cases for one endpoint form an ordered sequence and are persisted
/// together as a JSON array by the writer (see
/// [`casecraft_writer`](../../casecraft_writer/index.html) in the sibling
/// crate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TestCase {
    /// Short human-readable name.
    pub name: String,
    /// Longer description of what the case exercises.
    pub description: String,
    /// Importance tier.
    pub priority: Priority,
    /// HTTP method under test — must match the endpoint.
    pub method: Method,
    /// Path under test — must match the endpoint.
    pub path: String,
    /// Request headers to send.
    pub headers: BTreeMap<String, String>,
    /// Query parameters to send.
    pub query_params: BTreeMap<String, serde_json::Value>,
    /// Request body, or `null` for bodyless requests.
    pub body: Option<serde_json::Value>,
    /// Expected HTTP status code.
    pub expected_status: u16,
    /// Expected response schema, when one can be asserted.
    pub expected_response_schema: Option<serde_json::Value>,
    /// Which budget bucket this case counts against.
    pub test_type: TestType,
    /// Free-form tags copied or derived from the endpoint.
    pub tags: Vec<String>,
    /// Generation provenance.
    pub metadata: TestCaseMetadata,
}

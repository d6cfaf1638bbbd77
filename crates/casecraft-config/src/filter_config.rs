// SPDX-License-Identifier: MIT OR Apache-2.0
//! TOML-facing endpoint filter, converted into [`EndpointFilter`].

use casecraft_contract::endpoint::Method;
use casecraft_spec::filter::EndpointFilter;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The `[filter]` table: include/exclude criteria applied to the spec's
/// flattened endpoint list before assignment.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct FilterConfig {
    /// Glob patterns a path must match at least one of, when non-empty.
    #[serde(default)]
    pub include_paths: Vec<String>,
    /// Glob patterns that remove a path if any matches.
    #[serde(default)]
    pub exclude_paths: Vec<String>,
    /// Tags an endpoint must carry at least one of, when non-empty.
    #[serde(default)]
    pub include_tags: Vec<String>,
    /// Tags that remove an endpoint if any is carried.
    #[serde(default)]
    pub exclude_tags: Vec<String>,
    /// Methods an endpoint's method must be one of, when non-empty.
    #[serde(default)]
    pub include_methods: Vec<Method>,
    /// Methods that remove an endpoint if matched.
    #[serde(default)]
    pub exclude_methods: Vec<Method>,
}

impl From<FilterConfig> for EndpointFilter {
    fn from(cfg: FilterConfig) -> Self {
        EndpointFilter {
            include_paths: cfg.include_paths,
            exclude_paths: cfg.exclude_paths,
            include_tags: cfg.include_tags,
            exclude_tags: cfg.exclude_tags,
            include_methods: cfg.include_methods,
            exclude_methods: cfg.exclude_methods,
        }
    }
}

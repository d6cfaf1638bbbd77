// SPDX-License-Identifier: MIT OR Apache-2.0
//! Top-level CaseCraft configuration.

use crate::filter_config::FilterConfig;
use crate::provider_entry::ProviderEntry;
use crate::strategy_config::StrategyConfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_output_dir() -> String {
    "casecraft-output".to_string()
}

/// Whole-run configuration: where the spec comes from, where generated
/// artifacts land, which providers are available, and how endpoints are
/// bound to them.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct CaseCraftConfig {
    /// Spec source (local path or URL). Overridden by a CLI-supplied path
    /// when both are present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<String>,
    /// Directory generated test-case artifacts are written under.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Nest artifacts under a per-tag subdirectory instead of a flat layout.
    #[serde(default)]
    pub nest_by_tag: bool,
    /// Path to the run-state file used for up-to-date skip checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_file: Option<String>,
    /// Log level override (`"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    /// Provider-to-endpoint assignment policy.
    #[serde(default)]
    pub strategy: StrategyConfig,
    /// Named provider definitions, keyed by the name used in `strategy`
    /// and fallback chains.
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderEntry>,
    /// Endpoint include/exclude filtering applied before assignment.
    #[serde(default)]
    pub filter: FilterConfig,
}

impl Default for CaseCraftConfig {
    fn default() -> Self {
        Self {
            spec: None,
            output_dir: default_output_dir(),
            nest_by_tag: false,
            state_file: None,
            log_level: Some("info".to_string()),
            strategy: StrategyConfig::default(),
            providers: BTreeMap::new(),
            filter: FilterConfig::default(),
        }
    }
}

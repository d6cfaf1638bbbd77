// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared shape of the on-disk run state. Persistence (atomic write,
//! locking) lives in the sibling `casecraft-state` crate; this module only
//! defines what a state file contains.

use crate::fingerprint::Fingerprint;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// On-disk schema version. Bumped whenever [`StateFile`]'s shape changes in
/// a way that isn't forward-compatible.
pub const STATE_FILE_VERSION: u32 = 1;

/// Per-endpoint generation status recorded between runs, keyed by the
/// endpoint's `"{method} {path}"` key in [`StateFile::endpoints`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EndpointState {
    /// Content fingerprint of the endpoint as of this record, compared
    /// against the current fingerprint to decide whether to regenerate.
    pub fingerprint: Fingerprint,
    /// UTC timestamp of this generation attempt.
    pub generated_at: DateTime<Utc>,
    /// Provider that ultimately produced the persisted test cases.
    pub last_provider: String,
    /// Model identifier reported by `last_provider`.
    pub model: String,
    /// Number of test cases written for this endpoint on the last run.
    pub test_case_count: u32,
    /// Total prompt + completion tokens billed across every attempt.
    pub token_usage: u64,
    /// Number of retries (including fallback-chain advances) before this
    /// outcome was reached.
    pub retry_count: u32,
    /// On-disk path of the written artifact, relative to the output root.
    pub artifact_path: String,
    /// `true` if the last run for this endpoint completed without error.
    pub succeeded: bool,
}

/// Aggregate counters over every endpoint ever recorded in a [`StateFile`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StateCounters {
    /// Total generation attempts recorded, across all runs.
    pub total_runs: u32,
    /// Attempts that ended in success.
    pub succeeded: u32,
    /// Attempts that ended in failure.
    pub failed: u32,
}

/// The full persisted run state: which endpoints have already been
/// generated, what happened each time, and a running tally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StateFile {
    /// Schema version, checked on load.
    pub version: u32,
    /// State keyed by endpoint key (`"{method} {path}"`).
    pub endpoints: BTreeMap<String, EndpointState>,
    /// Counters aggregated across every recorded attempt.
    pub counters: StateCounters,
}

impl StateFile {
    /// An empty state file at the current schema version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            version: STATE_FILE_VERSION,
            endpoints: BTreeMap::new(),
            counters: StateCounters::default(),
        }
    }

    /// `true` if `endpoint_key` has a recorded state from a prior run that
    /// succeeded against the current `fingerprint` — the caller can skip
    /// regeneration for it.
    #[must_use]
    pub fn is_up_to_date(&self, endpoint_key: &str, fingerprint: &str) -> bool {
        self.endpoints
            .get(endpoint_key)
            .is_some_and(|s| s.succeeded && s.fingerprint == fingerprint)
    }

    /// Record an attempt's outcome, keyed by `endpoint_key`, and update the
    /// aggregate counters.
    pub fn record(&mut self, endpoint_key: String, state: EndpointState) {
        self.counters.total_runs += 1;
        if state.succeeded {
            self.counters.succeeded += 1;
        } else {
            self.counters.failed += 1;
        }
        self.endpoints.insert(endpoint_key, state);
    }
}

impl Default for StateFile {
    fn default() -> Self {
        Self::new()
    }
}

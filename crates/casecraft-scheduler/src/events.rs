// SPDX-License-Identifier: MIT OR Apache-2.0
//! Discrete progress events fanned onto a single channel for the progress
//! renderer to consume: an owned `mpsc` stream rather than a broadcast.

use std::path::PathBuf;

/// One discrete step in a job's lifecycle, emitted as it happens.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// The job has been accepted and is waiting for a worker slot.
    Queued {
        /// `METHOD path` identity of the endpoint.
        endpoint: String,
    },
    /// A worker slot was acquired and an attempt is starting.
    Started {
        /// `METHOD path` identity of the endpoint.
        endpoint: String,
        /// Provider handling this attempt.
        provider: String,
        /// Attempt number within the whole job (0-based, across the chain).
        attempt: u32,
    },
    /// Non-streaming progress simulation or SSE chunk percentage.
    StreamingPct {
        /// `METHOD path` identity of the endpoint.
        endpoint: String,
        /// Provider handling this attempt.
        provider: String,
        /// Percent complete, 0-100.
        pct: u8,
    },
    /// The provider's response passed validation.
    Validated {
        /// `METHOD path` identity of the endpoint.
        endpoint: String,
        /// Provider that produced the validated response.
        provider: String,
    },
    /// The validated test cases were persisted.
    Written {
        /// `METHOD path` identity of the endpoint.
        endpoint: String,
        /// Path the artifact was written to (or would have been, if skipped).
        path: PathBuf,
        /// Number of test cases in the written batch.
        test_case_count: usize,
    },
    /// The job failed terminally — its whole fallback chain was exhausted.
    Failed {
        /// `METHOD path` identity of the endpoint.
        endpoint: String,
        /// Human-readable reason for the terminal failure.
        reason: String,
    },
    /// The job was abandoned because the scheduler was cancelled.
    Cancelled {
        /// `METHOD path` identity of the endpoint.
        endpoint: String,
    },
}

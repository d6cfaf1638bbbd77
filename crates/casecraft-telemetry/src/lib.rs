// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-provider usage accounting and run-summary reporting for CaseCraft.
//!
//! [`UsageAggregator`] collects a [`UsageRecord`](casecraft_contract::usage::UsageRecord)
//! per provider attempt under a single mutex; [`UsageReport`] is the
//! resulting per-provider and aggregate summary printed at shutdown.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod aggregator;
mod counters;
mod report;

pub use aggregator::UsageAggregator;
pub use counters::ProviderCounters;
pub use report::UsageReport;

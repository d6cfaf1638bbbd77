// SPDX-License-Identifier: MIT OR Apache-2.0
//! Final, whole-run summary produced by [`crate::scheduler::Scheduler::run`].

use casecraft_contract::usage::{Outcome, UsageRecord};

/// Terminal result of a single job, after its fallback chain is exhausted
/// or it completes successfully.
#[derive(Debug, Clone, PartialEq)]
pub struct JobOutcome {
    /// `METHOD path` identity of the endpoint.
    pub endpoint: String,
    /// The provider that ultimately produced the result, if any attempt
    /// reached a provider before the job was cancelled.
    pub provider: Option<String>,
    /// How the job ended.
    pub outcome: Outcome,
    /// Number of test cases written, `0` if the job did not succeed.
    pub test_case_count: usize,
}

/// Aggregate result of one [`Scheduler::run`](crate::scheduler::Scheduler::run)
/// call across every submitted job.
#[derive(Debug, Clone, Default)]
pub struct SchedulerReport {
    /// One entry per submitted job, in completion order (unordered by
    /// design — see the module-level ordering guarantees).
    pub outcomes: Vec<JobOutcome>,
    /// Every provider request attempt made across all jobs, for the usage
    /// aggregator to consume.
    pub usage: Vec<UsageRecord>,
}

impl SchedulerReport {
    /// Number of jobs that completed successfully.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.outcome.is_success()).count()
    }

    /// Number of jobs that did not complete successfully (failed or
    /// cancelled).
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }

    /// Number of jobs cut short by cancellation, as distinct from jobs that
    /// ran to completion and failed.
    #[must_use]
    pub fn cancelled_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, Outcome::Cancelled))
            .count()
    }

    /// `true` if any job was cut short by cancellation.
    #[must_use]
    pub fn was_cancelled(&self) -> bool {
        self.cancelled_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_split_success_and_failure() {
        let report = SchedulerReport {
            outcomes: vec![
                JobOutcome {
                    endpoint: "GET /a".into(),
                    provider: Some("glm".into()),
                    outcome: Outcome::Success,
                    test_case_count: 3,
                },
                JobOutcome {
                    endpoint: "GET /b".into(),
                    provider: Some("glm".into()),
                    outcome: Outcome::Cancelled,
                    test_case_count: 0,
                },
            ],
            usage: vec![],
        };
        assert_eq!(report.success_count(), 1);
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.cancelled_count(), 1);
        assert!(report.was_cancelled());
    }
}

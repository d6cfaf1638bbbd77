// SPDX-License-Identifier: MIT OR Apache-2.0
//! The unit of scheduled work: one endpoint assigned to a provider chain.

use crate::budget::Budget;
use crate::endpoint::Endpoint;
use std::sync::Arc;

/// One endpoint's generation work, as handed to the scheduler.
///
/// `attempt` starts at `0` and is incremented by the scheduler each time the
/// current provider in the chain is retried or the chain is advanced; it is
/// never mutated by anything outside the scheduler.
#[derive(Debug, Clone)]
pub struct Job {
    /// The endpoint to generate test cases for.
    pub endpoint: Arc<Endpoint>,
    /// First provider to try, by name.
    pub primary_provider: String,
    /// Providers to try in order after `primary_provider` fails, by name.
    pub fallback_chain: Vec<String>,
    /// Required test-case counts for this endpoint.
    pub budget: Budget,
    /// Number of attempts made so far across the whole chain.
    pub attempt: u32,
}

impl Job {
    /// Construct a new job at attempt zero.
    #[must_use]
    pub fn new(
        endpoint: Arc<Endpoint>,
        primary_provider: String,
        fallback_chain: Vec<String>,
        budget: Budget,
    ) -> Self {
        Self {
            endpoint,
            primary_provider,
            fallback_chain,
            budget,
            attempt: 0,
        }
    }

    /// The ordered chain of provider names this job will try, starting with
    /// the primary.
    #[must_use]
    pub fn provider_order(&self) -> Vec<&str> {
        std::iter::once(self.primary_provider.as_str())
            .chain(self.fallback_chain.iter().map(String::as_str))
            .collect()
    }

    /// The provider name to try at `attempt_index` (`0` = primary), or
    /// `None` once the chain is exhausted.
    #[must_use]
    pub fn provider_at(&self, attempt_index: usize) -> Option<&str> {
        self.provider_order().get(attempt_index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::{AuthRequirement, Method};

    fn sample_endpoint() -> Arc<Endpoint> {
        Arc::new(Endpoint {
            method: Method::Get,
            path: "/users".into(),
            tags: vec![],
            summary: None,
            description: None,
            parameters: vec![],
            request_body: None,
            responses: Default::default(),
            auth: AuthRequirement::default(),
        })
    }

    #[test]
    fn provider_order_starts_with_primary() {
        let job = Job::new(
            sample_endpoint(),
            "glm".into(),
            vec!["qwen".into(), "deepseek".into()],
            Budget {
                positive: 1,
                negative: 1,
                boundary: 1,
            },
        );
        assert_eq!(job.provider_order(), vec!["glm", "qwen", "deepseek"]);
        assert_eq!(job.provider_at(0), Some("glm"));
        assert_eq!(job.provider_at(2), Some("deepseek"));
        assert_eq!(job.provider_at(3), None);
    }

    #[test]
    fn new_job_starts_at_attempt_zero() {
        let job = Job::new(
            sample_endpoint(),
            "glm".into(),
            vec![],
            Budget {
                positive: 1,
                negative: 1,
                boundary: 1,
            },
        );
        assert_eq!(job.attempt, 0);
    }
}

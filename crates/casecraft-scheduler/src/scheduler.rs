// SPDX-License-Identifier: MIT OR Apache-2.0
//! The scheduler: per-provider bounded worker pools, fallback chain
//! traversal, retry-on-invalid-output, and cooperative cancellation.

use crate::cancel::CancellationToken;
use crate::events::ProgressEvent;
use crate::report::{JobOutcome, SchedulerReport};
use casecraft_contract::fingerprint::fingerprint;
use casecraft_contract::job::Job;
use casecraft_contract::state::EndpointState;
use casecraft_contract::usage::{Outcome, UsageRecord};
use casecraft_error::{CaseCraftError, TransportErrorKind};
use casecraft_provider::registry::ProviderRegistry;
use casecraft_provider::{GenerateOpts, NoopProgressSink, ProviderClient};
use casecraft_state::StateStore;
use casecraft_writer::{ArtifactWriter, WriteOutcome};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Semaphore};

/// Retries attempted against the *same* provider after a structurally
/// invalid response, before advancing to the next provider in the chain.
const MAX_INVALID_OUTPUT_RETRIES: u32 = 2;

/// Tunable scheduler behavior.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Channel capacity for the fan-in progress event stream.
    pub event_channel_capacity: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            event_channel_capacity: 256,
        }
    }
}

/// Handle returned by [`Scheduler::run`]: a live progress-event stream
/// paired with a join handle that resolves to the final report.
pub struct SchedulerHandle {
    /// Discrete progress events, one stream for every in-flight job.
    pub events: mpsc::Receiver<ProgressEvent>,
    /// Resolves to the aggregate report once every job has reached a
    /// terminal state.
    pub report: tokio::task::JoinHandle<SchedulerReport>,
}

/// Shared, cheaply-cloneable context every job-processing task needs.
struct JobContext {
    registry: &'static ProviderRegistry,
    writer: Arc<ArtifactWriter>,
    state: Arc<StateStore>,
    semaphores: HashMap<String, Arc<Semaphore>>,
    events: mpsc::Sender<ProgressEvent>,
    cancel: CancellationToken,
}

/// Orchestrates generation jobs across provider pools.
pub struct Scheduler {
    config: SchedulerConfig,
    registry: &'static ProviderRegistry,
    writer: Arc<ArtifactWriter>,
    state: Arc<StateStore>,
}

impl Scheduler {
    /// Construct a scheduler against the given provider registry, artifact
    /// writer, and state store.
    #[must_use]
    pub fn new(
        registry: &'static ProviderRegistry,
        writer: Arc<ArtifactWriter>,
        state: Arc<StateStore>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            config,
            registry,
            writer,
            state,
        }
    }

    /// Dispatch `jobs`, returning immediately with a [`SchedulerHandle`].
    ///
    /// Every provider name that appears anywhere in any job's chain gets a
    /// bounded worker pool sized from [`ProviderRegistry::max_workers`]
    /// (falling back to `1` if the provider was never configured, so the
    /// job can still run and surface a clear
    /// [`CaseCraftError::NoProviderConfigured`]). Inter-provider parallelism
    /// is unbounded; jobs are spawned in submission order.
    pub fn run(&self, jobs: Vec<Job>, cancel: CancellationToken) -> SchedulerHandle {
        let (events_tx, events_rx) = mpsc::channel(self.config.event_channel_capacity);

        let mut semaphores: HashMap<String, Arc<Semaphore>> = HashMap::new();
        for job in &jobs {
            for provider in job.provider_order() {
                semaphores.entry(provider.to_string()).or_insert_with(|| {
                    let workers = self.registry.max_workers(provider).unwrap_or(1).max(1);
                    Arc::new(Semaphore::new(workers))
                });
            }
        }

        let ctx = Arc::new(JobContext {
            registry: self.registry,
            writer: Arc::clone(&self.writer),
            state: Arc::clone(&self.state),
            semaphores,
            events: events_tx.clone(),
            cancel,
        });

        let mut handles = Vec::with_capacity(jobs.len());
        for job in jobs {
            let endpoint = job.endpoint.key();
            let _ = events_tx.try_send(ProgressEvent::Queued {
                endpoint: endpoint.clone(),
            });
            let ctx = Arc::clone(&ctx);
            handles.push(tokio::spawn(async move { run_job(job, ctx).await }));
        }
        drop(events_tx);

        let report = tokio::spawn(async move {
            let mut outcomes = Vec::with_capacity(handles.len());
            let mut usage = Vec::new();
            for handle in handles {
                match handle.await {
                    Ok((outcome, mut records)) => {
                        outcomes.push(outcome);
                        usage.append(&mut records);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "job task panicked");
                    }
                }
            }
            SchedulerReport { outcomes, usage }
        });

        SchedulerHandle {
            events: events_rx,
            report,
        }
    }
}

/// Run one job to a terminal state: success, terminal failure, or
/// cancellation.
async fn run_job(job: Job, ctx: Arc<JobContext>) -> (JobOutcome, Vec<UsageRecord>) {
    let endpoint_key = job.endpoint.key();
    let mut usage = Vec::new();
    let mut chain_index = 0usize;
    let mut invalid_retries = 0u32;
    let mut task_body = casecraft_prompt::task_prompt(&job.endpoint, &job.budget);
    let system_prompt = casecraft_prompt::system_prompt();
    let mut last_provider: Option<String> = None;

    loop {
        if ctx.cancel.is_cancelled() {
            let _ = ctx.events.send(ProgressEvent::Cancelled {
                endpoint: endpoint_key.clone(),
            }).await;
            return (
                JobOutcome {
                    endpoint: endpoint_key,
                    provider: last_provider,
                    outcome: Outcome::Cancelled,
                    test_case_count: 0,
                },
                usage,
            );
        }

        let Some(provider_name) = job.provider_at(chain_index).map(str::to_string) else {
            let reason = "fallback chain exhausted".to_string();
            let _ = ctx.events.send(ProgressEvent::Failed {
                endpoint: endpoint_key.clone(),
                reason,
            }).await;
            return (
                JobOutcome {
                    endpoint: endpoint_key,
                    provider: last_provider,
                    outcome: Outcome::InvalidOutput,
                    test_case_count: 0,
                },
                usage,
            );
        };
        last_provider = Some(provider_name.clone());

        let semaphore = ctx
            .semaphores
            .get(&provider_name)
            .cloned()
            .unwrap_or_else(|| Arc::new(Semaphore::new(1)));
        let permit = tokio::select! {
            acquired = semaphore.acquire_owned() => match acquired {
                Ok(p) => p,
                Err(_) => continue,
            },
            () = ctx.cancel.cancelled() => continue,
        };

        let _ = ctx.events.send(ProgressEvent::Started {
            endpoint: endpoint_key.clone(),
            provider: provider_name.clone(),
            attempt: job.attempt + chain_index as u32 + invalid_retries,
        }).await;

        let client = match ctx.registry.get(&provider_name) {
            Ok(c) => c,
            Err(_) => {
                drop(permit);
                chain_index += 1;
                invalid_retries = 0;
                continue;
            }
        };

        let start = Instant::now();
        let opts = GenerateOpts {
            stream: false,
            attempt: invalid_retries,
        };
        let generated = tokio::select! {
            res = client.generate(&task_body, &system_prompt, &opts, &NoopProgressSink) => res,
            () = ctx.cancel.cancelled() => {
                drop(permit);
                let _ = ctx.events.send(ProgressEvent::Cancelled { endpoint: endpoint_key.clone() }).await;
                return (JobOutcome {
                    endpoint: endpoint_key,
                    provider: last_provider,
                    outcome: Outcome::Cancelled,
                    test_case_count: 0,
                }, usage);
            }
        };
        drop(permit);

        match generated {
            Err(e) => {
                usage.push(usage_record_for_error(&provider_name, start.elapsed(), &e));
                chain_index += 1;
                invalid_retries = 0;
                continue;
            }
            Ok(response) => {
                usage.push(UsageRecord {
                    provider: provider_name.clone(),
                    prompt_tokens: Some(response.usage.prompt_tokens),
                    completion_tokens: Some(response.usage.completion_tokens),
                    duration: start.elapsed(),
                    outcome: Outcome::Success,
                });

                match casecraft_validate::validate(&provider_name, &job.endpoint, &job.budget, &response.text) {
                    Ok(cases) => {
                        let _ = ctx.events.send(ProgressEvent::Validated {
                            endpoint: endpoint_key.clone(),
                            provider: provider_name.clone(),
                        }).await;

                        let fp = fingerprint(&job.endpoint);
                        let count = cases.len();
                        match ctx.writer.write(&job.endpoint, &fp, cases) {
                            Ok(WriteOutcome::Written(path) | WriteOutcome::Skipped(path)) => {
                                let total_tokens: u64 =
                                    usage.iter().filter_map(UsageRecord::total_tokens).sum();
                                let _ = ctx.state.record(
                                    endpoint_key.clone(),
                                    EndpointState {
                                        fingerprint: fp,
                                        generated_at: Utc::now(),
                                        last_provider: provider_name.clone(),
                                        model: ctx.registry.model(&provider_name).unwrap_or_default(),
                                        test_case_count: count as u32,
                                        token_usage: total_tokens,
                                        retry_count: chain_index as u32 + invalid_retries,
                                        artifact_path: path.display().to_string(),
                                        succeeded: true,
                                    },
                                );
                                let _ = ctx.events.send(ProgressEvent::Written {
                                    endpoint: endpoint_key.clone(),
                                    path,
                                    test_case_count: count,
                                }).await;
                                return (
                                    JobOutcome {
                                        endpoint: endpoint_key,
                                        provider: Some(provider_name),
                                        outcome: Outcome::Success,
                                        test_case_count: count,
                                    },
                                    usage,
                                );
                            }
                            Err(reason) => {
                                let _ = ctx.events.send(ProgressEvent::Failed {
                                    endpoint: endpoint_key.clone(),
                                    reason: reason.to_string(),
                                }).await;
                                return (
                                    JobOutcome {
                                        endpoint: endpoint_key,
                                        provider: Some(provider_name),
                                        outcome: Outcome::InvalidOutput,
                                        test_case_count: 0,
                                    },
                                    usage,
                                );
                            }
                        }
                    }
                    Err(CaseCraftError::Validation { violations, .. }) => {
                        usage.push(UsageRecord {
                            provider: provider_name.clone(),
                            prompt_tokens: None,
                            completion_tokens: None,
                            duration: start.elapsed(),
                            outcome: Outcome::InvalidOutput,
                        });
                        invalid_retries += 1;
                        if invalid_retries > MAX_INVALID_OUTPUT_RETRIES {
                            chain_index += 1;
                            invalid_retries = 0;
                        } else {
                            task_body = casecraft_prompt::build_correction(&task_body, &violations);
                        }
                        continue;
                    }
                    Err(_) => {
                        chain_index += 1;
                        invalid_retries = 0;
                        continue;
                    }
                }
            }
        }
    }
}

fn usage_record_for_error(
    provider: &str,
    duration: std::time::Duration,
    error: &CaseCraftError,
) -> UsageRecord {
    let outcome = match error {
        CaseCraftError::ProviderTransport {
            kind: TransportErrorKind::RateLimited { .. },
            ..
        } => Outcome::RateLimited,
        CaseCraftError::ProviderTransport {
            kind: TransportErrorKind::Timeout { .. },
            ..
        } => Outcome::Timeout,
        CaseCraftError::ProviderTransport { .. } => Outcome::TransportError,
        CaseCraftError::InvalidOutput { .. } => Outcome::InvalidOutput,
        _ => Outcome::TransportError,
    };
    UsageRecord {
        provider: provider.to_string(),
        prompt_tokens: None,
        completion_tokens: None,
        duration,
        outcome,
    }
}

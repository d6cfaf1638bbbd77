// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
//! Command-line entry point for CaseCraft: load a config, fetch and filter
//! an OpenAPI/Swagger spec, assign endpoints to providers, schedule
//! generation jobs, and print progress and a final usage summary.

use anyhow::{Context, Result};
use casecraft_contract::endpoint::Endpoint;
use casecraft_contract::fingerprint::{fingerprint, sha256_hex};
use casecraft_contract::job::Job;
use casecraft_provider::registry::global as provider_registry;
use casecraft_scheduler::{CancellationToken, ProgressEvent, Scheduler, SchedulerConfig};
use casecraft_spec::EndpointFilter;
use casecraft_state::{StateStore, DEFAULT_STATE_FILENAME};
use casecraft_telemetry::UsageAggregator;
use casecraft_writer::ArtifactWriter;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Exit code for configuration, spec, or I/O errors before scheduling starts.
const EXIT_SETUP_FAILED: i32 = 1;
/// Exit code when every scheduled endpoint failed to generate.
const EXIT_ALL_FAILED: i32 = 2;
/// Exit code when some, but not all, scheduled endpoints failed to generate.
const EXIT_PARTIAL_FAILURE: i32 = 3;
/// Exit code when the run was interrupted (`SIGINT`/Ctrl-C) before every
/// job completed.
const EXIT_CANCELLED: i32 = 130;

/// Terminal result of a whole [`run`] invocation, mapped to a process exit
/// code in [`main`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunOutcome {
    /// Every scheduled endpoint succeeded, or there was nothing to do.
    Success,
    /// Every scheduled endpoint failed.
    AllFailed,
    /// Some scheduled endpoints failed, others succeeded.
    PartialFailure,
    /// The run was cancelled before every job completed.
    Cancelled,
}

impl RunOutcome {
    fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::AllFailed => EXIT_ALL_FAILED,
            Self::PartialFailure => EXIT_PARTIAL_FAILURE,
            Self::Cancelled => EXIT_CANCELLED,
        }
    }

    /// Classify a finished scheduler report into a terminal outcome.
    /// Cancellation takes priority: a run cut short by Ctrl-C is reported
    /// as cancelled even if every job that did complete succeeded.
    fn from_report(report: &casecraft_scheduler::SchedulerReport) -> Self {
        if report.was_cancelled() {
            Self::Cancelled
        } else if report.outcomes.is_empty() || report.failure_count() == 0 {
            Self::Success
        } else if report.success_count() == 0 {
            Self::AllFailed
        } else {
            Self::PartialFailure
        }
    }
}

/// Generate LLM-authored test cases for every endpoint in an OpenAPI or
/// Swagger document.
#[derive(Parser, Debug)]
#[command(name = "casecraft", version, about = "LLM-orchestrated API test-case generator")]
struct Cli {
    /// Path or URL to the OpenAPI/Swagger document. Overrides `spec` in the
    /// config file when given.
    spec: Option<String>,

    /// Path to a `casecraft.toml` configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory to write generated test-case artifacts into.
    #[arg(long)]
    output_dir: Option<String>,

    /// Nest artifact files under a subdirectory named after each
    /// endpoint's first tag.
    #[arg(long)]
    nest_by_tag: bool,

    /// Path to the run state file (default `.casecraft_state.json` next to
    /// the output directory).
    #[arg(long)]
    state_file: Option<String>,

    /// Re-generate every endpoint even if its fingerprint is already
    /// recorded as up to date.
    #[arg(long)]
    force: bool,

    /// Only include paths matching this glob. Can be repeated.
    #[arg(long = "include-path")]
    include_path: Vec<String>,

    /// Exclude paths matching this glob. Can be repeated.
    #[arg(long = "exclude-path")]
    exclude_path: Vec<String>,

    /// Only include endpoints carrying this tag. Can be repeated.
    #[arg(long = "include-tag")]
    include_tag: Vec<String>,

    /// Exclude endpoints carrying this tag. Can be repeated.
    #[arg(long = "exclude-tag")]
    exclude_tag: Vec<String>,

    /// Enable debug logging.
    #[arg(long)]
    debug: bool,
}

impl Cli {
    /// Build the CLI-flag overlay config to merge on top of the file config.
    fn overlay(&self) -> casecraft_config::CaseCraftConfig {
        let mut overlay = casecraft_config::CaseCraftConfig::default();
        overlay.spec = self.spec.clone();
        if let Some(dir) = &self.output_dir {
            overlay.output_dir = dir.clone();
        }
        overlay.nest_by_tag = self.nest_by_tag;
        overlay.state_file = self.state_file.clone();
        if self.debug {
            overlay.log_level = Some("debug".into());
        }
        overlay.filter = casecraft_config::FilterConfig {
            include_paths: self.include_path.clone(),
            exclude_paths: self.exclude_path.clone(),
            include_tags: self.include_tag.clone(),
            exclude_tags: self.exclude_tag.clone(),
            include_methods: vec![],
            exclude_methods: vec![],
        };
        overlay
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("casecraft=debug")
    } else {
        EnvFilter::new("casecraft=info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(cli).await {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(EXIT_SETUP_FAILED);
        }
    }
}

/// Run the whole pipeline, returning the terminal [`RunOutcome`] to map to
/// a process exit code. An `Err` means the run never reached scheduling
/// (bad config, unreadable spec, I/O failure) and always exits 1.
async fn run(cli: Cli) -> Result<RunOutcome> {
    let file_config = casecraft_config::load_config(cli.config.as_deref())
        .context("loading configuration")?;
    let config = casecraft_config::merge_configs(file_config, cli.overlay());

    let warnings = casecraft_config::validate_config(&config).context("validating configuration")?;
    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    let spec_source = config
        .spec
        .as_deref()
        .context("no spec given (pass a path/URL, set `spec` in the config file, or CASECRAFT_SPEC)")?;

    let endpoints = casecraft_spec::load(spec_source)
        .await
        .with_context(|| format!("loading spec from {spec_source}"))?;
    tracing::info!(count = endpoints.len(), "loaded endpoints from spec");

    let filter: EndpointFilter = config.filter.clone().into();
    let endpoints = filter.apply(endpoints).context("applying endpoint filter")?;
    tracing::info!(count = endpoints.len(), "endpoints remaining after filter");

    if endpoints.is_empty() {
        println!("no endpoints matched; nothing to generate");
        return Ok(RunOutcome::Success);
    }

    let spec_fingerprint = spec_fingerprint(&endpoints);

    // `validate_config` already rejected a strategy referencing a provider
    // absent here, so every name the strategy needs is in this map.
    for (name, entry) in &config.providers {
        provider_registry().configure(entry.to_provider_config(name));
    }

    let assignment_strategy = config
        .strategy
        .clone()
        .into_assignment_strategy(endpoints.len(), &spec_fingerprint);
    let assignments = casecraft_strategy::assign(&assignment_strategy, &endpoints)
        .context("assigning endpoints to providers")?;

    let output_dir = PathBuf::from(&config.output_dir);
    let writer = Arc::new(ArtifactWriter::new(output_dir.clone(), config.nest_by_tag));
    let state_path = config
        .state_file
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(|| output_dir.join(DEFAULT_STATE_FILENAME));
    let state = Arc::new(StateStore::open(state_path));

    let all_providers: Vec<String> = config.providers.keys().cloned().collect();
    let jobs = build_jobs(&endpoints, &assignments, &all_providers, &state, cli.force);
    tracing::info!(count = jobs.len(), "dispatching generation jobs");

    if jobs.is_empty() {
        println!("every endpoint is already up to date; nothing to generate");
        return Ok(RunOutcome::Success);
    }

    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, cancelling in-flight jobs");
            ctrl_c_cancel.cancel();
        }
    });

    let scheduler = Scheduler::new(provider_registry(), writer, state, SchedulerConfig::default());
    let mut handle = scheduler.run(jobs, cancel);

    while let Some(event) = handle.events.recv().await {
        print_event(&event);
    }

    let report = handle.report.await.context("scheduler task panicked")?;

    let usage = UsageAggregator::new();
    usage.record_all(report.usage.clone());
    println!("{}", usage.report());

    println!(
        "{} succeeded, {} failed out of {} endpoints",
        report.success_count(),
        report.failure_count(),
        report.outcomes.len()
    );

    let outcome = RunOutcome::from_report(&report);
    if outcome == RunOutcome::Cancelled {
        eprintln!("run cancelled before every job completed");
    }
    Ok(outcome)
}

/// Derive a stable fingerprint for the whole filtered endpoint set, used as
/// the default seed material for the random assignment strategy.
fn spec_fingerprint(endpoints: &[Endpoint]) -> String {
    let mut fingerprints: Vec<String> = endpoints.iter().map(fingerprint).collect();
    fingerprints.sort_unstable();
    sha256_hex(fingerprints.join(",").as_bytes())
}

/// Build one [`Job`] per endpoint that is not already up to date (unless
/// `force` is set), with a fallback chain made of every other configured
/// provider in declaration order after the assigned primary.
fn build_jobs(
    endpoints: &[Endpoint],
    assignments: &[String],
    all_providers: &[String],
    state: &StateStore,
    force: bool,
) -> Vec<Job> {
    endpoints
        .iter()
        .zip(assignments)
        .filter_map(|(endpoint, primary)| {
            let fp = fingerprint(endpoint);
            if !force && state.is_up_to_date(&endpoint.key(), &fp) {
                tracing::debug!(endpoint = %endpoint.key(), "up to date, skipping");
                return None;
            }

            let fallback_chain: Vec<String> = all_providers
                .iter()
                .filter(|name| *name != primary)
                .cloned()
                .collect();

            let score = casecraft_scoring::score(endpoint);
            let budget = casecraft_scoring::budget_for(score, endpoint.method);

            Some(Job::new(
                Arc::new(endpoint.clone()),
                primary.clone(),
                fallback_chain,
                budget,
            ))
        })
        .collect()
}

/// Print a single progress event to stderr, one line per event.
fn print_event(event: &ProgressEvent) {
    match event {
        ProgressEvent::Queued { endpoint } => {
            eprintln!("[queued] {endpoint}");
        }
        ProgressEvent::Started { endpoint, provider, attempt } => {
            eprintln!("[start]  {endpoint} via {provider} (attempt {attempt})");
        }
        ProgressEvent::StreamingPct { endpoint, provider, pct } => {
            eprintln!("[stream] {endpoint} via {provider} {pct}%");
        }
        ProgressEvent::Validated { endpoint, provider } => {
            eprintln!("[valid]  {endpoint} via {provider}");
        }
        ProgressEvent::Written { endpoint, path, test_case_count } => {
            eprintln!("[write]  {endpoint} -> {} ({test_case_count} cases)", path.display());
        }
        ProgressEvent::Failed { endpoint, reason } => {
            eprintln!("[fail]   {endpoint}: {reason}");
        }
        ProgressEvent::Cancelled { endpoint } => {
            eprintln!("[cancel] {endpoint}");
        }
    }
}

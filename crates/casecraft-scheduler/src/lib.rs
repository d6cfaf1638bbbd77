// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-provider worker pools, fallback chain traversal, and cooperative
//! cancellation for CaseCraft generation jobs.
//!
//! [`Scheduler::run`] dispatches a batch of
//! [`Job`](casecraft_contract::job::Job)s, each walking its own provider
//! chain independently: a bounded [`tokio::sync::Semaphore`] per provider
//! name caps concurrent in-flight requests, invalid output is retried
//! against the same provider with a correction prompt, and any other
//! failure advances to the next provider in the chain. Progress is
//! reported on an `mpsc` stream of [`events::ProgressEvent`]s; the final
//! [`report::SchedulerReport`] is available once every job reaches a
//! terminal state.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod cancel;
pub mod events;
pub mod report;
mod scheduler;

pub use cancel::CancellationToken;
pub use events::ProgressEvent;
pub use report::{JobOutcome, SchedulerReport};
pub use scheduler::{Scheduler, SchedulerConfig, SchedulerHandle};

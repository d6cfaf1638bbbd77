// SPDX-License-Identifier: MIT OR Apache-2.0
//! Provider clients and registry for CaseCraft.
//!
//! Every built-in ([`glm`], [`qwen`], [`deepseek`], [`local`]) implements
//! the uniform [`client::ProviderClient`] contract over an OpenAI-compatible
//! chat-completion HTTP API ([`shared`]); [`registry`] is the process-wide
//! lazily-constructed name→client map the scheduler resolves jobs against.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod deepseek;
pub mod glm;
pub mod local;
pub mod progress;
pub mod qwen;
pub mod registry;
mod shared;
mod sse;
pub mod token_estimate;
pub mod transport;

pub use client::{GenerateOpts, GenerateResponse, NoopProgressSink, ProgressSink, ProviderClient, TokenUsage};
pub use registry::{global, ProviderRegistry};

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Deterministic, provider-neutral prompt assembly for CaseCraft.
//!
//! Turns an [`Endpoint`](casecraft_contract::endpoint::Endpoint) and its
//! [`Budget`](casecraft_contract::budget::Budget) into a two-part prompt: a
//! fixed system preamble describing the output contract, and a task body
//! describing the endpoint. No network I/O, no randomness — same inputs
//! always produce the same prompt text.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod placeholders;
pub mod prompt;
pub mod render;

pub use prompt::{build, build_correction, system_prompt, task_prompt, RenderedPrompt};

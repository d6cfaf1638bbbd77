// SPDX-License-Identifier: MIT OR Apache-2.0
//! Persists generated CaseCraft test-case batches to disk.
//!
//! One JSON file per endpoint, path derived from its method and path
//! template ([`slug`]), written atomically and skipped when the endpoint's
//! fingerprint hasn't changed since the last run ([`writer`]).

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod slug;
pub mod writer;

pub use writer::{ArtifactFile, ArtifactWriter, WriteOutcome};

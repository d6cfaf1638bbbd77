// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fingerprint-keyed run-state persistence for CaseCraft.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod state_store;

pub use state_store::{StateStore, DEFAULT_STATE_FILENAME};

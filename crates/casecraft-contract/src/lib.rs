// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared data model for CaseCraft: the normalized endpoint representation,
//! schema tree, fingerprinting, budgeting, job, provider-config, usage, and
//! state types every other `casecraft-*` crate builds on.
//!
//! Nothing in this crate performs I/O or talks to a provider; it only
//! defines the shapes that flow between the other components.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod budget;
pub mod endpoint;
pub mod fingerprint;
pub mod job;
pub mod provider_config;
pub mod schema;
pub mod state;
pub mod test_case;
pub mod usage;

pub use budget::{Budget, ComplexityScore, Priority, TestType};
pub use endpoint::{AuthRequirement, AuthSchemeKind, Endpoint, Method, ParamLocation, Parameter};
pub use fingerprint::{fingerprint, sha256_hex, Fingerprint};
pub use job::Job;
pub use provider_config::ProviderConfig;
pub use schema::SchemaNode;
pub use state::{EndpointState, StateFile, STATE_FILE_VERSION};
pub use test_case::{TestCase, TestCaseMetadata};
pub use usage::{Outcome, UsageRecord};

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Spec loading for CaseCraft: fetch an OpenAPI 3.0 or Swagger 2.0 document,
//! detect its dialect, normalize Swagger into the OpenAPI 3.0 operation
//! shape, resolve local `$ref`s, and flatten it into the ordered
//! [`Endpoint`](casecraft_contract::endpoint::Endpoint) list the rest of
//! CaseCraft operates on.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod dialect;
pub mod endpoint_builder;
pub mod filter;
pub mod loader;
pub mod normalize;
pub mod schema_convert;

pub use dialect::SpecDialect;
pub use filter::EndpointFilter;
pub use loader::{load, load_from_str};

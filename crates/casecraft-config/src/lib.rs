// SPDX-License-Identifier: MIT OR Apache-2.0
//! TOML configuration for CaseCraft: provider definitions, assignment
//! strategy selection, endpoint filtering, and output settings, with
//! environment variable overrides and CLI-flag overlay merging.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod filter_config;
mod loader;
mod merge;
mod provider_entry;
mod settings;
mod strategy_config;
mod validate;

pub use filter_config::FilterConfig;
pub use loader::{apply_env_overrides, load_config, parse_toml};
pub use merge::merge_configs;
pub use provider_entry::ProviderEntry;
pub use settings::CaseCraftConfig;
pub use strategy_config::{ManualRuleConfig, StrategyConfig};
pub use validate::{validate_config, ConfigWarning};

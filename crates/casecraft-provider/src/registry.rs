// SPDX-License-Identifier: MIT OR Apache-2.0
//! Process-wide provider registry.
//!
//! Configurations are registered up front (typically while loading the run
//! config); clients are constructed lazily, once per name, the first time
//! they're requested. [`ProviderRegistry::max_workers`] reads straight from
//! the stored configuration and never triggers construction, so the
//! scheduler can size its worker pools before any provider is touched.

use crate::client::ProviderClient;
use crate::deepseek::{DeepSeekClient, DEFAULT_MAX_WORKERS as DEEPSEEK_DEFAULT_MAX_WORKERS};
use crate::glm::{GlmClient, DEFAULT_MAX_WORKERS as GLM_DEFAULT_MAX_WORKERS};
use crate::local::LocalClient;
use crate::qwen::{QwenClient, DEFAULT_MAX_WORKERS as QWEN_DEFAULT_MAX_WORKERS};
use casecraft_contract::provider_config::ProviderConfig;
use casecraft_error::CaseCraftError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

/// Default worker count for a built-in provider name, known without any
/// configuration having been registered yet.
#[must_use]
pub fn builtin_default_max_workers(name: &str) -> Option<usize> {
    match name {
        "glm" => Some(GLM_DEFAULT_MAX_WORKERS),
        "qwen" => Some(QWEN_DEFAULT_MAX_WORKERS),
        "deepseek" => Some(DEEPSEEK_DEFAULT_MAX_WORKERS),
        _ => None,
    }
}

/// A process-wide, lazily-initialized provider registry.
#[derive(Default)]
pub struct ProviderRegistry {
    configs: Mutex<HashMap<String, ProviderConfig>>,
    clients: Mutex<HashMap<String, Arc<dyn ProviderClient>>>,
}

impl ProviderRegistry {
    /// Register (or replace) the configuration for `config.name`. Does not
    /// construct a client; a stale cached client for this name, if any, is
    /// dropped so the next [`Self::get`] rebuilds it from the new config.
    pub fn configure(&self, config: ProviderConfig) {
        let name = config.name.clone();
        self.configs.lock().expect("registry mutex poisoned").insert(name.clone(), config);
        self.clients.lock().expect("registry mutex poisoned").remove(&name);
    }

    /// Get (constructing on first use) the client registered for `name`.
    ///
    /// # Errors
    /// Returns [`CaseCraftError::NoProviderConfigured`] if `name` was never
    /// passed to [`Self::configure`], or if it does not match one of the
    /// built-in provider kinds.
    pub fn get(&self, name: &str) -> Result<Arc<dyn ProviderClient>, CaseCraftError> {
        if let Some(client) = self.clients.lock().expect("registry mutex poisoned").get(name) {
            return Ok(Arc::clone(client));
        }

        let config = self
            .configs
            .lock()
            .expect("registry mutex poisoned")
            .get(name)
            .cloned()
            .ok_or_else(|| CaseCraftError::NoProviderConfigured {
                name: name.to_string(),
            })?;

        let client: Arc<dyn ProviderClient> = match name {
            "glm" => Arc::new(GlmClient::new(config)),
            "qwen" => Arc::new(QwenClient::new(config)),
            "deepseek" => Arc::new(DeepSeekClient::new(config)),
            "local" => Arc::new(LocalClient::new(config)),
            other => {
                return Err(CaseCraftError::NoProviderConfigured {
                    name: other.to_string(),
                })
            }
        };

        self.clients
            .lock()
            .expect("registry mutex poisoned")
            .insert(name.to_string(), Arc::clone(&client));
        Ok(client)
    }

    /// Maximum worker count for `name`, read from its registered config
    /// without constructing a client. `None` if `name` was never
    /// configured.
    #[must_use]
    pub fn max_workers(&self, name: &str) -> Option<usize> {
        self.configs
            .lock()
            .expect("registry mutex poisoned")
            .get(name)
            .map(|c| c.max_workers)
    }

    /// Model identifier configured for `name`, read without constructing a
    /// client. `None` if `name` was never configured.
    #[must_use]
    pub fn model(&self, name: &str) -> Option<String> {
        self.configs
            .lock()
            .expect("registry mutex poisoned")
            .get(name)
            .map(|c| c.model.clone())
    }

    /// Insert a pre-built client under `name`, bypassing the built-in
    /// construction table in [`Self::get`].
    ///
    /// Used by the scheduler's test suite to substitute a deterministic
    /// stub for a real HTTP-backed client; production code reaches
    /// providers only through [`Self::configure`] and [`Self::get`].
    pub fn insert_client(&self, name: impl Into<String>, client: Arc<dyn ProviderClient>) {
        self.clients
            .lock()
            .expect("registry mutex poisoned")
            .insert(name.into(), client);
    }
}

static GLOBAL: OnceLock<ProviderRegistry> = OnceLock::new();

/// The process-wide provider registry singleton.
#[must_use]
pub fn global() -> &'static ProviderRegistry {
    GLOBAL.get_or_init(ProviderRegistry::default)
}

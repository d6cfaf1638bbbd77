// SPDX-License-Identifier: MIT OR Apache-2.0
//! Top-level assignment strategy: one provider name per endpoint, chosen
//! by whichever policy the operator configured.

use crate::complexity::{self, ComplexityRoles};
use crate::manual::{self, ManualRule};
use crate::rotating;
use casecraft_contract::endpoint::Endpoint;
use casecraft_error::CaseCraftError;

/// An operator-selected policy for binding endpoints to providers.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignmentStrategy {
    /// Cycle through `providers` in declaration order.
    RoundRobin {
        /// Provider names to cycle through, in order.
        providers: Vec<String>,
    },
    /// Pick uniformly at random from `providers`, seeded for reproducibility.
    Random {
        /// Provider names to choose among.
        providers: Vec<String>,
        /// RNG seed. Use [`crate::seed::default_seed`] when the operator
        /// hasn't supplied one explicitly.
        seed: u64,
    },
    /// Route by per-endpoint complexity score into one of three role tags.
    Complexity {
        /// The strongest/balanced/fastest provider bindings.
        roles: ComplexityRoles,
    },
    /// An ordered `pattern -> provider` glob list, first match wins.
    Manual {
        /// Rules tried in order; must end in a `*` fallback.
        rules: Vec<ManualRule>,
    },
}

impl AssignmentStrategy {
    /// Validate the strategy's configuration independent of any endpoint
    /// set, e.g. that a [`Self::Manual`] list ends in a wildcard fallback.
    ///
    /// # Errors
    /// Returns a [`CaseCraftError::Config`] describing the violation.
    pub fn validate(&self) -> Result<(), CaseCraftError> {
        match self {
            Self::RoundRobin { providers } | Self::Random { providers, .. } if providers.is_empty() => {
                Err(CaseCraftError::Config {
                    reason: "assignment strategy requires at least one configured provider"
                        .to_string(),
                })
            }
            Self::Manual { rules } => manual::require_wildcard_fallback(rules),
            _ => Ok(()),
        }
    }
}

/// Assign a provider name to every endpoint in `endpoints`, in order,
/// according to `strategy`.
///
/// # Errors
/// Returns a [`CaseCraftError::Config`] if the strategy is misconfigured
/// (empty provider list, missing manual wildcard fallback) or if a manual
/// rule's glob pattern fails to compile.
pub fn assign(
    strategy: &AssignmentStrategy,
    endpoints: &[Endpoint],
) -> Result<Vec<String>, CaseCraftError> {
    strategy.validate()?;
    match strategy {
        AssignmentStrategy::RoundRobin { providers } => endpoints
            .iter()
            .enumerate()
            .map(|(i, _)| rotating::round_robin(providers, i))
            .collect(),
        AssignmentStrategy::Random { providers, seed } => {
            let mut rng = rotating::rng_from_seed(*seed);
            endpoints
                .iter()
                .map(|_| rotating::random(providers, &mut rng))
                .collect()
        }
        AssignmentStrategy::Complexity { roles } => Ok(endpoints
            .iter()
            .map(|ep| complexity::assign_one(ep, roles))
            .collect()),
        AssignmentStrategy::Manual { rules } => endpoints
            .iter()
            .map(|ep| manual::resolve(rules, ep.method, &ep.path))
            .collect(),
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Complexity-driven assignment: route an endpoint to a provider role
//! based on its complexity score rather than a fixed rotation.

use casecraft_contract::endpoint::Endpoint;

/// Provider names bound to each complexity-driven role. The scheduler
/// resolves these against [`casecraft_provider::registry`] the same way
/// it resolves any other provider name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexityRoles {
    /// Assigned to endpoints with score `> 10`.
    pub strongest: String,
    /// Assigned to endpoints with score `<= 5`.
    pub fastest: String,
    /// Assigned to everything in between.
    pub balanced: String,
}

/// Pick the role-bound provider for `endpoint`'s complexity score.
#[must_use]
pub fn assign_one(endpoint: &Endpoint, roles: &ComplexityRoles) -> String {
    let score = casecraft_scoring::score(endpoint);
    if score > 10 {
        roles.strongest.clone()
    } else if score <= 5 {
        roles.fastest.clone()
    } else {
        roles.balanced.clone()
    }
}

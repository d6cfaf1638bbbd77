// SPDX-License-Identifier: MIT OR Apache-2.0
//! Maps a [`ComplexityScore`] (and method) to a required [`Budget`].
//!
//! Each score tier has a small family of valid `(positive, negative,
//! boundary)` allocations whose totals span the tier's declared range.
//! Every endpoint in a tier gets the tier's highest-total allocation,
//! except `DELETE` endpoints, which get the tier's second-highest —
//! DELETE surfaces are narrower (no body) so they need fewer negative and
//! boundary cases to cover meaningfully.

use casecraft_contract::budget::{Budget, ComplexityScore};
use casecraft_contract::endpoint::Method;

const TIER_LOW: [Budget; 2] = [
    Budget {
        positive: 2,
        negative: 2,
        boundary: 1,
    },
    Budget {
        positive: 2,
        negative: 3,
        boundary: 1,
    },
];

const TIER_MID: [Budget; 3] = [
    Budget {
        positive: 2,
        negative: 3,
        boundary: 2,
    },
    Budget {
        positive: 3,
        negative: 3,
        boundary: 2,
    },
    Budget {
        positive: 3,
        negative: 4,
        boundary: 2,
    },
];

const TIER_HIGH: [Budget; 3] = [
    Budget {
        positive: 3,
        negative: 4,
        boundary: 3,
    },
    Budget {
        positive: 4,
        negative: 4,
        boundary: 3,
    },
    Budget {
        positive: 4,
        negative: 5,
        boundary: 3,
    },
];

/// Look up the required [`Budget`] for an endpoint's complexity score and
/// method.
#[must_use]
pub fn budget_for(score: ComplexityScore, method: Method) -> Budget {
    let tier: &[Budget] = if score <= 5 {
        &TIER_LOW
    } else if score <= 10 {
        &TIER_MID
    } else {
        &TIER_HIGH
    };

    let index = if method == Method::Delete {
        tier.len() - 2
    } else {
        tier.len() - 1
    };
    tier[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_tier_boundary_scores() {
        assert_eq!(budget_for(0, Method::Get).total(), 6);
        assert_eq!(budget_for(5, Method::Get).total(), 6);
    }

    #[test]
    fn mid_tier_boundary_scores() {
        assert_eq!(budget_for(6, Method::Get).total(), 9);
        assert_eq!(budget_for(10, Method::Get).total(), 9);
    }

    #[test]
    fn high_tier_unbounded_above() {
        assert_eq!(budget_for(11, Method::Get).total(), 12);
        assert_eq!(budget_for(100, Method::Get).total(), 12);
    }

    #[test]
    fn delete_gets_second_highest_total_per_tier() {
        assert_eq!(budget_for(3, Method::Delete).total(), 5);
        assert_eq!(budget_for(8, Method::Delete).total(), 8);
        assert_eq!(budget_for(15, Method::Delete).total(), 11);
    }

    #[test]
    fn delete_total_is_strictly_less_than_non_delete_in_same_tier() {
        for score in [3, 8, 15] {
            assert!(budget_for(score, Method::Delete).total() < budget_for(score, Method::Get).total());
        }
    }

    #[test]
    fn all_allocations_respect_declared_ranges() {
        for score in [0, 3, 5, 6, 8, 10, 11, 15, 50] {
            for method in [Method::Get, Method::Delete] {
                let b = budget_for(score, method);
                assert!(b.positive >= 2 && b.positive <= 4);
                assert!(b.negative >= 2 && b.negative <= 5);
                assert!(b.boundary >= 1 && b.boundary <= 3);
            }
        }
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Round-robin and seeded-random assignment over a fixed provider list.
//!
//! Uses a plain `usize` cursor owned by the caller rather than a shared
//! atomic counter, since CaseCraft assigns a whole endpoint batch up front
//! rather than selecting a provider per incoming request.

use casecraft_error::CaseCraftError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Cycle through `providers` in order, wrapping around, one name per call.
///
/// # Errors
/// Returns a [`CaseCraftError::Config`] if `providers` is empty.
pub fn round_robin(providers: &[String], index: usize) -> Result<String, CaseCraftError> {
    if providers.is_empty() {
        return Err(CaseCraftError::Config {
            reason: "round_robin assignment strategy requires at least one provider".to_string(),
        });
    }
    Ok(providers[index % providers.len()].clone())
}

/// Pick a uniformly random provider from `providers` using a seeded RNG,
/// so repeated runs with the same seed reproduce the same assignment.
///
/// # Errors
/// Returns a [`CaseCraftError::Config`] if `providers` is empty.
pub fn random(providers: &[String], rng: &mut StdRng) -> Result<String, CaseCraftError> {
    if providers.is_empty() {
        return Err(CaseCraftError::Config {
            reason: "random assignment strategy requires at least one provider".to_string(),
        });
    }
    let index = rng.gen_range(0..providers.len());
    Ok(providers[index].clone())
}

/// Construct a seeded RNG for the `random` strategy.
#[must_use]
pub fn rng_from_seed(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_robin_wraps_around() {
        let providers = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(round_robin(&providers, 0).unwrap(), "a");
        assert_eq!(round_robin(&providers, 1).unwrap(), "b");
        assert_eq!(round_robin(&providers, 3).unwrap(), "a");
    }

    #[test]
    fn round_robin_rejects_empty_list() {
        assert!(round_robin(&[], 0).is_err());
    }

    #[test]
    fn random_is_deterministic_for_a_fixed_seed() {
        let providers = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let mut rng1 = rng_from_seed(42);
        let mut rng2 = rng_from_seed(42);
        let picks1: Vec<_> = (0..5).map(|_| random(&providers, &mut rng1).unwrap()).collect();
        let picks2: Vec<_> = (0..5).map(|_| random(&providers, &mut rng2).unwrap()).collect();
        assert_eq!(picks1, picks2);
    }

    #[test]
    fn random_rejects_empty_list() {
        let mut rng = rng_from_seed(1);
        assert!(random(&[], &mut rng).is_err());
    }
}

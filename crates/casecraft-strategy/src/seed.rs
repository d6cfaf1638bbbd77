// SPDX-License-Identifier: MIT OR Apache-2.0
//! Default seed derivation for the `random` assignment strategy.

use casecraft_contract::fingerprint::sha256_hex;

/// Derive a deterministic default seed from the endpoint count and the
/// spec's aggregate fingerprint, so repeated runs against an unchanged
/// spec reproduce the same random assignment without the operator having
/// to pick a seed by hand.
#[must_use]
pub fn default_seed(endpoint_count: usize, spec_fingerprint: &str) -> u64 {
    let digest = sha256_hex(format!("{endpoint_count}:{spec_fingerprint}").as_bytes());
    let prefix = &digest[..16];
    u64::from_str_radix(prefix, 16).unwrap_or(endpoint_count as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_inputs_produce_same_seed() {
        assert_eq!(default_seed(5, "abc"), default_seed(5, "abc"));
    }

    #[test]
    fn different_fingerprints_produce_different_seeds() {
        assert_ne!(default_seed(5, "abc"), default_seed(5, "xyz"));
    }

    #[test]
    fn different_counts_produce_different_seeds() {
        assert_ne!(default_seed(5, "abc"), default_seed(6, "abc"));
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! The fixed authentication-placeholder lexicon.
//!
//! Generated test cases never contain real credentials; the model is
//! instructed to use one of these tokens wherever a case needs to exercise
//! an authenticated, unauthenticated, or deliberately-invalid request.

/// Placeholder for a valid bearer token on the happy path.
pub const AUTH_TOKEN: &str = "${AUTH_TOKEN}";
/// Placeholder for a valid token scoped to a regular user.
pub const USER_TOKEN: &str = "${USER_TOKEN}";
/// Placeholder for a valid token scoped to an administrator.
pub const ADMIN_TOKEN: &str = "${ADMIN_TOKEN}";
/// Placeholder for a valid API key.
pub const API_KEY: &str = "${API_KEY}";
/// Placeholder for valid HTTP Basic credentials.
pub const BASIC_CREDENTIALS: &str = "${BASIC_CREDENTIALS}";
/// Placeholder for a syntactically plausible but invalid/expired token.
pub const INVALID_TOKEN: &str = "${INVALID_TOKEN}";
/// Placeholder for a syntactically plausible but invalid API key.
pub const INVALID_API_KEY: &str = "${INVALID_API_KEY}";

/// The full lexicon, in the fixed order the system preamble presents it.
pub const ALL: [&str; 7] = [
    AUTH_TOKEN,
    USER_TOKEN,
    ADMIN_TOKEN,
    API_KEY,
    BASIC_CREDENTIALS,
    INVALID_TOKEN,
    INVALID_API_KEY,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicon_has_seven_entries_in_fixed_order() {
        assert_eq!(ALL.len(), 7);
        assert_eq!(ALL[0], "${AUTH_TOKEN}");
        assert_eq!(ALL[6], "${INVALID_API_KEY}");
    }
}

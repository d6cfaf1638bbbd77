// SPDX-License-Identifier: MIT OR Apache-2.0
//! Parse a provider's raw JSON response into a list of [`TestCase`]s.

use casecraft_contract::test_case::TestCase;
use casecraft_error::CaseCraftError;

/// Parse `raw` as a JSON array of [`TestCase`] objects.
///
/// # Errors
/// Returns [`CaseCraftError::InvalidOutput`] with a field-path hint
/// (`serde_path_to_error`) if `raw` is not valid JSON or does not match the
/// expected shape.
pub fn parse_test_cases(provider: &str, raw: &str) -> Result<Vec<TestCase>, CaseCraftError> {
    let de = &mut serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize(de).map_err(|e| CaseCraftError::InvalidOutput {
        provider: provider.to_string(),
        reason: format!("at `{}`: {}", e.path(), e.inner()),
    })
}

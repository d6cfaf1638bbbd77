// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fallback token-count estimation for providers that omit usage in their
//! response envelope.

/// Language family used to pick the estimation multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// Whitespace-delimited English text, ~1.3 tokens per word.
    English,
    /// Any other language, ~1.5 tokens per word (documented as approximate).
    Other,
}

impl Language {
    fn factor(self) -> f64 {
        match self {
            Self::English => 1.3,
            Self::Other => 1.5,
        }
    }
}

/// Estimate the token count of `text` by splitting on whitespace and
/// multiplying by a language-specific factor. This is only a fallback for
/// providers that do not report real usage counts.
#[must_use]
pub fn estimate_tokens(text: &str, language: Language) -> u64 {
    let words = text.split_whitespace().count() as f64;
    (words * language.factor()).round() as u64
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Test-count budgeting types shared between the complexity scorer,
//! prompt builder, and validator.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Integer summary of an endpoint's surface area, produced by the
/// complexity scorer.
pub type ComplexityScore = i32;

/// Kind of generated test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TestType {
    /// Exercises the happy path.
    Positive,
    /// Exercises an expected failure mode.
    Negative,
    /// Exercises a limit or edge value.
    Boundary,
}

impl TestType {
    /// All test types, in the order the prompt asks the model to emit them.
    pub const ALL: [TestType; 3] = [TestType::Positive, TestType::Negative, TestType::Boundary];

    /// Wire string, e.g. `"positive"`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Boundary => "boundary",
        }
    }
}

/// Importance tier assigned to a generated test case by priority slicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Priority {
    /// Top 30% by importance order.
    P0,
    /// Next 40%.
    P1,
    /// Remaining cases.
    P2,
}

impl Priority {
    /// Wire string, e.g. `"P0"`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::P0 => "P0",
            Self::P1 => "P1",
            Self::P2 => "P2",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Required test-case counts for one endpoint, derived from its
/// [`ComplexityScore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Budget {
    /// Required positive-case count.
    pub positive: u32,
    /// Required negative-case count.
    pub negative: u32,
    /// Required boundary-case count.
    pub boundary: u32,
}

impl Budget {
    /// Total required case count across all types.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.positive + self.negative + self.boundary
    }

    /// The required count for a given [`TestType`].
    #[must_use]
    pub fn count_for(&self, test_type: TestType) -> u32 {
        match test_type {
            TestType::Positive => self.positive,
            TestType::Negative => self.negative,
            TestType::Boundary => self.boundary,
        }
    }

    /// `true` if `actual` is within ±1 of the required count for `test_type`.
    #[must_use]
    pub fn within_tolerance(&self, test_type: TestType, actual: u32) -> bool {
        let required = self.count_for(test_type) as i64;
        (required - actual as i64).abs() <= 1
    }
}

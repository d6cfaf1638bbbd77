// SPDX-License-Identifier: MIT OR Apache-2.0
//! Recursive schema representation shared by parameters, request bodies,
//! and response bodies.
//!
//! Schemas are a DAG in the source document (via `$ref`). During loading,
//! local refs are inlined; a ref that would re-enter its own ancestor chain
//! is instead represented as [`SchemaNode::Ref`] keyed by the cycle's entry
//! node, so two structurally identical cyclic schemas fingerprint equal
//! without requiring unbounded recursion.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A normalized JSON Schema node.
///
/// Object property maps are `BTreeMap`-backed so they serialize in sorted
/// key order, which is what makes fingerprinting stable under cosmetic
/// reordering. Arrays preserve declaration order, since item order is
/// semantically meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaNode {
    /// `"string"`.
    String,
    /// `"number"`.
    Number,
    /// `"integer"`.
    Integer,
    /// `"boolean"`.
    Boolean,
    /// `"null"`.
    Null,
    /// Unconstrained / `{}` schema.
    Any,
    /// `"array"` with a declared item schema.
    Array {
        /// Schema of each array element.
        items: Box<SchemaNode>,
    },
    /// `"object"` with declared properties and required-field names.
    Object {
        /// Property schemas, sorted by key.
        properties: BTreeMap<String, SchemaNode>,
        /// Names of required properties, sorted.
        required: Vec<String>,
    },
    /// A reference to a named schema, used verbatim when a `$ref` cycle is
    /// detected during loading (see module docs).
    Ref {
        /// Normalized identifier of the referenced schema.
        id: String,
    },
}

impl SchemaNode {
    /// Convenience constructor for an object schema with sorted required
    /// names.
    #[must_use]
    pub fn object(properties: BTreeMap<String, SchemaNode>, mut required: Vec<String>) -> Self {
        required.sort();
        required.dedup();
        Self::Object {
            properties,
            required,
        }
    }

    /// Structural nesting depth: `0` for scalars, `1 + max(child depth)` for
    /// arrays and objects. Used by the complexity scorer's body-depth term.
    #[must_use]
    pub fn structural_depth(&self) -> u32 {
        match self {
            Self::String
            | Self::Number
            | Self::Integer
            | Self::Boolean
            | Self::Null
            | Self::Any
            | Self::Ref { .. } => 0,
            Self::Array { items } => 1 + items.structural_depth(),
            Self::Object { properties, .. } => {
                1 + properties
                    .values()
                    .map(SchemaNode::structural_depth)
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    /// Count of `array of object` levels anywhere in the schema tree — the
    /// complexity scorer weights these more heavily than plain nesting.
    #[must_use]
    pub fn array_of_object_count(&self) -> u32 {
        match self {
            Self::Array { items } => {
                let here = u32::from(matches!(**items, Self::Object { .. }));
                here + items.array_of_object_count()
            }
            Self::Object { properties, .. } => properties
                .values()
                .map(SchemaNode::array_of_object_count)
                .sum(),
            _ => 0,
        }
    }

    /// Number of required object fields, summed across the whole tree.
    #[must_use]
    pub fn required_field_count(&self) -> u32 {
        match self {
            Self::Object {
                properties,
                required,
            } => {
                required.len() as u32
                    + properties
                        .values()
                        .map(SchemaNode::required_field_count)
                        .sum::<u32>()
            }
            Self::Array { items } => items.required_field_count(),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_object(required: &[&str]) -> SchemaNode {
        let mut props = BTreeMap::new();
        for name in ["a", "b", "c", "d"] {
            props.insert(name.to_string(), SchemaNode::String);
        }
        SchemaNode::object(
            props,
            required.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn scalar_depth_is_zero() {
        assert_eq!(SchemaNode::String.structural_depth(), 0);
        assert_eq!(SchemaNode::Integer.structural_depth(), 0);
    }

    #[test]
    fn nested_object_depth() {
        let inner = leaf_object(&["a"]);
        let mut props = BTreeMap::new();
        props.insert("child".to_string(), inner);
        let outer = SchemaNode::object(props, vec![]);
        assert_eq!(outer.structural_depth(), 2);
    }

    #[test]
    fn array_of_objects_detected() {
        let item = leaf_object(&["a", "b"]);
        let arr = SchemaNode::Array {
            items: Box::new(item),
        };
        assert_eq!(arr.array_of_object_count(), 1);
    }

    #[test]
    fn array_of_scalars_not_counted() {
        let arr = SchemaNode::Array {
            items: Box::new(SchemaNode::String),
        };
        assert_eq!(arr.array_of_object_count(), 0);
    }

    #[test]
    fn required_field_count_sums_nested() {
        let inner = leaf_object(&["a", "b"]);
        let mut props = BTreeMap::new();
        props.insert("child".to_string(), inner);
        let outer = SchemaNode::object(props, vec!["child".into()]);
        assert_eq!(outer.required_field_count(), 3);
    }

    #[test]
    fn object_constructor_sorts_and_dedups_required() {
        let mut props = BTreeMap::new();
        props.insert("x".to_string(), SchemaNode::String);
        let node = SchemaNode::object(props, vec!["x".into(), "x".into()]);
        match node {
            SchemaNode::Object { required, .. } => assert_eq!(required, vec!["x".to_string()]),
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn serde_roundtrip_preserves_structure() {
        let node = leaf_object(&["a"]);
        let json = serde_json::to_string(&node).unwrap();
        let back: SchemaNode = serde_json::from_str(&json).unwrap();
        assert_eq!(node, back);
    }
}

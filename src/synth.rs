//! Best-effort example synthesis from a typed schema.
//!
//! Dispatch by node kind; at every scalar node the precedence is
//! literal `example` > `enum` member > format generator > name-inferred
//! generator > generic fallback.
//!
//! Design goals:
//! - Constraint satisfaction, not determinism: generators draw from `rand`
//!   and the clock, but lengths/ranges always respect the node's bounds.
//! - No panics, no `Err`: a node the synthesizer cannot interpret yields
//!   `None` and its key is simply absent from the parent object.
//! - Unresolved leftovers (`$ref`, composites, objects without a usable
//!   `properties` map) degrade to a fixed placeholder object instead of
//!   aborting the whole example tree.

pub mod num;
pub mod text;

use indexmap::IndexMap;
use rand::{Rng, RngCore};
use serde_json::Value;

use crate::schema::SchemaNode;

// ------------------------------- Policy ---------------------------------- //

pub(crate) const DEFAULT_MIN_LENGTH: usize = 5;
pub(crate) const DEFAULT_MAX_LENGTH: usize = 25;
const DEFAULT_MIN_ITEMS: u64 = 1;
const DEFAULT_MAX_ITEMS: u64 = 3;

// ----------------------------- Entry points ------------------------------ //

/// Synthesize one example value for a resolved schema node.
pub fn synthesize(node: &SchemaNode) -> Option<Value> {
    synthesize_named(node, None)
}

/// Like [`synthesize`], with the originating property name available for
/// name-inferred generation (a property literally named `email` produces an
/// email-like value even without a `format` keyword).
pub fn synthesize_named(node: &SchemaNode, name: Option<&str>) -> Option<Value> {
    let mut rng = rand::thread_rng();
    synthesize_with(&mut rng, node, name)
}

/// Core dispatch with an explicit random source (tests use a seeded rng).
pub fn synthesize_with(rng: &mut dyn RngCore, node: &SchemaNode, name: Option<&str>) -> Option<Value> {
    match node {
        SchemaNode::String(spec) => text::string_example(rng, spec, name),
        SchemaNode::Integer(spec) => num::integer_example(rng, spec),
        // `number` delegates to the integer path wholesale; fractional output
        // only appears behind the float/double formats. Kept as-is.
        SchemaNode::Number(spec) => num::integer_example(rng, spec),
        SchemaNode::Boolean => Some(Value::Bool(rng.gen_bool(0.5))),
        SchemaNode::Array { item, min_items, max_items } => {
            Some(array_example(rng, item, *min_items, *max_items))
        }
        SchemaNode::Object { properties, .. } => Some(object_example(rng, properties.as_ref())),
        // no interpretable kind: the gap is visible as an absent value
        SchemaNode::Null => None,
        // unresolved leftovers never abort the tree
        SchemaNode::Ref { .. } | SchemaNode::Composite { .. } => Some(placeholder_object()),
    }
}

// ------------------------------ Containers -------------------------------- //

fn array_example(
    rng: &mut dyn RngCore,
    item: &SchemaNode,
    min_items: Option<u64>,
    max_items: Option<u64>,
) -> Value {
    let min = min_items.unwrap_or(DEFAULT_MIN_ITEMS);
    let mut max = max_items.unwrap_or(DEFAULT_MAX_ITEMS);
    if max <= min {
        max = min + 1; // keep the draw range non-degenerate
    }
    let count = rng.gen_range(min..=max);
    let items = (0..count)
        .filter_map(|_| synthesize_with(rng, item, None))
        .collect();
    Value::Array(items)
}

fn object_example(rng: &mut dyn RngCore, properties: Option<&IndexMap<String, SchemaNode>>) -> Value {
    let Some(props) = properties else {
        return placeholder_object();
    };
    let mut out = serde_json::Map::new();
    for (key, child) in props {
        // a gap leaves the key out; callers tolerate absent keys
        if let Some(value) = synthesize_with(rng, child, Some(key)) {
            out.insert(key.clone(), value);
        }
    }
    Value::Object(out)
}

pub(crate) fn placeholder_object() -> Value {
    serde_json::json!({
        "additionalProp1": "string",
        "additionalProp2": "string",
        "additionalProp3": "string"
    })
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaNode;
    use serde_json::json;

    fn node(doc: serde_json::Value) -> SchemaNode {
        SchemaNode::from_value(&doc)
    }

    #[test]
    fn enum_wins_over_format() {
        let n = node(json!({"type": "string", "enum": ["A", "B"], "format": "email"}));
        for _ in 0..32 {
            let v = synthesize(&n).unwrap();
            assert!(v == json!("A") || v == json!("B"), "got {v}");
        }
    }

    #[test]
    fn literal_example_wins_over_enum() {
        let n = node(json!({"type": "string", "example": "pinned", "enum": ["A", "B"]}));
        assert_eq!(synthesize(&n), Some(json!("pinned")));
    }

    #[test]
    fn array_bounds_bump_degenerate_max() {
        let n = node(json!({
            "type": "array",
            "items": {"type": "integer"},
            "minItems": 5,
            "maxItems": 2
        }));
        for _ in 0..32 {
            let v = synthesize(&n).unwrap();
            let len = v.as_array().unwrap().len();
            assert!((5..=6).contains(&len), "length {len} outside [5, 6]");
        }
    }

    #[test]
    fn array_defaults_draw_one_to_three_items() {
        let n = node(json!({"type": "array", "items": {"type": "boolean"}}));
        for _ in 0..32 {
            let len = synthesize(&n).unwrap().as_array().unwrap().len();
            assert!((1..=3).contains(&len));
        }
    }

    #[test]
    fn object_omits_keys_the_synthesizer_cannot_fill() {
        let n = node(json!({
            "type": "object",
            "properties": {
                "known": {"type": "boolean"},
                "mystery": {"type": "tuple"}
            }
        }));
        let v = synthesize(&n).unwrap();
        let map = v.as_object().unwrap();
        assert!(map.contains_key("known"));
        assert!(!map.contains_key("mystery"), "uninterpretable property must be absent");
    }

    #[test]
    fn object_without_properties_yields_placeholder() {
        let n = node(json!({"type": "object"}));
        assert_eq!(synthesize(&n), Some(placeholder_object()));
    }

    #[test]
    fn unresolved_ref_yields_placeholder_not_failure() {
        let n = node(json!({
            "type": "object",
            "properties": { "dangling": {"$ref": "#/$defs/Missing"} }
        }));
        let v = synthesize(&n).unwrap();
        assert_eq!(v["dangling"], placeholder_object());
    }

    #[test]
    fn nested_objects_recurse_with_property_names() {
        let n = node(json!({
            "type": "object",
            "properties": {
                "contact": {
                    "type": "object",
                    "properties": { "email": {"type": "string"} }
                }
            }
        }));
        let v = synthesize(&n).unwrap();
        let email = v["contact"]["email"].as_str().unwrap();
        assert!(email.contains('@'), "name inference should fire: {email}");
    }
}

//! Typed schema model for synthesis.
//!
//! `SchemaNode` is the unit the synthesizer dispatches on. It is parsed
//! *leniently* from a resolved JSON-Schema-ish document: parsing never fails,
//! uninterpretable nodes degrade to `Ref`/`Composite`/`Null` and downstream
//! consumers tolerate them (best-effort contract).
//!
//! Property order is preserved end to end: documents are read with
//! `preserve_order` and object properties land in an `IndexMap`.

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

/// One node of a (resolved) schema tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    String(StrS),
    Integer(NumS),
    /// Same constraint carrier as `Integer`; synthesis delegates to the
    /// integer path wholesale (documented simplification).
    Number(NumS),
    Boolean,
    Array {
        item: Box<SchemaNode>,
        min_items: Option<u64>,
        max_items: Option<u64>,
    },
    Object {
        /// `None` when the document had no usable `properties` map at all
        /// (distinct from an explicitly empty one). Synthesis falls back to
        /// a placeholder object in that case.
        properties: Option<IndexMap<String, SchemaNode>>,
        required: IndexSet<String>,
    },
    /// `type: null`, or a node with no recognizable `type` at all.
    Null,
    /// Unresolved `$ref` that survived resolution (dangling pointer).
    Ref { pointer: String },
    /// `allOf`/`anyOf`/`oneOf` kept opaque; the synthesizer treats these as
    /// unresolved containers.
    Composite { arms: Vec<SchemaNode> },
}

/// String constraints.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StrS {
    pub enum_: Vec<Value>,
    pub format: Option<String>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub example: Option<Value>,
}

/// Integer/number constraints.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumS {
    pub enum_: Vec<Value>,
    pub format: Option<String>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub multiple_of: Option<f64>,
    pub example: Option<Value>,
}

impl SchemaNode {
    /// Parse a resolved document fragment. Never fails; see module docs.
    pub fn from_value(v: &Value) -> SchemaNode {
        let Some(map) = v.as_object() else {
            return SchemaNode::Null;
        };

        if let Some(Value::String(pointer)) = map.get("$ref") {
            return SchemaNode::Ref { pointer: pointer.clone() };
        }

        for key in ["allOf", "anyOf", "oneOf"] {
            if let Some(Value::Array(arms)) = map.get(key) {
                return SchemaNode::Composite {
                    arms: arms.iter().map(Self::from_value).collect(),
                };
            }
        }

        match map.get("type").and_then(Value::as_str) {
            Some("string") => SchemaNode::String(StrS {
                enum_: enum_of(map),
                format: str_of(map, "format"),
                min_length: usize_of(map, "minLength"),
                max_length: usize_of(map, "maxLength"),
                example: map.get("example").cloned(),
            }),
            Some("integer") => SchemaNode::Integer(num_spec(map)),
            Some("number") => SchemaNode::Number(num_spec(map)),
            Some("boolean") => SchemaNode::Boolean,
            Some("array") => SchemaNode::Array {
                item: Box::new(
                    map.get("items").map(Self::from_value).unwrap_or(SchemaNode::Null),
                ),
                min_items: u64_of(map, "minItems"),
                max_items: u64_of(map, "maxItems"),
            },
            Some("object") => SchemaNode::Object {
                properties: map.get("properties").and_then(Value::as_object).map(|props| {
                    props
                        .iter()
                        .map(|(name, child)| (name.clone(), Self::from_value(child)))
                        .collect()
                }),
                required: map
                    .get("required")
                    .and_then(Value::as_array)
                    .map(|names| {
                        names
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::to_owned)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            // "null", unknown type names, and no type at all collapse to Null;
            // the synthesizer treats that as a gap, not an error.
            _ => SchemaNode::Null,
        }
    }
}

fn num_spec(map: &serde_json::Map<String, Value>) -> NumS {
    NumS {
        enum_: enum_of(map),
        format: str_of(map, "format"),
        minimum: f64_of(map, "minimum"),
        maximum: f64_of(map, "maximum"),
        multiple_of: f64_of(map, "multipleOf"),
        example: map.get("example").cloned(),
    }
}

fn enum_of(map: &serde_json::Map<String, Value>) -> Vec<Value> {
    map.get("enum")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

fn str_of(map: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn u64_of(map: &serde_json::Map<String, Value>, key: &str) -> Option<u64> {
    map.get(key).and_then(Value::as_u64)
}

fn usize_of(map: &serde_json::Map<String, Value>, key: &str) -> Option<usize> {
    map.get(key).and_then(Value::as_u64).map(|n| n as usize)
}

fn f64_of(map: &serde_json::Map<String, Value>, key: &str) -> Option<f64> {
    map.get(key).and_then(Value::as_f64)
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_properties_keep_document_order() {
        let doc = json!({
            "type": "object",
            "properties": {
                "zeta": {"type": "string"},
                "alpha": {"type": "integer"},
                "mid": {"type": "boolean"}
            },
            "required": ["zeta"]
        });
        let SchemaNode::Object { properties, required } = SchemaNode::from_value(&doc) else {
            panic!("expected object node");
        };
        let names: Vec<&str> = properties.as_ref().unwrap().keys().map(String::as_str).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
        assert!(required.contains("zeta"));
        assert!(!required.contains("alpha"));
    }

    #[test]
    fn object_without_properties_map_is_marked_unusable() {
        let doc = json!({"type": "object"});
        let SchemaNode::Object { properties, .. } = SchemaNode::from_value(&doc) else {
            panic!("expected object node");
        };
        assert!(properties.is_none());

        // explicitly empty is a different thing
        let doc = json!({"type": "object", "properties": {}});
        let SchemaNode::Object { properties, .. } = SchemaNode::from_value(&doc) else {
            panic!("expected object node");
        };
        assert_eq!(properties.unwrap().len(), 0);
    }

    #[test]
    fn dangling_ref_survives_as_ref_node() {
        let doc = json!({"$ref": "#/$defs/Missing"});
        assert_eq!(
            SchemaNode::from_value(&doc),
            SchemaNode::Ref { pointer: "#/$defs/Missing".into() }
        );
    }

    #[test]
    fn composites_stay_opaque() {
        let doc = json!({"anyOf": [{"type": "string"}, {"type": "integer"}]});
        let SchemaNode::Composite { arms } = SchemaNode::from_value(&doc) else {
            panic!("expected composite node");
        };
        assert_eq!(arms.len(), 2);
    }

    #[test]
    fn scalar_constraints_are_captured() {
        let doc = json!({
            "type": "integer",
            "format": "int32",
            "minimum": 10,
            "maximum": 90,
            "multipleOf": 5
        });
        let SchemaNode::Integer(spec) = SchemaNode::from_value(&doc) else {
            panic!("expected integer node");
        };
        assert_eq!(spec.format.as_deref(), Some("int32"));
        assert_eq!(spec.minimum, Some(10.0));
        assert_eq!(spec.maximum, Some(90.0));
        assert_eq!(spec.multiple_of, Some(5.0));
    }

    #[test]
    fn unknown_type_collapses_to_null() {
        assert_eq!(SchemaNode::from_value(&json!({"type": "tuple"})), SchemaNode::Null);
        assert_eq!(SchemaNode::from_value(&json!({"description": "no type"})), SchemaNode::Null);
        assert_eq!(SchemaNode::from_value(&json!(17)), SchemaNode::Null);
    }
}

//! Tagged storage codec for JSON-bearing columns.
//!
//! A field's shape is fixed at configuration time, not self-describing:
//! - [`SingleField`]: the cell holds one JSON object of one type;
//! - [`ListField`]: the cell holds a homogeneous JSON array;
//! - [`UnionField`]: the cell holds `{"type": tag, "data": payload}` and the
//!   tag picks the decode target out of a closed variant set.
//!
//! Round-trip law: `decode(encode(v)) == v` for every well-formed `v` of the
//! configured shape. Encode rejects a value whose tag is not configured;
//! decode rejects an unknown stored tag. Both reject loudly, never coerce.
//!
//! The codec borrows values per call and retains nothing across calls; the
//! surrounding persistence/presentation layers own the cells.

use std::marker::PhantomData;

use indexmap::IndexSet;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{CodecError, ConfigError};
use crate::path_de;

/// Discriminator key in the stored union representation.
pub const TYPE_KEY: &str = "type";
/// Payload key in the stored union representation.
pub const DATA_KEY: &str = "data";

/// A closed union whose concrete variant is identified by a tag string.
///
/// Implementations match exhaustively over their variants, so adding a
/// variant without wiring its tag is a compile error, not a runtime surprise:
///
/// ```
/// use json_exemplar::codec::Tagged;
/// use json_exemplar::error::CodecError;
/// use json_exemplar::path_de;
/// use serde::{Deserialize, Serialize};
/// use serde_json::Value;
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct Note { body: String }
///
/// #[derive(Debug, PartialEq)]
/// enum Payload { Note(Note) }
///
/// impl Tagged for Payload {
///     const TAGS: &'static [&'static str] = &["note"];
///     fn tag(&self) -> &'static str {
///         match self { Payload::Note(_) => "note" }
///     }
///     fn dump(&self) -> Result<Value, CodecError> {
///         match self { Payload::Note(x) => Ok(serde_json::to_value(x)?) }
///     }
///     fn from_tagged(tag: &str, data: Value) -> Result<Self, CodecError> {
///         match tag {
///             "note" => Ok(Payload::Note(path_de::from_value_with_path(data)?)),
///             other => Err(CodecError::UnknownTag { tag: other.to_string() }),
///         }
///     }
/// }
/// ```
pub trait Tagged: Sized {
    /// Every tag this union can carry, in declaration order.
    const TAGS: &'static [&'static str];

    /// The tag of this value's concrete variant.
    fn tag(&self) -> &'static str;

    /// Canonical JSON dump of the variant payload (not the wrapper).
    fn dump(&self) -> Result<Value, CodecError>;

    /// Reconstruct the variant named by `tag` from its dumped payload.
    fn from_tagged(tag: &str, data: Value) -> Result<Self, CodecError>;
}

// ------------------------------ Single type ------------------------------- //

/// Field configured with exactly one target type.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleField<T> {
    _shape: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> SingleField<T> {
    pub fn new() -> Self {
        Self { _shape: PhantomData }
    }

    /// Canonical JSON dump, as the text stored in the cell.
    pub fn encode(&self, value: &T) -> Result<String, CodecError> {
        Ok(serde_json::to_string(value)?)
    }

    pub fn encode_value(&self, value: &T) -> Result<Value, CodecError> {
        Ok(serde_json::to_value(value)?)
    }

    /// Parse raw cell text and reconstruct the target type.
    pub fn decode(&self, raw: &str) -> Result<T, CodecError> {
        path_de::from_str_with_path(raw)
    }

    pub fn decode_value(&self, value: Value) -> Result<T, CodecError> {
        path_de::from_value_with_path(value)
    }
}

// ---------------------------- Homogeneous list ---------------------------- //

/// Field configured with one element type; the cell holds a JSON array.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListField<T> {
    _shape: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> ListField<T> {
    pub fn new() -> Self {
        Self { _shape: PhantomData }
    }

    pub fn encode(&self, values: &[T]) -> Result<String, CodecError> {
        Ok(serde_json::to_string(&self.encode_value(values)?)?)
    }

    pub fn encode_value(&self, values: &[T]) -> Result<Value, CodecError> {
        let items = values
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::Array(items))
    }

    pub fn decode(&self, raw: &str) -> Result<Vec<T>, CodecError> {
        self.decode_value(path_de::from_str_with_path(raw)?)
    }

    pub fn decode_value(&self, value: Value) -> Result<Vec<T>, CodecError> {
        let Value::Array(items) = value else {
            return Err(CodecError::WrongShape { expected: "a JSON array" });
        };
        items.into_iter().map(path_de::from_value_with_path).collect()
    }
}

// --------------------------- Discriminated union -------------------------- //

/// Field configured with a tag → variant mapping over a closed union `U`.
///
/// The configured tag set is validated eagerly at construction; unknown or
/// duplicate tags are a [`ConfigError`] at setup, never a surprise at the
/// first encode.
#[derive(Debug, Clone)]
pub struct UnionField<U: Tagged> {
    tags: IndexSet<&'static str>,
    _shape: PhantomData<U>,
}

impl<U: Tagged> UnionField<U> {
    /// Accept every variant of `U`.
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_tags(U::TAGS)
    }

    /// Restrict the field to a subset of `U`'s variants.
    pub fn with_tags(tags: &[&str]) -> Result<Self, ConfigError> {
        if tags.is_empty() {
            return Err(ConfigError::EmptyVariantSet);
        }
        let mut configured = IndexSet::new();
        for tag in tags {
            let known = U::TAGS
                .iter()
                .copied()
                .find(|known| known == tag)
                .ok_or_else(|| ConfigError::UnknownVariant(tag.to_string()))?;
            if !configured.insert(known) {
                return Err(ConfigError::DuplicateTag(tag.to_string()));
            }
        }
        Ok(Self { tags: configured, _shape: PhantomData })
    }

    pub fn configured_tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tags.iter().copied()
    }

    pub fn encode(&self, value: &U) -> Result<String, CodecError> {
        Ok(serde_json::to_string(&self.encode_value(value)?)?)
    }

    /// `{"type": tag, "data": payload}`, rejecting unconfigured tags.
    pub fn encode_value(&self, value: &U) -> Result<Value, CodecError> {
        let tag = value.tag();
        if !self.tags.contains(tag) {
            return Err(CodecError::ShapeMismatch { tag: tag.to_string() });
        }
        let data = value.dump()?;
        let mut cell = serde_json::Map::new();
        cell.insert(TYPE_KEY.to_string(), Value::from(tag));
        cell.insert(DATA_KEY.to_string(), data);
        Ok(Value::Object(cell))
    }

    pub fn decode(&self, raw: &str) -> Result<U, CodecError> {
        self.decode_value(path_de::from_str_with_path(raw)?)
    }

    pub fn decode_value(&self, value: Value) -> Result<U, CodecError> {
        let Value::Object(mut cell) = value else {
            return Err(CodecError::WrongShape { expected: "a JSON object" });
        };
        let tag = cell
            .get(TYPE_KEY)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or(CodecError::WrongShape { expected: "an object with a string `type`" })?;
        if !self.tags.contains(tag.as_str()) {
            log::debug!("rejecting stored cell with unknown tag `{tag}`");
            return Err(CodecError::UnknownTag { tag });
        }
        let data = cell.remove(DATA_KEY).unwrap_or(Value::Null);
        U::from_tagged(&tag, data)
    }
}

// ------------------------------- Tests ------------------------------------ //

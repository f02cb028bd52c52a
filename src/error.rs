//! Error taxonomy for the codec layer.
//!
//! Resolution misses and synthesis gaps are *not* errors: they are absorbed
//! in-band (the `$ref` node stays in place; the synthesized value is `None`).
//! Only codec shape mismatches and field misconfiguration surface as `Err`,
//! and those propagate to the immediate caller unchanged. Nothing here is
//! ever retried.

use thiserror::Error;

/// Fatal shape mismatch between a value (or stored cell) and the field's
/// configured shape. Surfaced at encode/decode time.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Encode-side: the value's tag is not one this field was configured for.
    #[error("value tagged `{tag}` does not match this field's configured variants")]
    ShapeMismatch { tag: String },

    /// Decode-side: the stored `type` discriminator names no configured variant.
    #[error("stored `type` tag `{tag}` is not a configured variant")]
    UnknownTag { tag: String },

    /// Decode-side: the stored cell is not the JSON shape this field expects.
    #[error("stored cell has the wrong shape: expected {expected}")]
    WrongShape { expected: &'static str },

    /// Decode-side: the payload did not satisfy the target type; carries the
    /// JSON path of the first failure.
    #[error("malformed payload at {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Encode-side: the value could not be dumped to JSON.
    #[error(transparent)]
    Dump(#[from] serde_json::Error),
}

/// Raised by field constructors at setup time, never at call time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("a codec field needs at least one variant tag")]
    EmptyVariantSet,

    #[error("variant tag `{0}` configured twice")]
    DuplicateTag(String),

    #[error("tag `{0}` is not a variant of the configured union")]
    UnknownVariant(String),
}

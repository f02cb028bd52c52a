use serde::de::DeserializeOwned;

use crate::error::CodecError;

/// Deserialize raw JSON text with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, CodecError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let path = err.path().to_string();
        CodecError::Malformed { path, source: err.into_inner() }
    })
}

/// Same, from an already-parsed value (list elements, union payloads).
pub fn from_value_with_path<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, CodecError> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(|err| {
        let path = err.path().to_string();
        CodecError::Malformed { path, source: err.into_inner() }
    })
}

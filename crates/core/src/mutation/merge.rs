//! One-level merge of a request body over a stored entity.
//!
//! Keys present in the patch replace the stored value outright; nested
//! objects and arrays are not merged. A `content` array is therefore always
//! replaced as a whole.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("request body must be a JSON object")]
    NotAnObject,
    #[error("merged entity is invalid: {0}")]
    Invalid(#[source] serde_json::Error),
}

/// Merge `patch` over `current`, skipping any key in `protected`, and decode
/// the result back into `T`.
pub fn merge_shallow<T>(current: &T, patch: Value, protected: &[&str]) -> Result<T, MergeError>
where
    T: Serialize + DeserializeOwned,
{
    let Value::Object(patch) = patch else {
        return Err(MergeError::NotAnObject);
    };

    let mut merged = match serde_json::to_value(current).map_err(MergeError::Invalid)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    for (key, value) in patch {
        if protected.contains(&key.as_str()) {
            tracing::debug!(%key, "ignoring protected key in patch");
            continue;
        }
        merged.insert(key, value);
    }

    serde_json::from_value(Value::Object(merged)).map_err(MergeError::Invalid)
}

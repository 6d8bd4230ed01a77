//! Structural form of a result.
//!
//! A success is `{"type": "ok", "value": ..}` and a failure is
//! `{"type": "error", "error": ..}`. Tagged values carry their tag in `"_tag"`.
//! The structural guards in [`guards`](crate::guards) check exactly this layout.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// Discriminant field of a result.
pub const DISCRIMINANT: &str = "type";
/// Discriminant literal of a success.
pub const OK: &str = "ok";
/// Discriminant literal of a failure.
pub const ERROR: &str = "error";
/// Payload field of a success.
pub const VALUE_FIELD: &str = "value";
/// Payload field of a failure.
pub const ERROR_FIELD: &str = "error";
/// Discriminant field of a tagged value.
pub const TAG_FIELD: &str = "_tag";

/// Serde representation of `Result<A, E>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Wire<A, E> {
    Ok { value: A },
    Error { error: E },
}

impl<A, E> From<Result<A, E>> for Wire<A, E> {
    fn from(result: Result<A, E>) -> Self {
        match result {
            Ok(value) => Wire::Ok { value },
            Err(error) => Wire::Error { error },
        }
    }
}

impl<A, E> From<Wire<A, E>> for Result<A, E> {
    fn from(wire: Wire<A, E>) -> Self {
        match wire {
            Wire::Ok { value } => Ok(value),
            Wire::Error { error } => Err(error),
        }
    }
}

/// Render a result in its structural form.
pub fn to_value<A: Serialize, E: Serialize>(result: &Result<A, E>) -> serde_json::Result<Value> {
    let wire: Wire<&A, &E> = match result {
        Ok(value) => Wire::Ok { value },
        Err(error) => Wire::Error { error },
    };
    serde_json::to_value(wire)
}

/// Read a result back from its structural form.
pub fn from_value<A: DeserializeOwned, E: DeserializeOwned>(
    value: Value,
) -> serde_json::Result<Result<A, E>> {
    let wire: Wire<A, E> = serde_json::from_value(value)?;
    Ok(wire.into())
}

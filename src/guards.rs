//! Runtime guards and assertions.
//!
//! The predicates never panic, even on arbitrary JSON. Each has an `ensure_*`
//! form returning an [`AssertionError`] and an `assert_*` form raising it as a
//! panic payload, for trust boundaries where a wrong shape means the caller
//! broke its contract.
//!
//! ```rust
//! use fallible::guards::{is_failure, is_result, is_tagged_with};
//! use serde_json::json;
//!
//! assert!(is_result(&json!({"type": "ok", "value": 1})));
//! assert!(!is_result(&json!({"type": "ok"})));
//! assert!(is_failure(&Err::<(), _>("boom")));
//! assert!(is_tagged_with(&json!({"_tag": "NotFound"}), "NotFound"));
//! ```

use std::fmt::Debug;

use serde_json::Value;

use crate::{
    error::AssertionError,
    tagged::{Tagged, has_tag},
    wire,
};

/// Discriminates success from failure.
pub trait Inspect {
    fn is_result(&self) -> bool;
    fn is_success(&self) -> bool;
    fn is_failure(&self) -> bool;
}

impl<A, E> Inspect for Result<A, E> {
    fn is_result(&self) -> bool {
        true
    }

    fn is_success(&self) -> bool {
        self.is_ok()
    }

    fn is_failure(&self) -> bool {
        self.is_err()
    }
}

impl Inspect for Value {
    fn is_result(&self) -> bool {
        self.is_success() || self.is_failure()
    }

    fn is_success(&self) -> bool {
        structural(self, wire::OK, wire::VALUE_FIELD)
    }

    fn is_failure(&self) -> bool {
        structural(self, wire::ERROR, wire::ERROR_FIELD)
    }
}

fn structural(value: &Value, literal: &str, payload: &str) -> bool {
    match value.as_object() {
        Some(object) => {
            object.get(wire::DISCRIMINANT).and_then(Value::as_str) == Some(literal)
                && object.contains_key(payload)
        }
        None => false,
    }
}

pub fn is_result<T: Inspect + ?Sized>(value: &T) -> bool {
    value.is_result()
}

pub fn is_success<T: Inspect + ?Sized>(value: &T) -> bool {
    value.is_success()
}

pub fn is_failure<T: Inspect + ?Sized>(value: &T) -> bool {
    value.is_failure()
}

/// Returns `true` if `value` is an object with a string `_tag` field.
pub fn is_tagged(value: &Value) -> bool {
    tag_of(value).is_some()
}

/// Returns `true` if `value` is an object whose `_tag` equals `tag`.
pub fn is_tagged_with(value: &Value, tag: &str) -> bool {
    tag_of(value) == Some(tag)
}

fn tag_of(value: &Value) -> Option<&str> {
    value.as_object()?.get(wire::TAG_FIELD)?.as_str()
}

pub fn ensure_result<T: Inspect + Debug + ?Sized>(value: &T) -> Result<(), AssertionError> {
    check(value.is_result(), "a result", value)
}

pub fn ensure_success<T: Inspect + Debug + ?Sized>(value: &T) -> Result<(), AssertionError> {
    check(value.is_success(), "a success", value)
}

pub fn ensure_failure<T: Inspect + Debug + ?Sized>(value: &T) -> Result<(), AssertionError> {
    check(value.is_failure(), "a failure", value)
}

pub fn ensure_tagged(value: &Value) -> Result<(), AssertionError> {
    check(is_tagged(value), "a tagged value", value)
}

pub fn ensure_tagged_with(value: &Value, tag: &str) -> Result<(), AssertionError> {
    check(is_tagged_with(value, tag), &format!("a value tagged {tag:?}"), value)
}

/// Typed counterpart of [`ensure_tagged_with`].
pub fn ensure_tag<T: Tagged + Debug + ?Sized>(value: &T, tag: &str) -> Result<(), AssertionError> {
    check(has_tag(value, tag), &format!("a value tagged {tag:?}"), value)
}

fn check<T: Debug + ?Sized>(holds: bool, expected: &str, value: &T) -> Result<(), AssertionError> {
    if holds {
        Ok(())
    } else {
        Err(AssertionError::new(expected, format!("{value:?}")))
    }
}

fn raise(outcome: Result<(), AssertionError>) {
    if let Err(error) = outcome {
        std::panic::panic_any(error);
    }
}

#[track_caller]
pub fn assert_result<T: Inspect + Debug + ?Sized>(value: &T) {
    raise(ensure_result(value))
}

#[track_caller]
pub fn assert_success<T: Inspect + Debug + ?Sized>(value: &T) {
    raise(ensure_success(value))
}

#[track_caller]
pub fn assert_failure<T: Inspect + Debug + ?Sized>(value: &T) {
    raise(ensure_failure(value))
}

#[track_caller]
pub fn assert_tagged(value: &Value) {
    raise(ensure_tagged(value))
}

#[track_caller]
pub fn assert_tagged_with(value: &Value, tag: &str) {
    raise(ensure_tagged_with(value, tag))
}

#[track_caller]
pub fn assert_tag<T: Tagged + Debug + ?Sized>(value: &T, tag: &str) {
    raise(ensure_tag(value, tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagged::TaggedError;
    use serde_json::json;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[test]
    fn test_exactly_one_of_success_or_failure() {
        for result in [Ok::<i32, &str>(1), Err("boom")] {
            assert!(is_result(&result));
            assert_ne!(is_success(&result), is_failure(&result));
        }
    }

    #[test]
    fn test_structural_check_requires_payload_field() {
        assert!(is_success(&json!({"type": "ok", "value": null})));
        assert!(is_failure(&json!({"type": "error", "error": {"_tag": "X"}})));

        assert!(!is_result(&json!({"type": "ok", "error": 1})));
        assert!(!is_result(&json!({"type": "error", "value": 1})));
        assert!(!is_result(&json!({"type": "pending", "value": 1})));
        assert!(!is_result(&json!({"type": 1, "value": 1})));
    }

    #[test]
    fn test_malformed_input_never_panics() {
        for value in [json!(null), json!(3), json!("ok"), json!([1, 2]), json!({})] {
            assert!(!is_result(&value));
            assert!(!is_tagged(&value));
        }
    }

    #[test]
    fn test_tag_checks() {
        let tagged = json!({"_tag": "NotFound", "message": "gone"});
        assert!(is_tagged(&tagged));
        assert!(is_tagged_with(&tagged, "NotFound"));
        assert!(!is_tagged_with(&tagged, "Other"));
        assert!(!is_tagged(&json!({"_tag": 5})));
    }

    #[test]
    fn test_ensure_reports_offending_value() {
        let error = ensure_success(&Err::<i32, &str>("boom")).expect_err("failure is not success");
        assert_eq!(error.expected, "a success");
        assert_eq!(error.value, "Err(\"boom\")");

        assert!(ensure_tag(&TaggedError::new("A", "m"), "A").is_ok());
        assert!(ensure_tag(&TaggedError::new("A", "m"), "B").is_err());
    }

    #[test]
    fn test_assert_raises_assertion_error_payload() {
        let payload = catch_unwind(AssertUnwindSafe(|| assert_result(&json!({"type": "ok"}))))
            .expect_err("malformed value must raise");
        let error = payload
            .downcast_ref::<AssertionError>()
            .expect("payload is an AssertionError");
        assert_eq!(error.expected, "a result");
    }

    #[test]
    fn test_assert_passes_through_valid_values() {
        assert_failure(&Err::<(), _>("boom"));
        assert_tagged_with(&json!({"_tag": "X"}), "X");
    }
}

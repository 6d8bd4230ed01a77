use crate::tagged::Tagged;

/// A runtime shape check failed at a trust boundary.
///
/// Returned by the `ensure_*` guards and raised (as a panic payload) by the
/// `assert_*` guards. `value` is a rendering of the offending value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("assertion failed: expected {expected}, got {value}")]
pub struct AssertionError {
    pub expected: String,
    pub value: String,
}

impl AssertionError {
    pub const TAG: &'static str = "AssertionError";

    pub fn new(expected: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            value: value.into(),
        }
    }
}

impl Tagged for AssertionError {
    fn tag(&self) -> &str {
        Self::TAG
    }
}

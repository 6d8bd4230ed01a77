//! Validator adapter.
//!
//! A validator checks a value and either returns the (possibly refined) value or
//! a list of [`Issue`]s. The [`schema`] combinators run it on a success and turn
//! the issues into a [`SchemaError`]. A validator may itself be pending; the
//! result then becomes pending as well.
//!
//! ```rust
//! use fallible::prelude::*;
//! use fallible::schema::{Issue, SchemaError};
//!
//! let port = |raw: &str| match raw.parse::<u16>() {
//!     Ok(port) => Ok(port),
//!     Err(error) => Err(vec![Issue::new(error.to_string()).at("port")]),
//! };
//!
//! let parsed: Result<u16, SchemaError> = success("8080").schema(port);
//! assert_eq!(parsed.ok(), Some(8080));
//!
//! let rejected: Result<u16, SchemaError> = success("http").schema(port);
//! assert_eq!(rejected.unwrap_err().issues()[0].path, ["port"]);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{outcome::Outcome, tagged::Tagged};

/// One reason a value was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub message: String,
    /// Location of the offending part, outermost first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
}

impl Issue {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Vec::new(),
        }
    }

    /// Append a path segment.
    pub fn at(mut self, segment: impl Into<String>) -> Self {
        self.path.push(segment.into());
        self
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path.join("."), self.message)
        }
    }
}

/// Failure produced when a validator rejects a value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("validation failed with {} issue(s)", .issues.len())]
pub struct SchemaError {
    issues: Vec<Issue>,
}

impl SchemaError {
    pub const TAG: &'static str = "SchemaError";

    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}

impl Tagged for SchemaError {
    fn tag(&self) -> &str {
        Self::TAG
    }
}

/// Anything that checks an `I`, settled or pending.
///
/// Implemented for every `Fn(I) -> R` where `R` fails with `Vec<Issue>`.
pub trait Validator<'a, I> {
    type Output: Outcome<'a, Err = Vec<Issue>>;

    fn validate(&self, input: I) -> Self::Output;
}

impl<'a, I, F, R> Validator<'a, I> for F
where
    F: Fn(I) -> R,
    R: Outcome<'a, Err = Vec<Issue>>,
{
    type Output = R;

    fn validate(&self, input: I) -> R {
        self(input)
    }
}

/// What a validator returns for an `I`.
pub type ValidatorOutput<'a, V, I> = <V as Validator<'a, I>>::Output;

/// A validator's result with the issues replaced by `E`.
pub type Checked<'a, V, I, E> = <ValidatorOutput<'a, V, I> as Outcome<'a>>::Map<
    <ValidatorOutput<'a, V, I> as Outcome<'a>>::Ok,
    E,
>;

/// Output shape of validating the success of `O` with `V`.
pub type Validated<'a, O, V> = <O as Outcome<'a>>::Bind<
    Checked<'a, V, <O as Outcome<'a>>::Ok, <O as Outcome<'a>>::Err>,
>;

fn rejected(issues: Vec<Issue>) -> SchemaError {
    debug!(issues = issues.len(), "value rejected by validator");
    SchemaError::new(issues)
}

/// Run `validator` once on `input`.
pub fn validate<'a, V, I>(validator: &V, input: I) -> Checked<'a, V, I, SchemaError>
where
    V: Validator<'a, I>,
{
    validator
        .validate(input)
        .settle_with(|checked| checked.map_err(rejected))
}

/// Validate a success, failing with the validator's issues as a [`SchemaError`].
///
/// Failures pass through without running the validator.
pub fn schema<'a, O, V>(validator: V) -> impl FnOnce(O) -> Validated<'a, O, V>
where
    O: Outcome<'a>,
    O::Err: From<SchemaError>,
    V: Validator<'a, O::Ok> + 'a,
{
    move |outcome: O| {
        outcome.bind_with(move |result| match result {
            Ok(value) => validator.validate(value).settle_with(|checked| {
                checked.map_err(|issues| <O::Err as From<SchemaError>>::from(rejected(issues)))
            }),
            Err(error) => <Checked<'a, V, O::Ok, O::Err> as Outcome<'a>>::from_result(Err(error)),
        })
    }
}

/// Validate a success, panicking with a [`SchemaError`] payload on rejection.
pub fn schema_or_die<'a, O, V>(validator: V) -> impl FnOnce(O) -> Validated<'a, O, V>
where
    O: Outcome<'a>,
    V: Validator<'a, O::Ok> + 'a,
{
    move |outcome: O| {
        outcome.bind_with(move |result| match result {
            Ok(value) => validator.validate(value).settle_with(
                |checked| -> Result<_, O::Err> {
                    match checked {
                        Ok(value) => Ok(value),
                        Err(issues) => std::panic::panic_any(rejected(issues)),
                    }
                },
            ),
            Err(error) => <Checked<'a, V, O::Ok, O::Err> as Outcome<'a>>::from_result(Err(error)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OutcomeExt, Pending, failure, success};
    use futures::executor::block_on;
    use serde_json::json;
    use std::{
        cell::Cell,
        panic::{AssertUnwindSafe, catch_unwind},
    };

    fn non_negative(n: i32) -> Result<u32, Vec<Issue>> {
        u32::try_from(n).map_err(|_| vec![Issue::new("must be non-negative")])
    }

    #[derive(Debug, PartialEq)]
    enum AppError {
        Invalid(Vec<Issue>),
        Missing,
    }

    impl From<SchemaError> for AppError {
        fn from(error: SchemaError) -> Self {
            AppError::Invalid(error.into_issues())
        }
    }

    struct Range {
        min: i32,
        max: i32,
    }

    impl<'a> Validator<'a, i32> for Range {
        type Output = Result<i32, Vec<Issue>>;

        fn validate(&self, input: i32) -> Self::Output {
            if (self.min..=self.max).contains(&input) {
                Ok(input)
            } else {
                Err(vec![Issue::new(format!("{input} outside {}..={}", self.min, self.max))])
            }
        }
    }

    #[test]
    fn test_schema_refines_success() {
        assert_eq!(success::<i32, SchemaError>(5).schema(non_negative), Ok(5_u32));
    }

    #[test]
    fn test_schema_failure_converts_into_caller_error() {
        let result = success::<i32, AppError>(-1).schema(non_negative);
        assert_eq!(result, Err(AppError::Invalid(vec![Issue::new("must be non-negative")])));
    }

    #[test]
    fn test_schema_skips_validator_on_failure() {
        let calls = Cell::new(0);
        let counted = |n: i32| {
            calls.set(calls.get() + 1);
            non_negative(n)
        };
        assert_eq!(failure::<i32, AppError>(AppError::Missing).schema(counted), Err(AppError::Missing));
        assert_eq!(calls.get(), 0);

        let _ = success::<i32, AppError>(3).schema(counted);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_struct_validator() {
        let range = Range { min: 1, max: 10 };
        let error = validate(&range, 11).unwrap_err();
        assert_eq!(error.tag(), "SchemaError");
        assert_eq!(error.issues()[0].message, "11 outside 1..=10");
        assert_eq!(validate(&range, 4), Ok(4));
    }

    #[test]
    fn test_pending_validator_makes_result_pending() {
        let remote = |n: i32| Pending::new(async move { non_negative(n) });
        let checked = success::<i32, SchemaError>(-4).schema(remote);
        assert!(checked.is_pending());
        assert_eq!(block_on(checked).unwrap_err().issues().len(), 1);
    }

    #[test]
    fn test_schema_or_die_panics_with_schema_error() {
        let payload = catch_unwind(AssertUnwindSafe(|| success::<i32, ()>(-1).schema_or_die(non_negative)))
            .expect_err("rejected value must panic");
        let error = payload.downcast_ref::<SchemaError>().expect("SchemaError payload");
        assert_eq!(error.to_string(), "validation failed with 1 issue(s)");
    }

    #[test]
    fn test_issue_wire_form() {
        let issue = Issue::new("required").at("user").at("email");
        assert_eq!(issue.to_string(), "user.email: required");
        assert_eq!(
            serde_json::to_value(&issue).unwrap(),
            json!({"message": "required", "path": ["user", "email"]})
        );
        assert_eq!(serde_json::to_value(Issue::new("bad")).unwrap(), json!({"message": "bad"}));
    }
}

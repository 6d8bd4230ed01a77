//! Replacing or eliminating the failure channel.

use std::{any::Any, convert::Infallible};

use crate::outcome::Outcome;

/// Replace a failure with the outcome `f(error)`, which may fail differently.
///
/// On a `Result` the inherent [`Result::or_else`] takes precedence over the
/// method form; call `OutcomeExt::or_else` explicitly when `f` returns a
/// pending outcome.
pub fn or_else<'a, O, R, F>(f: F) -> impl FnOnce(O) -> O::Bind<R>
where
    O: Outcome<'a>,
    R: Outcome<'a, Ok = O::Ok>,
    F: FnOnce(O::Err) -> R + 'a,
{
    move |outcome: O| {
        outcome.bind_with(move |result| match result {
            Ok(value) => R::from_result(Ok(value)),
            Err(error) => f(error),
        })
    }
}

/// Replace a failure with the failure `f(error)`.
pub fn or_else_fail<'a, O, E2, F>(f: F) -> impl FnOnce(O) -> O::Map<O::Ok, E2>
where
    O: Outcome<'a>,
    E2: 'a,
    F: FnOnce(O::Err) -> E2 + 'a,
{
    move |outcome: O| outcome.settle_with(move |result| result.map_err(f))
}

/// Replace a failure with the success `f(error)`.
pub fn or_else_succeed<'a, O, F>(f: F) -> impl FnOnce(O) -> O::Map<O::Ok, Infallible>
where
    O: Outcome<'a>,
    F: FnOnce(O::Err) -> O::Ok + 'a,
{
    move |outcome: O| outcome.settle_with(move |result| Ok(result.unwrap_or_else(f)))
}

/// Turn a failure into a panic carrying the error as its payload.
///
/// Use this where a failure means a broken invariant rather than an expected
/// condition. Guarded boundaries surface the payload as an
/// [`UnknownException`](crate::UnknownException).
pub fn or_die<'a, O>() -> impl FnOnce(O) -> O::Map<O::Ok, Infallible>
where
    O: Outcome<'a>,
    O::Err: Any + Send,
{
    or_die_with::<O, O::Err, _>(|error| error)
}

/// Turn a failure into a panic carrying `f(error)` as its payload.
pub fn or_die_with<'a, O, D, F>(f: F) -> impl FnOnce(O) -> O::Map<O::Ok, Infallible>
where
    O: Outcome<'a>,
    D: Any + Send,
    F: FnOnce(O::Err) -> D + 'a,
{
    move |outcome: O| {
        outcome.settle_with(move |result| match result {
            Ok(value) => Ok(value),
            Err(error) => std::panic::panic_any(f(error)),
        })
    }
}

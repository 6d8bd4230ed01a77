//! Success-channel transforms and error remapping.

use crate::outcome::Outcome;

/// Replace a success payload with `f(value)`.
///
/// ```rust
/// use fallible::{map, pipe, success};
///
/// let result: Result<i32, String> = pipe!(success(1), map(|x: i32| x + 1));
/// assert_eq!(result, Ok(2));
/// ```
pub fn map<'a, O, B, F>(f: F) -> impl FnOnce(O) -> O::Map<B, O::Err>
where
    O: Outcome<'a>,
    B: 'a,
    F: FnOnce(O::Ok) -> B + 'a,
{
    move |outcome: O| outcome.settle_with(move |result| result.map(f))
}

/// Replace a success with the outcome `f(value)`.
///
/// A failure is passed through without calling `f`. When `f` returns a pending
/// outcome the whole result becomes pending.
pub fn flat_map<'a, O, R, F>(f: F) -> impl FnOnce(O) -> O::Bind<R>
where
    O: Outcome<'a>,
    R: Outcome<'a, Err = O::Err>,
    F: FnOnce(O::Ok) -> R + 'a,
{
    move |outcome: O| {
        outcome.bind_with(move |result| match result {
            Ok(value) => f(value),
            Err(error) => R::from_result(Err(error)),
        })
    }
}

/// Replace a failure payload with `f(error)`.
pub fn map_error<'a, O, E2, F>(f: F) -> impl FnOnce(O) -> O::Map<O::Ok, E2>
where
    O: Outcome<'a>,
    E2: 'a,
    F: FnOnce(O::Err) -> E2 + 'a,
{
    move |outcome: O| outcome.settle_with(move |result| result.map_err(f))
}

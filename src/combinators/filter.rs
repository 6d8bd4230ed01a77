//! Success-channel predicates.

use std::any::Any;

use crate::outcome::Outcome;

/// Keep a success passing `predicate`, otherwise replace it with `or_else()`.
pub fn filter_or_else<'a, O, P, F>(predicate: P, or_else: F) -> impl FnOnce(O) -> O::Map<O::Ok, O::Err>
where
    O: Outcome<'a>,
    P: FnOnce(&O::Ok) -> bool + 'a,
    F: FnOnce() -> O::Ok + 'a,
{
    move |outcome: O| {
        outcome.settle_with(move |result| match result {
            Ok(value) => {
                if predicate(&value) {
                    Ok(value)
                } else {
                    Ok(or_else())
                }
            }
            Err(error) => Err(error),
        })
    }
}

/// Keep a success passing `predicate`, otherwise fail with `on_fail(value)`.
pub fn filter_or_fail<'a, O, P, F>(predicate: P, on_fail: F) -> impl FnOnce(O) -> O::Map<O::Ok, O::Err>
where
    O: Outcome<'a>,
    P: FnOnce(&O::Ok) -> bool + 'a,
    F: FnOnce(O::Ok) -> O::Err + 'a,
{
    move |outcome: O| {
        outcome.settle_with(move |result| match result {
            Ok(value) => {
                if predicate(&value) {
                    Ok(value)
                } else {
                    Err(on_fail(value))
                }
            }
            Err(error) => Err(error),
        })
    }
}

/// Keep a success passing `predicate`, otherwise panic with `on_die()` as the payload.
pub fn filter_or_die<'a, O, P, F, D>(predicate: P, on_die: F) -> impl FnOnce(O) -> O::Map<O::Ok, O::Err>
where
    O: Outcome<'a>,
    P: FnOnce(&O::Ok) -> bool + 'a,
    F: FnOnce() -> D + 'a,
    D: Any + Send,
{
    move |outcome: O| {
        outcome.settle_with(move |result| match result {
            Ok(value) => {
                if !predicate(&value) {
                    std::panic::panic_any(on_die());
                }
                Ok(value)
            }
            Err(error) => Err(error),
        })
    }
}

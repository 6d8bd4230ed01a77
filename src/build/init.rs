//! Builders for stages with an initial yield.

use super::func::{FromFn, Once};
use crate::{Sans, Step};

/// Pair a first yielded value with the stage that receives its payload.
///
/// # Examples
///
/// ```rust
/// use fallible::prelude::*;
///
/// let stage = init(success::<i32, String>(1), from_fn(|n: i32| Step::Complete(Ok::<_, String>(n + 1))));
/// let (first, mut rest) = stage.init().unwrap_yielded();
/// assert_eq!(first, Ok(1));
/// assert_eq!(rest.next(1).unwrap_complete(), Ok(2));
/// ```
pub fn init<I, O, S>(output: O, continuation: S) -> (O, S)
where
    S: Sans<I, O>,
{
    (output, continuation)
}

/// Yield an initial value, then apply a function once.
pub fn init_once<I, O, F: FnOnce(I) -> O>(o: O, f: F) -> (O, Once<F>) {
    (o, super::func::once(f))
}

/// Yield an initial value, then create a stage from a closure.
///
/// ```rust
/// use fallible::prelude::*;
///
/// let mut counter = 0;
/// let (initial, mut stage) = init_from_fn(42, move |x: i32| {
///     counter += 1;
///     if counter < 3 { Step::Yielded(x * counter) } else { Step::Complete(x + counter) }
/// });
/// assert_eq!(initial, 42);
/// assert_eq!(stage.next(10).unwrap_yielded(), 10);
/// assert_eq!(stage.next(10).unwrap_yielded(), 20);
/// assert_eq!(stage.next(10).unwrap_complete(), 13);
/// ```
pub fn init_from_fn<I, O, D, F>(initial: O, f: F) -> (O, FromFn<F>)
where
    F: FnMut(I) -> Step<O, D>,
{
    (initial, super::func::from_fn(f))
}

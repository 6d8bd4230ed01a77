//! Transforming stage outputs and return values.

use crate::{Sans, step::Step};

/// Transforms yielded values from the wrapped stage.
pub struct MapYield<S, F, I, O1> {
    f: F,
    stage: S,
    _phantom: std::marker::PhantomData<fn(I) -> O1>,
}

/// Create a stage that transforms yielded values from the wrapped stage.
///
/// # Examples
///
/// ```
/// use fallible::prelude::*;
///
/// let stage = once(|x: i32| x * 2);
/// let mut mapped = map_yield(|y: i32| success::<i32, String>(y), stage);
///
/// assert_eq!(mapped.next(5).unwrap_yielded(), Ok(10));
/// ```
pub fn map_yield<I, O1, O2, S, F>(f: F, stage: S) -> MapYield<S, F, I, O1>
where
    S: Sans<I, O1>,
    F: FnMut(O1) -> O2,
{
    MapYield {
        f,
        stage,
        _phantom: std::marker::PhantomData,
    }
}

impl<I, O1, O2, S, F> Sans<I, O2> for MapYield<S, F, I, O1>
where
    S: Sans<I, O1>,
    F: FnMut(O1) -> O2,
{
    type Return = S::Return;
    fn next(&mut self, input: I) -> Step<O2, Self::Return> {
        match self.stage.next(input) {
            Step::Yielded(o1) => Step::Yielded((self.f)(o1)),
            Step::Complete(a) => Step::Complete(a),
        }
    }
}

/// Transforms the final result from the wrapped stage.
///
/// Applied only when the computation completes, not to intermediate yields.
pub struct MapReturn<S, F> {
    f: F,
    stage: S,
}

/// Create a stage that transforms the final result from the wrapped stage.
pub fn map_return<S, F>(f: F, stage: S) -> MapReturn<S, F> {
    MapReturn { f, stage }
}

impl<I, O, D1, D2, S, F> Sans<I, O> for MapReturn<S, F>
where
    S: Sans<I, O, Return = D1>,
    F: FnMut(D1) -> D2,
{
    type Return = D2;
    fn next(&mut self, input: I) -> Step<O, Self::Return> {
        match self.stage.next(input) {
            Step::Yielded(o) => Step::Yielded(o),
            Step::Complete(r1) => Step::Complete((self.f)(r1)),
        }
    }
}

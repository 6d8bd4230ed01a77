//! Hand-written sequence stages.
//!
//! A [`Sans`] is a resumable computation: every call to [`Sans::next`] feeds it the
//! payload of the value it previously yielded and gets back either the next yielded
//! value or its final return value. Stages that yield outcomes are what
//! [`drive`](crate::drive) and [`drive_async`](crate::drive_async) run.
//!
//! ```rust
//! use fallible::prelude::*;
//!
//! let mut stage = from_fn(|n: i32| {
//!     if n < 3 { Step::Yielded(n + 1) } else { Step::Complete(n) }
//! });
//! assert_eq!(stage.next(1).unwrap_yielded(), 2);
//! assert_eq!(stage.next(3).unwrap_complete(), 3);
//! ```

use crate::{
    compose::{MapReturn, MapYield, map_return, map_yield},
    step::Step,
};

/// Stateful computation that consumes inputs and yields intermediate values.
pub trait Sans<I, O> {
    /// Type of final result when computation completes
    type Return;

    /// Resume with `input`, returning `Yielded` to suspend again or `Complete` to finish.
    fn next(&mut self, input: I) -> Step<O, Self::Return>;

    fn boxed<'a>(self) -> Box<dyn Sans<I, O, Return = Self::Return> + 'a>
    where
        Self: Sized + 'a,
    {
        Box::new(self)
    }

    /// Transform yielded values before returning them.
    fn map_yield<O2, F>(self, f: F) -> MapYield<Self, F, I, O>
    where
        Self: Sized,
        F: FnMut(O) -> O2,
    {
        map_yield(f, self)
    }

    /// Transform the final result when completing.
    ///
    /// `map_return(Ok)` turns a stage returning a plain value into one the
    /// sequence drivers accept.
    fn map_return<D2, F>(self, f: F) -> MapReturn<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Return) -> D2,
    {
        map_return(f, self)
    }
}

impl<I, O, L, R> Sans<I, O> for either::Either<L, R>
where
    L: Sans<I, O>,
    R: Sans<I, O, Return = L::Return>,
{
    type Return = L::Return;
    fn next(&mut self, input: I) -> Step<O, Self::Return> {
        match self {
            either::Either::Left(l) => l.next(input),
            either::Either::Right(r) => r.next(input),
        }
    }
}

impl<I, O, D> Sans<I, O> for Box<dyn Sans<I, O, Return = D> + '_> {
    type Return = D;

    fn next(&mut self, input: I) -> Step<O, Self::Return> {
        (**self).next(input)
    }
}

//! The outcome shape: settled results and pending handles behind one trait.
//!
//! Every combinator in this crate is written once against [`Outcome`]. For a
//! settled `Result` the associated shapes collapse to plain `Result`s and the
//! combinator runs immediately; for a [`Pending`] they stay pending and the
//! combinator runs when the handle resolves. A synchronous call site therefore
//! never pays for the asynchronous path.
//!
//! ```rust
//! use fallible::prelude::*;
//!
//! // Settled in, settled out.
//! let now: Result<i32, String> = success(1).flat_map(|x| success(x + 1));
//! assert_eq!(now, Ok(2));
//!
//! // Pending in, pending out.
//! let later: Pending<'_, i32, String> = success_async(async { 1 }).flat_map(|x| success(x + 1));
//! assert_eq!(futures::executor::block_on(later), Ok(2));
//! ```

use std::{convert::Infallible, future::Future, panic::AssertUnwindSafe};

use either::Either;
use futures::FutureExt;

use crate::{attempt::caught, pending::Pending, tagged::UnknownException};

/// A settled result or a pending handle to one.
///
/// `Ok`/`Err` name the payload types; [`Map`](Outcome::Map) and
/// [`Bind`](Outcome::Bind) select the output shape of a combinator applied to
/// `Self`.
pub trait Outcome<'a>: Sized + 'a {
    /// Success payload.
    type Ok: 'a;
    /// Failure payload.
    type Err: 'a;

    /// Same shape as `Self` with different payloads.
    type Map<B: 'a, F: 'a>: Outcome<'a, Ok = B, Err = F>;

    /// Shape of continuing `Self` with a function that returns the outcome `R`.
    ///
    /// Settled inputs take the continuation's own shape; pending inputs stay pending.
    type Bind<R: Outcome<'a>>: Outcome<'a, Ok = R::Ok, Err = R::Err>;

    /// Build this shape from a settled result.
    fn from_result(result: Result<Self::Ok, Self::Err>) -> Self;

    /// Returns `true` for the pending shape, whether or not it has resolved.
    fn is_pending(&self) -> bool;

    /// Split into the settled result or the pending handle.
    fn into_shape(self) -> Either<Result<Self::Ok, Self::Err>, Pending<'a, Self::Ok, Self::Err>>;

    /// Convert into a pending handle, settled ones without allocating.
    fn into_pending(self) -> Pending<'a, Self::Ok, Self::Err>;

    /// Transform the settled result, preserving the shape.
    fn settle_with<B, F, G>(self, f: G) -> Self::Map<B, F>
    where
        B: 'a,
        F: 'a,
        G: FnOnce(Result<Self::Ok, Self::Err>) -> Result<B, F> + 'a;

    /// Continue with a function returning another outcome.
    fn bind_with<R, G>(self, f: G) -> Self::Bind<R>
    where
        R: Outcome<'a>,
        G: FnOnce(Result<Self::Ok, Self::Err>) -> R + 'a;
}

impl<'a, A: 'a, E: 'a> Outcome<'a> for Result<A, E> {
    type Ok = A;
    type Err = E;
    type Map<B: 'a, F: 'a> = Result<B, F>;
    type Bind<R: Outcome<'a>> = R;

    #[inline]
    fn from_result(result: Result<A, E>) -> Self {
        result
    }

    #[inline]
    fn is_pending(&self) -> bool {
        false
    }

    #[inline]
    fn into_shape(self) -> Either<Result<A, E>, Pending<'a, A, E>> {
        Either::Left(self)
    }

    #[inline]
    fn into_pending(self) -> Pending<'a, A, E> {
        Pending::settled(self)
    }

    #[inline]
    fn settle_with<B, F, G>(self, f: G) -> Result<B, F>
    where
        B: 'a,
        F: 'a,
        G: FnOnce(Result<A, E>) -> Result<B, F> + 'a,
    {
        f(self)
    }

    #[inline]
    fn bind_with<R, G>(self, f: G) -> R
    where
        R: Outcome<'a>,
        G: FnOnce(Result<A, E>) -> R + 'a,
    {
        f(self)
    }
}

impl<'a, A: 'a, E: 'a> Outcome<'a> for Pending<'a, A, E> {
    type Ok = A;
    type Err = E;
    type Map<B: 'a, F: 'a> = Pending<'a, B, F>;
    type Bind<R: Outcome<'a>> = Pending<'a, R::Ok, R::Err>;

    fn from_result(result: Result<A, E>) -> Self {
        Pending::settled(result)
    }

    fn is_pending(&self) -> bool {
        true
    }

    fn into_shape(self) -> Either<Result<A, E>, Pending<'a, A, E>> {
        Either::Right(self)
    }

    fn into_pending(self) -> Pending<'a, A, E> {
        self
    }

    fn settle_with<B, F, G>(self, f: G) -> Pending<'a, B, F>
    where
        B: 'a,
        F: 'a,
        G: FnOnce(Result<A, E>) -> Result<B, F> + 'a,
    {
        Pending::new(async move { f(self.await) })
    }

    fn bind_with<R, G>(self, f: G) -> Pending<'a, R::Ok, R::Err>
    where
        R: Outcome<'a>,
        G: FnOnce(Result<A, E>) -> R + 'a,
    {
        Pending::new(async move { f(self.await).into_pending().await })
    }
}

/// Success payload of an outcome type.
pub type SuccessOf<'a, T> = <T as Outcome<'a>>::Ok;

/// Failure payload of an outcome type.
pub type FailureOf<'a, T> = <T as Outcome<'a>>::Err;

/// A zero-argument function returning an outcome.
pub trait Thunk<'a> {
    type Output: Outcome<'a>;
}

impl<'a, F, R> Thunk<'a> for F
where
    F: FnOnce() -> R,
    R: Outcome<'a>,
{
    type Output = R;
}

/// Success payload of the outcome a function returns.
pub type ThunkSuccess<'a, F> = SuccessOf<'a, <F as Thunk<'a>>::Output>;

/// Failure payload of the outcome a function returns.
pub type ThunkFailure<'a, F> = FailureOf<'a, <F as Thunk<'a>>::Output>;

/// A settled success.
#[inline]
pub fn success<A, E>(value: A) -> Result<A, E> {
    Ok(value)
}

/// A settled failure.
#[inline]
pub fn failure<A, E>(error: E) -> Result<A, E> {
    Err(error)
}

/// A pending success resolving once `value` does.
pub fn success_async<'a, A, E, F>(value: F) -> Pending<'a, A, E>
where
    F: Future<Output = A> + 'a,
{
    Pending::new(async move { Ok(value.await) })
}

/// A pending failure resolving once `error` does.
///
/// A panic while computing the error still resolves to a failure, carrying the
/// caught [`UnknownException`].
pub fn failure_async<'a, A, E, F>(error: F) -> Pending<'a, A, E>
where
    F: Future<Output = E> + 'a,
    E: From<UnknownException>,
{
    Pending::new(AssertUnwindSafe(error).catch_unwind().map(|polled| match polled {
        Ok(error) => Err(error),
        Err(payload) => Err(E::from(caught(payload))),
    }))
}

/// Extract the value of a result whose failure channel has been eliminated.
#[inline]
pub fn into_ok<A>(result: Result<A, Infallible>) -> A {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

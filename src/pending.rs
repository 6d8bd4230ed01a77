//! Pending handles.
//!
//! [`Pending`] is the not-yet-available form of a result. It is an ordinary
//! [`Future`] resolving to `Result<A, E>`, with one twist: a handle built from an
//! already settled result keeps it inline, so awaiting it never allocates or
//! suspends.

use std::{
    fmt,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use either::Either;
use futures::future::{FutureExt, LocalBoxFuture};

/// A result that may not be available yet.
///
/// ```rust
/// use fallible::Pending;
///
/// let pending: Pending<'_, i32, String> = Pending::new(async { Ok(1) });
/// assert_eq!(futures::executor::block_on(pending), Ok(1));
/// ```
#[must_use = "pending outcomes do nothing unless awaited"]
pub struct Pending<'a, A, E> {
    state: State<'a, A, E>,
}

enum State<'a, A, E> {
    Settled(Option<Result<A, E>>),
    Deferred(LocalBoxFuture<'a, Result<A, E>>),
}

impl<'a, A, E> Pending<'a, A, E> {
    /// Wrap a future resolving to a result.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<A, E>> + 'a,
    {
        Self {
            state: State::Deferred(future.boxed_local()),
        }
    }

    /// A handle that is already settled with `result`.
    pub fn settled(result: Result<A, E>) -> Self {
        Self {
            state: State::Settled(Some(result)),
        }
    }

    /// Returns `true` if the handle holds its result inline.
    pub fn is_settled(&self) -> bool {
        matches!(self.state, State::Settled(Some(_)))
    }

    /// Take the result out without polling if it is already settled.
    pub fn try_settled(self) -> Either<Result<A, E>, Self> {
        match self.state {
            State::Settled(Some(result)) => Either::Left(result),
            state => Either::Right(Self { state }),
        }
    }
}

impl<A, E> Unpin for Pending<'_, A, E> {}

impl<A, E> Future for Pending<'_, A, E> {
    type Output = Result<A, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().state {
            State::Settled(slot) => {
                Poll::Ready(slot.take().expect("`Pending` polled after completion"))
            }
            State::Deferred(future) => future.as_mut().poll(cx),
        }
    }
}

impl<A, E> From<Result<A, E>> for Pending<'_, A, E> {
    fn from(result: Result<A, E>) -> Self {
        Self::settled(result)
    }
}

impl<A, E> fmt::Debug for Pending<'_, A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pending")
            .field("settled", &self.is_settled())
            .finish()
    }
}

/// An asynchronous side effect, returned from `tap`-style callbacks.
///
/// A `Deferred` effect is awaited before the tapped value continues down the
/// chain, which makes the chain pending even when its input was settled.
#[must_use = "deferred effects do nothing unless awaited"]
pub struct Deferred<'a>(LocalBoxFuture<'a, ()>);

/// Wrap a future as a [`Deferred`] side effect.
pub fn deferred<'a, F>(future: F) -> Deferred<'a>
where
    F: Future<Output = ()> + 'a,
{
    Deferred(future.boxed_local())
}

impl Future for Deferred<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        self.0.as_mut().poll(cx)
    }
}

impl fmt::Debug for Deferred<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Deferred")
    }
}

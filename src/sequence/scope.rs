use std::{
    cell::RefCell,
    fmt,
    future::Future,
    pin::{Pin, pin},
    rc::Rc,
    task::{Context, Poll},
};

use either::Either;
use futures::task::noop_waker_ref;
use pin_project::pin_project;

use super::protocol_violation;
use crate::{
    attempt::{try_attempt, try_attempt_async},
    outcome::Outcome,
    pending::Pending,
    tagged::UnknownException,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flavor {
    Sync,
    Async,
}

enum Exit<E> {
    Failed(E),
    Violation(&'static str),
}

/// Handle through which a sequence body yields outcomes.
pub struct Scope<E> {
    flavor: Flavor,
    exit: Rc<RefCell<Option<Exit<E>>>>,
}

impl<E> Scope<E> {
    fn new(flavor: Flavor) -> Self {
        Self {
            flavor,
            exit: Rc::new(RefCell::new(None)),
        }
    }

    /// Yield `outcome` and resume with its success payload.
    ///
    /// On failure the returned future never completes; the driver takes the
    /// recorded failure and drops the body instead.
    pub fn bind<'a, O>(&self, outcome: O) -> Bind<'a, O::Ok, E>
    where
        O: Outcome<'a>,
        O::Err: Into<E>,
        E: 'a,
    {
        let pending: Option<Pending<'a, O::Ok, E>> = match outcome.into_shape() {
            Either::Left(result) => Some(Pending::settled(result.map_err(Into::into))),
            Either::Right(pending) => match (self.flavor, pending.try_settled()) {
                (_, Either::Left(result)) => Some(Pending::settled(result.map_err(Into::into))),
                (Flavor::Async, Either::Right(pending)) => {
                    Some(pending.settle_with(|result| result.map_err(Into::into)))
                }
                (Flavor::Sync, Either::Right(_)) => {
                    self.record(Exit::Violation(
                        "synchronous sequence yielded a pending outcome; use `sequence_async`",
                    ));
                    None
                }
            },
        };
        Bind {
            scope: self.clone(),
            pending,
        }
    }

    fn record(&self, exit: Exit<E>) {
        let mut slot = self.exit.borrow_mut();
        // The first exit wins; later binds never run once the body is dropped.
        if slot.is_none() {
            *slot = Some(exit);
        }
    }

    fn take_failure(&self) -> Option<E>
    where
        E: From<UnknownException>,
    {
        match self.exit.borrow_mut().take()? {
            Exit::Failed(error) => Some(error),
            Exit::Violation(message) => Some(E::from(protocol_violation(message))),
        }
    }
}

impl<E> Clone for Scope<E> {
    fn clone(&self) -> Self {
        Self {
            flavor: self.flavor,
            exit: Rc::clone(&self.exit),
        }
    }
}

impl<E> fmt::Debug for Scope<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("flavor", &self.flavor)
            .field("exited", &self.exit.borrow().is_some())
            .finish()
    }
}

/// Future returned by [`Scope::bind`], resolving to the success payload.
#[must_use = "a bound outcome only takes effect when awaited"]
pub struct Bind<'a, A, E> {
    scope: Scope<E>,
    pending: Option<Pending<'a, A, E>>,
}

impl<A, E> Future for Bind<'_, A, E> {
    type Output = A;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<A> {
        let this = self.get_mut();
        let Some(pending) = this.pending.as_mut() else {
            return Poll::Pending;
        };
        match Pin::new(pending).poll(cx) {
            Poll::Ready(Ok(value)) => {
                this.pending = None;
                Poll::Ready(value)
            }
            Poll::Ready(Err(error)) => {
                this.pending = None;
                this.scope.record(Exit::Failed(error));
                Poll::Pending
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Run an `async` body whose yields are all settled.
///
/// The body is polled exactly once. It completes, stops on a failed bind or is
/// refused for awaiting something pending.
///
/// ```rust
/// use fallible::{UnknownException, sequence, success};
///
/// let result: Result<i32, UnknownException> = sequence(|scope| async move {
///     let n = scope.bind(success::<i32, UnknownException>(1)).await;
///     Ok(n + 1)
/// });
/// assert_eq!(result.ok(), Some(2));
/// ```
pub fn sequence<A, E, F, Fut>(body: F) -> Result<A, E>
where
    F: FnOnce(Scope<E>) -> Fut,
    Fut: Future<Output = Result<A, E>>,
    E: From<UnknownException>,
{
    let scope = Scope::new(Flavor::Sync);
    try_attempt(|| {
        let polled = {
            let mut body = pin!(body(scope.clone()));
            body.as_mut().poll(&mut Context::from_waker(noop_waker_ref()))
        };
        // A failure recorded by any bind outranks whatever the body returned.
        match (polled, scope.take_failure()) {
            (_, Some(error)) => Err(error),
            (Poll::Ready(result), None) => result,
            (Poll::Pending, None) => Err(E::from(protocol_violation(
                "synchronous sequence awaited a pending future; use `sequence_async`",
            ))),
        }
    })
}

/// Run an `async` body whose yields may be pending.
pub fn sequence_async<'a, A, E, F, Fut>(body: F) -> Pending<'a, A, E>
where
    F: FnOnce(Scope<E>) -> Fut + 'a,
    Fut: Future<Output = Result<A, E>> + 'a,
    A: 'a,
    E: From<UnknownException> + 'a,
{
    let scope = Scope::new(Flavor::Async);
    try_attempt_async(async move {
        Sequence {
            body: Some(body(scope.clone())),
            scope,
        }
        .await
    })
}

#[pin_project]
struct Sequence<Fut, E> {
    scope: Scope<E>,
    #[pin]
    body: Option<Fut>,
}

impl<A, E, Fut> Future for Sequence<Fut, E>
where
    Fut: Future<Output = Result<A, E>>,
    E: From<UnknownException>,
{
    type Output = Result<A, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();
        let body = this
            .body
            .as_mut()
            .as_pin_mut()
            .expect("`Sequence` polled after completion");
        let polled = body.poll(cx);
        match (polled, this.scope.take_failure()) {
            (_, Some(error)) => {
                this.body.set(None);
                Poll::Ready(Err(error))
            }
            (Poll::Ready(result), None) => {
                this.body.set(None);
                Poll::Ready(result)
            }
            (Poll::Pending, None) => Poll::Pending,
        }
    }
}

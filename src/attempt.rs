//! Guarded invocation.
//!
//! These are the boundaries where a panic stops unwinding and re-enters the
//! failure channel as an [`UnknownException`]. Closures are run under
//! [`AssertUnwindSafe`]: state they share with the caller may be observed half
//! updated after a panic, exactly as with a bare `catch_unwind`.

use std::{
    any::Any,
    future::Future,
    panic::{AssertUnwindSafe, catch_unwind},
};

use futures::FutureExt;
use tracing::debug;

use crate::{pending::Pending, tagged::UnknownException};

/// Convert a caught panic payload, logging it.
pub(crate) fn caught(payload: Box<dyn Any + Send>) -> UnknownException {
    let exception = UnknownException::from_panic(payload);
    debug!(panic = exception.message(), "captured panic at guarded boundary");
    exception
}

/// Run `f`, turning a panic into a failure.
///
/// ```rust
/// use fallible::attempt;
///
/// assert_eq!(attempt(|| 2 + 2).ok(), Some(4));
///
/// let failed = attempt(|| -> i32 { panic!("kaboom") });
/// assert_eq!(failed.unwrap_err().message(), "kaboom");
/// ```
pub fn attempt<A, F>(f: F) -> Result<A, UnknownException>
where
    F: FnOnce() -> A,
{
    catch_unwind(AssertUnwindSafe(f)).map_err(caught)
}

/// Run a fallible `f`, merging a panic into its own failure type.
pub fn try_attempt<A, E, F>(f: F) -> Result<A, E>
where
    F: FnOnce() -> Result<A, E>,
    E: From<UnknownException>,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(E::from(caught(payload))),
    }
}

/// Await `future`, turning a panic while polling it into a failure.
pub fn attempt_async<'a, A, F>(future: F) -> Pending<'a, A, UnknownException>
where
    F: Future<Output = A> + 'a,
{
    Pending::new(AssertUnwindSafe(future).catch_unwind().map(|polled| polled.map_err(caught)))
}

/// Await a fallible `future`, merging a panic into its own failure type.
pub fn try_attempt_async<'a, A, E, F>(future: F) -> Pending<'a, A, E>
where
    F: Future<Output = Result<A, E>> + 'a,
    E: From<UnknownException>,
{
    Pending::new(AssertUnwindSafe(future).catch_unwind().map(|polled| match polled {
        Ok(result) => result,
        Err(payload) => Err(E::from(caught(payload))),
    }))
}

/// Guard a function so every call goes through [`attempt`].
///
/// ```rust
/// use fallible::wrap;
///
/// let parse = wrap(|raw: &str| raw.parse::<u8>().expect("digits only"));
/// assert_eq!(parse("7").ok(), Some(7));
/// assert!(parse("x").is_err());
/// ```
pub fn wrap<T, A, F>(f: F) -> impl Fn(T) -> Result<A, UnknownException>
where
    F: Fn(T) -> A,
{
    move |input| attempt(|| f(input))
}

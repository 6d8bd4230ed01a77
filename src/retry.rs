//! Re-running fallible computations.
//!
//! [`retry`] calls a computation until it succeeds or [`Times`] says to stop,
//! waiting according to [`Delay`] in between. [`eventually`] never stops. The
//! async forms accept computations returning any outcome and wait through a
//! [`Sleeper`], so tests can replace real time.
//!
//! ```rust
//! use std::time::Duration;
//! use fallible::retry::{RetryOptions, retry};
//!
//! let mut calls = 0;
//! let result = retry(
//!     || {
//!         calls += 1;
//!         if calls < 3 { Err("busy") } else { Ok(calls) }
//!     },
//!     RetryOptions::new().times(5).delay(Duration::from_millis(1)),
//! );
//! assert_eq!(result, Ok(3));
//! ```

use std::{cell::RefCell, fmt, future::Future, time::Duration};

use futures::future::{self, FutureExt, LocalBoxFuture};
use tracing::debug;

use crate::{outcome::Outcome, pending::Pending};

/// A failed attempt, as seen by [`Times::While`] and [`Delay::With`].
#[derive(Debug)]
pub struct Attempt<'e, E> {
    /// Attempts made so far, starting at 1.
    pub attempt: u32,
    /// Failure of the latest attempt.
    pub error: &'e E,
}

type Judge<'a, E, T> = Box<dyn FnMut(&Attempt<'_, E>) -> T + 'a>;

/// How many attempts to make.
pub enum Times<'a, E> {
    /// At most this many attempts. The computation always runs at least once.
    Limit(u32),
    /// Keep going while the predicate holds for the latest failure.
    While(Judge<'a, E, bool>),
}

/// How long to wait between attempts.
pub enum Delay<'a, E> {
    Fixed(Duration),
    With(Judge<'a, E, Duration>),
}

impl<E> Delay<'_, E> {
    pub fn none() -> Self {
        Delay::Fixed(Duration::ZERO)
    }

    fn after(&mut self, attempt: &Attempt<'_, E>) -> Duration {
        match self {
            Delay::Fixed(delay) => *delay,
            Delay::With(compute) => compute(attempt),
        }
    }
}

impl<E> From<Duration> for Delay<'_, E> {
    fn from(delay: Duration) -> Self {
        Delay::Fixed(delay)
    }
}

impl<E> fmt::Debug for Delay<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delay::Fixed(delay) => f.debug_tuple("Fixed").field(delay).finish(),
            Delay::With(_) => f.write_str("With(..)"),
        }
    }
}

impl<E> fmt::Debug for Times<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Times::Limit(limit) => f.debug_tuple("Limit").field(limit).finish(),
            Times::While(_) => f.write_str("While(..)"),
        }
    }
}

/// Retry configuration. Defaults to three attempts with no delay.
#[derive(Debug)]
pub struct RetryOptions<'a, E> {
    times: Times<'a, E>,
    delay: Delay<'a, E>,
}

impl<E> Default for RetryOptions<'_, E> {
    fn default() -> Self {
        Self {
            times: Times::Limit(3),
            delay: Delay::none(),
        }
    }
}

impl<'a, E> RetryOptions<'a, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make at most `limit` attempts.
    pub fn times(mut self, limit: u32) -> Self {
        self.times = Times::Limit(limit);
        self
    }

    /// Keep retrying while `predicate` holds.
    pub fn retry_while<P>(mut self, predicate: P) -> Self
    where
        P: FnMut(&Attempt<'_, E>) -> bool + 'a,
    {
        self.times = Times::While(Box::new(predicate));
        self
    }

    /// Wait a fixed `delay` between attempts.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Delay::Fixed(delay);
        self
    }

    /// Compute the wait from the latest failure.
    pub fn delay_with<F>(mut self, compute: F) -> Self
    where
        F: FnMut(&Attempt<'_, E>) -> Duration + 'a,
    {
        self.delay = Delay::With(Box::new(compute));
        self
    }

    /// The wait before the next attempt, or `None` to give up.
    fn next_delay(&mut self, attempt: &Attempt<'_, E>) -> Option<Duration> {
        let proceed = match &mut self.times {
            Times::Limit(limit) => attempt.attempt < *limit,
            Times::While(predicate) => predicate(attempt),
        };
        proceed.then(|| self.delay.after(attempt))
    }
}

impl<'a, E> From<Delay<'a, E>> for RetryOptions<'a, E> {
    fn from(delay: Delay<'a, E>) -> Self {
        Self {
            times: Times::Limit(3),
            delay,
        }
    }
}

/// Source of waits between attempts.
pub trait Sleeper {
    fn sleep(&self, delay: Duration) -> LocalBoxFuture<'_, ()>;
}

/// Waits on the tokio timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, delay: Duration) -> LocalBoxFuture<'_, ()> {
        tokio::time::sleep(delay).boxed_local()
    }
}

/// Returns immediately.
#[derive(Clone, Copy, Debug, Default)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    fn sleep(&self, _delay: Duration) -> LocalBoxFuture<'_, ()> {
        future::ready(()).boxed_local()
    }
}

/// Returns immediately and records every requested wait.
#[derive(Debug, Default)]
pub struct TrackingSleeper {
    requested: RefCell<Vec<Duration>>,
}

impl TrackingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requested(&self) -> Vec<Duration> {
        self.requested.borrow().clone()
    }

    pub fn calls(&self) -> usize {
        self.requested.borrow().len()
    }
}

impl Sleeper for TrackingSleeper {
    fn sleep(&self, delay: Duration) -> LocalBoxFuture<'_, ()> {
        self.requested.borrow_mut().push(delay);
        future::ready(()).boxed_local()
    }
}

impl<S: Sleeper + ?Sized> Sleeper for &S {
    fn sleep(&self, delay: Duration) -> LocalBoxFuture<'_, ()> {
        (**self).sleep(delay)
    }
}

fn forever<'a, E>(delay: Delay<'a, E>) -> RetryOptions<'a, E> {
    RetryOptions {
        times: Times::While(Box::new(|_| true)),
        delay,
    }
}

/// Count the next attempt. Unbounded retries pin the count at `u32::MAX`.
fn advance(attempt: u32) -> u32 {
    attempt.saturating_add(1)
}

fn log_retry(attempt: u32, delay: Duration) {
    debug!(attempt, delay_ms = delay.as_millis() as u64, "attempt failed, retrying");
}

/// Call `f` until it succeeds or `options` gives up, returning the last failure.
///
/// Waits block the current thread.
pub fn retry<'a, A, E, F>(mut f: F, options: impl Into<RetryOptions<'a, E>>) -> Result<A, E>
where
    F: FnMut() -> Result<A, E>,
    E: 'a,
{
    let mut options = options.into();
    let mut attempt = 1;
    loop {
        let error = match f() {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };
        let Some(delay) = options.next_delay(&Attempt { attempt, error: &error }) else {
            return Err(error);
        };
        log_retry(attempt, delay);
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        attempt = advance(attempt);
    }
}

/// Call `f` until it succeeds, however long that takes.
pub fn eventually<'a, A, E, F>(f: F, delay: impl Into<Delay<'a, E>>) -> A
where
    F: FnMut() -> Result<A, E>,
    E: 'a,
{
    match retry(f, forever(delay.into())) {
        Ok(value) => value,
        Err(_) => unreachable!("`eventually` never gives up"),
    }
}

/// Async [`retry`] waiting on the tokio timer.
///
/// `f` may return a settled or pending outcome.
pub fn retry_async<'a, O, F>(f: F, options: impl Into<RetryOptions<'a, O::Err>>) -> Pending<'a, O::Ok, O::Err>
where
    O: Outcome<'a>,
    F: FnMut() -> O + 'a,
{
    retry_async_with(TokioSleeper, f, options)
}

/// Async [`retry`] waiting through `sleeper`.
pub fn retry_async_with<'a, S, O, F>(
    sleeper: S,
    mut f: F,
    options: impl Into<RetryOptions<'a, O::Err>>,
) -> Pending<'a, O::Ok, O::Err>
where
    S: Sleeper + 'a,
    O: Outcome<'a>,
    F: FnMut() -> O + 'a,
{
    let mut options = options.into();
    Pending::new(async move {
        let mut attempt = 1;
        loop {
            let error = match f().into_pending().await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };
            let Some(delay) = options.next_delay(&Attempt { attempt, error: &error }) else {
                return Err(error);
            };
            log_retry(attempt, delay);
            if !delay.is_zero() {
                sleeper.sleep(delay).await;
            }
            attempt = advance(attempt);
        }
    })
}

/// Async [`eventually`] waiting on the tokio timer.
pub fn eventually_async<'a, O, F>(f: F, delay: impl Into<Delay<'a, O::Err>>) -> impl Future<Output = O::Ok> + 'a
where
    O: Outcome<'a>,
    F: FnMut() -> O + 'a,
{
    eventually_async_with(TokioSleeper, f, delay)
}

/// Async [`eventually`] waiting through `sleeper`.
pub fn eventually_async_with<'a, S, O, F>(
    sleeper: S,
    f: F,
    delay: impl Into<Delay<'a, O::Err>>,
) -> impl Future<Output = O::Ok> + 'a
where
    S: Sleeper + 'a,
    O: Outcome<'a>,
    F: FnMut() -> O + 'a,
{
    retry_async_with(sleeper, f, forever(delay.into())).map(|result| match result {
        Ok(value) => value,
        Err(_) => unreachable!("`eventually` never gives up"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OutcomeExt, failure, success, success_async};
    use futures::executor::block_on;
    use std::cell::Cell;

    #[test]
    fn test_retry_times_three_calls_exactly_three_times() {
        let calls = Cell::new(0);
        let result = retry(
            || {
                calls.set(calls.get() + 1);
                failure::<(), String>(format!("fail {}", calls.get()))
            },
            RetryOptions::new().times(3),
        );
        assert_eq!(calls.get(), 3);
        assert_eq!(result, Err("fail 3".to_string()));
    }

    #[test]
    fn test_retry_stops_on_first_success() {
        let calls = Cell::new(0);
        let result = retry(
            || {
                calls.set(calls.get() + 1);
                success::<u32, ()>(calls.get())
            },
            RetryOptions::default(),
        );
        assert_eq!(result, Ok(1));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_attempt_count_saturates() {
        assert_eq!(advance(1), 2);
        assert_eq!(advance(u32::MAX), u32::MAX);

        let mut options = RetryOptions::<()>::new().times(u32::MAX);
        let last = Attempt { attempt: advance(u32::MAX), error: &() };
        assert_eq!(options.next_delay(&last), None);
    }

    #[test]
    fn test_zero_limit_still_runs_once() {
        let calls = Cell::new(0);
        let _ = retry(
            || {
                calls.set(calls.get() + 1);
                failure::<(), ()>(())
            },
            RetryOptions::new().times(0),
        );
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_retry_while_sees_attempt_and_error() {
        let seen = RefCell::new(Vec::new());
        let calls = Cell::new(0);
        let result = retry(
            || {
                calls.set(calls.get() + 1);
                if calls.get() < 3 { failure::<(), &str>("transient") } else { failure("fatal") }
            },
            RetryOptions::<&str>::new().retry_while(|a| {
                seen.borrow_mut().push((a.attempt, *a.error));
                *a.error == "transient"
            }),
        );
        assert_eq!(result, Err("fatal"));
        assert_eq!(*seen.borrow(), [(1, "transient"), (2, "transient"), (3, "fatal")]);
    }

    #[test]
    fn test_computed_delay_is_requested_per_attempt() {
        let sleeper = TrackingSleeper::new();
        let options = RetryOptions::new()
            .times(4)
            .delay_with(|a: &Attempt<'_, ()>| Duration::from_millis(10 * u64::from(a.attempt)));
        let result = block_on(retry_async_with(&sleeper, || failure::<(), ()>(()), options));

        assert_eq!(result, Err(()));
        assert_eq!(
            sleeper.requested(),
            [10, 20, 30].map(Duration::from_millis).to_vec()
        );
    }

    #[test]
    fn test_zero_delay_never_sleeps() {
        let sleeper = TrackingSleeper::new();
        let _ = block_on(retry_async_with(&sleeper, || failure::<(), ()>(()), RetryOptions::new()));
        assert_eq!(sleeper.calls(), 0);
    }

    #[test]
    fn test_retry_async_accepts_pending_attempts() {
        let calls = Cell::new(0);
        let attempt = || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            Pending::new(async move { if n < 2 { Err("later") } else { Ok(n) } })
        };
        let result = block_on(retry_async_with(InstantSleeper, attempt, RetryOptions::new()));
        assert_eq!(result, Ok(2));
    }

    #[test]
    fn test_eventually_keeps_going() {
        let calls = Cell::new(0);
        let value = eventually(
            || {
                calls.set(calls.get() + 1);
                if calls.get() < 10 { Err(()) } else { Ok("done") }
            },
            Delay::none(),
        );
        assert_eq!(value, "done");
        assert_eq!(calls.get(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_sleeper_waits_between_attempts() {
        let started = tokio::time::Instant::now();
        let calls = Cell::new(0);
        let result = retry_async(
            || {
                calls.set(calls.get() + 1);
                failure::<(), &str>("down")
            },
            RetryOptions::new().times(3).delay(Duration::from_secs(5)),
        )
        .await;

        assert_eq!(result, Err("down"));
        assert_eq!(calls.get(), 3);
        assert_eq!(started.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_eventually_async() {
        let calls = Cell::new(0);
        let value = eventually_async(
            || {
                calls.set(calls.get() + 1);
                let n = calls.get();
                success_async::<u32, (), _>(async move { n }).filter_or_fail(|n| *n >= 4, |_| ())
            },
            Duration::from_millis(100),
        )
        .await;
        assert_eq!(value, 4);
    }
}

//! Side effects that observe a result without changing it.

use crate::{
    outcome::Outcome,
    pending::{Deferred, Pending},
    tagged::{Tagged, has_tag},
};

/// Return type of a tap callback.
///
/// `()` is a synchronous effect and leaves a settled chain settled. A
/// [`Deferred`] effect is awaited before the value continues, so the chain
/// becomes pending.
pub trait Effect<'a> {
    type Then<A: 'a, E: 'a>: Outcome<'a, Ok = A, Err = E>;

    /// Continue with `result` once the effect has finished.
    fn resolve<A: 'a, E: 'a>(self, result: Result<A, E>) -> Self::Then<A, E>;
}

impl<'a> Effect<'a> for () {
    type Then<A: 'a, E: 'a> = Result<A, E>;

    #[inline]
    fn resolve<A: 'a, E: 'a>(self, result: Result<A, E>) -> Result<A, E> {
        result
    }
}

impl<'a> Effect<'a> for Deferred<'a> {
    type Then<A: 'a, E: 'a> = Pending<'a, A, E>;

    fn resolve<A: 'a, E: 'a>(self, result: Result<A, E>) -> Pending<'a, A, E> {
        Pending::new(async move {
            self.await;
            result
        })
    }
}

/// Output shape of tapping `O` with an effect `T`.
pub type Tapped<'a, O, T> = <O as Outcome<'a>>::Bind<
    <T as Effect<'a>>::Then<<O as Outcome<'a>>::Ok, <O as Outcome<'a>>::Err>,
>;

fn pass<'a, T, A, E>(result: Result<A, E>) -> T::Then<A, E>
where
    T: Effect<'a>,
    A: 'a,
    E: 'a,
{
    <T::Then<A, E> as Outcome<'a>>::from_result(result)
}

/// Run `f` on a success, then pass the original value on.
pub fn tap<'a, O, T, F>(f: F) -> impl FnOnce(O) -> Tapped<'a, O, T>
where
    O: Outcome<'a>,
    T: Effect<'a>,
    F: FnOnce(&O::Ok) -> T + 'a,
{
    move |outcome: O| {
        outcome.bind_with(move |result| match result {
            Ok(value) => f(&value).resolve(Ok(value)),
            Err(error) => pass::<T, _, _>(Err(error)),
        })
    }
}

/// Run `f` on a failure, then pass the original error on.
pub fn tap_error<'a, O, T, F>(f: F) -> impl FnOnce(O) -> Tapped<'a, O, T>
where
    O: Outcome<'a>,
    T: Effect<'a>,
    F: FnOnce(&O::Err) -> T + 'a,
{
    move |outcome: O| {
        outcome.bind_with(move |result| match result {
            Ok(value) => pass::<T, _, _>(Ok(value)),
            Err(error) => f(&error).resolve(Err(error)),
        })
    }
}

/// Run `f` only on a failure carrying `tag`.
pub fn tap_error_tag<'a, O, T, F>(tag: &'a str, f: F) -> impl FnOnce(O) -> Tapped<'a, O, T>
where
    O: Outcome<'a>,
    O::Err: Tagged,
    T: Effect<'a>,
    F: FnOnce(&O::Err) -> T + 'a,
{
    move |outcome: O| {
        outcome.bind_with(move |result| match result {
            Err(error) if has_tag(&error, tag) => f(&error).resolve(Err(error)),
            other => pass::<T, _, _>(other),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Outcome, OutcomeExt, deferred, failure, success, tagged::TaggedError};
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    #[test]
    fn test_tap_returns_input_unchanged() {
        let seen = Cell::new(0);
        let result = success::<i32, ()>(5).tap(|x| seen.set(*x));
        assert_eq!(result, Ok(5));
        assert_eq!(seen.get(), 5);
    }

    #[test]
    fn test_tap_skips_failures() {
        let seen = Cell::new(false);
        let result = failure::<i32, &str>("boom").tap(|_| seen.set(true));
        assert_eq!(result, Err("boom"));
        assert!(!seen.get());
    }

    #[test]
    fn test_async_tap_is_awaited_before_continuing() {
        let log = RefCell::new(Vec::new());
        let chained = success::<i32, ()>(1)
            .tap(|x| {
                let x = *x;
                let log = &log;
                deferred(async move { log.borrow_mut().push(format!("tap {x}")) })
            })
            .map(|x| {
                log.borrow_mut().push("map".to_string());
                x + 1
            });

        assert!(chained.is_pending());
        assert!(log.borrow().is_empty());
        assert_eq!(block_on(chained), Ok(2));
        assert_eq!(*log.borrow(), ["tap 1", "map"]);
    }

    #[test]
    fn test_tap_error_observes_failure() {
        let seen = RefCell::new(String::new());
        let result = failure::<i32, String>("boom".into()).tap_error(|e| seen.borrow_mut().push_str(e));
        assert_eq!(result, Err("boom".to_string()));
        assert_eq!(*seen.borrow(), "boom");
    }

    #[test]
    fn test_tap_error_tag_matches_only_its_tag() {
        let hits = Cell::new(0);
        let _ = failure::<(), _>(TaggedError::new("A", "a")).tap_error_tag("A", |_| hits.set(hits.get() + 1));
        let _ = failure::<(), _>(TaggedError::new("B", "b")).tap_error_tag("A", |_| hits.set(hits.get() + 1));
        assert_eq!(hits.get(), 1);
    }
}

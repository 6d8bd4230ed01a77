//! The combinator algebra.
//!
//! Every combinator exists twice: as an [`OutcomeExt`] method for chaining and as
//! a free function returning a configured `FnOnce(O) -> _` for
//! [`pipe!`](crate::pipe). Both forms preserve the input's shape: a settled
//! `Result` comes back settled, a [`Pending`](crate::Pending) comes back pending.
//!
//! ```rust
//! use fallible::prelude::*;
//!
//! let method: Result<i32, String> = success(1).map(|x| x + 1).filter_or_fail(|x| *x > 1, |x| x.to_string());
//! let piped: Result<i32, String> = pipe!(success(1), map(|x: i32| x + 1), filter_or_fail(|x: &i32| *x > 1, |x: i32| x.to_string()));
//! assert_eq!(method, piped);
//! ```

mod catch;
mod filter;
mod map;
mod or_else;
mod tap;

pub use catch::{TagHandlers, catch_all, catch_if, catch_some, catch_tag, catch_tags};
pub use filter::{filter_or_die, filter_or_else, filter_or_fail};
pub use map::{flat_map, map, map_error};
pub use or_else::{or_die, or_die_with, or_else, or_else_fail, or_else_succeed};
pub use tap::{Effect, Tapped, tap, tap_error, tap_error_tag};

use std::{any::Any, convert::Infallible};

use crate::{
    outcome::Outcome,
    schema::{self, SchemaError, Validated, Validator},
    tagged::Tagged,
};

/// Method form of the combinator algebra, available on every [`Outcome`].
pub trait OutcomeExt<'a>: Outcome<'a> {
    fn map<B, F>(self, f: F) -> Self::Map<B, Self::Err>
    where
        B: 'a,
        F: FnOnce(Self::Ok) -> B + 'a,
    {
        map(f)(self)
    }

    fn flat_map<R, F>(self, f: F) -> Self::Bind<R>
    where
        R: Outcome<'a, Err = Self::Err>,
        F: FnOnce(Self::Ok) -> R + 'a,
    {
        flat_map(f)(self)
    }

    fn map_error<E2, F>(self, f: F) -> Self::Map<Self::Ok, E2>
    where
        E2: 'a,
        F: FnOnce(Self::Err) -> E2 + 'a,
    {
        map_error(f)(self)
    }

    fn tap<T, F>(self, f: F) -> Tapped<'a, Self, T>
    where
        T: Effect<'a>,
        F: FnOnce(&Self::Ok) -> T + 'a,
    {
        tap(f)(self)
    }

    fn tap_error<T, F>(self, f: F) -> Tapped<'a, Self, T>
    where
        T: Effect<'a>,
        F: FnOnce(&Self::Err) -> T + 'a,
    {
        tap_error(f)(self)
    }

    fn tap_error_tag<T, F>(self, tag: &'a str, f: F) -> Tapped<'a, Self, T>
    where
        Self::Err: Tagged,
        T: Effect<'a>,
        F: FnOnce(&Self::Err) -> T + 'a,
    {
        tap_error_tag(tag, f)(self)
    }

    fn filter_or_else<P, F>(self, predicate: P, or_else: F) -> Self::Map<Self::Ok, Self::Err>
    where
        P: FnOnce(&Self::Ok) -> bool + 'a,
        F: FnOnce() -> Self::Ok + 'a,
    {
        filter_or_else(predicate, or_else)(self)
    }

    fn filter_or_fail<P, F>(self, predicate: P, on_fail: F) -> Self::Map<Self::Ok, Self::Err>
    where
        P: FnOnce(&Self::Ok) -> bool + 'a,
        F: FnOnce(Self::Ok) -> Self::Err + 'a,
    {
        filter_or_fail(predicate, on_fail)(self)
    }

    fn filter_or_die<P, F, D>(self, predicate: P, on_die: F) -> Self::Map<Self::Ok, Self::Err>
    where
        P: FnOnce(&Self::Ok) -> bool + 'a,
        F: FnOnce() -> D + 'a,
        D: Any + Send,
    {
        filter_or_die(predicate, on_die)(self)
    }

    fn catch_all<R, F>(self, f: F) -> Self::Bind<R>
    where
        R: Outcome<'a, Ok = Self::Ok, Err = Infallible>,
        F: FnOnce(Self::Err) -> R + 'a,
    {
        catch_all(f)(self)
    }

    fn catch_if<R, P, F>(self, predicate: P, f: F) -> Self::Bind<R>
    where
        R: Outcome<'a, Ok = Self::Ok, Err = Self::Err>,
        P: FnOnce(&Self::Err) -> bool + 'a,
        F: FnOnce(Self::Err) -> R + 'a,
    {
        catch_if(predicate, f)(self)
    }

    fn catch_some<R, F>(self, f: F) -> Self::Bind<R>
    where
        R: Outcome<'a, Ok = Self::Ok, Err = Self::Err>,
        F: FnOnce(&Self::Err) -> Option<R> + 'a,
    {
        catch_some(f)(self)
    }

    fn catch_tag<R, F>(self, tag: &'a str, f: F) -> Self::Bind<R>
    where
        Self::Err: Tagged,
        R: Outcome<'a, Ok = Self::Ok, Err = Self::Err>,
        F: FnOnce(Self::Err) -> R + 'a,
    {
        catch_tag(tag, f)(self)
    }

    fn catch_tags<R>(self, handlers: TagHandlers<'a, Self::Err, R>) -> Self::Bind<R>
    where
        Self::Err: Tagged,
        R: Outcome<'a, Ok = Self::Ok, Err = Self::Err>,
    {
        catch_tags(handlers)(self)
    }

    fn or_else<R, F>(self, f: F) -> Self::Bind<R>
    where
        R: Outcome<'a, Ok = Self::Ok>,
        F: FnOnce(Self::Err) -> R + 'a,
    {
        or_else(f)(self)
    }

    fn or_else_fail<E2, F>(self, f: F) -> Self::Map<Self::Ok, E2>
    where
        E2: 'a,
        F: FnOnce(Self::Err) -> E2 + 'a,
    {
        or_else_fail(f)(self)
    }

    fn or_else_succeed<F>(self, f: F) -> Self::Map<Self::Ok, Infallible>
    where
        F: FnOnce(Self::Err) -> Self::Ok + 'a,
    {
        or_else_succeed(f)(self)
    }

    fn or_die(self) -> Self::Map<Self::Ok, Infallible>
    where
        Self::Err: Any + Send,
    {
        or_die()(self)
    }

    fn or_die_with<D, F>(self, f: F) -> Self::Map<Self::Ok, Infallible>
    where
        D: Any + Send,
        F: FnOnce(Self::Err) -> D + 'a,
    {
        or_die_with(f)(self)
    }

    /// Validate a success with `validator`, failing with a [`SchemaError`].
    fn schema<V>(self, validator: V) -> Validated<'a, Self, V>
    where
        V: Validator<'a, Self::Ok> + 'a,
        Self::Err: From<SchemaError>,
    {
        schema::schema(validator)(self)
    }

    /// Validate a success with `validator`, panicking with the [`SchemaError`].
    fn schema_or_die<V>(self, validator: V) -> Validated<'a, Self, V>
    where
        V: Validator<'a, Self::Ok> + 'a,
    {
        schema::schema_or_die(validator)(self)
    }
}

impl<'a, O: Outcome<'a>> OutcomeExt<'a> for O {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Pending, deferred, failure, success, success_async, tagged::TaggedError};
    use futures::executor::block_on;

    type Settled = Result<i32, TaggedError>;
    type Later = Pending<'static, i32, TaggedError>;

    fn ok() -> Settled {
        success(1)
    }

    fn err() -> Settled {
        failure(TaggedError::new("X", "x"))
    }

    fn ok_later() -> Later {
        success_async(async { 1 })
    }

    fn err_later() -> Later {
        Pending::new(async { Err(TaggedError::new("X", "x")) })
    }

    macro_rules! assert_shape {
        ($settled:expr, $pending:expr, $combinator:expr) => {{
            let settled = ($combinator)($settled);
            assert!(!settled.is_pending(), "settled input must stay settled");
            let pending = ($combinator)($pending);
            assert!(pending.is_pending(), "pending input must stay pending");
            let _ = block_on(pending.into_pending());
        }};
    }

    #[test]
    fn test_success_channel_combinators_preserve_shape() {
        assert_shape!(ok(), ok_later(), map(|x: i32| x + 1));
        assert_shape!(ok(), ok_later(), flat_map(|x: i32| Ok::<_, TaggedError>(x)));
        assert_shape!(ok(), ok_later(), tap(|_: &i32| ()));
        assert_shape!(ok(), ok_later(), filter_or_else(|_: &i32| false, || 0));
        assert_shape!(ok(), ok_later(), filter_or_fail(|_: &i32| false, |_: i32| TaggedError::new("F", "f")));
        assert_shape!(ok(), ok_later(), filter_or_die(|_: &i32| true, || "unreachable"));
    }

    #[test]
    fn test_failure_channel_combinators_preserve_shape() {
        assert_shape!(err(), err_later(), map_error(|e: TaggedError| e.to_string()));
        assert_shape!(err(), err_later(), tap_error(|_: &TaggedError| ()));
        assert_shape!(err(), err_later(), tap_error_tag("X", |_: &TaggedError| ()));
        assert_shape!(err(), err_later(), catch_all(|_: TaggedError| Ok::<i32, Infallible>(0)));
        assert_shape!(err(), err_later(), catch_if(|_: &TaggedError| true, |_: TaggedError| ok()));
        assert_shape!(err(), err_later(), catch_some(|_: &TaggedError| Some(ok())));
        assert_shape!(err(), err_later(), catch_tag("X", |_: TaggedError| ok()));
        assert_shape!(err(), err_later(), catch_tags(TagHandlers::new().on("X", |_: TaggedError| ok())));
        assert_shape!(err(), err_later(), or_else(|_: TaggedError| Ok::<i32, ()>(0)));
        assert_shape!(err(), err_later(), or_else_fail(|e: TaggedError| e.to_string()));
        assert_shape!(err(), err_later(), or_else_succeed(|_: TaggedError| 0));
        assert_shape!(ok(), ok_later(), or_die());
        assert_shape!(ok(), ok_later(), or_die_with(|e: TaggedError| e.to_string()));
    }

    #[test]
    fn test_deferred_effect_turns_settled_chain_pending() {
        let tapped = ok().tap(|_| deferred(async {}));
        assert!(tapped.is_pending());
        assert_eq!(block_on(tapped).ok(), Some(1));
    }

    #[test]
    fn test_failure_inspectors_leave_success_untouched() {
        let untouched = ok()
            .map_error(|e| e)
            .tap_error(|_| ())
            .catch_tag("X", |_| success(0))
            .or_else_fail(|e| e);
        assert_eq!(untouched.ok(), Some(1));
    }

    #[test]
    fn test_success_inspectors_leave_failure_untouched() {
        let untouched = err()
            .map(|x| x + 1)
            .tap(|_| ())
            .filter_or_fail(|_| false, |_| TaggedError::new("F", "f"))
            .flat_map(success);
        assert_eq!(untouched.map_err(|e| e.tag().to_string()), Err("X".to_string()));
    }
}

//! Recovery from failures, selected by predicate or by tag.

use std::{borrow::Cow, collections::HashMap, convert::Infallible, fmt};

use crate::{
    outcome::Outcome,
    tagged::{Tagged, has_tag},
};

/// Recover from every failure with `f(error)`.
///
/// The handler's own failure channel is empty, so the result can no longer fail
/// with the old error type.
pub fn catch_all<'a, O, R, F>(f: F) -> impl FnOnce(O) -> O::Bind<R>
where
    O: Outcome<'a>,
    R: Outcome<'a, Ok = O::Ok, Err = Infallible>,
    F: FnOnce(O::Err) -> R + 'a,
{
    move |outcome: O| {
        outcome.bind_with(move |result| match result {
            Ok(value) => R::from_result(Ok(value)),
            Err(error) => f(error),
        })
    }
}

/// Recover with `f(error)` when `predicate(&error)` holds.
pub fn catch_if<'a, O, R, P, F>(predicate: P, f: F) -> impl FnOnce(O) -> O::Bind<R>
where
    O: Outcome<'a>,
    R: Outcome<'a, Ok = O::Ok, Err = O::Err>,
    P: FnOnce(&O::Err) -> bool + 'a,
    F: FnOnce(O::Err) -> R + 'a,
{
    move |outcome: O| {
        outcome.bind_with(move |result| match result {
            Err(error) => {
                if predicate(&error) {
                    f(error)
                } else {
                    R::from_result(Err(error))
                }
            }
            ok => R::from_result(ok),
        })
    }
}

/// Recover with the outcome `f` returns, if any.
///
/// `None` passes the original failure through.
pub fn catch_some<'a, O, R, F>(f: F) -> impl FnOnce(O) -> O::Bind<R>
where
    O: Outcome<'a>,
    R: Outcome<'a, Ok = O::Ok, Err = O::Err>,
    F: FnOnce(&O::Err) -> Option<R> + 'a,
{
    move |outcome: O| {
        outcome.bind_with(move |result| match result {
            Err(error) => match f(&error) {
                Some(recovered) => recovered,
                None => R::from_result(Err(error)),
            },
            ok => R::from_result(ok),
        })
    }
}

/// Recover with `f(error)` when the failure carries `tag`.
///
/// ```rust
/// use fallible::prelude::*;
/// use fallible::TaggedError;
///
/// let result: Result<i32, TaggedError> = failure(TaggedError::new("NotFound", "no user"))
///     .catch_tag("NotFound", |_| success(0));
/// assert_eq!(result.ok(), Some(0));
/// ```
pub fn catch_tag<'a, O, R, F>(tag: &'a str, f: F) -> impl FnOnce(O) -> O::Bind<R>
where
    O: Outcome<'a>,
    O::Err: Tagged,
    R: Outcome<'a, Ok = O::Ok, Err = O::Err>,
    F: FnOnce(O::Err) -> R + 'a,
{
    catch_if::<O, R, _, F>(move |error: &O::Err| has_tag(error, tag), f)
}

/// Recover by dispatching on the failure's tag.
///
/// Failures whose tag has no handler pass through.
pub fn catch_tags<'a, O, R>(handlers: TagHandlers<'a, O::Err, R>) -> impl FnOnce(O) -> O::Bind<R>
where
    O: Outcome<'a>,
    O::Err: Tagged,
    R: Outcome<'a, Ok = O::Ok, Err = O::Err>,
{
    move |outcome: O| {
        outcome.bind_with(move |result| match result {
            Err(error) => match handlers.dispatch(error) {
                Ok(recovered) => recovered,
                Err(unhandled) => R::from_result(Err(unhandled)),
            },
            ok => R::from_result(ok),
        })
    }
}

/// Handlers keyed by failure tag, for [`catch_tags`].
///
/// ```rust
/// use fallible::prelude::*;
/// use fallible::{TagHandlers, TaggedError};
///
/// let handlers = TagHandlers::new()
///     .on("NotFound", |_| success(0))
///     .on("Forbidden", |_| success(-1));
///
/// let result: Result<i32, TaggedError> =
///     failure(TaggedError::new("Forbidden", "nope")).catch_tags(handlers);
/// assert_eq!(result.ok(), Some(-1));
/// ```
pub struct TagHandlers<'a, E, R> {
    handlers: HashMap<Cow<'a, str>, Box<dyn FnOnce(E) -> R + 'a>>,
}

impl<'a, E, R> TagHandlers<'a, E, R> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register `f` for `tag`, replacing any earlier handler for it.
    pub fn on<F>(mut self, tag: impl Into<Cow<'a, str>>, f: F) -> Self
    where
        F: FnOnce(E) -> R + 'a,
    {
        self.handlers.insert(tag.into(), Box::new(f));
        self
    }

    pub fn handles(&self, tag: &str) -> bool {
        self.handlers.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run the handler for `error`'s tag, or hand the error back.
    pub fn dispatch(mut self, error: E) -> Result<R, E>
    where
        E: Tagged,
    {
        match self.handlers.remove(error.tag()) {
            Some(handler) => Ok(handler(error)),
            None => Err(error),
        }
    }
}

impl<E, R> Default for TagHandlers<'_, E, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, R> fmt::Debug for TagHandlers<'_, E, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

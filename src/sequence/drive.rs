use either::Either;

use super::protocol_violation;
use crate::{
    attempt::{try_attempt, try_attempt_async},
    init::InitSans,
    outcome::Outcome,
    pending::Pending,
    sans::Sans,
    step::Step,
    tagged::UnknownException,
};

/// Unwrap a yield of a synchronous sequence.
fn settle<'a, Y, E>(yielded: Y) -> Result<Y::Ok, E>
where
    Y: Outcome<'a>,
    Y::Err: Into<E>,
    E: From<UnknownException>,
{
    let result = match yielded.into_shape() {
        Either::Left(result) => result,
        Either::Right(pending) => match pending.try_settled() {
            Either::Left(result) => result,
            Either::Right(_) => {
                return Err(E::from(protocol_violation(
                    "synchronous stage yielded a pending outcome; use `drive_async`",
                )));
            }
        },
    };
    result.map_err(Into::into)
}

/// Drive a stage yielding settled outcomes to completion.
///
/// Each success payload is fed back into the stage. The first failure is
/// returned and the suspended stage is dropped.
///
/// ```rust
/// use fallible::prelude::*;
/// use fallible::UnknownException;
///
/// let stage = init(
///     success::<i32, UnknownException>(1),
///     once(|n: i32| success::<i32, UnknownException>(n * 10)),
/// )
/// .map_return(|n: i32| Ok::<_, UnknownException>(n + 1));
///
/// assert_eq!(drive(stage).ok(), Some(11));
/// ```
pub fn drive<'a, S, Y, A, E>(stage: S) -> Result<A, E>
where
    S: InitSans<Y::Ok, Y>,
    S::Next: Sans<Y::Ok, Y, Return = Result<A, E>>,
    Y: Outcome<'a>,
    Y::Err: Into<E>,
    E: From<UnknownException>,
{
    try_attempt(|| {
        let (first, mut rest) = match stage.init() {
            Step::Yielded(suspended) => suspended,
            Step::Complete(done) => return done,
        };
        let mut input = settle(first)?;
        loop {
            match rest.next(input) {
                Step::Yielded(yielded) => input = settle(yielded)?,
                Step::Complete(done) => return done,
            }
        }
    })
}

/// Drive a stage whose yields may be pending, awaiting each one.
pub fn drive_async<'a, S, Y, A, E>(stage: S) -> Pending<'a, A, E>
where
    S: InitSans<Y::Ok, Y> + 'a,
    S::Next: Sans<Y::Ok, Y, Return = Result<A, E>> + 'a,
    Y: Outcome<'a>,
    Y::Err: Into<E>,
    A: 'a,
    E: From<UnknownException> + 'a,
{
    try_attempt_async(async move {
        let (first, mut rest) = match stage.init() {
            Step::Yielded(suspended) => suspended,
            Step::Complete(done) => return done,
        };
        let mut input = first.into_pending().await.map_err(Into::<E>::into)?;
        loop {
            match rest.next(input) {
                Step::Yielded(yielded) => {
                    input = yielded.into_pending().await.map_err(Into::<E>::into)?;
                }
                Step::Complete(done) => return done,
            }
        }
    })
}

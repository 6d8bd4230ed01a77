use crate::{
    Sans, Step,
    compose::{MapReturn, MapYield, map_return, map_yield},
};

/// Stages that produce their first yield before receiving any input.
///
/// This is the first pull of a sequence: a stage either suspends immediately on
/// its first yielded value (handing back the continuation) or finishes without
/// yielding anything.
///
/// ```rust
/// use fallible::prelude::*;
///
/// let stage = init(success::<i32, ()>(1), from_fn(|n: i32| Step::Complete(Ok::<_, ()>(n))));
/// let (first, _next) = stage.init().unwrap_yielded();
/// assert_eq!(first, Ok(1));
/// ```
pub trait InitSans<I, O> {
    type Next: Sans<I, O>;

    /// Execute the first pull.
    ///
    /// Returns `Yielded((yield_value, continuation))` for normal execution,
    /// or `Complete(return_value)` if the computation completes immediately.
    #[allow(clippy::type_complexity)]
    fn init(self) -> Step<(O, Self::Next), <Self::Next as Sans<I, O>>::Return>;

    /// Transform yielded values, including the first one.
    #[allow(clippy::type_complexity)]
    fn map_yield<O2, F>(
        self,
        mut f: F,
    ) -> Step<(O2, MapYield<Self::Next, F, I, O>), <Self::Next as Sans<I, O>>::Return>
    where
        Self: Sized,
        F: FnMut(O) -> O2,
    {
        match self.init() {
            Step::Yielded((o, next)) => {
                let mapped = f(o);
                Step::Yielded((mapped, map_yield(f, next)))
            }
            Step::Complete(d) => Step::Complete(d),
        }
    }

    /// Transform the final result when completing.
    fn map_return<D2, F>(self, mut f: F) -> Step<(O, MapReturn<Self::Next, F>), D2>
    where
        Self: Sized,
        F: FnMut(<Self::Next as Sans<I, O>>::Return) -> D2,
    {
        match self.init() {
            Step::Yielded((o, next)) => Step::Yielded((o, map_return(f, next))),
            Step::Complete(d) => Step::Complete(f(d)),
        }
    }
}

impl<I, O, S> InitSans<I, O> for (O, S)
where
    S: Sans<I, O>,
{
    type Next = S;
    fn init(self) -> Step<(O, S), S::Return> {
        Step::Yielded(self)
    }
}

impl<I, O, S> InitSans<I, O> for Step<(O, S), S::Return>
where
    S: Sans<I, O>,
{
    type Next = S;
    fn init(self) -> Step<(O, S), S::Return> {
        self
    }
}

impl<I, O, L, R> InitSans<I, O> for either::Either<L, R>
where
    L: InitSans<I, O>,
    R: InitSans<I, O>,
    R::Next: Sans<I, O, Return = <L::Next as Sans<I, O>>::Return>,
{
    type Next = either::Either<L::Next, R::Next>;
    fn init(self) -> Step<(O, Self::Next), <Self::Next as Sans<I, O>>::Return> {
        match self {
            either::Either::Left(l) => match l.init() {
                Step::Yielded((o, next_l)) => Step::Yielded((o, either::Either::Left(next_l))),
                Step::Complete(done) => Step::Complete(done),
            },
            either::Either::Right(r) => match r.init() {
                Step::Yielded((o, next_r)) => Step::Yielded((o, either::Either::Right(next_r))),
                Step::Complete(done) => Step::Complete(done),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{from_fn, init, init_once};

    #[derive(Clone, Copy, Debug)]
    struct ImmediateReturn;

    impl Sans<&'static str, &'static str> for ImmediateReturn {
        type Return = &'static str;

        fn next(&mut self, input: &'static str) -> Step<&'static str, Self::Return> {
            Step::Complete(input)
        }
    }

    impl InitSans<&'static str, &'static str> for ImmediateReturn {
        type Next = Self;

        fn init(
            self,
        ) -> Step<(&'static str, Self::Next), <Self::Next as Sans<&'static str, &'static str>>::Return>
        {
            Step::Complete("left-done")
        }
    }

    #[test]
    fn test_tuple_yields_its_first_element() {
        let (first, mut next) = init_once(10_u32, |input: u32| input + 5).init().unwrap_yielded();
        assert_eq!(first, 10);
        assert_eq!(next.next(1).unwrap_yielded(), 6);
        assert_eq!(next.next(2).unwrap_complete(), 2);
    }

    #[test]
    fn test_either_left_completes_immediately() {
        let stage: either::Either<ImmediateReturn, ImmediateReturn> =
            either::Either::Left(ImmediateReturn);

        assert_eq!(stage.init().unwrap_complete(), "left-done");
    }

    #[test]
    fn test_map_yield_and_map_return() {
        let stage = init(
            1_u32,
            from_fn(|n: u32| if n < 3 { Step::Yielded(n + 1) } else { Step::Complete(n) }),
        );

        let (first, mut rest) = stage
            .map_yield(|n: u32| format!("n={n}"))
            .map_return(|done: u32| done * 10)
            .unwrap_yielded();

        assert_eq!(first, "n=1");
        assert_eq!(rest.next(2).unwrap_yielded(), "n=3");
        assert_eq!(rest.next(3).unwrap_complete(), 30);
    }
}

/// State of a sequence after one pull: suspended on a yielded value, or finished.
///
/// Stages return `Step` from every call to [`Sans::next`](crate::Sans::next). The
/// sequence drivers use it the same way internally: `Yielded` means the body is
/// suspended waiting for the payload of the value it yielded, `Complete` carries
/// the final value.
///
/// # Examples
///
/// ```rust
/// use fallible::Step;
///
/// let suspended: Step<i32, String> = Step::Yielded(42);
/// let finished: Step<i32, String> = Step::Complete("finished".to_string());
///
/// assert!(suspended.is_yielded());
/// assert_eq!(finished.unwrap_complete(), "finished");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step<Y, D> {
    /// Suspended on an intermediate value
    Yielded(Y),
    /// Finished with a final value
    Complete(D),
}

impl<Y, D> Step<Y, D> {
    /// Returns `true` if the step is `Yielded`.
    #[inline]
    pub const fn is_yielded(&self) -> bool {
        matches!(self, Step::Yielded(_))
    }

    /// Returns `true` if the step is `Complete`.
    #[inline]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Step::Complete(_))
    }

    /// Returns the contained `Yielded` value, consuming the `self` value.
    ///
    /// # Panics
    ///
    /// Panics if the value is a `Complete`.
    #[inline]
    pub fn unwrap_yielded(self) -> Y {
        match self {
            Step::Yielded(y) => y,
            Step::Complete(_) => panic!("called `Step::unwrap_yielded()` on a `Complete` value"),
        }
    }

    /// Returns the contained `Complete` value, consuming the `self` value.
    ///
    /// # Panics
    ///
    /// Panics if the value is a `Yielded`.
    #[inline]
    pub fn unwrap_complete(self) -> D {
        match self {
            Step::Yielded(_) => panic!("called `Step::unwrap_complete()` on a `Yielded` value"),
            Step::Complete(d) => d,
        }
    }
}

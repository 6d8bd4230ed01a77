//! Left-to-right function application.

/// Thread a value through a list of unary functions, left to right.
///
/// `pipe!(x, f, g, h)` is `h(g(f(x)))`. Each stage only has to be callable with
/// the previous stage's output, so the configured combinators compose directly:
///
/// ```rust
/// use fallible::prelude::*;
///
/// let result: Result<String, String> = pipe!(
///     success(20),
///     map(|x: i32| x + 1),
///     flat_map(|x: i32| if x % 2 == 1 { success(x) } else { failure("even".to_string()) }),
///     map(|x: i32| x.to_string()),
/// );
/// assert_eq!(result.as_deref(), Ok("21"));
/// ```
#[macro_export]
macro_rules! pipe {
    ($seed:expr $(,)?) => {
        $seed
    };
    ($seed:expr, $($stage:expr),+ $(,)?) => {{
        let value = $seed;
        $(let value = ($stage)(value);)+
        value
    }};
}

/// Method-call form of [`pipe!`](crate::pipe).
pub trait Pipe: Sized {
    #[inline]
    fn pipe<R, F>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }
}

impl<T> Pipe for T {}

/// Fold `seed` through `stages` at runtime.
///
/// Every stage has the same input and output type, which is what allows the
/// list to be built dynamically.
pub fn pipe_all<T, I, F>(seed: T, stages: I) -> T
where
    I: IntoIterator<Item = F>,
    F: FnOnce(T) -> T,
{
    stages.into_iter().fold(seed, |value, stage| stage(value))
}

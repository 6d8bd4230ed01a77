//! Tagged failure payloads.
//!
//! A tag is a string discriminant carried by a failure value. The catch family
//! dispatches on it (`catch_tag`, `catch_tags`, `tap_error_tag`) without caring
//! about the concrete error type, so a closed error enum, a [`TaggedError`] and a
//! type declared with [`tagged_error!`](crate::tagged_error) all work the same way.

use std::{
    any::Any,
    borrow::Cow,
    error::Error,
    fmt,
    sync::{Mutex, PoisonError},
};

/// Boxed error used as the cause of tagged failures.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// A value exposing a string discriminant.
///
/// Error enums usually return the variant name:
///
/// ```rust
/// use fallible::Tagged;
///
/// enum LookupError {
///     NotFound,
///     Forbidden { user: String },
/// }
///
/// impl Tagged for LookupError {
///     fn tag(&self) -> &str {
///         match self {
///             LookupError::NotFound => "NotFound",
///             LookupError::Forbidden { .. } => "Forbidden",
///         }
///     }
/// }
/// ```
pub trait Tagged {
    fn tag(&self) -> &str;
}

impl<T: Tagged + ?Sized> Tagged for &T {
    fn tag(&self) -> &str {
        (**self).tag()
    }
}

impl<T: Tagged + ?Sized> Tagged for Box<T> {
    fn tag(&self) -> &str {
        (**self).tag()
    }
}

/// Returns `true` if `value` carries exactly `tag`.
#[inline]
pub fn has_tag<T: Tagged + ?Sized>(value: &T, tag: &str) -> bool {
    value.tag() == tag
}

/// An error whose tag is chosen at runtime.
///
/// Use [`tagged_error!`](crate::tagged_error) instead when the tag should be a
/// distinct type.
#[derive(Debug, thiserror::Error)]
#[error("{tag}: {message}")]
pub struct TaggedError {
    tag: Cow<'static, str>,
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl TaggedError {
    pub fn new(tag: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying cause.
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Tagged for TaggedError {
    fn tag(&self) -> &str {
        &self.tag
    }
}

/// Declare an error type with a fixed tag.
///
/// Every invocation produces a distinct type carrying a message and an optional
/// cause. The tag defaults to the type name.
///
/// ```rust
/// use fallible::{Tagged, tagged_error};
///
/// tagged_error! {
///     /// The requested record does not exist.
///     pub struct NotFound;
/// }
///
/// tagged_error! {
///     pub struct Timeout = "net.timeout";
/// }
///
/// let error = NotFound::new("user 7");
/// assert_eq!(error.tag(), "NotFound");
/// assert_eq!(error.to_string(), "NotFound: user 7");
/// assert_eq!(Timeout::TAG, "net.timeout");
/// ```
#[macro_export]
macro_rules! tagged_error {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $crate::tagged_error! { $(#[$meta])* $vis struct $name = stringify!($name); }
    };
    ($(#[$meta:meta])* $vis:vis struct $name:ident = $tag:expr;) => {
        $(#[$meta])*
        #[derive(Debug)]
        $vis struct $name {
            message: ::std::string::String,
            source: ::std::option::Option<$crate::BoxError>,
        }

        impl $name {
            pub const TAG: &'static str = $tag;

            pub fn new(message: impl ::std::convert::Into<::std::string::String>) -> Self {
                Self {
                    message: message.into(),
                    source: ::std::option::Option::None,
                }
            }

            pub fn with_source(mut self, source: impl ::std::convert::Into<$crate::BoxError>) -> Self {
                self.source = ::std::option::Option::Some(source.into());
                self
            }

            pub fn message(&self) -> &str {
                &self.message
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}: {}", Self::TAG, self.message)
            }
        }

        impl ::std::error::Error for $name {
            fn source(&self) -> ::std::option::Option<&(dyn ::std::error::Error + 'static)> {
                self.source
                    .as_deref()
                    .map(|source| source as &(dyn ::std::error::Error + 'static))
            }
        }

        impl $crate::Tagged for $name {
            fn tag(&self) -> &str {
                Self::TAG
            }
        }
    };
}

/// Failure produced when a computation panics or otherwise fails without an
/// explicit failure value.
///
/// The original panic payload or error is kept as the cause. The payload sits
/// behind a lock so the exception stays `Send + Sync` and converts into
/// [`BoxError`] like any other error.
#[derive(thiserror::Error)]
#[error("{message}")]
pub struct UnknownException {
    message: String,
    #[source]
    source: Option<BoxError>,
    payload: Option<Mutex<Box<dyn Any + Send>>>,
}

impl UnknownException {
    pub const TAG: &'static str = "UnknownException";

    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
            payload: None,
        }
    }

    /// Wrap a panic payload caught at a guarded boundary.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast_ref::<&'static str>() {
            Some(text) => (*text).to_string(),
            None => match payload.downcast_ref::<String>() {
                Some(text) => text.clone(),
                None => "panicked with a non-string payload".to_string(),
            },
        };
        Self {
            message,
            source: None,
            payload: Some(Mutex::new(payload)),
        }
    }

    /// Wrap an error that escaped without being placed in the failure channel.
    pub fn from_error(error: impl Into<BoxError>) -> Self {
        let source = error.into();
        Self {
            message: source.to_string(),
            source: Some(source),
            payload: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` if this exception came from a panic.
    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    /// A copy of the caught panic payload, if it has type `T`.
    pub fn downcast_payload<T: Any + Clone>(&self) -> Option<T> {
        let payload = self.payload.as_ref()?.lock().unwrap_or_else(PoisonError::into_inner);
        payload.downcast_ref::<T>().cloned()
    }

    /// Take the caught panic payload, e.g. to resume unwinding with it.
    pub fn into_payload(self) -> Option<Box<dyn Any + Send>> {
        self.payload
            .map(|payload| payload.into_inner().unwrap_or_else(PoisonError::into_inner))
    }
}

impl fmt::Debug for UnknownException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnknownException")
            .field("message", &self.message)
            .field("source", &self.source)
            .field("has_payload", &self.payload.is_some())
            .finish()
    }
}

impl Tagged for UnknownException {
    fn tag(&self) -> &str {
        Self::TAG
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    tagged_error! {
        struct NotFound;
    }

    tagged_error! {
        struct Timeout = "net.timeout";
    }

    #[test]
    fn test_macro_types_carry_their_tag() {
        let not_found = NotFound::new("user 7");
        assert_eq!(not_found.tag(), "NotFound");
        assert_eq!(not_found.message(), "user 7");
        assert_eq!(not_found.to_string(), "NotFound: user 7");
        assert!(has_tag(&Timeout::new("slow"), "net.timeout"));
    }

    #[test]
    fn test_macro_error_keeps_source() {
        let io = std::io::Error::other("disk gone");
        let error = Timeout::new("read").with_source(io);
        let source = error.source().expect("source attached");
        assert_eq!(source.to_string(), "disk gone");
    }

    #[test]
    fn test_tagged_error_runtime_tag() {
        let error = TaggedError::new("Conflict", "version mismatch");
        assert_eq!(error.tag(), "Conflict");
        assert_eq!(error.to_string(), "Conflict: version mismatch");
        assert!(error.source().is_none());

        let boxed: Box<dyn Tagged> = Box::new(error);
        assert!(has_tag(&boxed, "Conflict"));
    }

    #[test]
    fn test_unknown_exception_from_panic_keeps_payload() {
        let payload = std::panic::catch_unwind(|| panic!("kaboom")).expect_err("must panic");
        let exception = UnknownException::from_panic(payload);

        assert_eq!(exception.tag(), "UnknownException");
        assert_eq!(exception.message(), "kaboom");
        assert_eq!(exception.downcast_payload::<&str>(), Some("kaboom"));
        assert_eq!(exception.downcast_payload::<String>(), None);

        let payload = exception.into_payload().expect("payload kept");
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"kaboom"));
    }

    #[test]
    fn test_unknown_exception_from_error() {
        let exception = UnknownException::from_error(std::io::Error::other("refused"));
        assert_eq!(exception.message(), "refused");
        assert!(exception.source().is_some());
        assert!(!exception.has_payload());
    }

    #[test]
    fn test_unknown_exception_chains_as_source() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<UnknownException>();

        let payload = std::panic::catch_unwind(|| panic!("inner")).expect_err("must panic");
        let wrapped = TaggedError::new("Wrapped", "x").with_source(UnknownException::from_panic(payload));
        let source = wrapped.source().expect("source attached");
        assert_eq!(source.to_string(), "inner");
        let exception = source
            .downcast_ref::<UnknownException>()
            .expect("source is the exception");
        assert_eq!(exception.downcast_payload::<&str>(), Some("inner"));

        let boxed: BoxError = Box::new(UnknownException::new("plain"));
        assert_eq!(boxed.to_string(), "plain");
    }
}

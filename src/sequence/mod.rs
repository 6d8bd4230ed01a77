//! Early-return sequencing.
//!
//! A sequence is a computation that yields outcomes one at a time and is resumed
//! with each success payload. The first failure ends it: the suspended
//! computation is dropped (running its destructors, which is where cleanup
//! lives) and the failure becomes the overall result. A panic anywhere inside
//! becomes an [`UnknownException`](crate::UnknownException).
//!
//! Two renditions share these rules:
//!
//! - [`sequence`] / [`sequence_async`] take an `async` body and a [`Scope`];
//!   `scope.bind(outcome).await` is the yield point.
//! - [`drive`] / [`drive_async`] run a hand-written [`InitSans`](crate::InitSans)
//!   stage whose yields are outcomes.
//!
//! The synchronous flavors refuse pending yields rather than blocking on them.

mod drive;
mod scope;

pub use drive::{drive, drive_async};
pub use scope::{Bind, Scope, sequence, sequence_async};

use tracing::warn;

use crate::tagged::UnknownException;

fn protocol_violation(message: &'static str) -> UnknownException {
    warn!("{message}");
    UnknownException::new(message)
}

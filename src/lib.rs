//! # Fallible: results that do not care whether they are ready yet
//!
//! Compose fallible computations without nested `match`es, whether they finish
//! now or later.
//!
//! ## Core Types
//!
//! - **`Result<A, E>`**: a settled outcome
//! - **[`Pending<A, E>`]**: an outcome that is not available yet
//! - **[`Outcome`]**: the trait both implement, which decides the shape of every
//!   combinator's output
//!
//! ## Key Features
//!
//! - **Shape transparent**: a combinator applied to a settled result returns a
//!   settled result; applied to a pending one it returns a pending one
//! - **Tagged failures**: recover by tag with `.catch_tag()` and `.catch_tags()`
//! - **Early return**: [`sequence`] and [`drive`] stop at the first failure
//!   and run cleanup of the abandoned computation
//! - **Guarded boundaries**: panics become an [`UnknownException`] at [`attempt`],
//!   [`sequence`] and [`drive`]
//!
//! ## Example
//!
//! ```
//! use fallible::prelude::*;
//! use fallible::TaggedError;
//!
//! fn lookup(id: u32) -> Result<String, TaggedError> {
//!     match id {
//!         1 => success("ada".to_string()),
//!         _ => failure(TaggedError::new("NotFound", format!("user {id}"))),
//!     }
//! }
//!
//! let name = lookup(7)
//!     .catch_tag("NotFound", |_| success("guest".to_string()))
//!     .map(|name| name.to_uppercase());
//! assert_eq!(name.ok().as_deref(), Some("GUEST"));
//!
//! // The same chain on a pending lookup stays pending.
//! let later = success_async::<u32, TaggedError, _>(async { 1 })
//!     .flat_map(lookup)
//!     .map(|name| name.len());
//! assert_eq!(futures::executor::block_on(later).ok(), Some(3));
//! ```
//!
//! ## Common Functions
//!
//! **Constructing:**
//! - [`success`], [`failure`], [`success_async`], [`failure_async`]
//! - [`attempt`] / [`wrap`] - Run code that may panic
//!
//! **Composing:**
//! - [`OutcomeExt`] - Every combinator as a method
//! - [`pipe!`] - Apply configured combinators left to right
//!
//! **Sequencing:**
//! - [`sequence`] / [`sequence_async`] - Early-return `async` bodies
//! - [`drive`] / [`drive_async`] - Run hand-written [`Sans`] stages

mod error;
mod init;
mod outcome;
mod pending;
mod sans;
mod step;
mod tagged;

pub mod attempt;
pub mod build;
pub mod combinators;
pub mod compose;
pub mod guards;
pub mod pipe;
pub mod prelude;
pub mod retry;
pub mod schema;
pub mod sequence;
pub mod wire;

pub use attempt::*;
pub use combinators::*;
pub use error::*;
pub use init::*;
pub use outcome::*;
pub use pending::*;
pub use sans::*;
pub use step::*;
pub use tagged::*;

pub use guards::{Inspect, is_failure, is_result, is_success, is_tagged, is_tagged_with};
pub use pipe::{Pipe, pipe_all};
pub use retry::{RetryOptions, eventually, eventually_async, retry, retry_async};
pub use schema::{Issue, SchemaError, Validator, schema, schema_or_die, validate};
pub use sequence::{Scope, drive, drive_async, sequence, sequence_async};

//! Commonly used imports
//!
//! Use `use fallible::prelude::*;` for the constructors, the combinator methods
//! and the free-function combinators for [`pipe!`](crate::pipe).

// Core types
pub use crate::{Deferred, InitSans, Outcome, OutcomeExt, Pending, Pipe, Sans, Step, Tagged};

// Constructors
pub use crate::{deferred, failure, failure_async, into_ok, success, success_async};

// Combinators
pub use crate::combinators::{
    TagHandlers, catch_all, catch_if, catch_some, catch_tag, catch_tags, filter_or_die,
    filter_or_else, filter_or_fail, flat_map, map, map_error, or_die, or_die_with, or_else,
    or_else_fail, or_else_succeed, tap, tap_error, tap_error_tag,
};

// Composition
pub use crate::pipe;

// Stages
pub use crate::build::{from_fn, init, init_from_fn, init_once, once};
pub use crate::compose::{map_return, map_yield};

// Execution
pub use crate::{attempt, drive, drive_async, sequence, sequence_async, wrap};

//! Building sequence stages from closures.

mod func;
mod init;

pub use func::{FromFn, Once, from_fn, once};
pub use init::{init, init_from_fn, init_once};

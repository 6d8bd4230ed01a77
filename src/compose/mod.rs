//! Transforming sequence stages.

mod map;

pub use map::{MapReturn, MapYield, map_return, map_yield};

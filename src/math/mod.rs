//! Mathematical utilities: the normal CDF and grid helpers.

pub mod grid;
pub mod normal;

pub use grid::*;
pub use normal::*;

//! Input/output helpers.
//!
//! - comparison exports (CSV) (`export`)
//! - distribution curve JSON read/write (`curve`)

pub mod curve;
pub mod export;

pub use curve::*;
pub use export::*;

//! Pure calculation models: the income distribution and the mortgage formula.
//!
//! Both are small, side-effect-free functions of their inputs so the engine and
//! the front-ends can call them freely.

pub mod distribution;
pub mod mortgage;

pub use distribution::*;
pub use mortgage::*;

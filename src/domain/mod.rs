//! Domain types used throughout the calculator.
//!
//! This module defines:
//!
//! - regional mortgage rules (`RegionRule`)
//! - per-query inputs and outputs (`AffordabilityQuery`, `AffordabilityResult`)
//! - population estimates and comparator rows

pub mod types;

pub use types::*;

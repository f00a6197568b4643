//! `home-afford` library crate.
//!
//! The binary (`afford`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the CLI and the TUI share one calculation pipeline

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod tui;

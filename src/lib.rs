//! `sweep-heatmap` library crate.
//!
//! The binary (`sweep`) is a thin wrapper around this library so that:
//!
//! - grid inference and reshaping are testable without spawning processes
//! - the same figure model feeds every front-end (terminal viewer, SVG, ASCII)

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod grid;
pub mod io;
pub mod plot;
pub mod report;
pub mod tui;

//! Reporting utilities: run summaries for terminal output.

pub mod format;

pub use format::*;

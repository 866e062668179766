//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the biological sweep parameters (`BioParam`) and one sweep sample (`ParameterSample`)
//! - the results columns that can be plotted (`TargetColumn`) and their labels
//! - the plot style state (`PlotStyle`) and the run configuration (`SweepConfig`)

pub mod types;

pub use types::*;

//! Input/output helpers.
//!
//! - CSV ingest + backward fill (`ingest`)
//! - reshaped grid exports (CSV/JSON) (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;

//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the typed spreadsheet cell (`Cell`) and resolved column layout (`ColumnMap`)
//! - normalized transaction records (`TransactionRecord`, `Dataset`)
//! - statistics inputs/outputs (`WeightConfig`, `Summary`, `YearMedian`)

pub mod types;

pub use types::*;

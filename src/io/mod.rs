//! Input/output helpers.
//!
//! - sheet decoding into typed cells (`sheet`)
//! - result exports (CSV/JSON) (`export`)

pub mod export;
pub mod sheet;

pub use export::*;
pub use sheet::*;

//! Terminal plotting of the yearly-median trend.

pub mod ascii;

pub use ascii::*;

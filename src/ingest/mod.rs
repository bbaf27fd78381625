//! Sheet ingest and normalization.
//!
//! This module turns a heterogeneous transaction sheet into the canonical
//! dataset that the statistics engine consumes.
//!
//! Design goals:
//! - **Heuristic column detection** (synonym matching, first match wins)
//! - **Row-level validation** (bad rows are dropped, never fatal one by one)
//! - **Deterministic behavior** (fixed date formats, no locale inference)
//! - **Separation of concerns**: no statistics logic here

use std::path::Path;

use crate::domain::{ColumnMap, Dataset};
use crate::error::AppError;
use crate::io::sheet;

pub mod columns;
pub mod normalize;

/// Ingest output: the canonical dataset plus resolution/row bookkeeping.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub dataset: Dataset,
    pub column_map: ColumnMap,
    pub rows_read: usize,
    pub rows_used: usize,
    pub rows_rejected: usize,
}

/// Load a sheet file and normalize it into a dataset.
///
/// Fails entirely (no partial dataset) when the sheet is unreadable, when a
/// required column cannot be resolved, or when every row is rejected.
pub fn load_dataset(path: &Path) -> Result<IngestedData, AppError> {
    let sheet = sheet::read_sheet(path)?;
    let column_map = columns::resolve(&sheet.header)?;
    let rows_read = sheet.rows.len();

    let records = normalize::normalize(&sheet.rows, &column_map)?;
    let rows_used = records.len();

    Ok(IngestedData {
        dataset: Dataset::new(records),
        column_map,
        rows_read,
        rows_used,
        rows_rejected: rows_read - rows_used,
    })
}

//! Row normalization and validation.
//!
//! Each raw row becomes at most one `TransactionRecord`. Rows whose date
//! cannot be decoded, or whose price is zero/negative/unparseable, are
//! dropped silently; order of the survivors is preserved. Only a fully empty
//! result is fatal.

use chrono::{DateTime, NaiveDate};

use crate::domain::{Cell, ColumnMap, TransactionRecord};
use crate::error::{AppError, EXIT_EMPTY_DATASET};

/// Day offset between the 1900-based spreadsheet epoch and the Unix epoch.
///
/// Spreadsheet serial 25569 is exactly 1970-01-01.
const SHEET_EPOCH_OFFSET_DAYS: f64 = 25_569.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Normalize raw data rows into validated transaction records.
pub fn normalize(rows: &[Vec<Cell>], columns: &ColumnMap) -> Result<Vec<TransactionRecord>, AppError> {
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let Some(date) = decode_date(cell_at(row, columns.date)) else {
            continue;
        };
        let price = decode_price(cell_at(row, columns.price));
        if price <= 0.0 {
            continue;
        }
        let location = decode_location(columns.location.map(|idx| cell_at(row, idx)));
        records.push(TransactionRecord::new(date, price, location));
    }

    if records.is_empty() {
        return Err(AppError::new(
            EXIT_EMPTY_DATASET,
            "No valid data rows found after parsing. Check the transaction date and price columns.",
        ));
    }

    Ok(records)
}

/// Cell lookup tolerant of short rows (missing trailing cells read as blank).
fn cell_at(row: &[Cell], index: usize) -> &Cell {
    row.get(index).unwrap_or(&Cell::Empty)
}

/// Decode a transaction date cell.
///
/// - numeric cells are 1900-system spreadsheet serials
/// - text cells go through a small fixed set of calendar formats
/// - date cells pass through unchanged
/// - anything else has no date, which rejects the row
pub fn decode_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Number(serial) => decode_serial_date(*serial),
        Cell::Text(s) => parse_date_str(s),
        Cell::Date(d) => Some(*d),
        Cell::Empty => None,
    }
}

/// Convert a 1900-system spreadsheet day serial to a calendar date.
///
/// `unix_epoch + round((serial - 25569) * 86400)` seconds, taken as a UTC
/// date. Serials outside chrono's representable range yield `None`.
fn decode_serial_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let seconds = ((serial - SHEET_EPOCH_OFFSET_DAYS) * SECONDS_PER_DAY).round();
    if seconds < i64::MIN as f64 || seconds > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp(seconds as i64, 0).map(|dt| dt.date_naive())
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    // ISO dates are the common case, but agency exports also show up with
    // slashed and US-style layouts. The set is fixed to keep parsing
    // deterministic.
    const FMTS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y"];
    let s = s.trim();
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Decode a price cell; anything unparseable counts as `0` and rejects the row.
pub fn decode_price(cell: &Cell) -> f64 {
    match cell {
        Cell::Number(v) if v.is_finite() => *v,
        Cell::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Decode a location cell, defaulting to `"Unknown"`.
///
/// `None` means no location column was resolved. A blank text cell and the
/// number 0 (falsy in the upstream dashboard) also map to `"Unknown"`.
pub fn decode_location(cell: Option<&Cell>) -> String {
    let Some(cell) = cell else {
        return "Unknown".to_string();
    };
    match cell {
        Cell::Text(s) if !s.trim().is_empty() => s.trim().to_string(),
        Cell::Number(v) if *v != 0.0 => cell.display_value(),
        Cell::Date(_) => cell.display_value(),
        _ => "Unknown".to_string(),
    }
}

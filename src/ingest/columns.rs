//! Heuristic column resolution.
//!
//! Uploaded sheets come from many agencies with no agreed header naming, so
//! each required column is located by case-insensitive membership in a fixed
//! synonym set. The first matching column (lowest index) wins per category;
//! later duplicates are ignored.

use crate::domain::{Cell, ColumnMap};
use crate::error::{AppError, EXIT_INPUT};

/// Recognized header spellings for the price column.
pub const PRICE_SYNONYMS: &[&str] = &["price", "shop lot price", "value", "amount"];
/// Recognized header spellings for the transaction date column.
pub const DATE_SYNONYMS: &[&str] = &["transaction date", "date", "sales date", "buy date"];
/// Recognized header spellings for the (optional) location column.
pub const LOCATION_SYNONYMS: &[&str] = &["location", "area", "district", "region", "place"];

/// Resolve the price/date/location columns from a header row.
///
/// Only text cells participate; numeric or blank header cells never match.
/// Fails (exit code 2) when price or date stays unresolved, in which case
/// the normalizer must not run.
pub fn resolve(header: &[Cell]) -> Result<ColumnMap, AppError> {
    let mut price = None;
    let mut date = None;
    let mut location = None;
    let mut location_header = None;

    for (index, cell) in header.iter().enumerate() {
        let Cell::Text(raw) = cell else { continue };
        let name = normalize_header_name(raw);

        if price.is_none() && PRICE_SYNONYMS.contains(&name.as_str()) {
            price = Some(index);
        }
        if date.is_none() && DATE_SYNONYMS.contains(&name.as_str()) {
            date = Some(index);
        }
        if location.is_none() && LOCATION_SYNONYMS.contains(&name.as_str()) {
            location = Some(index);
            // Keep the exact header text for display (e.g. "District").
            location_header = Some(raw.trim().trim_start_matches('\u{feff}').to_string());
        }
    }

    match (price, date) {
        (Some(price), Some(date)) => Ok(ColumnMap {
            price,
            date,
            location,
            location_header,
        }),
        _ => Err(AppError::new(
            EXIT_INPUT,
            "Could not find a price or transaction date column in the uploaded sheet. \
             Please ensure your headers are clear.",
        )),
    }
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 exports with a BOM prefix on
    // the first header (e.g. "﻿Price"). If we don't strip it, resolution will
    // incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_row(names: &[&str]) -> Vec<Cell> {
        names.iter().map(|n| Cell::Text(n.to_string())).collect()
    }

    #[test]
    fn resolves_all_three_columns() {
        let header = text_row(&["Location", "Transaction Date", "Price"]);
        let map = resolve(&header).unwrap();
        assert_eq!(map.price, 2);
        assert_eq!(map.date, 1);
        assert_eq!(map.location, Some(0));
        assert_eq!(map.location_header.as_deref(), Some("Location"));
    }

    #[test]
    fn matching_is_case_insensitive_and_trimmed() {
        let header = text_row(&["  SHOP LOT PRICE ", " Buy Date "]);
        let map = resolve(&header).unwrap();
        assert_eq!(map.price, 0);
        assert_eq!(map.date, 1);
        assert_eq!(map.location, None);
    }

    #[test]
    fn first_match_wins_lowest_index() {
        // Both "price" and "amount" are price synonyms; index 0 must win.
        let header = text_row(&["Price", "Amount", "Date", "Sales Date"]);
        let map = resolve(&header).unwrap();
        assert_eq!(map.price, 0);
        assert_eq!(map.date, 2);
    }

    #[test]
    fn bom_prefixed_header_still_matches() {
        let header = vec![
            Cell::Text("\u{feff}Price".to_string()),
            Cell::Text("Date".to_string()),
        ];
        let map = resolve(&header).unwrap();
        assert_eq!(map.price, 0);
    }

    #[test]
    fn missing_price_column_is_fatal() {
        let header = text_row(&["Location", "Transaction Date", "Remarks"]);
        let err = resolve(&header).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
    }

    #[test]
    fn missing_date_column_is_fatal() {
        let header = text_row(&["Price", "Remarks"]);
        assert!(resolve(&header).is_err());
    }

    #[test]
    fn non_text_header_cells_never_match() {
        let header = vec![Cell::Number(1.0), Cell::Empty, Cell::Text("price".to_string())];
        // No date synonym anywhere.
        assert!(resolve(&header).is_err());
    }

    #[test]
    fn location_is_optional() {
        let header = text_row(&["Price", "Date"]);
        let map = resolve(&header).unwrap();
        assert_eq!(map.location, None);
        assert_eq!(map.location_header, None);
    }
}

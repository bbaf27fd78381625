//! Sheet decoding: file bytes to a 2D array of typed cells.
//!
//! This is the boundary the rest of the pipeline treats as a black box: one
//! header row plus zero or more data rows, every cell already typed. The
//! CSV reader types what it can see (blank -> `Empty`, numeric -> `Number`,
//! anything else -> `Text`); the `Date` cell variant is produced by richer
//! decoders (native spreadsheet formats carry typed date cells) and is
//! accepted everywhere downstream.

use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::domain::Cell;
use crate::error::{AppError, EXIT_INPUT};

/// A decoded sheet: one header row plus data rows.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub header: Vec<Cell>,
    pub rows: Vec<Vec<Cell>>,
}

/// Read a CSV sheet file into typed cells.
///
/// Zero data rows is legal here; the normalizer decides whether the upload
/// is usable. A file without even a header row is an error.
pub fn read_sheet(path: &Path) -> Result<Sheet, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            EXIT_INPUT,
            format!("Failed to open sheet '{}': {e}", path.display()),
        )
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .has_headers(false)
        .from_reader(file);

    let mut records = reader.records();

    let header = match records.next() {
        Some(Ok(record)) => decode_row(&record),
        Some(Err(e)) => {
            return Err(AppError::new(
                EXIT_INPUT,
                format!("Failed to read sheet header: {e}"),
            ));
        }
        None => {
            return Err(AppError::new(
                EXIT_INPUT,
                "Uploaded file is empty or could not be parsed.",
            ));
        }
    };

    let mut rows = Vec::new();
    for result in records {
        let record = result.map_err(|e| {
            AppError::new(EXIT_INPUT, format!("Failed to read sheet row: {e}"))
        })?;
        rows.push(decode_row(&record));
    }

    Ok(Sheet { header, rows })
}

fn decode_row(record: &StringRecord) -> Vec<Cell> {
    record.iter().map(decode_cell).collect()
}

/// Type a single raw field.
pub fn decode_cell(raw: &str) -> Cell {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Cell::Empty;
    }
    if let Ok(v) = trimmed.parse::<f64>() {
        if v.is_finite() {
            return Cell::Number(v);
        }
    }
    Cell::Text(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn cells_are_typed_by_content() {
        assert_eq!(decode_cell(""), Cell::Empty);
        assert_eq!(decode_cell("  "), Cell::Empty);
        assert_eq!(decode_cell("44927"), Cell::Number(44_927.0));
        assert_eq!(decode_cell("123.45"), Cell::Number(123.45));
        assert_eq!(
            decode_cell("Petaling Jaya"),
            Cell::Text("Petaling Jaya".to_string())
        );
        // Dates stay text at this layer; the normalizer parses them.
        assert_eq!(
            decode_cell("2023-01-01"),
            Cell::Text("2023-01-01".to_string())
        );
    }

    #[test]
    fn reads_header_and_rows() {
        let mut tmp = std::env::temp_dir();
        tmp.push("lotdash_sheet_test.csv");
        {
            let mut f = File::create(&tmp).unwrap();
            writeln!(f, "Price,Transaction Date,Location").unwrap();
            writeln!(f, "100000,44927,Ipoh").unwrap();
            writeln!(f, "250000,2021-05-01,").unwrap();
        }

        let sheet = read_sheet(&tmp).unwrap();
        assert_eq!(sheet.header.len(), 3);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0][0], Cell::Number(100_000.0));
        assert_eq!(sheet.rows[0][1], Cell::Number(44_927.0));
        assert_eq!(sheet.rows[1][2], Cell::Empty);

        let _ = std::fs::remove_file(&tmp);
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let err = read_sheet(Path::new("definitely_not_here.csv")).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
    }
}

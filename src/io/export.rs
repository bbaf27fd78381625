//! Export statistics outputs to files.
//!
//! Exports are meant to be easy to consume in spreadsheets or downstream
//! scripts:
//!
//! - yearly medians as CSV (one `year,median_price` row per year)
//! - a full summary snapshot as JSON (median, weighted average, series)

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::domain::{Summary, WeightConfig, YearMedian};
use crate::error::{AppError, EXIT_INPUT};

/// Write the yearly-median trend series to a CSV file.
pub fn write_yearly_csv(path: &Path, series: &[YearMedian]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            EXIT_INPUT,
            format!("Failed to create export CSV '{}': {e}", path.display()),
        )
    })?;

    writeln!(file, "year,median_price")
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write export CSV header: {e}")))?;

    for point in series {
        writeln!(file, "{},{:.2}", point.year, point.median_price)
            .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// A portable snapshot of one recomputation.
///
/// The schema carries the weights that produced the weighted average so the
/// file is self-describing.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryFile<'a> {
    pub tool: &'a str,
    pub source: String,
    pub record_count: usize,
    pub weights: WeightConfig,
    pub summary: &'a Summary,
}

/// Write a summary JSON file.
pub fn write_summary_json(
    path: &Path,
    source: &Path,
    record_count: usize,
    weights: &WeightConfig,
    summary: &Summary,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            EXIT_INPUT,
            format!("Failed to create summary JSON '{}': {e}", path.display()),
        )
    })?;

    let snapshot = SummaryFile {
        tool: "lotdash",
        source: source.display().to_string(),
        record_count,
        weights: *weights,
        summary,
    };

    serde_json::to_writer_pretty(file, &snapshot)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write summary JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WeightedAverage;

    #[test]
    fn yearly_csv_round_trips_through_text() {
        let mut tmp = std::env::temp_dir();
        tmp.push("lotdash_export_test.csv");

        let series = vec![
            YearMedian { year: 1995, median_price: 300.0 },
            YearMedian { year: 2021, median_price: 150.5 },
        ];
        write_yearly_csv(&tmp, &series).unwrap();

        let text = std::fs::read_to_string(&tmp).unwrap();
        assert_eq!(text, "year,median_price\n1995,300.00\n2021,150.50\n");

        let _ = std::fs::remove_file(&tmp);
    }

    #[test]
    fn summary_json_is_valid_json() {
        let mut tmp = std::env::temp_dir();
        tmp.push("lotdash_export_test.json");

        let summary = Summary {
            median_price: 150.0,
            weighted_average: WeightedAverage::Price(150.0),
            yearly_medians: vec![YearMedian { year: 2021, median_price: 150.0 }],
        };
        write_summary_json(
            &tmp,
            Path::new("transactions.csv"),
            2,
            &WeightConfig::default(),
            &summary,
        )
        .unwrap();

        let text = std::fs::read_to_string(&tmp).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["tool"], "lotdash");
        assert_eq!(value["record_count"], 2);
        assert_eq!(value["summary"]["median_price"], 150.0);

        let _ = std::fs::remove_file(&tmp);
    }
}

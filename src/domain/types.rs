//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while recomputing statistics
//! - exported to JSON/CSV
//! - rendered by either the CLI report or the TUI

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single decoded spreadsheet cell.
///
/// The sheet decoder is the only producer of these; everything downstream
/// (column resolution, normalization) branches on the cell kind rather than
/// re-parsing raw text.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Date(NaiveDate),
    /// A blank/null cell. Also stands in for cells missing from short rows.
    Empty,
}

impl Cell {
    /// The cell's display form, used when a location cell is not plain text.
    pub fn display_value(&self) -> String {
        match self {
            Cell::Number(v) => format!("{v}"),
            Cell::Text(s) => s.clone(),
            Cell::Date(d) => d.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

/// Resolved column indices for one uploaded sheet.
///
/// Built once per upload by the column resolver and immutable afterward.
/// Price and date are mandatory; a sheet without them never produces a
/// `ColumnMap` at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub price: usize,
    pub date: usize,
    pub location: Option<usize>,
    /// Exact (non-lower-cased) header text of the matched location column.
    ///
    /// Retained for display only; it has no effect on any computation.
    pub location_header: Option<String>,
}

/// One validated shop lot transaction.
///
/// Invariants (enforced by the normalizer):
/// - `year` is the calendar year of `date`
/// - `price > 0`
/// - `location` is `"Unknown"` when the sheet had no usable location cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    pub year: i32,
    pub price: f64,
    pub location: String,
}

impl TransactionRecord {
    pub fn new(date: NaiveDate, price: f64, location: String) -> Self {
        Self {
            date,
            year: date.year(),
            price,
            location,
        }
    }
}

/// The canonical dataset for one upload.
///
/// Replaced wholesale on each successful upload; never mutated in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<TransactionRecord>,
}

impl Dataset {
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All transaction prices, in record order.
    pub fn prices(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.price).collect()
    }

    /// Prices of records whose year falls in the given period.
    pub fn prices_in(&self, period: Period) -> Vec<f64> {
        self.records
            .iter()
            .filter(|r| Period::of_year(r.year) == period)
            .map(|r| r.price)
            .collect()
    }
}

/// The three weighting buckets, keyed by transaction year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// `year >= 2020`
    Recent,
    /// `2000 <= year <= 2019`
    Mid,
    /// `year <= 1999`
    Old,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Recent, Period::Mid, Period::Old];

    /// Classify a transaction year into its bucket.
    pub fn of_year(year: i32) -> Period {
        if year >= 2020 {
            Period::Recent
        } else if year >= 2000 {
            Period::Mid
        } else {
            Period::Old
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Period::Recent => "2020 & later",
            Period::Mid => "2000-2019",
            Period::Old => "1999 & earlier",
        }
    }
}

/// Tolerance when checking that weights sum to 1.0.
///
/// Deliberate floating-point slack; sliders step in increments of 0.05 but
/// accumulate representation error.
pub const WEIGHT_TOLERANCE: f64 = 0.001;

/// Bucket weights for the weighted average.
///
/// Supplied fresh on every statistics call; not persisted by the core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightConfig {
    /// Weight for `year >= 2020`.
    pub recent: f64,
    /// Weight for `2000 <= year <= 2019`.
    pub mid: f64,
    /// Weight for `year <= 1999`.
    pub old: f64,
}

impl WeightConfig {
    pub fn new(recent: f64, mid: f64, old: f64) -> Self {
        Self { recent, mid, old }
    }

    pub fn total(&self) -> f64 {
        self.recent + self.mid + self.old
    }

    /// Whether the weights sum to 1.0 within `WEIGHT_TOLERANCE`.
    pub fn is_balanced(&self) -> bool {
        (self.total() - 1.0).abs() <= WEIGHT_TOLERANCE
    }

    pub fn weight_for(&self, period: Period) -> f64 {
        match period {
            Period::Recent => self.recent,
            Period::Mid => self.mid,
            Period::Old => self.old,
        }
    }
}

impl Default for WeightConfig {
    /// The slider defaults: 0.5 / 0.3 / 0.2 (sums to 1.0).
    fn default() -> Self {
        Self {
            recent: 0.5,
            mid: 0.3,
            old: 0.2,
        }
    }
}

/// Weighted-average outcome.
///
/// Weight imbalance is not an error: the median and trend outputs stay
/// valid, and only this readout degrades to the `N/A` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "price")]
pub enum WeightedAverage {
    Price(f64),
    NotAdjusted,
}

impl WeightedAverage {
    /// Diagnostic message for the display layer (empty when valid).
    pub fn diagnostic(&self) -> &'static str {
        match self {
            WeightedAverage::Price(_) => "",
            WeightedAverage::NotAdjusted => {
                "Weightage is not adjusted properly (sum must be 1.0)"
            }
        }
    }

    pub fn price(&self) -> Option<f64> {
        match self {
            WeightedAverage::Price(v) => Some(*v),
            WeightedAverage::NotAdjusted => None,
        }
    }
}

/// One point of the trend series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearMedian {
    pub year: i32,
    pub median_price: f64,
}

/// All statistics outputs of one recomputation.
///
/// The three outputs are always computed together and handed to the display
/// layer as one value, so the UI can never show a mix of old and new results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub median_price: f64,
    pub weighted_average: WeightedAverage,
    pub yearly_medians: Vec<YearMedian>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_classification_boundaries() {
        assert_eq!(Period::of_year(2020), Period::Recent);
        assert_eq!(Period::of_year(2025), Period::Recent);
        assert_eq!(Period::of_year(2019), Period::Mid);
        assert_eq!(Period::of_year(2000), Period::Mid);
        assert_eq!(Period::of_year(1999), Period::Old);
        assert_eq!(Period::of_year(1850), Period::Old);
    }

    #[test]
    fn weight_balance_tolerance() {
        assert!(WeightConfig::new(0.5, 0.3, 0.2).is_balanced());
        assert!(WeightConfig::new(0.3334, 0.3333, 0.3333).is_balanced());
        assert!(!WeightConfig::new(0.5, 0.5, 0.5).is_balanced());
        assert!(!WeightConfig::new(0.0, 0.0, 0.0).is_balanced());
    }

    #[test]
    fn record_derives_year_from_date() {
        let d = NaiveDate::from_ymd_opt(2021, 7, 14).unwrap();
        let r = TransactionRecord::new(d, 450_000.0, "Subang Jaya".to_string());
        assert_eq!(r.year, 2021);
    }
}

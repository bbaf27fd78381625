//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the ingest/statistics code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{Period, Summary, WeightedAverage};
use crate::session::Session;
use crate::stats;

/// Format the full run summary (dataset stats + readouts + trend table).
pub fn format_report(session: &Session, summary: &Summary) -> String {
    let mut out = String::new();

    out.push_str("=== lotdash - Shop Lot Price Summary ===\n");
    if let Some(source) = session.source() {
        out.push_str(&format!("Sheet: {}\n", source.display()));
    }
    if let Some(ingest) = session.last_ingest() {
        out.push_str(&format!(
            "Rows: read={} used={} rejected={}\n",
            ingest.rows_read, ingest.rows_used, ingest.rows_rejected
        ));
    }
    out.push_str(&format!("Location column: {}\n", session.location_header()));

    out.push_str(&format!("\nMedian price: {}\n", fmt_rm(summary.median_price)));
    out.push_str(&format!(
        "Weighted average: {}\n",
        fmt_weighted(&summary.weighted_average)
    ));
    let diagnostic = summary.weighted_average.diagnostic();
    if !diagnostic.is_empty() {
        out.push_str(&format!("  ({diagnostic})\n"));
    }

    out.push_str("\nBuckets:\n");
    let weights = session.weights();
    for period in Period::ALL {
        let prices = session.dataset().prices_in(period);
        let median = stats::median(&prices);
        out.push_str(&format!(
            "  {:<14} weight={:.2} n={:<5} median={}\n",
            period.display_name(),
            weights.weight_for(period),
            prices.len(),
            fmt_rm(median),
        ));
    }

    out.push_str("\nMedian price by year:\n");
    if summary.yearly_medians.is_empty() {
        out.push_str("  (no data)\n");
    }
    for point in &summary.yearly_medians {
        out.push_str(&format!("  {}  {}\n", point.year, fmt_rm(point.median_price)));
    }

    out
}

/// Format the weighted average readout (`RM ...` or the `N/A` sentinel).
pub fn fmt_weighted(weighted: &WeightedAverage) -> String {
    match weighted {
        WeightedAverage::Price(v) => fmt_rm(*v),
        WeightedAverage::NotAdjusted => "N/A".to_string(),
    }
}

/// Format a price as Malaysian Ringgit with comma grouping, 2 decimals.
pub fn fmt_rm(value: f64) -> String {
    format!("RM {}", group_thousands(value))
}

fn group_thousands(value: f64) -> String {
    let text = format!("{:.2}", value.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::YearMedian;

    #[test]
    fn rm_formatting_groups_thousands() {
        assert_eq!(fmt_rm(0.0), "RM 0.00");
        assert_eq!(fmt_rm(5.0), "RM 5.00");
        assert_eq!(fmt_rm(1234.5), "RM 1,234.50");
        assert_eq!(fmt_rm(1_234_567.891), "RM 1,234,567.89");
        assert_eq!(fmt_rm(-1234.5), "RM -1,234.50");
    }

    #[test]
    fn weighted_sentinel_renders_as_na() {
        assert_eq!(fmt_weighted(&WeightedAverage::NotAdjusted), "N/A");
        assert_eq!(fmt_weighted(&WeightedAverage::Price(150.0)), "RM 150.00");
    }

    #[test]
    fn report_includes_readouts_and_trend() {
        let session = Session::new();
        let summary = Summary {
            median_price: 150.0,
            weighted_average: WeightedAverage::Price(150.0),
            yearly_medians: vec![YearMedian { year: 2021, median_price: 150.0 }],
        };
        let text = format_report(&session, &summary);
        assert!(text.contains("Median price: RM 150.00"));
        assert!(text.contains("Weighted average: RM 150.00"));
        assert!(text.contains("2021  RM 150.00"));
    }

    #[test]
    fn report_surfaces_weight_diagnostic() {
        let session = Session::new();
        let summary = Summary {
            median_price: 150.0,
            weighted_average: WeightedAverage::NotAdjusted,
            yearly_medians: Vec::new(),
        };
        let text = format_report(&session, &summary);
        assert!(text.contains("Weighted average: N/A"));
        assert!(text.contains("Weightage is not adjusted properly (sum must be 1.0)"));
        assert!(text.contains("(no data)"));
    }
}

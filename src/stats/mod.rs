//! Price statistics over the canonical dataset.
//!
//! Everything in here is a pure function: the engine holds no state between
//! calls and is re-invoked in full whenever the dataset or the weight
//! configuration changes. `compute_summary` bundles the three outputs so the
//! display layer always receives one coherent snapshot.

use crate::domain::{Dataset, Period, Summary, WeightConfig, WeightedAverage, YearMedian};

/// Median of a price list.
///
/// Returns `0.0` for an empty input. Even-length inputs take the arithmetic
/// mean of the two middle elements; that tie-break is relied upon by the
/// weighted average and must not change.
pub fn median(prices: &[f64]) -> f64 {
    if prices.is_empty() {
        return 0.0;
    }
    let mut sorted = prices.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 != 0 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

/// Weighted average of per-period median prices.
///
/// If the weights do not sum to 1.0 (within `WEIGHT_TOLERANCE`) no
/// computation happens and the `N/A` sentinel is returned.
///
/// A period with no matching records contributes exactly `0` rather than
/// raising an error, so its weight silently drops out of the result. That is
/// intentional existing behavior, preserved as-is.
pub fn weighted_average(dataset: &Dataset, weights: &WeightConfig) -> WeightedAverage {
    if !weights.is_balanced() {
        return WeightedAverage::NotAdjusted;
    }

    let mut sum = 0.0;
    for period in Period::ALL {
        let prices = dataset.prices_in(period);
        if !prices.is_empty() {
            sum += median(&prices) * weights.weight_for(period);
        }
    }

    WeightedAverage::Price(sum)
}

/// Median price per transaction year, sorted by ascending year.
///
/// An empty dataset yields an empty series; the chart renders a placeholder
/// for that case rather than treating it as an error.
pub fn yearly_median_series(dataset: &Dataset) -> Vec<YearMedian> {
    use std::collections::BTreeMap;

    let mut by_year: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for record in dataset.records() {
        by_year.entry(record.year).or_default().push(record.price);
    }

    by_year
        .into_iter()
        .map(|(year, prices)| YearMedian {
            year,
            median_price: median(&prices),
        })
        .collect()
}

/// Recompute all three statistics outputs together.
pub fn compute_summary(dataset: &Dataset, weights: &WeightConfig) -> Summary {
    Summary {
        median_price: median(&dataset.prices()),
        weighted_average: weighted_average(dataset, weights),
        yearly_medians: yearly_median_series(dataset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransactionRecord;
    use chrono::NaiveDate;

    fn record(year: i32, price: f64) -> TransactionRecord {
        let date = NaiveDate::from_ymd_opt(year, 6, 15).unwrap();
        TransactionRecord::new(date, price, "Unknown".to_string())
    }

    #[test]
    fn median_empty_is_zero() {
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn median_single_element() {
        assert_eq!(median(&[5.0]), 5.0);
    }

    #[test]
    fn median_even_length_averages_middles() {
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5);
    }

    #[test]
    fn median_odd_length_takes_middle() {
        assert_eq!(median(&[9.0, 1.0, 5.0]), 5.0);
    }

    #[test]
    fn median_is_order_invariant() {
        let a = median(&[4.0, 1.0, 3.0, 2.0]);
        let b = median(&[1.0, 2.0, 3.0, 4.0]);
        let c = median(&[3.0, 4.0, 2.0, 1.0]);
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn weighted_average_with_balanced_weights() {
        let dataset = Dataset::new(vec![
            record(2021, 100.0),
            record(2010, 200.0),
            record(1995, 300.0),
        ]);
        let weights = WeightConfig::new(0.5, 0.3, 0.2);
        let got = weighted_average(&dataset, &weights);
        assert_eq!(got, WeightedAverage::Price(100.0 * 0.5 + 200.0 * 0.3 + 300.0 * 0.2));
        assert_eq!(got.diagnostic(), "");
    }

    #[test]
    fn weighted_average_rejects_imbalanced_weights() {
        let dataset = Dataset::new(vec![record(2021, 100.0)]);
        let weights = WeightConfig::new(0.5, 0.5, 0.5);
        let got = weighted_average(&dataset, &weights);
        assert_eq!(got, WeightedAverage::NotAdjusted);
        assert_eq!(
            got.diagnostic(),
            "Weightage is not adjusted properly (sum must be 1.0)"
        );
    }

    #[test]
    fn weighted_average_single_bucket_weights() {
        // Weights 1/0/0: only the recent bucket counts.
        let dataset = Dataset::new(vec![
            record(2021, 100.0),
            record(2021, 200.0),
            record(1995, 300.0),
        ]);
        let weights = WeightConfig::new(1.0, 0.0, 0.0);
        assert_eq!(weighted_average(&dataset, &weights), WeightedAverage::Price(150.0));
    }

    #[test]
    fn weighted_average_empty_bucket_contributes_nothing() {
        // No old-period records: that 0.2 weight silently drops out.
        let dataset = Dataset::new(vec![record(2021, 100.0), record(2010, 200.0)]);
        let weights = WeightConfig::new(0.5, 0.3, 0.2);
        assert_eq!(
            weighted_average(&dataset, &weights),
            WeightedAverage::Price(100.0 * 0.5 + 200.0 * 0.3)
        );
    }

    #[test]
    fn yearly_series_sorted_ascending() {
        let dataset = Dataset::new(vec![
            record(2021, 100.0),
            record(1995, 300.0),
            record(2021, 200.0),
            record(2010, 400.0),
        ]);
        let series = yearly_median_series(&dataset);
        let years: Vec<i32> = series.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![1995, 2010, 2021]);
        assert_eq!(series[2].median_price, 150.0);
    }

    #[test]
    fn yearly_series_empty_dataset_is_empty() {
        assert!(yearly_median_series(&Dataset::default()).is_empty());
    }

    #[test]
    fn summary_outputs_are_consistent() {
        let dataset = Dataset::new(vec![record(2021, 100.0), record(2021, 200.0)]);
        let weights = WeightConfig::new(1.0, 0.0, 0.0);
        let summary = compute_summary(&dataset, &weights);
        assert_eq!(summary.median_price, 150.0);
        assert_eq!(summary.weighted_average, WeightedAverage::Price(150.0));
        assert_eq!(summary.yearly_medians.len(), 1);
    }
}

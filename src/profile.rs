//! Historical baseline
//! Reduces the dataset to the means and dispersions that parameterize the profit model

use tracing::debug;

use crate::error::{Result, SimError};
use crate::models::{BusinessRecord, HistoricalProfile};

/// Build the baseline profile from the historical records
///
/// Standard deviations use the sample (N-1) formula, so at least two records
/// are required. A single record is rejected rather than treated as zero
/// dispersion.
pub fn build_profile(records: &[BusinessRecord]) -> Result<HistoricalProfile> {
    match records.len() {
        0 => return Err(SimError::EmptyDataset),
        1 => return Err(SimError::InsufficientData { records: 1 }),
        _ => {}
    }

    let prices: Vec<f64> = records.iter().map(|r| r.price).collect();
    let units: Vec<f64> = records.iter().map(|r| r.units_sold).collect();
    let costs: Vec<f64> = records.iter().map(|r| r.total_cost).collect();

    let (mean_units, std_units) = mean_and_sample_std(&units);
    let (mean_cost, std_cost) = mean_and_sample_std(&costs);

    let profile = HistoricalProfile {
        mean_price: mean(&prices),
        mean_units,
        std_units,
        mean_cost,
        std_cost,
    };

    for (name, value) in [
        ("mean_price", profile.mean_price),
        ("mean_units", profile.mean_units),
        ("std_units", profile.std_units),
        ("mean_cost", profile.mean_cost),
        ("std_cost", profile.std_cost),
    ] {
        if !value.is_finite() {
            return Err(SimError::InvalidParameter { name, value });
        }
    }

    debug!(
        records = records.len(),
        mean_price = profile.mean_price,
        mean_units = profile.mean_units,
        std_units = profile.std_units,
        mean_cost = profile.mean_cost,
        std_cost = profile.std_cost,
        "historical profile built"
    );

    Ok(profile)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn mean_and_sample_std(values: &[f64]) -> (f64, f64) {
    let mean = mean(values);
    let variance = values
        .iter()
        .map(|v| (v - mean).powi(2))
        .sum::<f64>()
        / (values.len() - 1) as f64;
    (mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn record(price: f64, units_sold: f64, total_cost: f64) -> BusinessRecord {
        BusinessRecord {
            price,
            units_sold,
            total_cost,
            profit: price * units_sold - total_cost,
            current_ratio: 1.5,
            revenue: None,
        }
    }

    #[test]
    fn test_build_profile() {
        let records = vec![
            record(10.0, 90.0, 450.0),
            record(12.0, 100.0, 500.0),
            record(14.0, 110.0, 550.0),
        ];
        let profile = build_profile(&records).unwrap();

        assert_relative_eq!(profile.mean_price, 12.0);
        assert_relative_eq!(profile.mean_units, 100.0);
        assert_relative_eq!(profile.std_units, 10.0);
        assert_relative_eq!(profile.mean_cost, 500.0);
        assert_relative_eq!(profile.std_cost, 50.0);
    }

    #[test]
    fn test_two_records_use_sample_std() {
        let records = vec![record(10.0, 90.0, 400.0), record(10.0, 110.0, 600.0)];
        let profile = build_profile(&records).unwrap();

        // Population std would be 10; sample std is 10 * sqrt(2)
        assert_relative_eq!(profile.std_units, 10.0 * 2f64.sqrt(), max_relative = 1e-12);
        assert_relative_eq!(profile.std_cost, 100.0 * 2f64.sqrt(), max_relative = 1e-12);
    }

    #[test]
    fn test_empty_dataset() {
        assert_eq!(build_profile(&[]).unwrap_err(), SimError::EmptyDataset);
    }

    #[test]
    fn test_single_record_is_insufficient() {
        let records = vec![record(10.0, 100.0, 500.0)];
        assert_eq!(
            build_profile(&records).unwrap_err(),
            SimError::InsufficientData { records: 1 }
        );
    }

    #[test]
    fn test_constant_columns_have_zero_std() {
        let records = vec![record(10.0, 100.0, 500.0); 4];
        let profile = build_profile(&records).unwrap();
        assert_eq!(profile.std_units, 0.0);
        assert_eq!(profile.std_cost, 0.0);
    }

    proptest! {
        #[test]
        fn prop_std_is_non_negative(
            rows in prop::collection::vec((0.0..1e4f64, 0.0..1e5f64, 0.0..1e6f64), 2..50)
        ) {
            let records: Vec<_> = rows.iter().map(|&(p, u, c)| record(p, u, c)).collect();
            let profile = build_profile(&records).unwrap();
            prop_assert!(profile.std_units >= 0.0);
            prop_assert!(profile.std_cost >= 0.0);
        }
    }
}

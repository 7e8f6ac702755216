//! Profit sampling module
//! Draws units sold and total cost from normal distributions and turns each pair into a profit

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;
use tracing::debug;

use crate::error::{Result, SimError};
use crate::models::{AdjustedParameters, HistoricalProfile, SimulationResult};

/// Run `sample_count` independent draws of the profit model
///
/// With `Some(seed)` the generator is a `ChaCha8Rng` seeded via
/// `seed_from_u64`, so the same seed and inputs always give the same profits.
/// Without a seed the generator is seeded from OS entropy.
pub fn sample_profits(
    adjusted: &AdjustedParameters,
    profile: &HistoricalProfile,
    sample_count: usize,
    rng_seed: Option<u64>,
) -> Result<SimulationResult> {
    let mut rng = match rng_seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    sample_profits_with(&mut rng, adjusted, profile, sample_count)
}

/// Same as [`sample_profits`] but driven by a caller-owned generator
///
/// Each sample consumes one units draw followed by one cost draw. Both are
/// floored at zero, which truncates the left tail of the normal rather than
/// resampling it.
pub fn sample_profits_with<R: Rng + ?Sized>(
    rng: &mut R,
    adjusted: &AdjustedParameters,
    profile: &HistoricalProfile,
    sample_count: usize,
) -> Result<SimulationResult> {
    if sample_count == 0 {
        return Err(SimError::InvalidSampleCount(sample_count));
    }

    let units_dist = normal("adjusted_units", adjusted.adjusted_units, profile.std_units)?;
    let cost_dist = normal("mean_cost", profile.mean_cost, profile.std_cost)?;
    let price = adjusted.adjusted_price;

    let mut profits = Vec::with_capacity(sample_count);
    let mut units_floored = 0usize;
    let mut cost_floored = 0usize;

    for _ in 0..sample_count {
        let raw_units: f64 = rng.sample(units_dist);
        let raw_cost: f64 = rng.sample(cost_dist);

        if raw_units < 0.0 {
            units_floored += 1;
        }
        if raw_cost < 0.0 {
            cost_floored += 1;
        }

        let units = raw_units.max(0.0);
        let cost = raw_cost.max(0.0);
        let profit = price * units - cost;
        if !profit.is_finite() {
            return Err(SimError::InvalidParameter {
                name: "profit",
                value: profit,
            });
        }
        profits.push(profit);
    }

    debug!(sample_count, units_floored, cost_floored, "profit samples drawn");

    Ok(SimulationResult { profits })
}

fn normal(name: &'static str, mean: f64, std_dev: f64) -> Result<Normal<f64>> {
    if !mean.is_finite() {
        return Err(SimError::InvalidParameter { name, value: mean });
    }
    if !std_dev.is_finite() {
        return Err(SimError::InvalidParameter {
            name: "std_dev",
            value: std_dev,
        });
    }
    Normal::new(mean, std_dev).map_err(|_| SimError::InvalidParameter {
        name: "std_dev",
        value: std_dev,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};

    fn profile() -> HistoricalProfile {
        HistoricalProfile {
            mean_price: 10.0,
            mean_units: 100.0,
            std_units: 10.0,
            mean_cost: 500.0,
            std_cost: 50.0,
        }
    }

    fn adjusted() -> AdjustedParameters {
        AdjustedParameters {
            adjusted_price: 10.5,
            adjusted_units: 110.0,
        }
    }

    #[test]
    fn test_sample_length_matches_count() {
        for count in [1, 7, 1_000] {
            let result = sample_profits(&adjusted(), &profile(), count, Some(1)).unwrap();
            assert_eq!(result.sample_count(), count);
        }
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let a = sample_profits(&adjusted(), &profile(), 500, Some(42)).unwrap();
        let b = sample_profits(&adjusted(), &profile(), 500, Some(42)).unwrap();
        assert_eq!(a.profits, b.profits);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = sample_profits(&adjusted(), &profile(), 100, Some(1)).unwrap();
        let b = sample_profits(&adjusted(), &profile(), 100, Some(2)).unwrap();
        assert_ne!(a.profits, b.profits);
    }

    #[test]
    fn test_unseeded_run_has_requested_length() {
        let result = sample_profits(&adjusted(), &profile(), 64, None).unwrap();
        assert_eq!(result.sample_count(), 64);
    }

    #[test]
    fn test_draw_order_units_then_cost() {
        let mut reference = ChaCha8Rng::seed_from_u64(7);
        let units_dist = Normal::new(110.0, 10.0).unwrap();
        let cost_dist = Normal::new(500.0, 50.0).unwrap();
        let expected: Vec<f64> = (0..50)
            .map(|_| {
                let units: f64 = reference.sample(units_dist);
                let cost: f64 = reference.sample(cost_dist);
                10.5 * units.max(0.0) - cost.max(0.0)
            })
            .collect();

        let result = sample_profits(&adjusted(), &profile(), 50, Some(7)).unwrap();
        assert_eq!(result.profits, expected);
    }

    #[test]
    fn test_negative_draws_are_floored() {
        // Unit mean far below zero: every units draw floors to 0
        let adjusted = AdjustedParameters {
            adjusted_price: 10.0,
            adjusted_units: -1_000.0,
        };
        let result = sample_profits(&adjusted, &profile(), 200, Some(3)).unwrap();
        assert!(result.profits.iter().all(|&p| p <= 0.0));

        // Cost mean far below zero: every cost draw floors to 0
        let cheap = HistoricalProfile {
            mean_cost: -1_000.0,
            ..profile()
        };
        let result = sample_profits(&self::adjusted(), &cheap, 200, Some(3)).unwrap();
        assert!(result.profits.iter().all(|&p| p >= 0.0));
    }

    #[test]
    fn test_zero_dispersion_is_deterministic() {
        let flat = HistoricalProfile {
            std_units: 0.0,
            std_cost: 0.0,
            ..profile()
        };
        let result = sample_profits(&adjusted(), &flat, 10, Some(9)).unwrap();
        for profit in result.profits {
            assert_relative_eq!(profit, 10.5 * 110.0 - 500.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_zero_sample_count_rejected() {
        assert_eq!(
            sample_profits(&adjusted(), &profile(), 0, Some(1)).unwrap_err(),
            SimError::InvalidSampleCount(0)
        );
    }

    #[test]
    fn test_non_finite_dispersion_rejected() {
        let broken = HistoricalProfile {
            std_cost: f64::NAN,
            ..profile()
        };
        assert!(matches!(
            sample_profits(&adjusted(), &broken, 10, Some(1)),
            Err(SimError::InvalidParameter { name: "std_dev", .. })
        ));
    }

    #[test]
    fn test_overflowing_profit_rejected() {
        let huge = HistoricalProfile {
            mean_price: 1e200,
            mean_units: 1e200,
            ..profile()
        };
        let adjusted = AdjustedParameters {
            adjusted_price: 1e200,
            adjusted_units: 1e200,
        };
        assert!(matches!(
            sample_profits(&adjusted, &huge, 10, Some(1)),
            Err(SimError::InvalidParameter { name: "profit", .. })
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_length_equals_sample_count(count in 1usize..2_000, seed in any::<u64>()) {
            let result = sample_profits(&adjusted(), &profile(), count, Some(seed)).unwrap();
            prop_assert_eq!(result.profits.len(), count);
        }
    }
}

//! Scenario adjustment
//! Applies the price, marketing and macro levers to the historical baseline

use crate::error::{Result, SimError};
use crate::models::{AdjustedParameters, HistoricalProfile, ScenarioParameters};

/// Derive the adjusted price and unit mean for a scenario
///
/// No clamping is applied: a boost plus shock below -100% yields a negative
/// unit mean, which the sampler's zero floor then absorbs draw by draw.
pub fn adjust(
    profile: &HistoricalProfile,
    params: &ScenarioParameters,
) -> Result<AdjustedParameters> {
    check_finite("price_change_pct", params.price_change_pct)?;
    check_finite("marketing_boost_pct", params.marketing_boost_pct)?;
    check_finite("economic_shock", params.economic_shock)?;

    let adjusted_price = profile.mean_price * (1.0 + params.price_change_pct);
    let adjusted_units =
        profile.mean_units * (1.0 + params.marketing_boost_pct + params.economic_shock);

    check_finite("adjusted_price", adjusted_price)?;
    check_finite("adjusted_units", adjusted_units)?;

    Ok(AdjustedParameters {
        adjusted_price,
        adjusted_units,
    })
}

fn check_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn profile() -> HistoricalProfile {
        HistoricalProfile {
            mean_price: 10.0,
            mean_units: 100.0,
            std_units: 10.0,
            mean_cost: 500.0,
            std_cost: 50.0,
        }
    }

    #[test]
    fn test_adjust_reference_scenario() {
        let params = ScenarioParameters {
            price_change_pct: 0.05,
            marketing_boost_pct: 0.10,
            economic_shock: 0.0,
            ..ScenarioParameters::default()
        };
        let adjusted = adjust(&profile(), &params).unwrap();

        assert_relative_eq!(adjusted.adjusted_price, 10.5, max_relative = 1e-12);
        assert_relative_eq!(adjusted.adjusted_units, 110.0, max_relative = 1e-12);
    }

    #[test]
    fn test_shock_offsets_marketing() {
        let params = ScenarioParameters {
            price_change_pct: -0.2,
            marketing_boost_pct: 0.3,
            economic_shock: -0.5,
            ..ScenarioParameters::default()
        };
        let adjusted = adjust(&profile(), &params).unwrap();

        assert_relative_eq!(adjusted.adjusted_price, 8.0, max_relative = 1e-12);
        assert_relative_eq!(adjusted.adjusted_units, 80.0, max_relative = 1e-12);
    }

    #[test]
    fn test_negative_unit_mean_is_not_clamped() {
        let params = ScenarioParameters {
            marketing_boost_pct: 0.0,
            economic_shock: -1.5,
            ..ScenarioParameters::default()
        };
        let adjusted = adjust(&profile(), &params).unwrap();
        assert_relative_eq!(adjusted.adjusted_units, -50.0, max_relative = 1e-12);
    }

    #[test]
    fn test_non_finite_inputs_rejected() {
        let params = ScenarioParameters {
            economic_shock: f64::NAN,
            ..ScenarioParameters::default()
        };
        match adjust(&profile(), &params).unwrap_err() {
            SimError::InvalidParameter { name, value } => {
                assert_eq!(name, "economic_shock");
                assert!(value.is_nan());
            }
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }

        let params = ScenarioParameters {
            price_change_pct: f64::INFINITY,
            ..ScenarioParameters::default()
        };
        assert!(matches!(
            adjust(&profile(), &params),
            Err(SimError::InvalidParameter { name: "price_change_pct", .. })
        ));
    }
}

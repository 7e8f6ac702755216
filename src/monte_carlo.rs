//! Monte Carlo pipeline
//! Runs profile -> adjust -> sample -> analyze -> decide for one scenario

use tracing::info;

use crate::dataset::latest_actual_profit;
use crate::error::{Result, SimError};
use crate::models::{BusinessRecord, HistoricalProfile, ScenarioParameters, SimulationOutcome};
use crate::policy::decide;
use crate::profile::build_profile;
use crate::risk::analyze;
use crate::sampler::sample_profits;
use crate::scenario::adjust;

/// Run a full simulation from the raw historical records
pub fn run_simulation(
    records: &[BusinessRecord],
    params: &ScenarioParameters,
    rng_seed: Option<u64>,
) -> Result<SimulationOutcome> {
    let profile = build_profile(records)?;
    let latest = latest_actual_profit(records)?;
    run_with_profile(&profile, latest, params, rng_seed)
}

/// Run a simulation against a profile built earlier from the same dataset
pub fn run_with_profile(
    profile: &HistoricalProfile,
    latest_actual_profit: f64,
    params: &ScenarioParameters,
    rng_seed: Option<u64>,
) -> Result<SimulationOutcome> {
    if params.sample_count == 0 {
        return Err(SimError::InvalidSampleCount(0));
    }
    if !latest_actual_profit.is_finite() {
        return Err(SimError::InvalidParameter {
            name: "latest_actual_profit",
            value: latest_actual_profit,
        });
    }

    info!(
        samples = params.sample_count,
        seed = ?rng_seed,
        risk_appetite = ?params.risk_appetite,
        "starting Monte Carlo run"
    );

    let adjusted = adjust(profile, params)?;
    let result = sample_profits(&adjusted, profile, params.sample_count, rng_seed)?;
    let report = analyze(&result)?;
    let verdict = decide(&report, latest_actual_profit, params.risk_appetite);

    info!(
        verdict = %verdict.label,
        expected_profit = report.expected_profit,
        loss_probability_pct = report.loss_probability_pct,
        "Monte Carlo run complete"
    );

    Ok(SimulationOutcome {
        scenario: params.clone(),
        seed: rng_seed,
        profile: *profile,
        adjusted,
        latest_actual_profit,
        report,
        verdict,
        result,
    })
}

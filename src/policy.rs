//! Strategic decision policy
//!
//! Rules are checked top to bottom and the first match wins. The conditions
//! overlap, so the order below is part of the contract:
//!
//! 1. expected profit beats the latest actual by 30% with loss probability
//!    under 15% → `HYPER_GROWTH`
//! 2. loss probability above 35% → `DEFENSIVE`
//! 3. high risk appetite and the 99th percentile more than doubles the latest
//!    actual → `HIGH_RISK_HIGH_REWARD`
//! 4. otherwise → `SMART_CONTROLLED_EXPANSION`

use crate::models::{RiskAppetite, RiskReport, Verdict, VerdictLabel};

const GROWTH_MULTIPLIER: f64 = 1.3;
const GROWTH_MAX_LOSS_PCT: f64 = 15.0;
const DEFENSIVE_LOSS_PCT: f64 = 35.0;
const BOLD_UPSIDE_MULTIPLIER: f64 = 2.0;

/// Pick the verdict for a risk report. Total over all finite inputs.
pub fn decide(
    report: &RiskReport,
    latest_actual_profit: f64,
    risk_appetite: RiskAppetite,
) -> Verdict {
    classify(report, latest_actual_profit, risk_appetite).into()
}

fn classify(
    report: &RiskReport,
    latest_actual_profit: f64,
    risk_appetite: RiskAppetite,
) -> VerdictLabel {
    if report.expected_profit > latest_actual_profit * GROWTH_MULTIPLIER
        && report.loss_probability_pct < GROWTH_MAX_LOSS_PCT
    {
        VerdictLabel::HyperGrowth
    } else if report.loss_probability_pct > DEFENSIVE_LOSS_PCT {
        VerdictLabel::Defensive
    } else if risk_appetite == RiskAppetite::High
        && report.best_case_99pct > latest_actual_profit * BOLD_UPSIDE_MULTIPLIER
    {
        VerdictLabel::HighRiskHighReward
    } else {
        VerdictLabel::SmartControlledExpansion
    }
}

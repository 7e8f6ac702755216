//! Risk statistics and statistical analysis module

use tracing::debug;

use crate::error::{Result, SimError};
use crate::models::{HistogramBin, RiskReport, SimulationResult};

/// Reduce a simulation result to its risk report
///
/// Percentiles use linear interpolation between order statistics: with the
/// profits sorted ascending and `h = p/100 * (n - 1)`, the value is
/// `x[floor(h)] + (h - floor(h)) * (x[ceil(h)] - x[floor(h)])`.
pub fn analyze(result: &SimulationResult) -> Result<RiskReport> {
    let profits = &result.profits;
    if profits.is_empty() {
        return Err(SimError::EmptySample);
    }

    if let Some(&bad) = profits.iter().find(|p| !p.is_finite()) {
        return Err(SimError::InvalidParameter {
            name: "profit",
            value: bad,
        });
    }

    let n = profits.len() as f64;
    let expected_profit = profits.iter().sum::<f64>() / n;
    if !expected_profit.is_finite() {
        return Err(SimError::InvalidParameter {
            name: "expected_profit",
            value: expected_profit,
        });
    }
    let losses = profits.iter().filter(|&&p| p < 0.0).count();
    let loss_probability_pct = 100.0 * losses as f64 / n;

    let mut sorted = profits.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let report = RiskReport {
        expected_profit,
        worst_case_1pct: percentile(&sorted, 1.0)?,
        best_case_99pct: percentile(&sorted, 99.0)?,
        loss_probability_pct,
        value_at_risk_95: percentile(&sorted, 5.0)?,
    };

    debug!(
        expected_profit = report.expected_profit,
        var_95 = report.value_at_risk_95,
        worst_case = report.worst_case_1pct,
        best_case = report.best_case_99pct,
        loss_probability_pct = report.loss_probability_pct,
        "risk report computed"
    );

    Ok(report)
}

/// Linear-interpolated percentile of an ascending slice
pub fn percentile(sorted: &[f64], p: f64) -> Result<f64> {
    let last = sorted.len().checked_sub(1).ok_or(SimError::EmptySample)?;
    let rank = (p / 100.0).clamp(0.0, 1.0) * last as f64;
    let lo = (rank.floor() as usize).min(last);
    let hi = (rank.ceil() as usize).min(last);
    if lo == hi {
        return Ok(sorted[lo]);
    }
    let weight = rank - lo as f64;
    Ok(sorted[lo] + weight * (sorted[hi] - sorted[lo]))
}

/// Upside relative to the 1% worst case, `best / |worst|`
///
/// Returns 0 when the worst case is exactly zero.
pub fn upside_downside_ratio(report: &RiskReport) -> f64 {
    let downside = report.worst_case_1pct.abs();
    if downside == 0.0 {
        0.0
    } else {
        report.best_case_99pct / downside
    }
}

/// Equal-width histogram over [min, max]
///
/// The maximum lands in the last bin. When every profit is identical a single
/// bin holds the whole sample.
pub fn histogram(profits: &[f64], bins: usize) -> Vec<HistogramBin> {
    if profits.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = profits.iter().copied().fold(f64::INFINITY, f64::min);
    let max = profits.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max <= min {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: profits.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &p in profits {
        let idx = (((p - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count,
        })
        .collect()
}

//! Reporting and output formatting module
//! Handles all console output and result presentation

use serde::Serialize;

use crate::models::{
    AdjustedParameters, BusinessRecord, HistogramBin, HistoricalProfile, KeyMetrics, RiskReport,
    ScenarioParameters, SimulationOutcome, Verdict,
};
use crate::risk::{histogram, upside_downside_ratio};

const BAR_WIDTH: usize = 50;
const PREVIEW_ROWS: usize = 5;

/// Display the first dataset rows and the headline metrics
pub fn display_key_metrics(metrics: &KeyMetrics, records: &[BusinessRecord]) {
    println!("╔══════════════════════════════════════════════════════════════════════════════╗");
    println!("║                      AI BUSINESS DECISION SIMULATOR                          ║");
    println!("╚══════════════════════════════════════════════════════════════════════════════╝\n");

    println!(
        "Dataset Preview (first {} of {} records):",
        records.len().min(PREVIEW_ROWS),
        records.len()
    );
    for line in preview_lines(records, PREVIEW_ROWS) {
        println!("  {}", line);
    }
    println!();

    println!("Key Business Metrics ({} records):", metrics.records);
    println!("  Average Profit:         ${:.2}", metrics.average_profit);
    match metrics.average_revenue {
        Some(revenue) => println!("  Average Revenue:        ${:.2}", revenue),
        None => println!("  Average Revenue:        n/a"),
    }
    println!("  Average Current Ratio:  {:.2}", metrics.average_current_ratio);
    println!(
        "  Latest Period:          Profit ${:.2}, Current Ratio {:.2}\n",
        metrics.latest_profit, metrics.latest_current_ratio
    );
}

fn preview_lines(records: &[BusinessRecord], rows: usize) -> Vec<String> {
    let mut lines = vec![format!(
        "{:>10} {:>10} {:>12} {:>12} {:>12} {:>8}",
        "Price", "Units", "Revenue", "Total Cost", "Profit", "Ratio"
    )];
    for r in records.iter().take(rows) {
        let revenue = r
            .revenue
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!(
            "{:>10.2} {:>10.0} {:>12} {:>12.2} {:>12.2} {:>8.2}",
            r.price, r.units_sold, revenue, r.total_cost, r.profit, r.current_ratio
        ));
    }
    lines
}

/// Display the scenario levers and the parameters they produce
pub fn display_scenario(outcome: &SimulationOutcome) {
    let s = &outcome.scenario;
    println!("Scenario:");
    println!(
        "  Price change: {:+.1}% | Marketing boost: {:+.1}% | Economic shock: {:+.1}%",
        s.price_change_pct * 100.0,
        s.marketing_boost_pct * 100.0,
        s.economic_shock * 100.0
    );
    println!(
        "  Risk appetite: {} | Simulations: {} | Seed: {}",
        s.risk_appetite,
        s.sample_count,
        outcome
            .seed
            .map(|seed| seed.to_string())
            .unwrap_or_else(|| "entropy".to_string())
    );
    println!(
        "  Baseline: price ${:.2}, units {:.1} ± {:.1}, cost ${:.2} ± ${:.2}",
        outcome.profile.mean_price,
        outcome.profile.mean_units,
        outcome.profile.std_units,
        outcome.profile.mean_cost,
        outcome.profile.std_cost
    );
    println!(
        "  Adjusted: price ${:.2}, units {:.1}\n",
        outcome.adjusted.adjusted_price, outcome.adjusted.adjusted_units
    );
}

/// Display the risk report
pub fn display_risk_report(outcome: &SimulationOutcome) {
    let r = &outcome.report;
    println!("Monte Carlo Risk Simulation:");
    println!("  Expected Profit:        ${:.2}", r.expected_profit);
    println!("  Loss Probability:       {:.2}%", r.loss_probability_pct);
    println!("  Value at Risk (95%):    ${:.2}", r.value_at_risk_95);
    println!("  Worst Case (1%):        ${:.2}", r.worst_case_1pct);
    println!("  Best Case (99%):        ${:.2}\n", r.best_case_99pct);
}

/// Display an ASCII histogram of the simulated profits
///
/// `E` marks the bucket holding the expected profit, `V` the VaR bucket.
pub fn display_distribution(outcome: &SimulationOutcome, bins: usize) {
    let buckets = histogram(&outcome.result.profits, bins);
    let Some(peak) = buckets.iter().map(|b| b.count).max() else {
        return;
    };

    println!("Profit Distribution:");
    let last = buckets.len() - 1;
    for (i, bucket) in buckets.iter().enumerate() {
        let bar_len = if peak == 0 { 0 } else { bucket.count * BAR_WIDTH / peak };
        let marker = markers(
            bucket,
            i == last,
            outcome.report.expected_profit,
            outcome.report.value_at_risk_95,
        );
        println!(
            "  {:>12.2} | {:<width$} {:>5} {}",
            bucket.lower,
            "█".repeat(bar_len),
            bucket.count,
            marker,
            width = BAR_WIDTH
        );
    }
    println!();
}

// Buckets are half-open except the last, matching how `histogram` counts
fn markers(bucket: &HistogramBin, is_last: bool, expected: f64, var_95: f64) -> &'static str {
    let contains =
        |x: f64| x >= bucket.lower && (x < bucket.upper || (is_last && x <= bucket.upper));
    match (contains(expected), contains(var_95)) {
        (true, true) => "<- E V",
        (true, false) => "<- E",
        (false, true) => "<- V",
        (false, false) => "",
    }
}

/// Display the verdict and the closing insight
pub fn display_verdict(outcome: &SimulationOutcome) {
    println!("╔══════════════════════════════════════════════════════════════════════════════╗");
    println!("║                        STRATEGIC RECOMMENDATION                              ║");
    println!("╚══════════════════════════════════════════════════════════════════════════════╝\n");

    println!("Final Decision: {}", outcome.verdict.label);
    println!("  {}", outcome.verdict.explanation);
    println!(
        "\nBenchmarked against latest actual profit of ${:.2}.",
        outcome.latest_actual_profit
    );
    println!(
        "Upside potential is {:.2}x the worst-case downside.",
        upside_downside_ratio(&outcome.report)
    );
}

#[derive(Serialize)]
struct JsonReport<'a> {
    key_metrics: &'a KeyMetrics,
    scenario: &'a ScenarioParameters,
    seed: Option<u64>,
    profile: &'a HistoricalProfile,
    adjusted: &'a AdjustedParameters,
    latest_actual_profit: f64,
    report: &'a RiskReport,
    upside_downside_ratio: f64,
    verdict: &'a Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    profits: Option<&'a [f64]>,
}

/// Render an outcome as pretty-printed JSON
pub fn render_json(
    outcome: &SimulationOutcome,
    metrics: &KeyMetrics,
    include_samples: bool,
) -> serde_json::Result<String> {
    let report = JsonReport {
        key_metrics: metrics,
        scenario: &outcome.scenario,
        seed: outcome.seed,
        profile: &outcome.profile,
        adjusted: &outcome.adjusted,
        latest_actual_profit: outcome.latest_actual_profit,
        report: &outcome.report,
        upside_downside_ratio: upside_downside_ratio(&outcome.report),
        verdict: &outcome.verdict,
        profits: include_samples.then_some(outcome.result.profits.as_slice()),
    };
    serde_json::to_string_pretty(&report)
}

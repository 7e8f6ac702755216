//! Data types passed between the pipeline stages.
//!
//! Each value is produced by exactly one stage and handed by value (or shared
//! reference) to the next one. None of them is mutated after construction.

use serde::{Deserialize, Serialize};

/// One row of the historical business dataset
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Units_Sold")]
    pub units_sold: f64,
    #[serde(rename = "Total_Cost")]
    pub total_cost: f64,
    #[serde(rename = "Profit")]
    pub profit: f64,
    #[serde(rename = "Current_Ratio")]
    pub current_ratio: f64,
    /// Only used for the key metrics panel; older exports omit it
    #[serde(rename = "Revenue", default)]
    pub revenue: Option<f64>,
}

/// Summary figures shown above the simulation
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KeyMetrics {
    pub records: usize,
    pub average_profit: f64,
    /// `None` unless every record carries a revenue value
    pub average_revenue: Option<f64>,
    pub average_current_ratio: f64,
    pub latest_profit: f64,
    pub latest_current_ratio: f64,
}

/// Baseline statistics derived once per dataset load
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HistoricalProfile {
    pub mean_price: f64,
    pub mean_units: f64,
    pub std_units: f64,  // Sample (N-1) standard deviation
    pub mean_cost: f64,
    pub std_cost: f64,   // Sample (N-1) standard deviation
}

/// Caller preference gating the high-risk verdict
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum RiskAppetite {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for RiskAppetite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskAppetite::Low => write!(f, "Low"),
            RiskAppetite::Medium => write!(f, "Medium"),
            RiskAppetite::High => write!(f, "High"),
        }
    }
}

/// User-supplied scenario for one simulation run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioParameters {
    pub price_change_pct: f64,
    pub marketing_boost_pct: f64,
    pub economic_shock: f64,
    #[serde(deserialize_with = "crate::config::deserialize_risk_appetite")]
    pub risk_appetite: RiskAppetite,
    pub sample_count: usize,
}

impl Default for ScenarioParameters {
    fn default() -> Self {
        Self {
            price_change_pct: 0.0,
            marketing_boost_pct: 0.0,
            economic_shock: 0.0,
            risk_appetite: RiskAppetite::Medium,
            sample_count: 1_000,
        }
    }
}

/// Scenario-adjusted inputs of the stochastic profit model
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AdjustedParameters {
    pub adjusted_price: f64,
    pub adjusted_units: f64,
}

/// Raw Monte Carlo output, in draw order
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimulationResult {
    pub profits: Vec<f64>,
}

impl SimulationResult {
    pub fn sample_count(&self) -> usize {
        self.profits.len()
    }
}

/// Risk statistics reduced from a simulation result
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RiskReport {
    pub expected_profit: f64,
    pub worst_case_1pct: f64,
    pub best_case_99pct: f64,
    pub loss_probability_pct: f64,
    pub value_at_risk_95: f64,
}

/// The fixed set of strategic recommendations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerdictLabel {
    HyperGrowth,
    Defensive,
    HighRiskHighReward,
    SmartControlledExpansion,
}

impl VerdictLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictLabel::HyperGrowth => "HYPER_GROWTH",
            VerdictLabel::Defensive => "DEFENSIVE",
            VerdictLabel::HighRiskHighReward => "HIGH_RISK_HIGH_REWARD",
            VerdictLabel::SmartControlledExpansion => "SMART_CONTROLLED_EXPANSION",
        }
    }

    /// Fixed explanation shown next to the verdict
    pub fn explanation(&self) -> &'static str {
        match self {
            VerdictLabel::HyperGrowth => {
                "AI predicts strong upside with controlled downside risk. Scale aggressively."
            }
            VerdictLabel::Defensive => "Downside risk dominates. Preserve cash, reduce exposure.",
            VerdictLabel::HighRiskHighReward => {
                "Massive upside possible. Suitable only for bold leadership."
            }
            VerdictLabel::SmartControlledExpansion => {
                "Balanced growth with AI-validated safety margins."
            }
        }
    }
}

impl std::fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strategic verdict plus its explanation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub label: VerdictLabel,
    pub explanation: &'static str,
}

impl From<VerdictLabel> for Verdict {
    fn from(label: VerdictLabel) -> Self {
        Verdict {
            label,
            explanation: label.explanation(),
        }
    }
}

/// One equal-width bucket of the profit distribution
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Everything a single run produces
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimulationOutcome {
    pub scenario: ScenarioParameters,
    pub seed: Option<u64>,
    pub profile: HistoricalProfile,
    pub adjusted: AdjustedParameters,
    pub latest_actual_profit: f64,
    pub report: RiskReport,
    pub verdict: Verdict,
    pub result: SimulationResult,
}

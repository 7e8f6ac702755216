//! decision-sim - run one Monte Carlo business scenario from the command line
//!
//! ```text
//! decision-sim                                   # defaults, data/business_data.csv
//! decision-sim --price-change 0.05 --marketing-boost 0.1 --samples 5000
//! decision-sim --risk-appetite high --seed 7 --format json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use business_decision_sim::config::SimulatorConfig;
use business_decision_sim::dataset::{key_metrics, latest_actual_profit, load_records};
use business_decision_sim::models::RiskAppetite;
use business_decision_sim::monte_carlo::run_with_profile;
use business_decision_sim::profile::build_profile;
use business_decision_sim::reporting::{
    display_distribution, display_key_metrics, display_risk_report, display_scenario,
    display_verdict, render_json,
};

const DEFAULT_CONFIG: &str = "decision-sim.toml";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

/// Monte Carlo business decision simulator
#[derive(Parser)]
#[command(name = "decision-sim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Historical dataset (CSV)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Price change as a fraction, e.g. 0.05 for +5%
    #[arg(long, allow_hyphen_values = true)]
    price_change: Option<f64>,

    /// Marketing boost to units sold as a fraction
    #[arg(long, allow_hyphen_values = true)]
    marketing_boost: Option<f64>,

    /// Macro shock to units sold as a fraction
    #[arg(long, allow_hyphen_values = true)]
    economic_shock: Option<f64>,

    /// Risk appetite (low, medium, high)
    #[arg(short, long)]
    risk_appetite: Option<RiskAppetite>,

    /// Number of Monte Carlo samples
    #[arg(short = 'n', long)]
    samples: Option<usize>,

    /// RNG seed for reproducible runs
    #[arg(short, long, conflicts_with = "random_seed")]
    seed: Option<u64>,

    /// Seed from OS entropy instead of the configured seed
    #[arg(long)]
    random_seed: bool,

    /// Compare against this profit instead of the latest dataset row
    #[arg(long, allow_hyphen_values = true)]
    latest_profit: Option<f64>,

    /// Histogram buckets in table output
    #[arg(long)]
    bins: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Include raw profit samples in JSON output
    #[arg(long)]
    include_samples: bool,
}

impl Cli {
    fn load_config(&self) -> Result<SimulatorConfig> {
        let mut config = match &self.config {
            Some(path) => SimulatorConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None if std::path::Path::new(DEFAULT_CONFIG).exists() => {
                SimulatorConfig::from_file(std::path::Path::new(DEFAULT_CONFIG))
                    .with_context(|| format!("loading config {}", DEFAULT_CONFIG))?
            }
            None => SimulatorConfig::default(),
        };
        config.apply_env().context("applying environment overrides")?;

        if let Some(data) = &self.data {
            config.dataset = data.clone();
        }
        if let Some(v) = self.price_change {
            config.scenario.price_change_pct = v;
        }
        if let Some(v) = self.marketing_boost {
            config.scenario.marketing_boost_pct = v;
        }
        if let Some(v) = self.economic_shock {
            config.scenario.economic_shock = v;
        }
        if let Some(v) = self.risk_appetite {
            config.scenario.risk_appetite = v;
        }
        if let Some(v) = self.samples {
            config.scenario.sample_count = v;
        }
        if let Some(v) = self.seed {
            config.seed = Some(v);
        }
        if self.random_seed {
            config.seed = None;
        }
        if let Some(v) = self.latest_profit {
            config.latest_profit = Some(v);
        }
        if let Some(v) = self.bins {
            config.histogram_bins = v;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let config = cli.load_config()?;
    info!(dataset = %config.dataset.display(), "configuration loaded");

    let records = load_records(&config.dataset)
        .with_context(|| format!("loading dataset {}", config.dataset.display()))?;
    let metrics = key_metrics(&records)?;
    let profile = build_profile(&records)?;
    let latest = match config.latest_profit {
        Some(profit) => profit,
        None => latest_actual_profit(&records)?,
    };

    let outcome = run_with_profile(&profile, latest, &config.scenario, config.seed)
        .context("running simulation")?;

    match cli.format {
        OutputFormat::Table => {
            display_key_metrics(&metrics, &records);
            display_scenario(&outcome);
            display_risk_report(&outcome);
            display_distribution(&outcome, config.histogram_bins);
            display_verdict(&outcome);
        }
        OutputFormat::Json => {
            println!("{}", render_json(&outcome, &metrics, cli.include_samples)?);
        }
    }

    Ok(())
}

//! Monte Carlo business decision simulator.
//!
//! Turns a historical business dataset and a scenario (price change,
//! marketing boost, economic shock, risk appetite, sample count) into a
//! simulated profit distribution, a risk report and one of four strategic
//! verdicts.
//!
//! ```no_run
//! use business_decision_sim::dataset::load_records;
//! use business_decision_sim::models::ScenarioParameters;
//! use business_decision_sim::monte_carlo::run_simulation;
//!
//! let records = load_records("data/business_data.csv").unwrap();
//! let outcome = run_simulation(&records, &ScenarioParameters::default(), Some(42)).unwrap();
//! println!("{}: {}", outcome.verdict.label, outcome.verdict.explanation);
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod monte_carlo;
pub mod policy;
pub mod profile;
pub mod reporting;
pub mod risk;
pub mod sampler;
pub mod scenario;

pub use error::SimError;
pub use monte_carlo::{run_simulation, run_with_profile};

//! Error types for the simulation core.
//!
//! Every stage of the pipeline fails at its own boundary and hands the error
//! back unchanged. Nothing here is recovered from inside the core.

use thiserror::Error;

/// Errors raised by the profile, scenario, sampler and risk stages.
///
/// # Examples
/// ```
/// use business_decision_sim::error::SimError;
///
/// let err = SimError::InvalidSampleCount(0);
/// assert!(err.to_string().contains("sample count"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimError {
    /// The dataset has no records, so no mean can be taken.
    #[error("dataset contains no records")]
    EmptyDataset,

    /// Sample standard deviation needs at least two records.
    #[error("at least 2 records are needed to estimate dispersion, got {records}")]
    InsufficientData {
        /// Number of records that were supplied
        records: usize,
    },

    /// A scenario or profile input is NaN or infinite.
    #[error("invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// The offending value
        value: f64,
    },

    /// Zero samples were requested.
    #[error("invalid sample count {0}: must be at least 1")]
    InvalidSampleCount(usize),

    /// Statistics were requested over an empty sample.
    #[error("cannot analyze an empty sample")]
    EmptySample,
}

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_display() {
        let err = SimError::InsufficientData { records: 1 };
        assert_eq!(
            err.to_string(),
            "at least 2 records are needed to estimate dispersion, got 1"
        );
    }

    #[test]
    fn test_invalid_parameter_display() {
        let err = SimError::InvalidParameter {
            name: "economic_shock",
            value: f64::INFINITY,
        };
        assert_eq!(err.to_string(), "invalid parameter 'economic_shock': inf");
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = SimError::EmptySample;
        let _: &dyn std::error::Error = &err;
    }
}

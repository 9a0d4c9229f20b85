//! Error types for the liver injury simulator.
//!
//! Two failure classes exist inside the core:
//! - `ConfigurationError`: caller programming errors (bad dose, duration,
//!   sample grid, unknown model variant). Never retried.
//! - `IntegrationError`: the adaptive solver could not advance. Carries the
//!   last time the state was known to be stable so the caller can decide
//!   whether to retry with a different tolerance.

use thiserror::Error;

/// Invalid simulation input detected before integration starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Fewer than two sample points were requested
    #[error("sample_count must be at least 2 (got {0})")]
    SampleCount(usize),

    /// Duration must be a positive number of hours
    #[error("duration_hours must be positive (got {0})")]
    Duration(u32),

    /// Dose must be positive and finite
    #[error("dose must be a positive finite number (got {0})")]
    Dose(f64),

    /// Amplifier must be finite and at least 1.0
    #[error("toxicity amplifier must be finite and >= 1.0 (got {0})")]
    Amplifier(f64),

    /// Model variant name not recognized by the registry
    #[error("unknown model variant '{0}'")]
    UnknownVariant(String),

    /// Threshold pair violates `0 <= low <= high`
    #[error("invalid risk thresholds: low={low}, high={high}")]
    Thresholds { low: f64, high: f64 },

    /// A score weight is negative or not finite
    #[error("invalid score weight for {name}: {value}")]
    Weight { name: &'static str, value: f64 },

    /// Sample times are empty, non-finite or not strictly increasing
    #[error("invalid sample grid: {0}")]
    SampleGrid(String),

    /// Compound identifier rejected by structural validation
    #[error("invalid compound identifier '{0}'")]
    CompoundId(String),
}

/// Reason the adaptive solver gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationFailure {
    /// Step size shrank below the representable minimum
    StepSizeUnderflow,
    /// Step budget exhausted before reaching the final sample time
    MaxStepsExceeded,
    /// Derivatives or state became NaN/inf
    NonFinite,
}

impl std::fmt::Display for IntegrationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            IntegrationFailure::StepSizeUnderflow => "step size underflow",
            IntegrationFailure::MaxStepsExceeded => "maximum step count exceeded",
            IntegrationFailure::NonFinite => "non-finite state",
        };
        f.write_str(msg)
    }
}

/// Solver non-convergence.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("integration failed ({kind}) after t = {last_stable_time_h:.4} h")]
pub struct IntegrationError {
    /// Last time (hours) at which an accepted step left a finite state
    pub last_stable_time_h: f64,
    /// What went wrong
    pub kind: IntegrationFailure,
}

/// Crate error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Solver failure
    #[error(transparent)]
    Integration(#[from] IntegrationError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integration_error_message_carries_time() {
        let err = IntegrationError {
            last_stable_time_h: 12.5,
            kind: IntegrationFailure::StepSizeUnderflow,
        };
        let msg = err.to_string();
        assert!(msg.contains("12.5000"), "{}", msg);
        assert!(msg.contains("step size underflow"), "{}", msg);
    }

    #[test]
    fn test_configuration_error_converts() {
        let err: Error = ConfigurationError::SampleCount(1).into();
        assert!(matches!(err, Error::Configuration(ConfigurationError::SampleCount(1))));
    }
}

//! Unified error hierarchy for vitalrs
//!
//! Calculator errors are deliberately rare: the engine raises them only where
//! a divide-by-zero would otherwise occur with no sensible sentinel (resting
//! or max heart rate of zero, heart rate reserve of zero, unparseable clock
//! times). Everything that means "no data yet" — empty interval sequences,
//! zero-minute sleep sessions, empty session lists — returns a zero/neutral
//! sentinel value instead of an error, and that split is part of the engine's
//! observable contract.

use thiserror::Error;

/// Top-level error type for all vitalrs operations
#[derive(Debug, Error)]
pub enum VitalRsError {
    /// Metric calculation errors
    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO errors (snapshot files, config files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot/result (de)serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Calculation errors raised by the metric engines
#[derive(Debug, Error)]
pub enum CalculationError {
    /// Invalid parameter value for a calculation
    #[error("Invalid parameter for {calculation}: {parameter}={value}")]
    InvalidParameter {
        calculation: String,
        parameter: String,
        value: String,
    },

    /// Malformed time-of-day string ("HH:MM" expected)
    #[error("Invalid clock time {value:?}: {reason}")]
    InvalidClockTime { value: String, reason: String },
}

impl CalculationError {
    /// Shorthand for the common invalid-parameter case
    pub fn invalid_parameter(
        calculation: impl Into<String>,
        parameter: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        CalculationError::InvalidParameter {
            calculation: calculation.into(),
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }
}

/// Result type alias for vitalrs operations
pub type Result<T> = std::result::Result<T, VitalRsError>;

impl VitalRsError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            VitalRsError::Calculation(_) => ErrorSeverity::Warning,
            VitalRsError::Validation(_) => ErrorSeverity::Warning,
            VitalRsError::Io(_) => ErrorSeverity::Error,
            VitalRsError::Serialization(_) => ErrorSeverity::Error,
            VitalRsError::Configuration(_) => ErrorSeverity::Error,
            VitalRsError::Internal(_) => ErrorSeverity::Critical,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            VitalRsError::Calculation(CalculationError::InvalidParameter {
                calculation,
                parameter,
                ..
            }) => {
                format!(
                    "Cannot compute {}: {} must be a positive value.",
                    calculation, parameter
                )
            }
            VitalRsError::Calculation(CalculationError::InvalidClockTime { value, .. }) => {
                format!("{:?} is not a valid wake time. Use HH:MM, e.g. 07:00.", value)
            }
            VitalRsError::Serialization(_) => {
                "Snapshot data could not be parsed. Please check the input file.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical system error requiring immediate attention
    Critical,
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = VitalRsError::Calculation(CalculationError::invalid_parameter(
            "vo2max_ratio",
            "resting_hr",
            0,
        ));
        assert_eq!(err.severity(), ErrorSeverity::Warning);

        let err = VitalRsError::Internal("test".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_user_messages() {
        let err = VitalRsError::Calculation(CalculationError::invalid_parameter(
            "vo2max_ratio",
            "resting_hr",
            0,
        ));
        assert!(err.user_message().contains("resting_hr"));

        let err = VitalRsError::Calculation(CalculationError::InvalidClockTime {
            value: "25:99".to_string(),
            reason: "out of range".to_string(),
        });
        assert!(err.user_message().contains("HH:MM"));
    }
}

// Library interface for the vitalrs biological metrics engine
// Exposes the pure calculators so they can be reused outside the CLI,
// e.g. from a scoring service.

pub mod cardio;
pub mod config;
pub mod error;
pub mod hrv;
pub mod logging;
pub mod models;
pub mod sleep;

// Re-export commonly used types for convenience
pub use cardio::CardioEstimator;
pub use error::{Result, VitalRsError};
pub use hrv::HrvAnalyzer;
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use models::*;
pub use sleep::{SleepAnalyzer, DEFAULT_TARGET_SLEEP_HOURS};

//! Heart Rate Variability (HRV) analysis and recovery scoring
//!
//! Time-domain HRV statistics over beat-to-beat (RR) interval sequences,
//! plus a recovery/readiness assessment and population baseline lookups.
//!
//! # Sports Science Background
//!
//! HRV measures the variation in time between successive heartbeats and is
//! a key proxy for autonomic nervous system recovery:
//!
//! - **RMSSD**: root mean square of successive differences, in milliseconds.
//!   Typical adult values run 20-100ms; higher means better recovery.
//! - **SDNN**: standard deviation of all intervals in the window.
//! - **pNN50**: percentage of successive differences exceeding 50ms.
//!
//! RMSSD and pNN50 are order-sensitive: the caller must supply intervals in
//! true acquisition order. The analyzer does not sort or validate ordering
//! and will silently produce a number for a shuffled input.
//!
//! Sequences shorter than two intervals yield a 0.0 sentinel, not an error;
//! "no data yet" is a normal state for these calculators.

use crate::models::{Gender, HeartRateReading, RecoveryAssessment, RecoveryStatus, UserProfile};
use statrs::statistics::Statistics;
use tracing::debug;

/// Round to one decimal, the reporting precision for HRV statistics
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Successive-difference threshold for pNN50, in milliseconds
const PNN50_THRESHOLD_MS: f64 = 50.0;

/// Typical RMSSD by gender and age bracket (lower bracket bound, ms)
///
/// Literal population values, no interpolation. Under-18 ages use the first
/// bracket.
const MALE_BASELINES: [(u8, f64); 6] = [
    (18, 70.0),
    (26, 60.0),
    (36, 48.0),
    (46, 38.0),
    (56, 32.0),
    (66, 28.0),
];

const FEMALE_BASELINES: [(u8, f64); 6] = [
    (18, 68.0),
    (26, 58.0),
    (36, 46.0),
    (46, 36.0),
    (56, 30.0),
    (66, 26.0),
];

/// Fixed guidance per recovery tier
const RECOMMENDATION_EXCELLENT: &str =
    "Fully recovered. Your body is ready for high-intensity training.";
const RECOMMENDATION_GOOD: &str =
    "Well recovered. Moderate to hard training should feel comfortable today.";
const RECOMMENDATION_FAIR: &str =
    "Partial recovery. Favor light aerobic work and keep intensity low.";
const RECOMMENDATION_POOR: &str =
    "Recovery is low. Prioritize rest, hydration, and an early night.";

/// HRV statistics and recovery analysis utilities
pub struct HrvAnalyzer;

impl HrvAnalyzer {
    /// Root mean square of successive differences, in milliseconds
    ///
    /// Returns 0.0 for sequences shorter than two intervals (zero-data
    /// sentinel). Rounded to one decimal.
    pub fn rmssd(intervals: &[f64]) -> f64 {
        if intervals.len() < 2 {
            return 0.0;
        }

        let mean_sq: f64 = intervals
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).powi(2))
            .sum::<f64>()
            / (intervals.len() - 1) as f64;

        round1(mean_sq.sqrt())
    }

    /// Population standard deviation of the interval sequence (divide by N)
    ///
    /// Returns 0.0 for empty input. Rounded to one decimal.
    pub fn sdnn(intervals: &[f64]) -> f64 {
        if intervals.is_empty() {
            return 0.0;
        }

        round1(intervals.iter().population_std_dev())
    }

    /// Percentage of successive differences whose absolute value exceeds 50ms
    ///
    /// Returns 0.0 for sequences shorter than two intervals. Rounded to one
    /// decimal.
    pub fn pnn50(intervals: &[f64]) -> f64 {
        if intervals.len() < 2 {
            return 0.0;
        }

        let diffs = intervals.len() - 1;
        let over_threshold = intervals
            .windows(2)
            .filter(|pair| (pair[1] - pair[0]).abs() > PNN50_THRESHOLD_MS)
            .count();

        round1(over_threshold as f64 / diffs as f64 * 100.0)
    }

    /// Recovery/readiness assessment from an RR interval sequence
    ///
    /// # Algorithm
    ///
    /// 1. Base score = RMSSD / 50 × 100, clamped to [20, 100]
    /// 2. Age decay factor = max(0.7, 1 − (age − 20) × 0.005)
    /// 3. Score = base × factor, rounded; readiness = min(100, score × 1.2)
    ///
    /// Status tiers on the adjusted score: ≥80 excellent, ≥60 good,
    /// ≥40 fair, else poor.
    pub fn analyze_recovery(intervals: &[f64], profile: &UserProfile) -> RecoveryAssessment {
        let rmssd = Self::rmssd(intervals);

        let base_score = (rmssd / 50.0 * 100.0).clamp(20.0, 100.0);
        let age_factor = (1.0 - (profile.age as f64 - 20.0) * 0.005).max(0.7);
        let adjusted = base_score * age_factor;

        let score = adjusted.round() as u8;
        let readiness = (adjusted * 1.2).min(100.0).round() as u8;

        let status = if score >= 80 {
            RecoveryStatus::Excellent
        } else if score >= 60 {
            RecoveryStatus::Good
        } else if score >= 40 {
            RecoveryStatus::Fair
        } else {
            RecoveryStatus::Poor
        };

        let recommendation = match status {
            RecoveryStatus::Excellent => RECOMMENDATION_EXCELLENT,
            RecoveryStatus::Good => RECOMMENDATION_GOOD,
            RecoveryStatus::Fair => RECOMMENDATION_FAIR,
            RecoveryStatus::Poor => RECOMMENDATION_POOR,
        }
        .to_string();

        debug!(rmssd, score, readiness, ?status, "analyzed recovery");

        RecoveryAssessment {
            score,
            status,
            readiness,
            recommendation,
        }
    }

    /// Typical RMSSD for an age and gender
    ///
    /// Literal table lookup over six age brackets, no interpolation.
    pub fn baseline_rmssd(age: u8, gender: Gender) -> f64 {
        let table = match gender {
            Gender::Male => &MALE_BASELINES,
            Gender::Female => &FEMALE_BASELINES,
        };

        table
            .iter()
            .rev()
            .find(|(start, _)| age >= *start)
            .map(|(_, rmssd)| *rmssd)
            .unwrap_or(table[0].1)
    }

    /// Derive an RR interval sequence (ms) from a heart rate sample series
    ///
    /// Each sample maps to 60000 / bpm. Zero-bpm samples are skipped rather
    /// than producing an infinite interval. The derivation assumes the
    /// series is in acquisition order and does not resample; it is a
    /// convenience for callers holding aggregated readings, not a
    /// physiologically rigorous beat detector.
    pub fn rr_intervals_from_readings(readings: &[HeartRateReading]) -> Vec<f64> {
        readings
            .iter()
            .filter(|r| r.bpm > 0)
            .map(|r| 60_000.0 / r.bpm as f64)
            .collect()
    }
}

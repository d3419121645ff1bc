//! Sleep architecture, efficiency, debt, and bedtime analysis
//!
//! # Sleep Science Background
//!
//! Sleep cycles through distinct stages, each with a typical share of a
//! healthy night:
//!
//! - **Deep sleep (slow-wave)**: most restorative stage; 15-25% of sleep
//! - **Light sleep (NREM 1 & 2)**: transitional stages; 50-60% of sleep
//! - **REM sleep**: dreaming and memory consolidation; 20-25% of sleep
//!
//! The analyzer reports each stage as a percentage of total sleep, grades
//! the night on a layered (efficiency, deep%, rem%) threshold, tracks
//! multi-night sleep debt against a target, and predicts an optimal bedtime
//! for a wake-up time.
//!
//! A session with `total_minutes = 0` is the "no data" sentinel: every
//! operation returns a documented zero/poor output for it rather than an
//! error or a division by zero.

use crate::error::{CalculationError, Result};
use crate::models::{SleepArchitecture, SleepData, SleepDebtStatus, SleepDebtSummary, SleepQuality};
use chrono::{Duration, NaiveTime};
use tracing::debug;

/// Round to one decimal, the reporting precision for percentages
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Default nightly sleep target, in hours
pub const DEFAULT_TARGET_SLEEP_HOURS: f64 = 8.0;

/// Fixed sleep-onset latency modeled by the bedtime predictor, in minutes
const SLEEP_ONSET_MINUTES: i64 = 20;

/// Sleep analysis utilities
pub struct SleepAnalyzer;

impl SleepAnalyzer {
    /// Sleep efficiency: total sleep over total time in bed, as a percentage
    ///
    /// Returns 0.0 for the zero-data sentinel. Rounded to one decimal.
    pub fn efficiency(sleep: &SleepData) -> f64 {
        if sleep.total_minutes == 0 {
            return 0.0;
        }

        let time_in_bed = sleep.total_minutes as f64 + sleep.awake_minutes as f64;
        round1(sleep.total_minutes as f64 / time_in_bed * 100.0)
    }

    /// Stage percentage architecture with quality grade and recommendations
    ///
    /// # Quality thresholds
    ///
    /// - Excellent: efficiency ≥ 90 and deep ≥ 15% and REM ≥ 20%
    /// - Good: efficiency ≥ 85 and deep ≥ 12% and REM ≥ 18%
    /// - Fair: efficiency ≥ 80
    /// - Poor: everything else, including the zero-data sentinel
    ///
    /// The recommendations list is always non-empty: one entry per triggered
    /// rule, or a single positive message when nothing triggers.
    pub fn analyze_architecture(sleep: &SleepData) -> SleepArchitecture {
        if sleep.total_minutes == 0 {
            return SleepArchitecture {
                deep_percentage: 0.0,
                light_percentage: 0.0,
                rem_percentage: 0.0,
                quality: SleepQuality::Poor,
                recommendations: vec!["No sleep data available".to_string()],
            };
        }

        let total = sleep.total_minutes as f64;
        let deep_pct = round1(sleep.deep_minutes as f64 / total * 100.0);
        let light_pct = round1(sleep.light_minutes as f64 / total * 100.0);
        let rem_pct = round1(sleep.rem_minutes as f64 / total * 100.0);
        let efficiency = Self::efficiency(sleep);

        let mut recommendations = Vec::new();

        if deep_pct < 15.0 {
            recommendations.push(
                "Deep sleep is low. Keep the bedroom cool and avoid alcohol before bed."
                    .to_string(),
            );
        }
        if rem_pct < 20.0 {
            recommendations.push(
                "REM sleep is low. A consistent sleep schedule helps lengthen REM cycles."
                    .to_string(),
            );
        }
        if light_pct > 60.0 {
            recommendations.push(
                "Light sleep dominates the night. Check for noise, light, or other disruptions."
                    .to_string(),
            );
        }
        if recommendations.is_empty() {
            recommendations
                .push("Great sleep architecture. Keep your current routine.".to_string());
        }

        let quality = if efficiency >= 90.0 && deep_pct >= 15.0 && rem_pct >= 20.0 {
            SleepQuality::Excellent
        } else if efficiency >= 85.0 && deep_pct >= 12.0 && rem_pct >= 18.0 {
            SleepQuality::Good
        } else if efficiency >= 80.0 {
            SleepQuality::Fair
        } else {
            SleepQuality::Poor
        };

        debug!(deep_pct, light_pct, rem_pct, efficiency, ?quality, "analyzed sleep architecture");

        SleepArchitecture {
            deep_percentage: deep_pct,
            light_percentage: light_pct,
            rem_percentage: rem_pct,
            quality,
            recommendations,
        }
    }

    /// Multi-night sleep debt versus a nightly target
    ///
    /// Per session, debt = max(0, target − total sleep); sessions longer
    /// than the target never earn back prior debt. An empty session list
    /// yields the all-zero caught-up summary.
    ///
    /// # Status thresholds on total debt
    ///
    /// 0 → caught up, < 2h → mild, < 5h → moderate, else severe.
    pub fn sleep_debt(sessions: &[SleepData], target_hours: f64) -> SleepDebtSummary {
        let target_minutes = target_hours * 60.0;

        let mut total_debt_minutes = 0u32;
        let mut days_with_debt = 0u32;
        let mut total_sleep_minutes = 0u64;

        for session in sessions {
            let shortfall = target_minutes - session.total_minutes as f64;
            // Count the day only if it contributes whole debt minutes, so a
            // fractional target can never report debt days while caught up.
            let debt_minutes = shortfall.max(0.0).round() as u32;
            if debt_minutes > 0 {
                total_debt_minutes += debt_minutes;
                days_with_debt += 1;
            }
            total_sleep_minutes += session.total_minutes as u64;
        }

        let average_sleep_hours = if sessions.is_empty() {
            0.0
        } else {
            total_sleep_minutes as f64 / sessions.len() as f64 / 60.0
        };

        let debt_hours = total_debt_minutes as f64 / 60.0;
        let status = if total_debt_minutes == 0 {
            SleepDebtStatus::CaughtUp
        } else if debt_hours < 2.0 {
            SleepDebtStatus::MildDebt
        } else if debt_hours < 5.0 {
            SleepDebtStatus::ModerateDebt
        } else {
            SleepDebtStatus::SevereDebt
        };

        debug!(
            total_debt_minutes,
            days_with_debt,
            average_sleep_hours,
            ?status,
            "accumulated sleep debt"
        );

        SleepDebtSummary {
            total_debt_minutes,
            average_sleep_hours,
            days_with_debt,
            status,
        }
    }

    /// Optimal bedtime for a wake-up time and sleep target
    ///
    /// Bedtime = wake time − (target × 60 + 20) minutes, modeling a fixed
    /// 20-minute sleep-onset latency. Pure clock arithmetic with no
    /// timezone awareness; subtraction wraps across midnight.
    ///
    /// # Arguments
    /// * `wake_time` - Wake-up time as "HH:MM"
    /// * `target_sleep_hours` - Desired sleep duration in hours
    ///
    /// # Returns
    /// Bedtime as "HH:MM"
    pub fn predict_optimal_bedtime(wake_time: &str, target_sleep_hours: f64) -> Result<String> {
        let wake = NaiveTime::parse_from_str(wake_time, "%H:%M").map_err(|e| {
            CalculationError::InvalidClockTime {
                value: wake_time.to_string(),
                reason: e.to_string(),
            }
        })?;

        let minutes_before_wake = (target_sleep_hours * 60.0).round() as i64 + SLEEP_ONSET_MINUTES;
        let bedtime = wake - Duration::minutes(minutes_before_wake);

        Ok(bedtime.format("%H:%M").to_string())
    }
}

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use vitalrs::cardio::CardioEstimator;
use vitalrs::hrv::HrvAnalyzer;
use vitalrs::models::{
    DailySnapshot, FitnessCategory, Gender, HeartRateReading, RecoveryStatus, SleepData,
    SleepDebtStatus, SleepQuality, UserProfile,
};
use vitalrs::sleep::{SleepAnalyzer, DEFAULT_TARGET_SLEEP_HOURS};

/// Integration tests that exercise the full dashboard workflow: a daily
/// snapshot plus a user profile fed through all three calculators.

fn test_profile() -> UserProfile {
    UserProfile {
        age: 32,
        gender: Gender::Male,
        weight_kg: 74.0,
        height_cm: 181.0,
        max_hr: 188,
        resting_hr: 54,
    }
}

fn heart_rate_series(bpms: &[u16]) -> Vec<HeartRateReading> {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 7, 0, 0).unwrap();
    bpms.iter()
        .enumerate()
        .map(|(i, &bpm)| HeartRateReading {
            timestamp: start + Duration::seconds(i as i64 * 60),
            bpm,
        })
        .collect()
}

fn test_snapshot() -> DailySnapshot {
    DailySnapshot {
        date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        steps: 11250,
        heart_rate: heart_rate_series(&[55, 58, 54, 60, 56, 59]),
        sleep: SleepData {
            total_minutes: 480,
            deep_minutes: 90,
            light_minutes: 240,
            rem_minutes: 120,
            awake_minutes: 30,
            score: 88,
        },
    }
}

#[test]
fn test_full_dashboard_composition() {
    let snapshot = test_snapshot();
    let profile = test_profile();

    // VO2max from the profile
    let vo2max = CardioEstimator::assess(&profile).unwrap();
    assert!(vo2max.value > 40.0 && vo2max.value < 70.0);

    // Recovery from the heart rate series, via the RR derivation helper
    let intervals = HrvAnalyzer::rr_intervals_from_readings(&snapshot.heart_rate);
    assert_eq!(intervals.len(), snapshot.heart_rate.len());
    let recovery = HrvAnalyzer::analyze_recovery(&intervals, &profile);
    assert!(recovery.score >= 20 && recovery.score <= 100);
    assert!(!recovery.recommendation.is_empty());

    // Sleep architecture from the stage breakdown
    let architecture = SleepAnalyzer::analyze_architecture(&snapshot.sleep);
    assert_eq!(architecture.quality, SleepQuality::Excellent);
}

#[test]
fn test_dashboard_with_empty_snapshot_never_errors() {
    // A freshly connected account has no readings and no sleep yet; the
    // whole dashboard pipeline must degrade to sentinels, not errors.
    let snapshot = DailySnapshot {
        date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        steps: 0,
        heart_rate: Vec::new(),
        sleep: SleepData::empty(),
    };
    let profile = test_profile();

    let intervals = HrvAnalyzer::rr_intervals_from_readings(&snapshot.heart_rate);
    let recovery = HrvAnalyzer::analyze_recovery(&intervals, &profile);
    assert_eq!(recovery.status, RecoveryStatus::Poor);

    assert_eq!(SleepAnalyzer::efficiency(&snapshot.sleep), 0.0);

    let architecture = SleepAnalyzer::analyze_architecture(&snapshot.sleep);
    assert_eq!(architecture.quality, SleepQuality::Poor);
    assert_eq!(
        architecture.recommendations,
        vec!["No sleep data available".to_string()]
    );

    let debt = SleepAnalyzer::sleep_debt(&[snapshot.sleep], DEFAULT_TARGET_SLEEP_HOURS);
    assert_eq!(debt.status, SleepDebtStatus::SevereDebt); // 8h short
}

#[test]
fn test_week_of_sleep_debt() {
    // A realistic week: two short nights, five adequate ones
    let nights: Vec<SleepData> = [470u16, 420, 480, 390, 500, 485, 460]
        .iter()
        .map(|&total| SleepData {
            total_minutes: total,
            deep_minutes: total / 5,
            light_minutes: total / 2,
            rem_minutes: total / 4,
            awake_minutes: 25,
            score: 80,
        })
        .collect();

    let summary = SleepAnalyzer::sleep_debt(&nights, 8.0);

    // Shortfalls: 10 + 60 + 0 + 90 + 0 + 0 + 20 = 180 minutes
    assert_eq!(summary.total_debt_minutes, 180);
    assert_eq!(summary.days_with_debt, 4);
    assert_eq!(summary.status, SleepDebtStatus::ModerateDebt);
    // 3205 total minutes over 7 nights ≈ 7.63 hours
    assert!((summary.average_sleep_hours - 7.631).abs() < 0.01);
}

#[test]
fn test_vo2max_methods_agree_on_direction() {
    // All heart-rate-driven estimates should rank the fitter profile higher
    let fit = CardioEstimator::estimate_from_heart_rate_ratio(48, 190).unwrap();
    let unfit = CardioEstimator::estimate_from_heart_rate_ratio(75, 175).unwrap();
    assert!(fit > unfit);

    let fit_classified = CardioEstimator::classify(fit, 30, Gender::Male);
    let unfit_classified = CardioEstimator::classify(unfit, 30, Gender::Male);
    assert!(fit_classified > unfit_classified);
}

#[test]
fn test_resting_only_pipeline() {
    // Full pipeline using only resting HR and age, as the onboarding
    // screen does before any activity has been recorded
    let value = CardioEstimator::estimate_from_resting_hr_only(60, 28, Gender::Female).unwrap();
    let category = CardioEstimator::classify(value, 28, Gender::Female);

    // 208 − 19.6 = 188.4, 15.3 × 188.4/60 = 48.042 → 48.0 → Excellent
    assert_eq!(value, 48.0);
    assert_eq!(category, FitnessCategory::Excellent);
}

#[test]
fn test_bedtime_for_configured_target() {
    let bedtime = SleepAnalyzer::predict_optimal_bedtime("06:30", 7.5).unwrap();
    // 7.5h × 60 + 20 = 470 minutes before 06:30
    assert_eq!(bedtime, "22:40");
}

#[test]
fn test_result_types_serialize_for_service_use() {
    let profile = test_profile();
    let snapshot = test_snapshot();

    let vo2max = CardioEstimator::assess(&profile).unwrap();
    let intervals = HrvAnalyzer::rr_intervals_from_readings(&snapshot.heart_rate);
    let recovery = HrvAnalyzer::analyze_recovery(&intervals, &profile);
    let architecture = SleepAnalyzer::analyze_architecture(&snapshot.sleep);
    let debt = SleepAnalyzer::sleep_debt(&[snapshot.sleep], 8.0);

    // Every result type must round-trip as JSON
    let json = serde_json::to_string(&vo2max).unwrap();
    assert!(json.contains("\"category\""));

    let json = serde_json::to_string(&recovery).unwrap();
    let back: vitalrs::models::RecoveryAssessment = serde_json::from_str(&json).unwrap();
    assert_eq!(back, recovery);

    let json = serde_json::to_string(&architecture).unwrap();
    let back: vitalrs::models::SleepArchitecture = serde_json::from_str(&json).unwrap();
    assert_eq!(back, architecture);

    let json = serde_json::to_string(&debt).unwrap();
    assert!(json.contains("\"caught-up\"") || json.contains("-debt\""));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Ratio estimate is monotonically increasing in max HR
        #[test]
        fn ratio_increases_with_max_hr(resting in 30u16..120, max in 100u16..220) {
            let lower = CardioEstimator::estimate_from_heart_rate_ratio(resting, max).unwrap();
            let higher = CardioEstimator::estimate_from_heart_rate_ratio(resting, max + 10).unwrap();
            prop_assert!(higher >= lower);
        }

        /// Ratio estimate is monotonically decreasing in resting HR
        #[test]
        fn ratio_decreases_with_resting_hr(resting in 30u16..120, max in 100u16..220) {
            let lower_rest = CardioEstimator::estimate_from_heart_rate_ratio(resting, max).unwrap();
            let higher_rest = CardioEstimator::estimate_from_heart_rate_ratio(resting + 10, max).unwrap();
            prop_assert!(higher_rest <= lower_rest);
        }

        /// Classification is total: any input maps to a category
        #[test]
        fn classify_is_total(vo2max in -100.0f64..150.0, age in 0u8..120) {
            let _ = CardioEstimator::classify(vo2max, age, Gender::Male);
            let _ = CardioEstimator::classify(vo2max, age, Gender::Female);
        }

        /// RMSSD and pNN50 never go negative and handle any sequence
        #[test]
        fn hrv_stats_are_non_negative(intervals in prop::collection::vec(300.0f64..2000.0, 0..50)) {
            prop_assert!(HrvAnalyzer::rmssd(&intervals) >= 0.0);
            prop_assert!(HrvAnalyzer::sdnn(&intervals) >= 0.0);
            let pnn50 = HrvAnalyzer::pnn50(&intervals);
            prop_assert!((0.0..=100.0).contains(&pnn50));
        }

        /// Sleep debt is never negative and empty input stays caught up
        #[test]
        fn sleep_debt_is_non_negative(totals in prop::collection::vec(0u16..700, 0..14)) {
            let sessions: Vec<SleepData> = totals
                .iter()
                .map(|&total| SleepData {
                    total_minutes: total,
                    deep_minutes: 0,
                    light_minutes: 0,
                    rem_minutes: 0,
                    awake_minutes: 0,
                    score: 0,
                })
                .collect();

            let summary = SleepAnalyzer::sleep_debt(&sessions, 8.0);
            prop_assert!(summary.days_with_debt as usize <= sessions.len());
            if sessions.is_empty() {
                prop_assert_eq!(summary.status, SleepDebtStatus::CaughtUp);
            }
        }
    }
}

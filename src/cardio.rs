//! VO2max estimation and fitness classification
//!
//! Provides multiple alternative methods for estimating VO2max (maximal
//! oxygen uptake) from heart rate inputs, plus classification of the result
//! into age/gender-banded fitness categories.
//!
//! VO2max represents the maximum rate of oxygen consumption during
//! incremental exercise and is the standard proxy for cardiovascular
//! fitness, expressed in ml/kg/min.
//!
//! The ratio method (Uth–Sørensen–Overgaard–Pedersen) and the Rockport-style
//! walk test regression follow published forms. The activity-weighted method
//! reproduces the arithmetic of the upstream product as-is; it has no
//! literature citation and should not be treated as a source of medical
//! truth.

use crate::error::{CalculationError, Result};
use crate::models::{FitnessCategory, Gender, UserProfile, Vo2MaxResult};
use tracing::debug;

/// Round to one decimal, matching the display precision of every estimate
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Fitness category norms: ordered (lower bound, category) rows per
/// gender and age bracket, scanned highest-first with inclusive lower
/// bounds. Values follow the ACSM/FRIEND registry norm tables.
///
/// Ages below 20 fall into the 20-29 bracket. That is how the upstream
/// product behaves and it is kept as-is.
type NormRow = (f64, FitnessCategory);

const MALE_NORMS: [(u8, [NormRow; 5]); 5] = [
    (20, norms(55.4, 51.1, 45.4, 41.7, 36.7)),
    (30, norms(54.0, 48.3, 44.0, 40.5, 35.2)),
    (40, norms(52.5, 46.4, 42.4, 38.5, 33.6)),
    (50, norms(48.9, 43.4, 39.2, 35.6, 31.0)),
    (60, norms(45.7, 39.5, 35.5, 32.3, 26.5)),
];

const FEMALE_NORMS: [(u8, [NormRow; 5]); 5] = [
    (20, norms(49.6, 43.9, 39.5, 36.1, 30.6)),
    (30, norms(47.4, 42.4, 37.8, 34.4, 28.7)),
    (40, norms(45.3, 39.7, 36.3, 33.0, 26.5)),
    (50, norms(41.1, 36.7, 33.0, 30.1, 25.3)),
    (60, norms(37.8, 33.0, 30.0, 27.5, 23.1)),
];

const fn norms(
    superior: f64,
    excellent: f64,
    good: f64,
    fair: f64,
    poor: f64,
) -> [NormRow; 5] {
    [
        (superior, FitnessCategory::Superior),
        (excellent, FitnessCategory::Excellent),
        (good, FitnessCategory::Good),
        (fair, FitnessCategory::Fair),
        (poor, FitnessCategory::Poor),
    ]
}

/// VO2max estimation and classification utilities
pub struct CardioEstimator;

impl CardioEstimator {
    /// Estimate VO2max from the resting/maximum heart rate ratio
    ///
    /// Formula: VO2max = 15.3 × (max_hr / resting_hr)
    ///
    /// # Arguments
    /// * `resting_hr` - Resting heart rate in bpm
    /// * `max_hr` - Maximum heart rate in bpm
    ///
    /// # Returns
    /// VO2max in ml/kg/min, rounded to one decimal
    pub fn estimate_from_heart_rate_ratio(resting_hr: u16, max_hr: u16) -> Result<f64> {
        if resting_hr == 0 {
            return Err(CalculationError::invalid_parameter(
                "vo2max_ratio",
                "resting_hr",
                resting_hr,
            )
            .into());
        }

        if max_hr == 0 {
            return Err(
                CalculationError::invalid_parameter("vo2max_ratio", "max_hr", max_hr).into(),
            );
        }

        let vo2max = 15.3 * (max_hr as f64 / resting_hr as f64);

        debug!(resting_hr, max_hr, vo2max, "estimated VO2max from HR ratio");
        Ok(round1(vo2max))
    }

    /// Estimate VO2max from a recorded activity, weighted by heart rate
    /// reserve intensity and log-scaled duration
    ///
    /// Formula: (max/resting) × 15.3 × intensity × ln(duration + 1)
    /// where intensity = (avg_hr − resting_hr) / (max_hr − resting_hr).
    ///
    /// The arithmetic is reproduced exactly from the upstream product for
    /// compatibility; see the module docs for the caveat.
    ///
    /// # Arguments
    /// * `resting_hr` - Resting heart rate in bpm
    /// * `max_hr` - Maximum heart rate in bpm
    /// * `duration_min` - Activity duration in minutes
    /// * `avg_hr` - Average heart rate during the activity in bpm
    pub fn estimate_from_activity(
        resting_hr: u16,
        max_hr: u16,
        duration_min: f64,
        avg_hr: u16,
    ) -> Result<f64> {
        if resting_hr == 0 {
            return Err(CalculationError::invalid_parameter(
                "vo2max_activity",
                "resting_hr",
                resting_hr,
            )
            .into());
        }

        if max_hr <= resting_hr {
            // Heart rate reserve must be positive
            return Err(CalculationError::invalid_parameter(
                "vo2max_activity",
                "heart_rate_reserve",
                max_hr as i32 - resting_hr as i32,
            )
            .into());
        }

        let hrr = (max_hr - resting_hr) as f64;
        let intensity = (avg_hr as f64 - resting_hr as f64) / hrr;
        let vo2max =
            (max_hr as f64 / resting_hr as f64) * 15.3 * intensity * (duration_min + 1.0).ln();

        debug!(
            resting_hr,
            max_hr, duration_min, avg_hr, vo2max, "estimated VO2max from activity"
        );
        Ok(round1(vo2max))
    }

    /// Estimate VO2max from a one-mile walk test (Rockport-style regression)
    ///
    /// Formula: 132.853 − 0.0769×weight − 0.3877×age + 6.315×gender_factor
    /// − 3.2649×walk_time − 0.1565×end_hr, with gender_factor 0 for male
    /// and 1 for female.
    ///
    /// # Arguments
    /// * `weight_kg` - Body weight in kilograms
    /// * `age` - Age in years
    /// * `gender` - Biological gender
    /// * `walk_time_min` - Walk completion time in minutes
    /// * `end_hr` - Heart rate at walk completion in bpm
    pub fn estimate_from_walk_test(
        weight_kg: f64,
        age: u8,
        gender: Gender,
        walk_time_min: f64,
        end_hr: u16,
    ) -> f64 {
        let gender_factor = match gender {
            Gender::Male => 0.0,
            Gender::Female => 1.0,
        };

        let vo2max = 132.853 - 0.0769 * weight_kg - 0.3877 * age as f64 + 6.315 * gender_factor
            - 3.2649 * walk_time_min
            - 0.1565 * end_hr as f64;

        debug!(weight_kg, age, walk_time_min, end_hr, vo2max, "estimated VO2max from walk test");
        round1(vo2max)
    }

    /// Estimate VO2max from resting heart rate alone
    ///
    /// Derives an estimated maximum heart rate with the Tanaka formula
    /// (208 − 0.7×age) and feeds it, fractional part intact, through the
    /// ratio formula. Gender is part of the call surface for parity with
    /// the other estimators but does not enter the formula.
    pub fn estimate_from_resting_hr_only(resting_hr: u16, age: u8, _gender: Gender) -> Result<f64> {
        if resting_hr == 0 {
            return Err(CalculationError::invalid_parameter(
                "vo2max_resting_only",
                "resting_hr",
                resting_hr,
            )
            .into());
        }

        let estimated_max_hr = 208.0 - 0.7 * age as f64;
        let vo2max = 15.3 * (estimated_max_hr / resting_hr as f64);

        debug!(
            resting_hr,
            age, estimated_max_hr, vo2max, "estimated VO2max from resting HR"
        );
        Ok(round1(vo2max))
    }

    /// Classify a VO2max value into a fitness category for age and gender
    ///
    /// Total and infallible: every (vo2max, age, gender) triple maps to
    /// exactly one of the six categories, defaulting to Very Poor below all
    /// thresholds.
    pub fn classify(vo2max: f64, age: u8, gender: Gender) -> FitnessCategory {
        let table: &[(u8, [NormRow; 5])] = match gender {
            Gender::Male => &MALE_NORMS,
            Gender::Female => &FEMALE_NORMS,
        };

        // Highest bracket whose start the age meets; under-20 ages land in
        // the first bracket.
        let rows = table
            .iter()
            .rev()
            .find(|(start, _)| age >= *start)
            .map(|(_, rows)| rows)
            .unwrap_or(&table[0].1);

        for (lower_bound, category) in rows {
            if vo2max >= *lower_bound {
                return *category;
            }
        }

        FitnessCategory::VeryPoor
    }

    /// Ratio-based VO2max estimate classified for a user profile
    ///
    /// Convenience composition for dashboard callers.
    pub fn assess(profile: &UserProfile) -> Result<Vo2MaxResult> {
        let value = Self::estimate_from_heart_rate_ratio(profile.resting_hr, profile.max_hr)?;
        let category = Self::classify(value, profile.age, profile.gender);

        Ok(Vo2MaxResult { value, category })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_estimate() {
        // Resting 60, max 180: 15.3 × 3 = 45.9
        let vo2max = CardioEstimator::estimate_from_heart_rate_ratio(60, 180).unwrap();
        assert_eq!(vo2max, 45.9);
    }

    #[test]
    fn test_ratio_estimate_rounding() {
        // 15.3 × 185/62 = 45.653... → 45.7
        let vo2max = CardioEstimator::estimate_from_heart_rate_ratio(62, 185).unwrap();
        assert_eq!(vo2max, 45.7);
    }

    #[test]
    fn test_ratio_estimate_invalid_inputs() {
        assert!(CardioEstimator::estimate_from_heart_rate_ratio(0, 180).is_err());
        assert!(CardioEstimator::estimate_from_heart_rate_ratio(60, 0).is_err());
    }

    #[test]
    fn test_ratio_estimate_monotonicity() {
        let base = CardioEstimator::estimate_from_heart_rate_ratio(60, 180).unwrap();

        // Increasing max HR increases the estimate
        let higher_max = CardioEstimator::estimate_from_heart_rate_ratio(60, 190).unwrap();
        assert!(higher_max > base);

        // Increasing resting HR decreases the estimate
        let higher_rest = CardioEstimator::estimate_from_heart_rate_ratio(70, 180).unwrap();
        assert!(higher_rest < base);
    }

    #[test]
    fn test_activity_estimate() {
        // resting 60, max 180, 30 min at avg 150
        // hrr = 120, intensity = 90/120 = 0.75
        // (180/60) × 15.3 × 0.75 × ln(31) = 45.9 × 0.75 × 3.4340 ≈ 118.2
        let vo2max = CardioEstimator::estimate_from_activity(60, 180, 30.0, 150).unwrap();
        assert!((vo2max - 118.2).abs() < 0.2, "got {}", vo2max);
    }

    #[test]
    fn test_activity_estimate_requires_positive_hrr() {
        assert!(CardioEstimator::estimate_from_activity(180, 180, 30.0, 150).is_err());
        assert!(CardioEstimator::estimate_from_activity(180, 170, 30.0, 150).is_err());
        assert!(CardioEstimator::estimate_from_activity(0, 180, 30.0, 150).is_err());
    }

    #[test]
    fn test_walk_test_estimate() {
        // 70kg male, 30y, 14 min walk, finishing at 140 bpm:
        // 132.853 − 5.383 − 11.631 + 0 − 45.7086 − 21.91 = 48.2204 → 48.2
        let vo2max = CardioEstimator::estimate_from_walk_test(70.0, 30, Gender::Male, 14.0, 140);
        assert_eq!(vo2max, 48.2);

        // Female adds the 6.315 gender term
        let female = CardioEstimator::estimate_from_walk_test(70.0, 30, Gender::Female, 14.0, 140);
        assert_eq!(female, round1(48.2204 + 6.315));
    }

    #[test]
    fn test_resting_only_estimate_delegates_to_ratio() {
        // Age 40 → estimated max = 208 − 28 = 180, exactly the ratio input
        let via_resting =
            CardioEstimator::estimate_from_resting_hr_only(60, 40, Gender::Male).unwrap();
        let via_ratio = CardioEstimator::estimate_from_heart_rate_ratio(60, 180).unwrap();
        assert_eq!(via_resting, via_ratio);
    }

    #[test]
    fn test_resting_only_estimate_keeps_fractional_max_hr() {
        // Age 28 → estimated max = 208 − 19.6 = 188.4 (not rounded to 188):
        // 15.3 × 188.4/60 = 48.042 → 48.0
        let vo2max = CardioEstimator::estimate_from_resting_hr_only(60, 28, Gender::Male).unwrap();
        assert_eq!(vo2max, 48.0);
    }

    #[test]
    fn test_resting_only_estimate_rejects_zero_resting_hr() {
        assert!(CardioEstimator::estimate_from_resting_hr_only(0, 30, Gender::Male).is_err());
    }

    #[test]
    fn test_classify_male_brackets() {
        // 46.0 for a 25-year-old male clears the Good bound (45.4)
        assert_eq!(
            CardioEstimator::classify(46.0, 25, Gender::Male),
            FitnessCategory::Good
        );

        // The same value for a 45-year-old male is Good there too (42.4)
        assert_eq!(
            CardioEstimator::classify(46.0, 45, Gender::Male),
            FitnessCategory::Good
        );

        // For a 62-year-old, 46.0 clears the Superior bound (45.7)
        assert_eq!(
            CardioEstimator::classify(46.0, 62, Gender::Male),
            FitnessCategory::Superior
        );

        // While 44.0 sits between Excellent (39.5) and Superior (45.7)
        assert_eq!(
            CardioEstimator::classify(44.0, 62, Gender::Male),
            FitnessCategory::Excellent
        );
    }

    #[test]
    fn test_classify_inclusive_lower_bounds() {
        // Exactly at the Superior bound for 20-29 males
        assert_eq!(
            CardioEstimator::classify(55.4, 25, Gender::Male),
            FitnessCategory::Superior
        );

        // Just below falls to Excellent
        assert_eq!(
            CardioEstimator::classify(55.3, 25, Gender::Male),
            FitnessCategory::Excellent
        );
    }

    #[test]
    fn test_classify_below_all_thresholds() {
        assert_eq!(
            CardioEstimator::classify(10.0, 25, Gender::Male),
            FitnessCategory::VeryPoor
        );
        assert_eq!(
            CardioEstimator::classify(0.0, 70, Gender::Female),
            FitnessCategory::VeryPoor
        );
    }

    #[test]
    fn test_classify_under_twenty_uses_first_bracket() {
        // Documented quirk: age 16 is classified against the 20-29 norms
        assert_eq!(
            CardioEstimator::classify(46.0, 16, Gender::Male),
            CardioEstimator::classify(46.0, 25, Gender::Male)
        );
    }

    #[test]
    fn test_classify_is_total() {
        // Never panics, always returns one of the six labels
        for age in [0u8, 15, 20, 35, 59, 60, 99] {
            for vo2max in [-5.0, 0.0, 25.0, 38.5, 55.4, 90.0] {
                let _ = CardioEstimator::classify(vo2max, age, Gender::Male);
                let _ = CardioEstimator::classify(vo2max, age, Gender::Female);
            }
        }
    }

    #[test]
    fn test_assess_profile() {
        let profile = UserProfile {
            age: 30,
            gender: Gender::Male,
            weight_kg: 72.0,
            height_cm: 178.0,
            max_hr: 190,
            resting_hr: 52,
        };

        let result = CardioEstimator::assess(&profile).unwrap();
        // 15.3 × 190/52 = 55.903... → 55.9 → Superior for 30-39 males
        assert_eq!(result.value, 55.9);
        assert_eq!(result.category, FitnessCategory::Superior);
    }
}

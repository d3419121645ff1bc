use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Biological gender used by estimation formulas and norm tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            _ => Err(format!("Invalid gender: {}", s)),
        }
    }
}

/// User physiological profile supplied by the caller
///
/// The engine treats the profile as calculator input only; it is never
/// derived or persisted here. Callers are expected to keep
/// `resting_hr < max_hr`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Age in years
    pub age: u8,

    /// Biological gender for formula/table lookups
    pub gender: Gender,

    /// Body weight in kilograms
    pub weight_kg: f64,

    /// Height in centimeters
    pub height_cm: f64,

    /// Maximum heart rate in bpm
    pub max_hr: u16,

    /// Resting heart rate in bpm
    pub resting_hr: u16,
}

/// Single heart rate sample from a wearable or platform source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateReading {
    /// When the sample was taken
    pub timestamp: DateTime<Utc>,

    /// Heart rate in beats per minute
    pub bpm: u16,
}

/// Sleep stage breakdown for one sleep session, in minutes per stage
///
/// `total_minutes = 0` is the valid "no data" sentinel and every calculator
/// handles it without division errors. Cross-field invariants (stage minutes
/// summing to at most the total, for example) come from the upstream provider
/// and are deliberately not enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepData {
    /// Total sleep time in minutes
    pub total_minutes: u16,

    /// Deep sleep (slow-wave) minutes
    pub deep_minutes: u16,

    /// Light sleep (NREM 1 & 2) minutes
    pub light_minutes: u16,

    /// REM sleep minutes
    pub rem_minutes: u16,

    /// Awake minutes during the sleep period
    pub awake_minutes: u16,

    /// Provider-computed sleep score (0-100)
    pub score: u8,
}

impl SleepData {
    /// The "no data" sentinel
    pub fn empty() -> Self {
        SleepData {
            total_minutes: 0,
            deep_minutes: 0,
            light_minutes: 0,
            rem_minutes: 0,
            awake_minutes: 0,
            score: 0,
        }
    }
}

/// Daily snapshot from the health aggregation collaborator
///
/// This is the interface shape the dashboard caller holds: raw step counts,
/// the heart rate sample series, and the provider's sleep stage breakdown.
/// The engine only consumes the numeric pieces; schema validation beyond
/// graceful zero-handling is the provider's problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySnapshot {
    /// Calendar date of the snapshot
    pub date: NaiveDate,

    /// Total step count for the day
    pub steps: u32,

    /// Heart rate sample series, in acquisition order
    pub heart_rate: Vec<HeartRateReading>,

    /// Sleep stage breakdown for the night
    pub sleep: SleepData,
}

/// Fitness category bands for a classified VO2max value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FitnessCategory {
    VeryPoor,
    Poor,
    Fair,
    Good,
    Excellent,
    Superior,
}

impl fmt::Display for FitnessCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitnessCategory::VeryPoor => write!(f, "Very Poor"),
            FitnessCategory::Poor => write!(f, "Poor"),
            FitnessCategory::Fair => write!(f, "Fair"),
            FitnessCategory::Good => write!(f, "Good"),
            FitnessCategory::Excellent => write!(f, "Excellent"),
            FitnessCategory::Superior => write!(f, "Superior"),
        }
    }
}

/// VO2max estimate with its age/gender classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vo2MaxResult {
    /// VO2max in ml/kg/min
    pub value: f64,

    /// Fitness category for the user's age and gender
    pub category: FitnessCategory,
}

/// Recovery status tiers derived from the HRV recovery score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl fmt::Display for RecoveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryStatus::Excellent => write!(f, "Excellent"),
            RecoveryStatus::Good => write!(f, "Good"),
            RecoveryStatus::Fair => write!(f, "Fair"),
            RecoveryStatus::Poor => write!(f, "Poor"),
        }
    }
}

/// Recovery/readiness assessment from beat-to-beat interval analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryAssessment {
    /// Age-adjusted recovery score (0-100)
    pub score: u8,

    /// Qualitative recovery tier
    pub status: RecoveryStatus,

    /// Training readiness (0-100)
    pub readiness: u8,

    /// Fixed guidance text for the status tier
    pub recommendation: String,
}

/// Sleep quality tiers for a night's architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl fmt::Display for SleepQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SleepQuality::Excellent => write!(f, "Excellent"),
            SleepQuality::Good => write!(f, "Good"),
            SleepQuality::Fair => write!(f, "Fair"),
            SleepQuality::Poor => write!(f, "Poor"),
        }
    }
}

/// Proportional composition of a sleep session across stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepArchitecture {
    /// Deep sleep as a percentage of total sleep
    pub deep_percentage: f64,

    /// Light sleep as a percentage of total sleep
    pub light_percentage: f64,

    /// REM sleep as a percentage of total sleep
    pub rem_percentage: f64,

    /// Layered quality classification on (efficiency, deep%, rem%)
    pub quality: SleepQuality,

    /// Rule-driven guidance, always non-empty
    pub recommendations: Vec<String>,
}

/// Sleep debt accumulation tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SleepDebtStatus {
    CaughtUp,
    MildDebt,
    ModerateDebt,
    SevereDebt,
}

impl fmt::Display for SleepDebtStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SleepDebtStatus::CaughtUp => write!(f, "Caught up"),
            SleepDebtStatus::MildDebt => write!(f, "Mild debt"),
            SleepDebtStatus::ModerateDebt => write!(f, "Moderate debt"),
            SleepDebtStatus::SevereDebt => write!(f, "Severe debt"),
        }
    }
}

/// Multi-night sleep debt summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepDebtSummary {
    /// Accumulated shortfall versus target, in minutes
    pub total_debt_minutes: u32,

    /// Average actual sleep across all sessions, in hours
    pub average_sleep_hours: f64,

    /// Number of sessions with a positive shortfall
    pub days_with_debt: u32,

    /// Debt tier on total shortfall hours
    pub status: SleepDebtStatus,
}

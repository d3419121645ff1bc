use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::fs;
use std::path::PathBuf;
use tabled::{Table, Tabled};

use vitalrs::cardio::CardioEstimator;
use vitalrs::config::AppConfig;
use vitalrs::hrv::HrvAnalyzer;
use vitalrs::logging::{self, LogLevel};
use vitalrs::models::{DailySnapshot, Gender, SleepData, UserProfile};
use vitalrs::sleep::{SleepAnalyzer, DEFAULT_TARGET_SLEEP_HOURS};

/// vitalrs - Biological Metrics CLI
///
/// Turns raw physiological inputs (heart rate, beat-to-beat intervals,
/// sleep stage minutes) into derived fitness scores: VO2max estimates,
/// HRV recovery assessments, and sleep architecture analysis.
#[derive(Parser)]
#[command(name = "vitalrs")]
#[command(version = "0.1.0")]
#[command(about = "Biological metrics engine CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// VO2max estimation methods available on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Vo2MaxCliMethod {
    /// Resting/max heart rate ratio
    Ratio,
    /// Heart-rate-reserve weighted activity estimate
    Activity,
    /// Rockport-style walk test regression
    WalkTest,
    /// Resting heart rate only (age-predicted max HR)
    RestingOnly,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate VO2max and classify it into a fitness category
    Vo2max {
        /// Estimation method
        #[arg(short, long, value_enum, default_value_t = Vo2MaxCliMethod::Ratio)]
        method: Vo2MaxCliMethod,

        /// Resting heart rate in bpm
        #[arg(long)]
        resting_hr: Option<u16>,

        /// Maximum heart rate in bpm
        #[arg(long)]
        max_hr: Option<u16>,

        /// Age in years
        #[arg(long)]
        age: u8,

        /// Gender (male/female)
        #[arg(long, default_value = "male")]
        gender: Gender,

        /// Activity duration in minutes (activity method)
        #[arg(long)]
        duration: Option<f64>,

        /// Average heart rate during the activity in bpm (activity method)
        #[arg(long)]
        avg_hr: Option<u16>,

        /// Body weight in kg (walk-test method)
        #[arg(long)]
        weight: Option<f64>,

        /// Walk completion time in minutes (walk-test method)
        #[arg(long)]
        walk_time: Option<f64>,

        /// Heart rate at walk completion in bpm (walk-test method)
        #[arg(long)]
        end_hr: Option<u16>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Analyze HRV recovery from a beat-to-beat interval sequence
    Recovery {
        /// RR intervals in milliseconds, comma-separated and in
        /// acquisition order
        #[arg(long, value_name = "MS,MS,...")]
        intervals: String,

        /// Age in years (defaults to the configured profile)
        #[arg(long)]
        age: Option<u8>,

        /// Gender (male/female)
        #[arg(long)]
        gender: Option<Gender>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Analyze a night's sleep efficiency and architecture
    Sleep {
        /// JSON file containing a sleep stage breakdown
        #[arg(short, long)]
        file: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Accumulate sleep debt across multiple nights
    Debt {
        /// JSON file containing an array of sleep sessions
        #[arg(short, long)]
        file: PathBuf,

        /// Nightly sleep target in hours
        #[arg(short, long)]
        target_hours: Option<f64>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Predict the optimal bedtime for a wake-up time
    Bedtime {
        /// Wake-up time as HH:MM
        #[arg(short, long)]
        wake: String,

        /// Desired sleep duration in hours
        #[arg(long, default_value_t = DEFAULT_TARGET_SLEEP_HOURS)]
        hours: f64,
    },

    /// Run all calculators over a daily health snapshot
    Dashboard {
        /// JSON file containing a daily snapshot (steps, heart rate
        /// series, sleep breakdown)
        #[arg(short, long)]
        file: PathBuf,

        /// Profile id from the config (defaults to the active profile)
        #[arg(short, long)]
        profile: Option<String>,
    },
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl MetricRow {
    fn new(metric: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            value: value.into(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(AppConfig::default_path);
    let config = AppConfig::load_or_default(&config_path)?;

    let mut log_config = config.logging.clone();
    if cli.verbose > 0 {
        log_config.level = LogLevel::from_verbosity(cli.verbose);
    }
    logging::init_logging(&log_config)?;

    match cli.command {
        Commands::Vo2max {
            method,
            resting_hr,
            max_hr,
            age,
            gender,
            duration,
            avg_hr,
            weight,
            walk_time,
            end_hr,
            json,
        } => {
            let value = match method {
                Vo2MaxCliMethod::Ratio => CardioEstimator::estimate_from_heart_rate_ratio(
                    require(resting_hr, "--resting-hr")?,
                    require(max_hr, "--max-hr")?,
                )?,
                Vo2MaxCliMethod::Activity => CardioEstimator::estimate_from_activity(
                    require(resting_hr, "--resting-hr")?,
                    require(max_hr, "--max-hr")?,
                    require(duration, "--duration")?,
                    require(avg_hr, "--avg-hr")?,
                )?,
                Vo2MaxCliMethod::WalkTest => CardioEstimator::estimate_from_walk_test(
                    require(weight, "--weight")?,
                    age,
                    gender,
                    require(walk_time, "--walk-time")?,
                    require(end_hr, "--end-hr")?,
                ),
                Vo2MaxCliMethod::RestingOnly => CardioEstimator::estimate_from_resting_hr_only(
                    require(resting_hr, "--resting-hr")?,
                    age,
                    gender,
                )?,
            };

            let category = CardioEstimator::classify(value, age, gender);
            let result = vitalrs::models::Vo2MaxResult { value, category };

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!(
                    "{} {} ml/kg/min ({})",
                    "VO2max:".blue().bold(),
                    result.value,
                    result.category.to_string().bold()
                );
            }
        }

        Commands::Recovery {
            intervals,
            age,
            gender,
            json,
        } => {
            let intervals = parse_intervals(&intervals)?;
            let profile = resolve_profile(&config, age, gender)?;
            let assessment = HrvAnalyzer::analyze_recovery(&intervals, &profile);

            if json {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                let rows = vec![
                    MetricRow::new("RMSSD (ms)", format!("{}", HrvAnalyzer::rmssd(&intervals))),
                    MetricRow::new("SDNN (ms)", format!("{}", HrvAnalyzer::sdnn(&intervals))),
                    MetricRow::new("pNN50 (%)", format!("{}", HrvAnalyzer::pnn50(&intervals))),
                    MetricRow::new(
                        "Baseline RMSSD (ms)",
                        format!(
                            "{}",
                            HrvAnalyzer::baseline_rmssd(profile.age, profile.gender)
                        ),
                    ),
                    MetricRow::new("Recovery score", format!("{}", assessment.score)),
                    MetricRow::new("Readiness", format!("{}", assessment.readiness)),
                    MetricRow::new("Status", assessment.status.to_string()),
                ];
                println!("{}", Table::new(rows));
                println!("{}", assessment.recommendation.cyan());
            }
        }

        Commands::Sleep { file, json } => {
            let sleep: SleepData = read_json(&file)?;
            let efficiency = SleepAnalyzer::efficiency(&sleep);
            let architecture = SleepAnalyzer::analyze_architecture(&sleep);

            if json {
                println!("{}", serde_json::to_string_pretty(&architecture)?);
            } else {
                let rows = vec![
                    MetricRow::new("Efficiency (%)", format!("{}", efficiency)),
                    MetricRow::new("Deep (%)", format!("{}", architecture.deep_percentage)),
                    MetricRow::new("Light (%)", format!("{}", architecture.light_percentage)),
                    MetricRow::new("REM (%)", format!("{}", architecture.rem_percentage)),
                    MetricRow::new("Quality", architecture.quality.to_string()),
                ];
                println!("{}", Table::new(rows));
                for recommendation in &architecture.recommendations {
                    println!("  {} {}", "•".cyan(), recommendation);
                }
            }
        }

        Commands::Debt {
            file,
            target_hours,
            json,
        } => {
            let sessions: Vec<SleepData> = read_json(&file)?;
            let target = target_hours.unwrap_or(config.analysis.target_sleep_hours);
            let summary = SleepAnalyzer::sleep_debt(&sessions, target);

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                let rows = vec![
                    MetricRow::new(
                        "Total debt (min)",
                        format!("{}", summary.total_debt_minutes),
                    ),
                    MetricRow::new(
                        "Average sleep (h)",
                        format!("{:.2}", summary.average_sleep_hours),
                    ),
                    MetricRow::new("Nights with debt", format!("{}", summary.days_with_debt)),
                    MetricRow::new("Status", summary.status.to_string()),
                ];
                println!("{}", Table::new(rows));
            }
        }

        Commands::Bedtime { wake, hours } => {
            let bedtime = SleepAnalyzer::predict_optimal_bedtime(&wake, hours)?;
            println!(
                "{} {} (for {}h of sleep, waking at {})",
                "Optimal bedtime:".green().bold(),
                bedtime.bold(),
                hours,
                wake
            );
        }

        Commands::Dashboard { file, profile } => {
            let snapshot: DailySnapshot = read_json(&file)?;

            let profile = match profile {
                Some(id) => config
                    .profiles
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| anyhow!("No profile named {:?} in config", id))?,
                None => config
                    .default_profile()
                    .cloned()
                    .ok_or_else(|| anyhow!("No default profile configured; add one or pass --profile"))?,
            };

            print_dashboard(&snapshot, &profile, config.analysis.target_sleep_hours)?;
        }
    }

    Ok(())
}

/// Missing-flag error for method-specific VO2max arguments
fn require<T>(value: Option<T>, flag: &str) -> Result<T> {
    value.ok_or_else(|| anyhow!("{} is required for this estimation method", flag))
}

/// Parse a comma-separated RR interval list (milliseconds)
fn parse_intervals(input: &str) -> Result<Vec<f64>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .with_context(|| format!("Invalid RR interval: {:?}", s))
        })
        .collect()
}

/// Build the working profile from flags, falling back to the configured
/// default profile for anything unspecified
fn resolve_profile(
    config: &AppConfig,
    age: Option<u8>,
    gender: Option<Gender>,
) -> Result<UserProfile> {
    if let Some(profile) = config.default_profile() {
        let mut profile = profile.clone();
        if let Some(age) = age {
            profile.age = age;
        }
        if let Some(gender) = gender {
            profile.gender = gender;
        }
        return Ok(profile);
    }

    // No stored profile: age is the only field the recovery math needs,
    // so require it and fill the rest with placeholders.
    let age = age.ok_or_else(|| anyhow!("--age is required when no profile is configured"))?;
    Ok(UserProfile {
        age,
        gender: gender.unwrap_or(Gender::Male),
        weight_kg: 70.0,
        height_cm: 175.0,
        max_hr: (208.0 - 0.7 * age as f64).round() as u16,
        resting_hr: 60,
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Compose all three calculators over a snapshot, the way the biometrics
/// dashboard does
fn print_dashboard(
    snapshot: &DailySnapshot,
    profile: &UserProfile,
    target_sleep_hours: f64,
) -> Result<()> {
    println!(
        "{} {} ({} steps)",
        "Daily snapshot".bold().underline(),
        snapshot.date,
        snapshot.steps
    );

    let vo2max = CardioEstimator::assess(profile)?;
    println!(
        "\n{} {} ml/kg/min ({})",
        "VO2max:".blue().bold(),
        vo2max.value,
        vo2max.category
    );

    let intervals = HrvAnalyzer::rr_intervals_from_readings(&snapshot.heart_rate);
    let recovery = HrvAnalyzer::analyze_recovery(&intervals, profile);
    println!(
        "{} {}/100, readiness {}/100 ({})",
        "Recovery:".magenta().bold(),
        recovery.score,
        recovery.readiness,
        recovery.status
    );
    println!("  {}", recovery.recommendation);

    let efficiency = SleepAnalyzer::efficiency(&snapshot.sleep);
    let architecture = SleepAnalyzer::analyze_architecture(&snapshot.sleep);
    println!(
        "{} {}% efficient, deep {}%, light {}%, REM {}% ({})",
        "Sleep:".cyan().bold(),
        efficiency,
        architecture.deep_percentage,
        architecture.light_percentage,
        architecture.rem_percentage,
        architecture.quality
    );
    for recommendation in &architecture.recommendations {
        println!("  {} {}", "•".cyan(), recommendation);
    }

    let debt = SleepAnalyzer::sleep_debt(std::slice::from_ref(&snapshot.sleep), target_sleep_hours);
    println!(
        "{} {} min short of target ({})",
        "Sleep debt:".yellow().bold(),
        debt.total_debt_minutes,
        debt.status
    );

    Ok(())
}

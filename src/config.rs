use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::logging::LogConfig;
use crate::models::UserProfile;
use crate::sleep::DEFAULT_TARGET_SLEEP_HOURS;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default profile id (currently active)
    ///
    /// Kept ahead of the table-valued fields so the TOML serializer emits
    /// it as a top-level key.
    pub default_profile_id: Option<String>,

    /// Configuration metadata
    pub metadata: ConfigMetadata,

    /// Metric analysis settings
    pub analysis: AnalysisSettings,

    /// Logging settings
    pub logging: LogConfig,

    /// Stored user profiles, keyed by profile id
    pub profiles: HashMap<String, UserProfile>,
}

/// Configuration metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Analysis settings for the metric calculators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Nightly sleep target for debt accumulation, in hours
    pub target_sleep_hours: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            target_sleep_hours: DEFAULT_TARGET_SLEEP_HOURS,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            default_profile_id: None,
            metadata: ConfigMetadata {
                version: "1.0".to_string(),
                created_at: now,
                updated_at: now,
            },
            analysis: AnalysisSettings::default(),
            logging: LogConfig::default(),
            profiles: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Default config file location under the platform config dir
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vitalrs")
            .join("config.toml")
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load from the given path, or fall back to defaults when the file
    /// does not exist yet
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file, creating parent directories
    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// The currently active profile, if one is configured
    pub fn default_profile(&self) -> Option<&UserProfile> {
        self.default_profile_id
            .as_ref()
            .and_then(|id| self.profiles.get(id))
    }

    /// Insert or replace a profile; the first profile added becomes the
    /// default
    pub fn upsert_profile(&mut self, id: impl Into<String>, profile: UserProfile) {
        let id = id.into();
        if self.default_profile_id.is_none() {
            self.default_profile_id = Some(id.clone());
        }
        self.profiles.insert(id, profile);
    }
}

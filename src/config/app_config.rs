use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};

use crate::commission::CommissionSchedule;
use crate::config::ConfigError;
use crate::models::RosterEntry;

pub const DEFAULT_CONFIG_PATH: &str = "commission.toml";

/// Settings loaded from `commission.toml`.
///
/// ```toml
/// [commission]
/// threshold = 1000
/// base_rate = 5
/// upper_rate = 8
///
/// [source]
/// fetch_timeout_secs = 30
///
/// [dimensions]
/// allowed_prefixes = ["Y110026", "Y510172"]
///
/// [[roster]]
/// code = "Y810004"
/// name = "Somchai"
/// ```
///
/// Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub commission: CommissionSchedule,
    pub source: SourceConfig,
    pub dimensions: DimensionsConfig,
    /// Sales representatives that always appear in a report. Empty means roster-free reports.
    pub roster: Vec<RosterEntry>
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Upper bound for a single fetch from the record source.
    pub fetch_timeout_secs: u64
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 30
        }
    }
}

impl SourceConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DimensionsConfig {
    /// Whitelist for the dimension listing. Falls back to the roster codes when empty.
    pub allowed_prefixes: Vec<String>
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source
        })?;

        let mut config: AppConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source
        })?;

        config.normalize();
        config.validate()?;

        info!("Loaded configuration from [{}] with [{}] roster entries", path.display(), config.roster.len());

        Ok(config)
    }

    /// Loads `path` when given, else `commission.toml` when it exists, else built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(Path::new(DEFAULT_CONFIG_PATH)),
            None => {
                info!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Roster codes that occur more than once, in first-seen order.
    pub fn duplicate_codes(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();

        for entry in &self.roster {
            if !seen.insert(entry.code.as_str()) && !duplicates.contains(&entry.code.as_str()) {
                duplicates.push(entry.code.as_str());
            }
        }

        duplicates
    }

    /// Codes and prefixes are matched verbatim against the export, so surrounding whitespace
    /// from hand-edited files is dropped here.
    fn normalize(&mut self) {
        for entry in &mut self.roster {
            entry.code = entry.code.trim().to_string();
            entry.display_name = entry.display_name.trim().to_string();
        }

        for prefix in &mut self.dimensions.allowed_prefixes {
            *prefix = prefix.trim().to_string();
        }

        self.dimensions.allowed_prefixes.retain(|prefix| !prefix.is_empty());
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let schedule = &self.commission;

        if schedule.threshold < Decimal::ZERO || schedule.base_rate < Decimal::ZERO || schedule.upper_rate < Decimal::ZERO {
            return Err(ConfigError::Invalid("commission threshold and rates must not be negative".to_string()));
        }

        if self.source.fetch_timeout_secs == 0 {
            return Err(ConfigError::Invalid("source.fetch_timeout_secs must be greater than zero".to_string()));
        }

        if let Some(entry) = self.roster.iter().find(|entry| entry.code.is_empty()) {
            return Err(ConfigError::Invalid(format!("roster entry [{}] has an empty code", entry.display_name)));
        }

        // Reports for duplicated codes are ambiguous; surface them without picking a winner.
        for code in self.duplicate_codes() {
            warn!("Roster code [{code}] is listed more than once");
        }

        Ok(())
    }
}

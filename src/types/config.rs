use crate::error::CourtsideError;
use crate::types::scoring::PlayedPolicy;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_DATA_FILE: &str = "team.json";
pub const DEFAULT_GOOD_THRESHOLD: f64 = 6.0;
pub const DEFAULT_DECIMALS: usize = 1;
pub const MAX_DECIMALS: usize = 3;
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Deserialize)]
pub struct CourtsideConfig {
    pub team: TeamConfig,
    pub scoring: Option<ScoringConfig>,
    pub display: Option<DisplayConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamConfig {
    pub name: String,
    pub data_file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    pub played_policy: Option<PlayedPolicy>,
    pub team_average_excludes_zero: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    pub good_threshold: Option<f64>,
    pub decimals: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

/// Effective settings after defaults are applied to an optional config.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub team_name: String,
    pub data_file: String,
    pub played_policy: PlayedPolicy,
    pub team_average_excludes_zero: bool,
    pub good_threshold: f64,
    pub decimals: usize,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            team_name: "team".to_string(),
            data_file: DEFAULT_DATA_FILE.to_string(),
            played_policy: PlayedPolicy::default(),
            team_average_excludes_zero: true,
            good_threshold: DEFAULT_GOOD_THRESHOLD,
            decimals: DEFAULT_DECIMALS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    pub fn resolve(config: Option<&CourtsideConfig>) -> Self {
        config.map(CourtsideConfig::settings).unwrap_or_default()
    }
}

impl CourtsideConfig {
    pub fn settings(&self) -> Settings {
        let defaults = Settings::default();
        let scoring = self.scoring.as_ref();
        let display = self.display.as_ref();
        Settings {
            team_name: self.team.name.trim().to_string(),
            data_file: self
                .team
                .data_file
                .clone()
                .unwrap_or(defaults.data_file),
            played_policy: scoring
                .and_then(|scoring| scoring.played_policy)
                .unwrap_or(defaults.played_policy),
            team_average_excludes_zero: scoring
                .and_then(|scoring| scoring.team_average_excludes_zero)
                .unwrap_or(defaults.team_average_excludes_zero),
            good_threshold: display
                .and_then(|display| display.good_threshold)
                .unwrap_or(defaults.good_threshold),
            decimals: display
                .and_then(|display| display.decimals)
                .unwrap_or(defaults.decimals),
            log_level: self
                .logging
                .as_ref()
                .and_then(|logging| logging.level.clone())
                .unwrap_or(defaults.log_level),
        }
    }

    pub fn validate(&self) -> Result<(), CourtsideError> {
        if self.team.name.trim().is_empty() {
            return Err(CourtsideError::ConfigParse(
                "team.name must not be empty".to_string(),
            ));
        }

        if let Some(data_file) = &self.team.data_file {
            if data_file.trim().is_empty() {
                return Err(CourtsideError::ConfigParse(
                    "team.data_file must not be empty".to_string(),
                ));
            }
        }

        let settings = self.settings();
        if !(0.0..=10.0).contains(&settings.good_threshold) {
            return Err(CourtsideError::ConfigParse(
                "display.good_threshold must be between 0.0 and 10.0".to_string(),
            ));
        }
        if settings.decimals > MAX_DECIMALS {
            return Err(CourtsideError::ConfigParse(format!(
                "display.decimals must be at most {MAX_DECIMALS} (found {})",
                settings.decimals
            )));
        }
        if EnvFilter::try_new(&settings.log_level).is_err() {
            return Err(CourtsideError::ConfigParse(format!(
                "logging.level is not a valid filter: {}",
                settings.log_level
            )));
        }

        Ok(())
    }
}

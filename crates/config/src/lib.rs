//! Configuration loading and validation for ToolRoute.
//!
//! Loads configuration from `~/.toolroute/config.toml` with environment
//! variable overrides. Every field has a default, so a missing file is fine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.toolroute/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Intent classifier settings
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Mock weather sampling ranges
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Currency conversion rates and policy
    #[serde(default)]
    pub currency: CurrencyConfig,

    /// Mock search settings
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Location used when a weather request names none
    #[serde(default = "default_location")]
    pub default_location: String,
}

fn default_location() -> String {
    "New York".into()
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            default_location: default_location(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Inclusive lower bound of the sampled temperature (°C)
    #[serde(default = "default_temperature_min")]
    pub temperature_min: i32,

    /// Inclusive upper bound of the sampled temperature (°C)
    #[serde(default = "default_temperature_max")]
    pub temperature_max: i32,

    /// Inclusive lower bound of the sampled humidity (%)
    #[serde(default = "default_humidity_min")]
    pub humidity_min: u32,

    /// Inclusive upper bound of the sampled humidity (%)
    #[serde(default = "default_humidity_max")]
    pub humidity_max: u32,
}

fn default_temperature_min() -> i32 {
    10
}
fn default_temperature_max() -> i32 {
    39
}
fn default_humidity_min() -> u32 {
    40
}
fn default_humidity_max() -> u32 {
    79
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            temperature_min: default_temperature_min(),
            temperature_max: default_temperature_max(),
            humidity_min: default_humidity_min(),
            humidity_max: default_humidity_max(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Reject unknown currency codes instead of converting at a neutral rate of 1.0
    #[serde(default)]
    pub strict: bool,

    /// Units of each currency per 1 USD
    #[serde(default = "default_rates")]
    pub rates: BTreeMap<String, f64>,
}

/// The built-in static exchange-rate table, relative to USD.
pub fn default_rates() -> BTreeMap<String, f64> {
    [
        ("USD", 1.0),
        ("EUR", 0.92),
        ("GBP", 0.79),
        ("JPY", 148.5),
        ("CAD", 1.36),
        ("AUD", 1.52),
    ]
    .into_iter()
    .map(|(code, rate)| (code.to_string(), rate))
    .collect()
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            strict: false,
            rates: default_rates(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// URL attached to every synthetic search hit
    #[serde(default = "default_result_url")]
    pub result_url: String,
}

fn default_result_url() -> String {
    "https://example.com".into()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            result_url: default_result_url(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.toolroute/config.toml).
    ///
    /// Environment overrides (highest priority):
    /// - `TOOLROUTE_DEFAULT_LOCATION`
    /// - `TOOLROUTE_CURRENCY_STRICT` (`1`/`true` to enable)
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply environment overrides through `lookup`, so tests need not touch the process env.
    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(location) = lookup("TOOLROUTE_DEFAULT_LOCATION") {
            let location = location.trim();
            if !location.is_empty() {
                self.classifier.default_location = location.to_string();
            }
        }

        if let Some(strict) = lookup("TOOLROUTE_CURRENCY_STRICT") {
            self.currency.strict = matches!(
                strict.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".toolroute")
    }

    /// Get the configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.classifier.default_location.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "classifier.default_location must not be empty".into(),
            ));
        }

        if self.weather.temperature_min > self.weather.temperature_max {
            return Err(ConfigError::ValidationError(
                "weather.temperature_min must not exceed weather.temperature_max".into(),
            ));
        }

        if self.weather.humidity_min > self.weather.humidity_max || self.weather.humidity_max > 100 {
            return Err(ConfigError::ValidationError(
                "weather humidity range must be ordered and within 0..=100".into(),
            ));
        }

        if let Some((code, rate)) = self
            .currency
            .rates
            .iter()
            .find(|(_, rate)| !rate.is_finite() || **rate <= 0.0)
        {
            return Err(ConfigError::ValidationError(format!(
                "currency rate for {code} must be a positive number (got {rate})"
            )));
        }

        if let Some(code) = self.currency.rates.keys().find(|code| !is_currency_code(code)) {
            return Err(ConfigError::ValidationError(format!(
                "currency code {code:?} must be three upper-case letters"
            )));
        }

        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        Self::default().to_toml()
    }

    /// Render this configuration as TOML.
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

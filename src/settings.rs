//! # Settings Module
//!
//! ## Purpose
//! Holds the numerical knobs of the balancer (tolerance, multiplier search bound,
//! rationalization strategy) and the output glyph, and persists them as JSON.
//!
//! ## Architecture
//! - **BalancerConfig**: Serializable configuration structure, passed by reference to the core
//! - **SettingsManager**: Loading and saving of the configuration file
//! - **Global Access**: Thread-safe singleton used by the command line front end
//!
//! ## Configuration Format
//! ```json
//! {
//!   "tolerance": 1e-9,
//!   "max_multiplier": 999,
//!   "strategy": "MultiplierSearch",
//!   "max_denominator": 1000000,
//!   "multiplication_glyph": "·"
//! }
//! ```
//!
//! ## Usage Patterns
//! ```rust
//! use ReBalance::settings::{with_config, BalancerConfig};
//!
//! let tolerance = with_config(|config| config.tolerance);
//! assert!(tolerance > 0.0);
//! let defaults = BalancerConfig::default();
//! assert_eq!(defaults.max_multiplier, 999);
//! ```

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, OnceLock};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "rebalance_config.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// How a real null-space vector is turned into integers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RationalizationStrategy {
    /// try k = 1, 2, ... up to `max_multiplier` until k * vector is integral
    #[default]
    MultiplierSearch,
    /// approximate every entry by a fraction and scale by the LCM of the denominators
    ContinuedFraction,
}

/// Numerical and formatting settings of the balancer.
///
/// # Fields
/// * `tolerance` - absolute tolerance of every floating point comparison
/// * `max_multiplier` - upper bound of the integer multiplier search
/// * `strategy` - rationalization strategy
/// * `max_denominator` - largest denominator the continued fraction strategy accepts
/// * `multiplication_glyph` - text between a coefficient and its formula in the output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalancerConfig {
    pub tolerance: f64,
    pub max_multiplier: u64,
    pub strategy: RationalizationStrategy,
    pub max_denominator: u64,
    pub multiplication_glyph: String,
}

impl Default for BalancerConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            max_multiplier: 999,
            strategy: RationalizationStrategy::MultiplierSearch,
            max_denominator: 1_000_000,
            multiplication_glyph: "·".to_string(),
        }
    }
}

impl BalancerConfig {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.tolerance > 0.0 && self.tolerance < 0.5) {
            return Err(SettingsError::Invalid(format!(
                "tolerance must lie in (0, 0.5), got {}",
                self.tolerance
            )));
        }
        if self.max_multiplier == 0 {
            return Err(SettingsError::Invalid("max_multiplier must be at least 1".into()));
        }
        if self.max_denominator == 0 {
            return Err(SettingsError::Invalid("max_denominator must be at least 1".into()));
        }
        Ok(())
    }
}

/// Loads, keeps and saves the balancer configuration.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    config: BalancerConfig,
    config_file: String,
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsManager {
    /// Reads `rebalance_config.json` from the current directory, falling back to defaults
    /// when the file is absent or unreadable.
    pub fn new() -> Self {
        Self::with_config_file(DEFAULT_CONFIG_FILE)
    }

    pub fn with_config_file(config_file: &str) -> Self {
        let config = match Self::load_config(config_file) {
            Ok(config) => config,
            Err(e) => {
                warn!("could not load {}: {}, using defaults", config_file, e);
                BalancerConfig::default()
            }
        };
        Self {
            config,
            config_file: config_file.to_string(),
        }
    }

    /// A missing file yields the defaults; malformed JSON or invalid values are errors.
    pub fn load_config(config_file: &str) -> Result<BalancerConfig, SettingsError> {
        if !Path::new(config_file).exists() {
            return Ok(BalancerConfig::default());
        }
        let content = fs::read_to_string(config_file)?;
        let config: BalancerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        info!("balancer configuration loaded from {}", config_file);
        Ok(config)
    }

    pub fn save_config(&self) -> Result<(), SettingsError> {
        let content = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.config_file, content)?;
        Ok(())
    }

    pub fn config(&self) -> &BalancerConfig {
        &self.config
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// Replaces the configuration after validating it and saves it.
    pub fn set_config(&mut self, config: BalancerConfig) -> Result<(), SettingsError> {
        config.validate()?;
        self.config = config;
        self.save_config()
    }

    pub fn reset_to_defaults(&mut self) -> Result<(), SettingsError> {
        self.config = BalancerConfig::default();
        self.save_config()
    }
}

/// Global settings instance used by the front end
static GLOBAL_SETTINGS: OnceLock<Mutex<SettingsManager>> = OnceLock::new();

/// Installs a manager for a non-default config file. Has no effect once the global
/// instance has been created.
pub fn init_settings(config_file: &str) -> bool {
    GLOBAL_SETTINGS
        .set(Mutex::new(SettingsManager::with_config_file(config_file)))
        .is_ok()
}

fn get_settings() -> MutexGuard<'static, SettingsManager> {
    GLOBAL_SETTINGS
        .get_or_init(|| Mutex::new(SettingsManager::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Executes a closure with read-only access to the active configuration.
pub fn with_config<F, R>(f: F) -> R
where
    F: FnOnce(&BalancerConfig) -> R,
{
    let manager = get_settings();
    f(manager.config())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = BalancerConfig::default();
        assert_eq!(config.tolerance, 1e-9);
        assert_eq!(config.max_multiplier, 999);
        assert_eq!(config.strategy, RationalizationStrategy::MultiplierSearch);
        assert_eq!(config.multiplication_glyph, "·");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let manager = SettingsManager::with_config_file("/nonexistent/dir/rebalance_config.json");
        assert_eq!(manager.config(), &BalancerConfig::default());
    }

    #[test]
    fn test_partial_config_file() {
        let mut temp_config = NamedTempFile::new().unwrap();
        temp_config
            .write_all(br#"{"max_multiplier": 5000, "strategy": "ContinuedFraction"}"#)
            .unwrap();
        let config = SettingsManager::load_config(temp_config.path().to_str().unwrap()).unwrap();
        assert_eq!(config.max_multiplier, 5000);
        assert_eq!(config.strategy, RationalizationStrategy::ContinuedFraction);
        assert_eq!(config.tolerance, 1e-9);
    }

    #[test]
    fn test_malformed_and_invalid_files() {
        let mut temp_config = NamedTempFile::new().unwrap();
        temp_config.write_all(b"{ not json").unwrap();
        assert!(matches!(
            SettingsManager::load_config(temp_config.path().to_str().unwrap()),
            Err(SettingsError::Json(_))
        ));

        let mut temp_config = NamedTempFile::new().unwrap();
        temp_config.write_all(br#"{"tolerance": -1.0}"#).unwrap();
        assert!(matches!(
            SettingsManager::load_config(temp_config.path().to_str().unwrap()),
            Err(SettingsError::Invalid(_))
        ));
    }

    #[test]
    fn test_save_and_reload() {
        let temp_config = NamedTempFile::new().unwrap();
        let path = temp_config.path().to_str().unwrap().to_string();
        let mut manager = SettingsManager::with_config_file(&path);
        let config = BalancerConfig {
            max_multiplier: 10_000,
            multiplication_glyph: "*".to_string(),
            ..BalancerConfig::default()
        };
        manager.set_config(config.clone()).unwrap();

        let reloaded = SettingsManager::with_config_file(&path);
        assert_eq!(reloaded.config(), &config);

        let mut reloaded = reloaded;
        reloaded.reset_to_defaults().unwrap();
        assert_eq!(
            SettingsManager::load_config(&path).unwrap(),
            BalancerConfig::default()
        );
    }

    #[test]
    fn test_set_config_rejects_invalid_values() {
        let temp_config = NamedTempFile::new().unwrap();
        let mut manager = SettingsManager::with_config_file(temp_config.path().to_str().unwrap());
        let bad = BalancerConfig {
            max_multiplier: 0,
            ..BalancerConfig::default()
        };
        assert!(manager.set_config(bad).is_err());
        assert_eq!(manager.config().max_multiplier, 999);
    }
}

//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`EU_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Self-check configuration
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`EU_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // EU_DIAGNOSTICS__SAMPLES=50 -> diagnostics.samples = 50
        figment = figment.merge(Env::prefixed("EU_").split("__"));

        let config: Self = figment.extract().map_err(ConfigError::from)?;
        config.diagnostics.validate()?;
        Ok(config)
    }
}

/// Numeric self-check configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Number of random samples per check
    pub samples: usize,
    /// Seed for the sample generator (same seed, same report)
    pub seed: u64,
    /// Angles are drawn from `[-angle_range, angle_range]` radians
    pub angle_range: f64,
    /// Upper bound for the exp/log and sqrt samples
    pub exp_range: f64,
    /// Largest acceptable error before a check fails
    pub tolerance: f64,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            samples: 1000,
            seed: 0x5EED,
            angle_range: 50.0,
            exp_range: 100.0,
            tolerance: 1e-5,
        }
    }
}

impl DiagnosticsConfig {
    /// Reject ranges the sample generator cannot draw from
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.samples == 0 {
            return Err(ConfigError::invalid("diagnostics.samples must be at least 1"));
        }
        if !(self.angle_range.is_finite() && self.angle_range > 0.0) {
            return Err(ConfigError::invalid("diagnostics.angle_range must be positive"));
        }
        if !(self.exp_range.is_finite() && self.exp_range > 0.0) {
            return Err(ConfigError::invalid("diagnostics.exp_range must be positive"));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ConfigError::invalid("diagnostics.tolerance must be positive"));
        }
        Ok(())
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn invalid(message: &str) -> Self {
        ConfigError {
            message: message.to_string(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.diagnostics.samples, 1000);
        assert_eq!(config.diagnostics.tolerance, 1e-5);
        assert_eq!(config.debug.log_level, "info");
        assert!(config.diagnostics.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("[diagnostics]"));
        assert!(toml.contains("samples"));
        assert!(toml.contains("log_level"));
    }

    #[test]
    fn test_partial_section_uses_defaults() {
        let config: AppConfig = toml::from_str("[diagnostics]\nsamples = 10\n").unwrap();
        assert_eq!(config.diagnostics.samples, 10);
        assert_eq!(config.diagnostics.seed, DiagnosticsConfig::default().seed);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let zero_samples = DiagnosticsConfig { samples: 0, ..Default::default() };
        assert!(zero_samples.validate().is_err());

        let negative_range = DiagnosticsConfig { angle_range: -1.0, ..Default::default() };
        assert!(negative_range.validate().is_err());

        let nan_tolerance = DiagnosticsConfig { tolerance: f64::NAN, ..Default::default() };
        let err = nan_tolerance.validate().unwrap_err();
        assert!(err.to_string().starts_with("Configuration error:"));
        assert!(err.to_string().contains("tolerance"));
    }
}

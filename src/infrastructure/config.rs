//! # Settings
//!
//! Layered configuration loaded with the `config` crate.
//!
//! Sources, later ones winning:
//!
//! 1. Built-in defaults
//! 2. Optional file `config/smart_dealer.{toml,yaml,json}`
//! 3. Environment variables prefixed `SMART_DEALER_`, nested with `__`
//!    (e.g. `SMART_DEALER_RANKING__PRICE=0.5`)
//!
//! # Examples
//!
//! ```
//! use smart_dealer::infrastructure::config::Settings;
//!
//! let settings = Settings::from_toml_str(
//!     r#"
//!     [pipeline]
//!     max_results = 5
//!
//!     [ranking]
//!     price = 0.6
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(settings.pipeline_config().max_results, 5);
//! assert_eq!(settings.ranking_weights().price, 0.6);
//! assert_eq!(settings.ranking_weights().time, 0.2);
//! ```

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::{PipelineConfig, RankingWeights};
use crate::infrastructure::sources::SimulationConfig;
use crate::infrastructure::telemetry::LogFormat;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Default settings file, without extension.
pub const DEFAULT_CONFIG_FILE: &str = "config/smart_dealer";

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "SMART_DEALER";

/// Application identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Service name used in logs.
    pub name: String,
    /// Deployment environment, e.g. `development` or `production`.
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "smart-dealer".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `smart_dealer=debug`.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// All settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Application identity.
    pub app: AppSettings,
    /// Logging.
    pub logging: LoggingSettings,
    /// Default ranking weights.
    pub ranking: RankingWeights,
    /// Pipeline limits.
    pub pipeline: PipelineConfig,
    /// Simulated platform tuning.
    pub simulation: SimulationConfig,
}

impl Settings {
    /// Loads settings from [`DEFAULT_CONFIG_FILE`] and the environment.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if a source cannot be read
    /// or the result is invalid.
    pub fn load() -> ApplicationResult<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Loads settings from `file` (optional, any supported extension) and
    /// the environment.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if a source cannot be read
    /// or the result is invalid.
    pub fn load_from(file: &str) -> ApplicationResult<Self> {
        let settings: Self = Config::builder()
            .add_source(File::with_name(file).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parses settings from TOML text, ignoring the environment.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the text does not parse
    /// or the result is invalid.
    pub fn from_toml_str(toml: &str) -> ApplicationResult<Self> {
        let settings: Self = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks values the type system cannot.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` naming the first bad value.
    pub fn validate(&self) -> ApplicationResult<()> {
        let weights = [
            ("price", self.ranking.price),
            ("time", self.ranking.time),
            ("rating", self.ranking.rating),
            ("fees", self.ranking.fees),
            ("user_pref", self.ranking.user_pref),
        ];
        if let Some((name, value)) = weights.iter().find(|(_, w)| !w.is_finite()) {
            return Err(ApplicationError::configuration(format!(
                "ranking.{name} must be finite, got {value}"
            )));
        }
        if self.pipeline.per_source_timeout_ms == 0 {
            return Err(ApplicationError::configuration(
                "pipeline.per_source_timeout_ms must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.simulation.failure_rate) {
            return Err(ApplicationError::configuration(format!(
                "simulation.failure_rate must be within [0, 1], got {}",
                self.simulation.failure_rate
            )));
        }
        Ok(())
    }

    /// Returns the pipeline configuration.
    #[must_use]
    pub fn pipeline_config(&self) -> PipelineConfig {
        self.pipeline.clone()
    }

    /// Returns the default ranking weights.
    #[must_use]
    pub fn ranking_weights(&self) -> RankingWeights {
        self.ranking
    }

    /// Returns true when running in production.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.app.environment.eq_ignore_ascii_case("production")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.app.name, "smart-dealer");
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.pipeline_config(), PipelineConfig::default());
        assert_eq!(settings.ranking_weights(), RankingWeights::default());
        assert_eq!(settings.simulation.latency_ms, 100);
        assert!(settings.validate().is_ok());
        assert!(!settings.is_production());
    }

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(Settings::from_toml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn sections_override_defaults() {
        let settings = Settings::from_toml_str(
            r#"
            [app]
            environment = "production"

            [logging]
            level = "debug"
            format = "json"

            [simulation]
            latency_ms = 0
            seed = 42
            "#,
        )
        .unwrap();

        assert!(settings.is_production());
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(settings.simulation.seed, Some(42));
        assert_eq!(settings.simulation.latency_ms, 0);
        assert_eq!(settings.pipeline.per_source_timeout_ms, 5000);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = Settings::from_toml_str("[pipeline]\nper_source_timeout_ms = 0").unwrap_err();
        assert!(err.to_string().contains("per_source_timeout_ms"));
    }

    #[test]
    fn out_of_range_failure_rate_is_rejected() {
        assert!(Settings::from_toml_str("[simulation]\nfailure_rate = 1.5").is_err());
    }

    #[test]
    fn missing_file_is_optional() {
        let settings = Settings::load_from("does/not/exist").unwrap();
        assert_eq!(settings.pipeline.max_results, 10);
    }
}

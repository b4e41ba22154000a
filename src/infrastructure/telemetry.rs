//! # Telemetry
//!
//! Installs the global `tracing` subscriber.
//!
//! `RUST_LOG` wins over the configured level when set. Output goes to
//! stderr so command-line JSON on stdout stays clean.

use crate::application::error::{ApplicationError, ApplicationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt as layer_fmt};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable console output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => f.write_str("pretty"),
            Self::Json => f.write_str("json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ApplicationError::configuration(format!(
                "unknown log format '{other}'"
            ))),
        }
    }
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns `ApplicationError::Configuration` if `level` is not a valid
/// filter directive, or `ApplicationError::Internal` if a global
/// subscriber is already installed.
pub fn init_tracing(level: &str, format: LogFormat) -> ApplicationResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| ApplicationError::configuration(format!("invalid log level '{level}': {e}")))?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Pretty => registry
            .with(layer_fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(layer_fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };

    result.map_err(|e| ApplicationError::internal(format!("tracing already initialised: {e}")))
}

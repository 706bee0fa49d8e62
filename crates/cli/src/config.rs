//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required (for rate commands)
//! - `TRANSDOM_RATES_FILE` - Path to the rate file (YAML or JSON). The
//!   `--rates` flag takes precedence.
//!
//! ## Optional
//! - `TRANSDOM_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! - `RUST_LOG` - Tracing filter (default: `transdom=info,transdom_core=info`)

use std::path::{Path, PathBuf};

use thiserror::Error;

const RATES_FILE_VAR: &str = "TRANSDOM_RATES_FILE";
const LOG_FORMAT_VAR: &str = "TRANSDOM_LOG_FORMAT";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("expected 'pretty' or 'json', got '{s}'")),
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Rate file to load, if one was configured
    rates_file: Option<PathBuf>,
    /// Log output format
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// `rates_override` (from `--rates`) wins over `TRANSDOM_RATES_FILE`.
    /// The caller is expected to have loaded `.env` already.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env(rates_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::from_values(
            rates_override,
            get_optional_env(RATES_FILE_VAR),
            get_optional_env(LOG_FORMAT_VAR),
        )
    }

    /// Build configuration from already-read values.
    fn from_values(
        rates_override: Option<PathBuf>,
        rates_file: Option<String>,
        log_format: Option<String>,
    ) -> Result<Self, ConfigError> {
        let rates_file = rates_override.or_else(|| rates_file.map(PathBuf::from));
        let log_format = log_format
            .map(|value| {
                value
                    .parse::<LogFormat>()
                    .map_err(|e| ConfigError::InvalidEnvVar(LOG_FORMAT_VAR.to_string(), e))
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            rates_file,
            log_format,
        })
    }

    /// The rate file path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if neither `--rates` nor
    /// `TRANSDOM_RATES_FILE` was given.
    pub fn rates_file(&self) -> Result<&Path, ConfigError> {
        self.rates_file
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar(RATES_FILE_VAR.to_string()))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

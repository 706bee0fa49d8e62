//! CLI command implementations.

pub mod insurance;
pub mod quote;
pub mod validate;

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

use transdom_core::{
    InsuranceError, QuoteError, RateConfig, RateConfigError, RateResolver, RateSnapshot,
};

use crate::config::ConfigError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Rate file error: {0}")]
    Rates(#[from] RateConfigError),

    #[error("Quote failed ({}): {}", .0.code(), .0)]
    Quote(#[from] QuoteError),

    #[error("Insurance calculation failed: {0}")]
    Insurance(#[from] InsuranceError),

    #[error("Exactly one of --zone or --country is required")]
    Destination,

    #[error("Failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Rate file syntax, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateFormat {
    Yaml,
    Json,
}

impl RateFormat {
    /// `.json` files are JSON; everything else is read as YAML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Read and parse a rate file without validating it.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a list of rate
/// documents.
pub async fn read_rate_config(path: &Path) -> Result<RateConfig, CommandError> {
    info!(path = %path.display(), "Loading rate file");

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CommandError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let config = match RateFormat::from_path(path) {
        RateFormat::Json => RateConfig::from_json_str(&content)?,
        RateFormat::Yaml => RateConfig::from_yaml_str(&content)?,
    };

    info!(zones = config.documents().len(), "Parsed rate file");
    Ok(config)
}

/// Read, validate and normalize a rate file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if any
/// document is invalid. Every validation issue is logged before returning.
pub async fn load_snapshot(path: &Path) -> Result<RateSnapshot, CommandError> {
    let config = read_rate_config(path).await?;

    match config.into_snapshot() {
        Ok(snapshot) => {
            info!(
                zones = snapshot.len(),
                tiers = snapshot.tier_count(),
                "Rate snapshot built"
            );
            Ok(snapshot)
        }
        Err(err) => {
            log_issues(&err);
            Err(err.into())
        }
    }
}

/// Load a rate file into a ready resolver.
///
/// # Errors
///
/// See [`load_snapshot`].
pub async fn load_resolver(path: &Path) -> Result<RateResolver, CommandError> {
    Ok(RateResolver::new(load_snapshot(path).await?))
}

fn log_issues(err: &RateConfigError) {
    let issues = err.issues();
    if issues.is_empty() {
        return;
    }
    error!("Rate file validation failed:");
    for issue in issues {
        error!("  - {issue}");
    }
}

/// Write a value to stdout as pretty JSON.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
pub fn emit_json<T: Serialize>(value: &T) -> Result<(), CommandError> {
    let json = serde_json::to_string_pretty(value)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{json}");
    }

    Ok(())
}

/// Write plain lines to stdout.
pub fn emit_lines<I, S>(lines: I)
where
    I: IntoIterator<Item = S>,
    S: std::fmt::Display,
{
    #[allow(clippy::print_stdout)]
    {
        for line in lines {
            println!("{line}");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(RateFormat::from_path(Path::new("rates.json")), RateFormat::Json);
        assert_eq!(RateFormat::from_path(Path::new("rates.JSON")), RateFormat::Json);
        assert_eq!(RateFormat::from_path(Path::new("rates.yaml")), RateFormat::Yaml);
        assert_eq!(RateFormat::from_path(Path::new("rates")), RateFormat::Yaml);
    }

    #[test]
    fn test_error_messages() {
        let err = CommandError::from(QuoteError::WeightOutOfRange {
            zone: "ASIA".to_owned(),
            weight: 7,
        });
        let message = err.to_string();
        assert!(
            message.starts_with("Quote failed (weight_out_of_range): "),
            "message: {message}"
        );
        assert!(message.contains("ASIA"), "message: {message}");

        let err = CommandError::from(ConfigError::MissingEnvVar("TRANSDOM_RATES_FILE".to_owned()));
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing environment variable: TRANSDOM_RATES_FILE"
        );
    }

    #[tokio::test]
    async fn test_load_yaml_resolver() {
        let file = write_temp(
            ".yaml",
            "- zone: UK_IRELAND\n  rates:\n    - { weight: 2, price: 15000 }\n",
        );
        let resolver = load_resolver(file.path()).await.unwrap();
        assert_eq!(resolver.resolve("UK_IRELAND", 2).unwrap().price, "15,000.00");
    }

    #[tokio::test]
    async fn test_load_json_resolver() {
        let file = write_temp(
            ".json",
            r#"[{"zone": "ASIA", "rates": [{"weight": 1, "price": "1,234.56"}]}]"#,
        );
        let resolver = load_resolver(file.path()).await.unwrap();
        assert_eq!(resolver.resolve("ASIA", 1).unwrap().price, "1,234.56");
    }

    #[tokio::test]
    async fn test_load_invalid_file_fails() {
        let file = write_temp(
            ".yaml",
            "- zone: ASIA\n  rates:\n    - { weight: 1, price: 10 }\n    - { weight: 1, price: 20 }\n",
        );
        let err = load_snapshot(file.path()).await.unwrap_err();
        assert!(matches!(err, CommandError::Rates(RateConfigError::Invalid(ref issues)) if issues.len() == 1));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = load_snapshot(Path::new("/nonexistent/rates.yaml"))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Io { .. }));
    }
}

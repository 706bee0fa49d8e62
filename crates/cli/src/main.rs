//! Transdom CLI - rate file validation and quoting tools.
//!
//! # Usage
//!
//! ```bash
//! # Check a rate file before deploying it
//! transdom --rates rates.yaml validate
//!
//! # Quote a shipment
//! transdom quote --zone UK_IRELAND --weight 2
//! transdom quote --country Ghana --weight 5
//!
//! # Verify a recorded payment against the quote
//! transdom verify --zone UK_IRELAND --weight 2 --amount-paid 15000
//!
//! # Inspect configuration
//! transdom zones
//! transdom rates --zone EUROPE
//! transdom countries --zone ASIA
//!
//! # Insurance fee for a declared value
//! transdom insurance --value 250000
//! ```
//!
//! # Commands
//!
//! - `validate` - Load and validate the rate file
//! - `quote` - Resolve a price for a zone (or country) and weight
//! - `verify` - Compare an amount paid with the quote
//! - `zones` - List configured zones
//! - `rates` - Dump rate tables as JSON
//! - `countries` - List countries served by each zone
//! - `insurance` - Calculate the insurance fee

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::CommandError;
use commands::quote::Destination;
use config::{CliConfig, LogFormat};

#[derive(Parser)]
#[command(name = "transdom")]
#[command(author, version, about = "Transdom shipping-rate tools")]
struct Cli {
    /// Rate file (YAML or JSON). Overrides `TRANSDOM_RATES_FILE`.
    #[arg(long, global = true)]
    rates: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate the rate file
    Validate,
    /// Resolve the price for a destination and weight
    Quote {
        #[command(flatten)]
        destination: DestinationArgs,

        /// Shipment weight (whole units of the zone's weight unit)
        #[arg(short, long, allow_negative_numbers = true)]
        weight: i64,
    },
    /// Compare an amount paid with the quoted price
    Verify {
        #[command(flatten)]
        destination: DestinationArgs,

        /// Shipment weight (whole units of the zone's weight unit)
        #[arg(short, long, allow_negative_numbers = true)]
        weight: i64,

        /// Amount recorded as paid
        #[arg(short, long)]
        amount_paid: Decimal,
    },
    /// List configured zones
    Zones,
    /// Print rate tables as JSON
    Rates {
        /// Only this zone
        #[arg(short, long)]
        zone: Option<String>,
    },
    /// List countries served by each zone
    Countries {
        /// Only this zone
        #[arg(short, long)]
        zone: Option<String>,
    },
    /// Calculate the insurance fee for a declared shipment value
    Insurance {
        /// Declared shipment value in naira
        #[arg(short, long, allow_negative_numbers = true)]
        value: Decimal,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct DestinationArgs {
    /// Destination zone identifier (e.g. `UK_IRELAND`)
    #[arg(short, long)]
    zone: Option<String>,

    /// Destination country name (e.g. Ghana)
    #[arg(short, long)]
    country: Option<String>,
}

impl DestinationArgs {
    /// The single destination given on the command line.
    ///
    /// clap's group requires exactly one of `--zone` or `--country`.
    fn into_destination(self) -> Result<Destination, CommandError> {
        match (self.zone, self.country) {
            (Some(zone), None) => Ok(Destination::Zone(zone)),
            (None, Some(country)) => Ok(Destination::Country(country)),
            _ => Err(CommandError::Destination),
        }
    }
}

/// Initialize tracing with `EnvFilter`, in pretty or JSON form.
fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "transdom=info,transdom_core=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = CliConfig::from_env(cli.rates);
    init_tracing(
        config
            .as_ref()
            .map_or(LogFormat::default(), |config| config.log_format),
    );

    let result = match config {
        Ok(config) => run(cli.command, &config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: &CliConfig) -> Result<(), CommandError> {
    match command {
        Commands::Validate => commands::validate::validate(config.rates_file()?).await?,
        Commands::Quote {
            destination,
            weight,
        } => {
            commands::quote::quote(
                config.rates_file()?,
                &destination.into_destination()?,
                weight,
            )
            .await?;
        }
        Commands::Verify {
            destination,
            weight,
            amount_paid,
        } => {
            commands::quote::verify(
                config.rates_file()?,
                &destination.into_destination()?,
                weight,
                amount_paid,
            )
            .await?;
        }
        Commands::Zones => commands::quote::zones(config.rates_file()?).await?,
        Commands::Rates { zone } => {
            commands::quote::rates(config.rates_file()?, zone.as_deref()).await?;
        }
        Commands::Countries { zone } => commands::quote::countries(zone.as_deref())?,
        Commands::Insurance { value } => commands::insurance::insurance(value)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_quote_requires_a_destination() {
        assert!(Cli::try_parse_from(["transdom", "quote", "--weight", "2"]).is_err());
    }

    #[test]
    fn test_quote_rejects_both_destinations() {
        assert!(
            Cli::try_parse_from([
                "transdom", "quote", "--zone", "ASIA", "--country", "Japan", "--weight", "2"
            ])
            .is_err()
        );
    }

    #[test]
    fn test_quote_accepts_negative_weight() {
        let cli = Cli::try_parse_from(["transdom", "quote", "--zone", "ASIA", "--weight", "-1"]);
        assert!(matches!(
            cli.map(|cli| cli.command),
            Ok(Commands::Quote { weight: -1, .. })
        ));
    }

    #[test]
    fn test_destination_mapping() {
        let zone = DestinationArgs {
            zone: Some("ASIA".to_owned()),
            country: None,
        };
        assert!(matches!(zone.into_destination(), Ok(Destination::Zone(z)) if z == "ASIA"));

        let country = DestinationArgs {
            zone: None,
            country: Some("Japan".to_owned()),
        };
        assert!(matches!(
            country.into_destination(),
            Ok(Destination::Country(c)) if c == "Japan"
        ));

        let neither = DestinationArgs {
            zone: None,
            country: None,
        };
        assert!(matches!(
            neither.into_destination(),
            Err(CommandError::Destination)
        ));
    }

    #[test]
    fn test_global_rates_flag() {
        let cli = Cli::try_parse_from(["transdom", "zones", "--rates", "rates.json"]);
        assert!(matches!(cli, Ok(Cli { rates: Some(_), .. })));
    }
}

//! Quoting and listing commands.
//!
//! # Usage
//!
//! ```bash
//! # Price 2 kg to the UK/Ireland zone
//! transdom quote --zone UK_IRELAND --weight 2
//!
//! # Price by destination country instead of zone
//! transdom quote --country Ghana --weight 5
//!
//! # Check a recorded payment against the quote
//! transdom verify --zone UK_IRELAND --weight 2 --amount-paid 15000
//!
//! # List configured zones, rate tables, and the countries each zone serves
//! transdom zones
//! transdom rates --zone EUROPE
//! transdom countries --zone ASIA
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use transdom_core::zones;
use transdom_core::{AmountCheck, Quote, RateResolver, check_amount_paid};

use super::{CommandError, emit_json, emit_lines, load_resolver};

/// Where a quote is headed.
#[derive(Debug, Clone)]
pub enum Destination {
    Zone(String),
    Country(String),
}

fn resolve(
    resolver: &RateResolver,
    destination: &Destination,
    weight: i64,
) -> Result<Quote, CommandError> {
    let result = match destination {
        Destination::Zone(zone) => resolver.resolve(zone, weight),
        Destination::Country(country) => resolver.resolve_for_country(country, weight),
    };

    result.map_err(|err| {
        warn!(code = err.code(), ?destination, weight, "Quote rejected");
        CommandError::Quote(err)
    })
}

/// Print the quote for a destination and weight.
///
/// # Errors
///
/// Returns an error if the rate file cannot be loaded or the lookup fails.
pub async fn quote(
    rates_file: &Path,
    destination: &Destination,
    weight: i64,
) -> Result<(), CommandError> {
    let resolver = load_resolver(rates_file).await?;
    let quote = resolve(&resolver, destination, weight)?;

    info!(zone = %quote.zone, weight = quote.weight, price = %quote.price, "Quote resolved");
    emit_json(&quote)
}

#[derive(Debug, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
enum VerifyOutput {
    Exact { quoted: String },
    Underpaid { quoted: String, shortfall: String },
    Overpaid { quoted: String, excess: String },
}

/// Compare an amount paid with the quote for a destination and weight.
///
/// A mismatch is reported, not treated as a failure.
///
/// # Errors
///
/// Returns an error if the rate file cannot be loaded or the lookup fails.
pub async fn verify(
    rates_file: &Path,
    destination: &Destination,
    weight: i64,
    amount_paid: Decimal,
) -> Result<(), CommandError> {
    let resolver = load_resolver(rates_file).await?;
    let quote = resolve(&resolver, destination, weight)?;
    let quoted = quote.price.clone();

    let output = match check_amount_paid(&quote, amount_paid) {
        AmountCheck::Exact => VerifyOutput::Exact { quoted },
        AmountCheck::Underpaid { shortfall } => {
            warn!(zone = %quote.zone, %shortfall, "Amount paid is below the quote");
            VerifyOutput::Underpaid {
                quoted,
                shortfall: transdom_core::format_amount(shortfall),
            }
        }
        AmountCheck::Overpaid { excess } => {
            warn!(zone = %quote.zone, %excess, "Amount paid is above the quote");
            VerifyOutput::Overpaid {
                quoted,
                excess: transdom_core::format_amount(excess),
            }
        }
    };

    emit_json(&output)
}

/// Print configured zone identifiers, one per line.
///
/// # Errors
///
/// Returns an error if the rate file cannot be loaded.
pub async fn zones(rates_file: &Path) -> Result<(), CommandError> {
    let resolver = load_resolver(rates_file).await?;
    emit_lines(resolver.zones());
    Ok(())
}

/// Print rate tables as JSON, optionally for a single zone.
///
/// # Errors
///
/// Returns an error if the rate file cannot be loaded or the zone is unknown.
pub async fn rates(rates_file: &Path, zone: Option<&str>) -> Result<(), CommandError> {
    let resolver = load_resolver(rates_file).await?;
    let tables = resolver.rates(zone)?;
    emit_json(&tables)
}

#[derive(Debug, Serialize)]
struct ZoneCountries {
    zone: &'static str,
    countries: Vec<&'static str>,
}

/// Print the countries each zone serves.
///
/// Reads only the built-in mapping; no rate file is needed.
///
/// # Errors
///
/// Returns an error if the output cannot be serialized.
pub fn countries(zone: Option<&str>) -> Result<(), CommandError> {
    let listing: Vec<ZoneCountries> = zones::all_zones()
        .into_iter()
        .filter(|candidate| zone.is_none_or(|wanted| wanted.trim() == *candidate))
        .map(|zone| ZoneCountries {
            zone,
            countries: zones::countries_in_zone(zone),
        })
        .collect();

    if listing.is_empty() {
        if let Some(zone) = zone {
            warn!(zone, "No countries mapped to zone");
        }
    }

    emit_json(&listing)
}

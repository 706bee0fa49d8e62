//! Zone/weight rate resolution.
//!
//! [`RateResolver`] owns the current [`RateSnapshot`] behind an
//! `RwLock<Arc<_>>`. Lookups clone the `Arc` and release the lock before
//! doing any work; reloads swap the whole `Arc` at once. A lookup therefore
//! sees either the old rates or the new rates in full, never a mix.

use std::sync::{Arc, PoisonError, RwLock};

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::rates::snapshot::RateSnapshot;
use crate::rates::table::RateTable;
use crate::types::{CurrencyCode, ZoneId, format_amount};
use crate::zones;

/// Errors returned by rate lookups.
///
/// Every variant is recoverable by the caller. Use [`QuoteError::code`] for
/// a stable machine-readable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    /// The weight is zero or negative.
    #[error("weight must be greater than 0, got {weight}")]
    InvalidWeight { weight: i64 },

    /// No rate table exists for the zone.
    #[error("no rates configured for zone {zone:?}")]
    UnknownZone { zone: String },

    /// The zone exists but has no tier for this exact weight.
    #[error("zone {zone} has no rate for weight {weight}")]
    WeightOutOfRange { zone: String, weight: i64 },

    /// The country does not belong to any shipping zone.
    #[error("no shipping zone serves {country:?}")]
    UnknownCountry { country: String },
}

impl QuoteError {
    /// Stable error code for API responses.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidWeight { .. } => "invalid_weight",
            Self::UnknownZone { .. } => "unknown_zone",
            Self::WeightOutOfRange { .. } => "weight_out_of_range",
            Self::UnknownCountry { .. } => "unknown_country",
        }
    }
}

/// A resolved price for a zone and weight.
///
/// Serializes as `{zone, weight, price, currency}` with `price` already
/// formatted for display. The numeric amount is kept alongside for payment
/// checks but is not part of the wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub zone: ZoneId,
    pub weight: u32,
    pub price: String,
    pub currency: CurrencyCode,
    #[serde(skip)]
    pub amount: Decimal,
}

/// Resolves `(zone, weight)` to a [`Quote`] against the current rates.
#[derive(Debug)]
pub struct RateResolver {
    current: RwLock<Arc<RateSnapshot>>,
}

impl RateResolver {
    /// Create a resolver serving `snapshot`.
    #[must_use]
    pub fn new(snapshot: RateSnapshot) -> Self {
        Self::from_shared(Arc::new(snapshot))
    }

    /// Create a resolver serving an already-shared snapshot.
    #[must_use]
    pub const fn from_shared(snapshot: Arc<RateSnapshot>) -> Self {
        Self {
            current: RwLock::new(snapshot),
        }
    }

    /// The snapshot currently being served.
    #[must_use]
    pub fn snapshot(&self) -> Arc<RateSnapshot> {
        // The guarded value is a plain Arc; a poisoned lock still holds a
        // complete snapshot.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace the served snapshot, returning the previous one.
    pub fn reload(&self, snapshot: RateSnapshot) -> Arc<RateSnapshot> {
        let next = Arc::new(snapshot);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }

    /// Price a shipment of `weight` to `zone`.
    ///
    /// Checks run in a fixed order: weight validity first, then zone
    /// existence, then tier lookup. Tiers are exact weights; a weight
    /// between two tiers is out of range.
    ///
    /// # Errors
    ///
    /// - [`QuoteError::InvalidWeight`] if `weight <= 0`, even for unknown zones
    /// - [`QuoteError::UnknownZone`] if the zone has no rate table
    /// - [`QuoteError::WeightOutOfRange`] if the zone has no tier for `weight`
    pub fn resolve(&self, zone: &str, weight: i64) -> Result<Quote, QuoteError> {
        resolve_in(&self.snapshot(), zone, weight)
    }

    /// Price a shipment to the zone serving `country`.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidWeight`] before anything else, then
    /// [`QuoteError::UnknownCountry`] if no zone serves the country, then
    /// the errors of [`resolve`](Self::resolve).
    pub fn resolve_for_country(&self, country: &str, weight: i64) -> Result<Quote, QuoteError> {
        check_weight(weight)?;
        let zone = zones::zone_for_country(country).ok_or_else(|| QuoteError::UnknownCountry {
            country: country.trim().to_owned(),
        })?;
        self.resolve(zone, weight)
    }

    /// Configured zone identifiers in sorted order.
    #[must_use]
    pub fn zones(&self) -> Vec<ZoneId> {
        self.snapshot().zones().cloned().collect()
    }

    /// Rate tables, optionally restricted to one zone.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::UnknownZone`] if `zone` is given and has no
    /// rate table.
    pub fn rates(&self, zone: Option<&str>) -> Result<Vec<RateTable>, QuoteError> {
        let snapshot = self.snapshot();
        match zone {
            Some(zone) => snapshot
                .table(zone)
                .map(|table| vec![table.clone()])
                .ok_or_else(|| unknown_zone(zone)),
            None => Ok(snapshot.tables().cloned().collect()),
        }
    }
}

fn check_weight(weight: i64) -> Result<(), QuoteError> {
    if weight <= 0 {
        return Err(QuoteError::InvalidWeight { weight });
    }
    Ok(())
}

fn unknown_zone(zone: &str) -> QuoteError {
    QuoteError::UnknownZone {
        zone: zone.trim().to_owned(),
    }
}

fn resolve_in(snapshot: &RateSnapshot, zone: &str, weight: i64) -> Result<Quote, QuoteError> {
    check_weight(weight)?;

    let table = snapshot.table(zone).ok_or_else(|| unknown_zone(zone))?;

    let entry = u32::try_from(weight)
        .ok()
        .and_then(|weight| table.entry(weight))
        .ok_or_else(|| QuoteError::WeightOutOfRange {
            zone: table.zone().to_string(),
            weight,
        })?;

    Ok(Quote {
        zone: table.zone().clone(),
        weight: entry.weight,
        price: format_amount(entry.price),
        currency: table.currency(),
        amount: entry.price,
    })
}

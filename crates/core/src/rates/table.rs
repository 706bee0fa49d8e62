//! Rate tables: the validated, per-zone list of weight tiers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CurrencyCode, RawPrice, ZoneId};

/// Default currency for a rate document that omits one.
pub const DEFAULT_CURRENCY: &str = "NGN";

/// Default weight unit for a rate document that omits one.
pub const DEFAULT_UNIT: &str = "kg";

/// A zone's rates as written in a rate file, before validation.
///
/// Unknown fields (such as a database `_id`) are ignored so exports from the
/// rate store load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateDocument {
    pub zone: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_unit")]
    pub unit: String,
    pub rates: Vec<RawRateEntry>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_owned()
}

fn default_unit() -> String {
    DEFAULT_UNIT.to_owned()
}

/// A single weight/price pair as written in a rate file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRateEntry {
    pub weight: i64,
    pub price: RawPrice,
}

impl RawRateEntry {
    /// Convenience constructor used by tests and seeders.
    pub fn new(weight: i64, price: impl Into<RawPrice>) -> Self {
        Self {
            weight,
            price: price.into(),
        }
    }
}

/// A validated tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateEntry {
    /// Weight in the table's unit. Always positive.
    pub weight: u32,
    /// Non-negative price in the table's currency.
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
}

/// A zone's validated rate table.
///
/// Entries are unique by weight and sorted ascending. Tables are only built
/// by [`RateConfig::into_snapshot`](crate::rates::RateConfig::into_snapshot)
/// and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateTable {
    zone: ZoneId,
    currency: CurrencyCode,
    unit: String,
    rates: Vec<RateEntry>,
}

impl RateTable {
    pub(crate) fn new(
        zone: ZoneId,
        currency: CurrencyCode,
        unit: String,
        mut rates: Vec<RateEntry>,
    ) -> Self {
        rates.sort_unstable_by_key(|entry| entry.weight);
        Self {
            zone,
            currency,
            unit,
            rates,
        }
    }

    #[must_use]
    pub const fn zone(&self) -> &ZoneId {
        &self.zone
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// All tiers, lightest first.
    #[must_use]
    pub fn entries(&self) -> &[RateEntry] {
        &self.rates
    }

    /// The tier for exactly this weight, if one is configured.
    #[must_use]
    pub fn entry(&self, weight: u32) -> Option<&RateEntry> {
        self.rates
            .binary_search_by_key(&weight, |entry| entry.weight)
            .ok()
            .and_then(|index| self.rates.get(index))
    }

    /// Quotable weights, lightest first.
    pub fn weights(&self) -> impl Iterator<Item = u32> + '_ {
        self.rates.iter().map(|entry| entry.weight)
    }
}

//! Immutable zone → rate table mapping.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::rates::table::RateTable;
use crate::types::ZoneId;

/// Every zone's rate table, as loaded at one point in time.
///
/// A snapshot is never modified after it is built. Reloading rates means
/// building a new snapshot and handing it to
/// [`RateResolver::reload`](crate::rates::RateResolver::reload).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateSnapshot {
    tables: BTreeMap<ZoneId, RateTable>,
    built_at: DateTime<Utc>,
}

impl RateSnapshot {
    pub(crate) const fn new(tables: BTreeMap<ZoneId, RateTable>, built_at: DateTime<Utc>) -> Self {
        Self { tables, built_at }
    }

    /// The rate table for a zone.
    #[must_use]
    pub fn table(&self, zone: &str) -> Option<&RateTable> {
        self.tables.get(zone.trim())
    }

    /// All tables, ordered by zone identifier.
    pub fn tables(&self) -> impl Iterator<Item = &RateTable> {
        self.tables.values()
    }

    /// Configured zone identifiers in sorted order.
    pub fn zones(&self) -> impl Iterator<Item = &ZoneId> {
        self.tables.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// When this snapshot was built.
    #[must_use]
    pub const fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// Total number of tiers across all zones.
    #[must_use]
    pub fn tier_count(&self) -> usize {
        self.tables.values().map(|table| table.entries().len()).sum()
    }
}

impl Default for RateSnapshot {
    fn default() -> Self {
        Self::new(BTreeMap::new(), Utc::now())
    }
}

//! Shipping rates: tables, configuration loading and resolution.
//!
//! The flow is one-directional:
//!
//! 1. A rate file is parsed into a [`RateConfig`] (YAML or JSON).
//! 2. [`RateConfig::into_snapshot`] validates every document and normalizes
//!    prices, producing an immutable [`RateSnapshot`].
//! 3. A [`RateResolver`] serves quotes from the snapshot and can be handed
//!    a replacement snapshot at any time.

mod config;
mod resolver;
mod snapshot;
mod table;

pub use config::{RateConfig, RateConfigError, RateIssue};
pub use resolver::{Quote, QuoteError, RateResolver};
pub use snapshot::RateSnapshot;
pub use table::{DEFAULT_CURRENCY, DEFAULT_UNIT, RateDocument, RateEntry, RateTable, RawRateEntry};

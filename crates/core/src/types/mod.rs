//! Core types for Transdom.
//!
//! This module provides type-safe wrappers for zones, prices and record
//! statuses.

pub mod price;
pub mod status;
pub mod zone;

pub use price::{CurrencyCode, Price, PriceError, RawPrice, format_amount};
pub use status::*;
pub use zone::{ZoneId, ZoneIdError};

//! Transdom Core - shipping-rate quotation library.
//!
//! This crate provides the pricing core used by the Transdom services:
//! - `transdom` CLI - rate file validation and quoting from the command line
//! - HTTP, order and payment services that call into the resolver
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no file or network
//! I/O, no database access. Rate files are read by the caller and handed in
//! as strings.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for zones, prices and statuses
//! - [`rates`] - Rate tables, configuration loading and [`RateResolver`]
//! - [`zones`] - Country → zone mapping
//! - [`insurance`] - Shipment insurance fees
//! - [`orders`] - Order and payment records, amount verification

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod insurance;
pub mod orders;
pub mod rates;
pub mod types;
pub mod zones;

pub use insurance::{InsuranceError, InsuranceQuote};
pub use orders::{AmountCheck, Order, OrderError, Payment, check_amount_paid};
pub use rates::{Quote, QuoteError, RateConfig, RateConfigError, RateResolver, RateSnapshot};
pub use types::*;

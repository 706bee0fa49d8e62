//! Shipment insurance fees.
//!
//! The fee is 2% of the declared shipment value, never less than ₦500.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::types::CurrencyCode;
use crate::types::price::round_amount;

/// Errors that can occur when pricing insurance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsuranceError {
    /// The declared value is zero or negative.
    #[error("shipment value must be greater than 0")]
    InvalidShipmentValue,
}

/// Proportion of the shipment value charged as insurance (2%).
#[must_use]
pub fn insurance_rate() -> Decimal {
    Decimal::new(2, 2)
}

/// Floor for the insurance fee, in naira.
#[must_use]
pub fn minimum_fee() -> Decimal {
    Decimal::new(500, 0)
}

/// Insurance pricing for one shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsuranceQuote {
    pub shipment_value: Decimal,
    pub insurance_fee: Decimal,
    pub insurance_rate: Decimal,
    pub minimum_fee: Decimal,
    pub currency: CurrencyCode,
}

impl InsuranceQuote {
    /// Price insurance for a shipment declared at `shipment_value` naira.
    ///
    /// # Errors
    ///
    /// Returns [`InsuranceError::InvalidShipmentValue`] if the value is not
    /// positive.
    pub fn calculate(shipment_value: Decimal) -> Result<Self, InsuranceError> {
        if shipment_value <= Decimal::ZERO {
            return Err(InsuranceError::InvalidShipmentValue);
        }

        let rate = insurance_rate();
        let minimum = minimum_fee();
        let fee = (shipment_value * rate).max(minimum);

        Ok(Self {
            shipment_value,
            insurance_fee: round_amount(fee),
            insurance_rate: rate,
            minimum_fee: minimum,
            currency: CurrencyCode::NGN,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_fee_applies_to_small_shipments() {
        let quote = InsuranceQuote::calculate(Decimal::new(10_000, 0)).unwrap();
        assert_eq!(quote.insurance_fee, Decimal::new(500, 0));
    }

    #[test]
    fn test_percentage_applies_above_threshold() {
        let quote = InsuranceQuote::calculate(Decimal::new(100_000, 0)).unwrap();
        assert_eq!(quote.insurance_fee, Decimal::new(2000, 0));
        assert_eq!(quote.currency, CurrencyCode::NGN);
    }

    #[test]
    fn test_threshold_is_exactly_minimum() {
        let quote = InsuranceQuote::calculate(Decimal::new(25_000, 0)).unwrap();
        assert_eq!(quote.insurance_fee, Decimal::new(500, 0));
    }

    #[test]
    fn test_fee_rounded_to_two_places() {
        let quote = InsuranceQuote::calculate(Decimal::new(123_456_789, 3)).unwrap();
        // 123456.789 * 0.02 = 2469.13578
        assert_eq!(quote.insurance_fee.to_string(), "2469.14");
    }

    #[test]
    fn test_rejects_non_positive_value() {
        assert_eq!(
            InsuranceQuote::calculate(Decimal::ZERO),
            Err(InsuranceError::InvalidShipmentValue)
        );
        assert_eq!(
            InsuranceQuote::calculate(Decimal::new(-1, 0)),
            Err(InsuranceError::InvalidShipmentValue)
        );
    }
}

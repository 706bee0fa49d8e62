//! Type-safe price representation using decimal arithmetic.
//!
//! Rate files are loosely typed: a tier price may be written as a number
//! (`15000`, `1234.56`) or as a pre-formatted string (`"1,234.56"`).
//! [`RawPrice`] captures both at the deserialization boundary and
//! [`RawPrice::normalize`] turns either into a [`Decimal`] exactly once, so
//! nothing past the loader ever sees the union.
//!
//! Display formatting always uses two decimal places with `,` thousands
//! separators:
//!
//! ```
//! use rust_decimal::Decimal;
//! use transdom_core::types::price::format_amount;
//!
//! assert_eq!(format_amount(Decimal::new(15000, 0)), "15,000.00");
//! assert_eq!(format_amount(Decimal::new(123456, 2)), "1,234.56");
//! ```

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Number of decimal places used for display and comparison.
pub const DISPLAY_SCALE: u32 = 2;

/// Errors that can occur when normalizing a [`RawPrice`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The price string is empty or whitespace.
    #[error("price cannot be empty")]
    Empty,
    /// The price string is not a plain or correctly grouped number.
    #[error("price {0:?} is not a number")]
    NotNumeric(String),
    /// The price is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// A tier price as it appears in a rate file.
///
/// Only real numbers deserialize as [`Numeric`](Self::Numeric); every string,
/// including `"15000"`, is kept as [`Formatted`](Self::Formatted) and checked
/// by [`normalize`](Self::normalize).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RawPrice {
    /// A plain number (`15000`, `1234.56`).
    Numeric(Decimal),
    /// A display string with thousands separators (`"1,234.56"`).
    Formatted(String),
}

impl RawPrice {
    /// Normalize to a non-negative decimal amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the string form is empty or is not a plain or
    /// correctly grouped number, or if the amount is negative.
    pub fn normalize(&self) -> Result<Decimal, PriceError> {
        let amount = match self {
            Self::Numeric(amount) => *amount,
            Self::Formatted(text) => parse_formatted(text)?,
        };

        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }

        Ok(amount)
    }
}

impl From<Decimal> for RawPrice {
    fn from(amount: Decimal) -> Self {
        Self::Numeric(amount)
    }
}

impl From<&str> for RawPrice {
    fn from(text: &str) -> Self {
        Self::Formatted(text.to_owned())
    }
}

impl<'de> Deserialize<'de> for RawPrice {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RawPriceVisitor)
    }
}

struct RawPriceVisitor;

impl Visitor<'_> for RawPriceVisitor {
    type Value = RawPrice;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a formatted price string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(RawPrice::Numeric(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(RawPrice::Numeric(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        // Go through the shortest round-trip text so 1234.56 stays 1234.56
        v.to_string()
            .parse::<Decimal>()
            .map(RawPrice::Numeric)
            .map_err(|_| E::invalid_value(de::Unexpected::Float(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(RawPrice::Formatted(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(RawPrice::Formatted(v))
    }
}

/// Parse a display string such as `"1,234.56"`.
///
/// Accepts an optional leading `-`, an integer part that is either plain
/// digits or correctly grouped in threes (`1,234,567`), and an optional
/// `.` fraction of digits. Anything else, such as `"12,34"` or `"1_000"`,
/// is not a number.
fn parse_formatted(text: &str) -> Result<Decimal, PriceError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(PriceError::Empty);
    }

    let not_numeric = || PriceError::NotNumeric(trimmed.to_owned());

    let unsigned = trimmed.strip_prefix('-').unwrap_or(trimmed);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    if !is_grouped_integer(whole) {
        return Err(not_numeric());
    }
    if fraction.is_some_and(|fraction| !is_digits(fraction)) {
        return Err(not_numeric());
    }

    let digits: String = trimmed.chars().filter(|c| *c != ',').collect();
    digits.parse::<Decimal>().map_err(|_| not_numeric())
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `1234` or `1,234`; never `12,34`, `1,2,3` or `,5`.
fn is_grouped_integer(whole: &str) -> bool {
    if !whole.contains(',') {
        return is_digits(whole);
    }

    let mut groups = whole.split(',');
    let leading_ok = groups
        .next()
        .is_some_and(|lead| is_digits(lead) && lead.len() <= 3);
    leading_ok && groups.all(|group| group.len() == 3 && is_digits(group))
}

/// Round an amount to [`DISPLAY_SCALE`] places, midpoint away from zero.
#[must_use]
pub fn round_amount(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_SCALE);
    rounded
}

/// Format an amount with two decimal places and `,` thousands separators.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = round_amount(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut out = String::with_capacity(text.len() + whole.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(whole));
    out.push('.');
    out.push_str(fraction);
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (naira, not kobo).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price from an amount in minor units (kobo, cents).
    ///
    /// Payment gateways report amounts this way; `150_000` kobo is
    /// `1,500.00` naira.
    #[must_use]
    pub fn from_minor_units(minor: i64, currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::new(minor, DISPLAY_SCALE), currency_code)
    }

    /// Format the amount for display (e.g., "15,000.00").
    #[must_use]
    pub fn display(&self) -> String {
        format_amount(self.amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency_code, self.display())
    }
}

/// ISO 4217 currency codes accepted in rate files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    NGN,
    USD,
    GBP,
    EUR,
}

impl CurrencyCode {
    /// The three-letter code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NGN => "NGN",
            Self::USD => "USD",
            Self::GBP => "GBP",
            Self::EUR => "EUR",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NGN" => Ok(Self::NGN),
            "USD" => Ok(Self::USD),
            "GBP" => Ok(Self::GBP),
            "EUR" => Ok(Self::EUR),
            _ => Err(format!("unsupported currency: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_whole_amount() {
        assert_eq!(format_amount(Decimal::new(15000, 0)), "15,000.00");
    }

    #[test]
    fn test_format_small_amounts() {
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
        assert_eq!(format_amount(Decimal::new(5, 1)), "0.50");
        assert_eq!(format_amount(Decimal::new(999, 0)), "999.00");
    }

    #[test]
    fn test_format_groups_every_three_digits() {
        assert_eq!(format_amount(Decimal::new(1000, 0)), "1,000.00");
        assert_eq!(format_amount(Decimal::new(1_234_567_89, 2)), "1,234,567.89");
        assert_eq!(format_amount(Decimal::new(100_000_000, 0)), "100,000,000.00");
    }

    #[test]
    fn test_format_rounds_midpoint_away_from_zero() {
        assert_eq!(format_amount(Decimal::new(2675, 3)), "2.68");
        assert_eq!(format_amount(Decimal::new(2674, 3)), "2.67");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_amount(Decimal::new(-123_456, 2)), "-1,234.56");
    }

    #[test]
    fn test_normalize_numeric_and_formatted_agree() {
        let numeric = RawPrice::Numeric(Decimal::new(123_456, 2));
        let formatted = RawPrice::from("1,234.56");
        assert_eq!(numeric.normalize().unwrap(), formatted.normalize().unwrap());
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        let price = RawPrice::from("  20,000 ");
        assert_eq!(price.normalize().unwrap(), Decimal::new(20000, 0));
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert_eq!(RawPrice::from("").normalize(), Err(PriceError::Empty));
        assert!(matches!(
            RawPrice::from("fifteen").normalize(),
            Err(PriceError::NotNumeric(_))
        ));
    }

    #[test]
    fn test_normalize_accepts_thousands_grouping() {
        assert_eq!(
            RawPrice::from("1,234,567.89").normalize().unwrap(),
            Decimal::new(123_456_789, 2)
        );
        assert_eq!(RawPrice::from("999").normalize().unwrap(), Decimal::new(999, 0));
        assert_eq!(
            RawPrice::from("100,000").normalize().unwrap(),
            Decimal::new(100_000, 0)
        );
        assert_eq!(RawPrice::from("12000.5").normalize().unwrap(), Decimal::new(120_005, 1));
    }

    #[test]
    fn test_normalize_rejects_misplaced_separators() {
        for text in ["12,34", "1,2,3", ",,5", ",500", "1,00,000", "1,000,", "1234,567", "1,000.5,0"] {
            assert_eq!(
                RawPrice::from(text).normalize(),
                Err(PriceError::NotNumeric(text.to_owned())),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn test_normalize_rejects_non_digit_characters() {
        for text in ["1_000", "1 000", "+500", "1e3", "12.", ".5", "1.2.3", "--5"] {
            assert!(
                matches!(RawPrice::from(text).normalize(), Err(PriceError::NotNumeric(_))),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn test_numeric_looking_strings_stay_formatted() {
        let price: RawPrice = serde_json::from_str("\"1_000\"").unwrap();
        assert_eq!(price, RawPrice::Formatted("1_000".to_owned()));
        assert!(price.normalize().is_err());

        let price: RawPrice = serde_json::from_str("\"15000\"").unwrap();
        assert_eq!(price.normalize().unwrap(), Decimal::new(15000, 0));
    }

    #[test]
    fn test_raw_price_rejects_other_shapes() {
        assert!(serde_json::from_str::<RawPrice>("true").is_err());
        assert!(serde_json::from_str::<RawPrice>("[1]").is_err());
    }

    #[test]
    fn test_normalize_rejects_negative() {
        assert_eq!(
            RawPrice::Numeric(Decimal::new(-1, 0)).normalize(),
            Err(PriceError::Negative)
        );
        assert_eq!(RawPrice::from("-1,000").normalize(), Err(PriceError::Negative));
    }

    #[test]
    fn test_raw_price_deserializes_both_shapes() {
        let numeric: RawPrice = serde_json::from_str("1234.56").unwrap();
        let formatted: RawPrice = serde_json::from_str("\"1,234.56\"").unwrap();
        assert_eq!(numeric.normalize().unwrap(), Decimal::new(123_456, 2));
        assert_eq!(formatted.normalize().unwrap(), Decimal::new(123_456, 2));
    }

    #[test]
    fn test_from_minor_units() {
        let price = Price::from_minor_units(150_000, CurrencyCode::NGN);
        assert_eq!(price.amount, Decimal::new(1500, 0));
        assert_eq!(price.display(), "1,500.00");
        assert_eq!(price.to_string(), "NGN 1,500.00");
    }

    #[test]
    fn test_currency_code_parse() {
        assert_eq!("ngn".parse::<CurrencyCode>().unwrap(), CurrencyCode::NGN);
        assert_eq!(" GBP ".parse::<CurrencyCode>().unwrap(), CurrencyCode::GBP);
        assert!("XYZ".parse::<CurrencyCode>().is_err());
    }

    #[test]
    fn test_currency_code_default() {
        assert_eq!(CurrencyCode::default(), CurrencyCode::NGN);
    }
}

//! Rate configuration: parsing and validating rate documents into a snapshot.
//!
//! A rate file is a list of zone documents:
//!
//! ```yaml
//! - zone: UK_IRELAND
//!   currency: NGN
//!   unit: kg
//!   rates:
//!     - { weight: 2, price: 15000 }
//!     - { weight: 3, price: "20,000.00" }
//! ```
//!
//! Every problem in the file is collected and reported together. A snapshot
//! is only produced when there are none, so a broken file can never be
//! partially served.

use core::fmt;
use std::collections::{BTreeMap, HashSet};

use chrono::Utc;
use thiserror::Error;

use crate::rates::snapshot::RateSnapshot;
use crate::rates::table::{RateDocument, RateEntry, RateTable};
use crate::types::{CurrencyCode, PriceError, ZoneId};

/// Errors that can occur while loading rate configuration.
#[derive(Debug, Error)]
pub enum RateConfigError {
    /// The document is not valid YAML or does not match the rate file shape.
    #[error("rate file is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document is not valid JSON or does not match the rate file shape.
    #[error("rate file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed but its contents break table invariants.
    #[error("rate configuration has {} problem(s)", .0.len())]
    Invalid(Vec<RateIssue>),
}

impl RateConfigError {
    /// Validation issues, if this is an [`Invalid`](Self::Invalid) error.
    #[must_use]
    pub fn issues(&self) -> &[RateIssue] {
        match self {
            Self::Invalid(issues) => issues,
            Self::Yaml(_) | Self::Json(_) => &[],
        }
    }
}

/// A single problem found in a rate document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateIssue {
    /// Document at `index` has an empty zone identifier.
    EmptyZone { index: usize },
    /// Two documents name the same zone.
    DuplicateZone { zone: String },
    /// A zone has no tiers at all.
    EmptyRates { zone: String },
    /// A tier's weight is zero or negative.
    NonPositiveWeight { zone: String, weight: i64 },
    /// A tier's weight does not fit the supported range.
    WeightTooLarge { zone: String, weight: i64 },
    /// Two tiers in the same zone share a weight.
    DuplicateWeight { zone: String, weight: i64 },
    /// A tier's price is missing, non-numeric or negative.
    InvalidPrice {
        zone: String,
        weight: i64,
        reason: PriceError,
    },
    /// The currency code is not one we price in.
    UnknownCurrency { zone: String, currency: String },
    /// The weight unit is empty.
    EmptyUnit { zone: String },
}

impl fmt::Display for RateIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyZone { index } => write!(f, "entry {index}: zone cannot be empty"),
            Self::DuplicateZone { zone } => write!(f, "{zone}: zone is defined more than once"),
            Self::EmptyRates { zone } => write!(f, "{zone}: rates cannot be empty"),
            Self::NonPositiveWeight { zone, weight } => {
                write!(f, "{zone}: weight {weight} must be greater than 0")
            }
            Self::WeightTooLarge { zone, weight } => {
                write!(f, "{zone}: weight {weight} is too large")
            }
            Self::DuplicateWeight { zone, weight } => {
                write!(f, "{zone}: weight {weight} appears more than once")
            }
            Self::InvalidPrice {
                zone,
                weight,
                reason,
            } => write!(f, "{zone}: price for weight {weight}: {reason}"),
            Self::UnknownCurrency { zone, currency } => {
                write!(f, "{zone}: unsupported currency {currency:?}")
            }
            Self::EmptyUnit { zone } => write!(f, "{zone}: unit cannot be empty"),
        }
    }
}

/// Unvalidated rate configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateConfig {
    documents: Vec<RateDocument>,
}

impl RateConfig {
    /// Wrap already-deserialized documents.
    #[must_use]
    pub const fn from_documents(documents: Vec<RateDocument>) -> Self {
        Self { documents }
    }

    /// Parse a YAML rate file.
    ///
    /// # Errors
    ///
    /// Returns [`RateConfigError::Yaml`] if the input is not a list of rate
    /// documents.
    pub fn from_yaml_str(input: &str) -> Result<Self, RateConfigError> {
        Ok(Self::from_documents(serde_yaml::from_str(input)?))
    }

    /// Parse a JSON rate file.
    ///
    /// # Errors
    ///
    /// Returns [`RateConfigError::Json`] if the input is not a list of rate
    /// documents.
    pub fn from_json_str(input: &str) -> Result<Self, RateConfigError> {
        Ok(Self::from_documents(serde_json::from_str(input)?))
    }

    /// The raw documents.
    #[must_use]
    pub fn documents(&self) -> &[RateDocument] {
        &self.documents
    }

    /// Check every document, returning all issues found.
    #[must_use]
    pub fn validate(&self) -> Vec<RateIssue> {
        build_tables(&self.documents).err().unwrap_or_default()
    }

    /// Validate and normalize into an immutable snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`RateConfigError::Invalid`] with every issue found if any
    /// document breaks a table invariant.
    pub fn into_snapshot(self) -> Result<RateSnapshot, RateConfigError> {
        let tables = build_tables(&self.documents).map_err(RateConfigError::Invalid)?;
        Ok(RateSnapshot::new(tables, Utc::now()))
    }
}

fn build_tables(documents: &[RateDocument]) -> Result<BTreeMap<ZoneId, RateTable>, Vec<RateIssue>> {
    let mut issues = Vec::new();
    let mut tables = BTreeMap::new();
    let mut seen_zones = HashSet::new();

    for (index, document) in documents.iter().enumerate() {
        let Ok(zone) = ZoneId::parse(&document.zone) else {
            issues.push(RateIssue::EmptyZone { index });
            continue;
        };

        if !seen_zones.insert(zone.clone()) {
            issues.push(RateIssue::DuplicateZone {
                zone: zone.to_string(),
            });
            continue;
        }

        let before = issues.len();
        let table = build_table(zone, document, &mut issues);
        if issues.len() == before {
            if let Some(table) = table {
                tables.insert(table.zone().clone(), table);
            }
        }
    }

    if issues.is_empty() {
        Ok(tables)
    } else {
        Err(issues)
    }
}

fn build_table(
    zone: ZoneId,
    document: &RateDocument,
    issues: &mut Vec<RateIssue>,
) -> Option<RateTable> {
    let name = zone.to_string();

    let currency = document.currency.parse::<CurrencyCode>().map_err(|_| {
        issues.push(RateIssue::UnknownCurrency {
            zone: name.clone(),
            currency: document.currency.clone(),
        });
    });

    let unit = document.unit.trim();
    if unit.is_empty() {
        issues.push(RateIssue::EmptyUnit { zone: name.clone() });
    }

    if document.rates.is_empty() {
        issues.push(RateIssue::EmptyRates { zone: name.clone() });
    }

    let mut entries = Vec::with_capacity(document.rates.len());
    let mut seen_weights = HashSet::new();

    for raw in &document.rates {
        if raw.weight <= 0 {
            issues.push(RateIssue::NonPositiveWeight {
                zone: name.clone(),
                weight: raw.weight,
            });
            continue;
        }

        let Ok(weight) = u32::try_from(raw.weight) else {
            issues.push(RateIssue::WeightTooLarge {
                zone: name.clone(),
                weight: raw.weight,
            });
            continue;
        };

        if !seen_weights.insert(weight) {
            issues.push(RateIssue::DuplicateWeight {
                zone: name.clone(),
                weight: raw.weight,
            });
            continue;
        }

        match raw.price.normalize() {
            Ok(price) => entries.push(RateEntry { weight, price }),
            Err(reason) => issues.push(RateIssue::InvalidPrice {
                zone: name.clone(),
                weight: raw.weight,
                reason,
            }),
        }
    }

    let currency = currency.ok()?;
    Some(RateTable::new(zone, currency, unit.to_owned(), entries))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::rates::table::RawRateEntry;

    fn document(zone: &str, rates: Vec<RawRateEntry>) -> RateDocument {
        RateDocument {
            zone: zone.to_owned(),
            currency: "NGN".to_owned(),
            unit: "kg".to_owned(),
            rates,
        }
    }

    #[test]
    fn test_parse_yaml_config() {
        let yaml = r#"
- zone: UK_IRELAND
  rates:
    - weight: 2
      price: 15000
    - weight: 3
      price: "20,000.00"
- zone: USA_CANADA
  currency: NGN
  unit: kg
  rates:
    - { weight: 1, price: 30000.5 }
"#;

        let snapshot = RateConfig::from_yaml_str(yaml)
            .unwrap()
            .into_snapshot()
            .unwrap();
        assert_eq!(snapshot.len(), 2);

        let uk = snapshot.table("UK_IRELAND").unwrap();
        assert_eq!(uk.entry(3).unwrap().price, Decimal::new(20000, 0));
        assert_eq!(uk.currency(), CurrencyCode::NGN);
        assert_eq!(uk.unit(), "kg");
    }

    #[test]
    fn test_parse_json_config() {
        let json = r#"[{"zone": "EUROPE", "rates": [{"weight": 5, "price": "1,234.56"}]}]"#;
        let snapshot = RateConfig::from_json_str(json)
            .unwrap()
            .into_snapshot()
            .unwrap();
        let europe = snapshot.table("EUROPE").unwrap();
        assert_eq!(europe.entry(5).unwrap().price, Decimal::new(123_456, 2));
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            RateConfig::from_yaml_str("zone: [unclosed"),
            Err(RateConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_fractional_weight_is_a_parse_error() {
        let json = r#"[{"zone": "ASIA", "rates": [{"weight": 2.5, "price": 100}]}]"#;
        assert!(matches!(
            RateConfig::from_json_str(json),
            Err(RateConfigError::Json(_))
        ));
    }

    #[test]
    fn test_collects_every_issue() {
        let config = RateConfig::from_documents(vec![
            document(
                "ASIA",
                vec![
                    RawRateEntry::new(0, Decimal::new(100, 0)),
                    RawRateEntry::new(2, "abc"),
                    RawRateEntry::new(3, Decimal::new(300, 0)),
                    RawRateEntry::new(3, Decimal::new(350, 0)),
                ],
            ),
            document("  ", vec![RawRateEntry::new(1, Decimal::ONE)]),
            document("EUROPE", vec![]),
        ]);

        let issues = config.validate();
        assert_eq!(issues.len(), 5);
        assert!(issues.contains(&RateIssue::NonPositiveWeight {
            zone: "ASIA".to_owned(),
            weight: 0
        }));
        assert!(issues.contains(&RateIssue::DuplicateWeight {
            zone: "ASIA".to_owned(),
            weight: 3
        }));
        assert!(issues.contains(&RateIssue::EmptyZone { index: 1 }));
        assert!(issues.contains(&RateIssue::EmptyRates {
            zone: "EUROPE".to_owned()
        }));
        assert!(issues.iter().any(|issue| matches!(
            issue,
            RateIssue::InvalidPrice {
                weight: 2,
                reason: PriceError::NotNumeric(_),
                ..
            }
        )));
    }

    #[test]
    fn test_invalid_config_builds_no_snapshot() {
        let config = RateConfig::from_documents(vec![
            document("ASIA", vec![RawRateEntry::new(1, Decimal::ONE)]),
            document("EUROPE", vec![RawRateEntry::new(-1, Decimal::ONE)]),
        ]);

        let err = config.into_snapshot().unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert_eq!(err.to_string(), "rate configuration has 1 problem(s)");
    }

    #[test]
    fn test_duplicate_zone() {
        let config = RateConfig::from_documents(vec![
            document("ASIA", vec![RawRateEntry::new(1, Decimal::ONE)]),
            document(" ASIA", vec![RawRateEntry::new(2, Decimal::ONE)]),
        ]);
        assert_eq!(
            config.validate(),
            vec![RateIssue::DuplicateZone {
                zone: "ASIA".to_owned()
            }]
        );
    }

    #[test]
    fn test_negative_price() {
        let config = RateConfig::from_documents(vec![document(
            "ASIA",
            vec![RawRateEntry::new(1, Decimal::new(-5, 0))],
        )]);
        assert_eq!(
            config.validate(),
            vec![RateIssue::InvalidPrice {
                zone: "ASIA".to_owned(),
                weight: 1,
                reason: PriceError::Negative,
            }]
        );
    }

    #[test]
    fn test_weight_too_large() {
        let config = RateConfig::from_documents(vec![document(
            "ASIA",
            vec![RawRateEntry::new(i64::from(u32::MAX) + 1, Decimal::ONE)],
        )]);
        assert!(matches!(
            config.validate().as_slice(),
            [RateIssue::WeightTooLarge { .. }]
        ));
    }

    #[test]
    fn test_unknown_currency_and_empty_unit() {
        let mut doc = document("ASIA", vec![RawRateEntry::new(1, Decimal::ONE)]);
        doc.currency = "XAU".to_owned();
        doc.unit = " ".to_owned();

        let issues = RateConfig::from_documents(vec![doc]).validate();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].to_string(), "ASIA: unsupported currency \"XAU\"");
        assert_eq!(issues[1].to_string(), "ASIA: unit cannot be empty");
    }

    #[test]
    fn test_issue_display_does_not_leak_parser_details() {
        let issue = RateIssue::InvalidPrice {
            zone: "ASIA".to_owned(),
            weight: 2,
            reason: PriceError::NotNumeric("abc".to_owned()),
        };
        assert_eq!(
            issue.to_string(),
            "ASIA: price for weight 2: price \"abc\" is not a number"
        );
    }

    #[test]
    fn test_empty_config_is_valid() {
        let snapshot = RateConfig::default().into_snapshot().unwrap();
        assert!(snapshot.is_empty());
    }
}

//! Shipping zone identifier.

use core::fmt;
use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ZoneId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ZoneIdError {
    /// The identifier is empty or whitespace.
    #[error("zone identifier cannot be empty")]
    Empty,
}

/// Identifier of a destination zone, e.g. `UK_IRELAND`.
///
/// Surrounding whitespace is trimmed on parse; comparison is otherwise
/// exact, so `uk_ireland` and `UK_IRELAND` are different zones.
///
/// ```
/// use transdom_core::ZoneId;
///
/// let zone = ZoneId::parse(" UK_IRELAND ").unwrap();
/// assert_eq!(zone.as_str(), "UK_IRELAND");
/// assert!(ZoneId::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    /// Parse a `ZoneId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty after trimming.
    pub fn parse(s: &str) -> Result<Self, ZoneIdError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ZoneIdError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ZoneId {
    type Err = ZoneIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Borrow<str> for ZoneId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ZoneId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

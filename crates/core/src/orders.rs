//! Order and payment records.
//!
//! Persistence and payment processing live elsewhere; these types give the
//! collaborators one shared vocabulary, and [`check_amount_paid`] lets them
//! verify a recorded amount against an authoritative [`Quote`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rates::Quote;
use crate::types::price::round_amount;
use crate::types::{OrderStatus, PaymentStatus};

/// Errors from validating order and payment requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Weight is zero or negative.
    #[error("weight must be a positive number")]
    NonPositiveWeight,

    /// Weight does not fit the supported range.
    #[error("weight is too large")]
    WeightTooLarge,

    /// Amount paid is zero or negative.
    #[error("amount paid must be a positive number")]
    NonPositiveAmount,

    /// Zone is empty.
    #[error("zone is required")]
    MissingZone,

    /// Email is empty or has no `@`.
    #[error("invalid email: {0}")]
    InvalidEmail(String),
}

/// Payload for creating an order after a successful payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeOrderRequest {
    pub zone_picked: String,
    pub weight: i64,
    pub email: String,
    pub amount_paid: Decimal,
}

impl MakeOrderRequest {
    /// Check the request fields.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), OrderError> {
        validate_fields(&self.zone_picked, self.weight, &self.email, self.amount_paid).map(|_| ())
    }
}

/// Payload for logging a payment attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub zone: String,
    pub weight: i64,
    pub email: String,
    pub amount_paid: Decimal,
    pub status: PaymentStatus,
}

/// A stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub order_no: String,
    pub zone_picked: String,
    pub weight: u32,
    pub email: String,
    pub amount_paid: Decimal,
    pub status: OrderStatus,
    pub date_created: Option<DateTime<Utc>>,
}

impl Order {
    /// Build a pending order from a validated request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails [`MakeOrderRequest::validate`].
    pub fn from_request(
        order_no: impl Into<String>,
        request: &MakeOrderRequest,
        date_created: DateTime<Utc>,
    ) -> Result<Self, OrderError> {
        let weight = validate_fields(
            &request.zone_picked,
            request.weight,
            &request.email,
            request.amount_paid,
        )?;

        Ok(Self {
            id: None,
            order_no: order_no.into(),
            zone_picked: request.zone_picked.trim().to_owned(),
            weight,
            email: request.email.trim().to_owned(),
            amount_paid: request.amount_paid,
            status: OrderStatus::Pending,
            date_created: Some(date_created),
        })
    }
}

/// A stored payment attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub zone: String,
    pub weight: u32,
    pub email: String,
    pub amount_paid: Decimal,
    pub status: PaymentStatus,
    pub created_at: Option<DateTime<Utc>>,
}

impl Payment {
    /// Build a payment record from a logging request.
    ///
    /// # Errors
    ///
    /// Returns an error if any field is invalid.
    pub fn from_request(
        request: &PaymentRequest,
        created_at: DateTime<Utc>,
    ) -> Result<Self, OrderError> {
        let weight = validate_fields(
            &request.zone,
            request.weight,
            &request.email,
            request.amount_paid,
        )?;

        Ok(Self {
            id: None,
            zone: request.zone.trim().to_owned(),
            weight,
            email: request.email.trim().to_owned(),
            amount_paid: request.amount_paid,
            status: request.status,
            created_at: Some(created_at),
        })
    }
}

/// Admin decision on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproveOrderRequest {
    pub order_no: String,
    pub status: OrderStatus,
}

fn validate_fields(
    zone: &str,
    weight: i64,
    email: &str,
    amount_paid: Decimal,
) -> Result<u32, OrderError> {
    if zone.trim().is_empty() {
        return Err(OrderError::MissingZone);
    }
    if weight <= 0 {
        return Err(OrderError::NonPositiveWeight);
    }
    let weight = u32::try_from(weight).map_err(|_| OrderError::WeightTooLarge)?;

    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(OrderError::InvalidEmail(email.to_owned()));
    }

    if amount_paid <= Decimal::ZERO {
        return Err(OrderError::NonPositiveAmount);
    }

    Ok(weight)
}

/// How a recorded payment compares to the quoted price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountCheck {
    /// Paid exactly the quoted amount (to the kobo).
    Exact,
    /// Paid less than quoted.
    Underpaid { shortfall: Decimal },
    /// Paid more than quoted.
    Overpaid { excess: Decimal },
}

impl AmountCheck {
    #[must_use]
    pub const fn is_exact(&self) -> bool {
        matches!(self, Self::Exact)
    }
}

/// Compare `amount_paid` with the quote, at two decimal places.
#[must_use]
pub fn check_amount_paid(quote: &Quote, amount_paid: Decimal) -> AmountCheck {
    let expected = round_amount(quote.amount);
    let paid = round_amount(amount_paid);

    match paid.cmp(&expected) {
        std::cmp::Ordering::Equal => AmountCheck::Exact,
        std::cmp::Ordering::Less => AmountCheck::Underpaid {
            shortfall: expected - paid,
        },
        std::cmp::Ordering::Greater => AmountCheck::Overpaid {
            excess: paid - expected,
        },
    }
}

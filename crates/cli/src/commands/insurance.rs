//! Insurance fee command.
//!
//! # Usage
//!
//! ```bash
//! transdom insurance --value 250000
//! ```

use rust_decimal::Decimal;
use tracing::info;

use transdom_core::InsuranceQuote;

use super::{CommandError, emit_json};

/// Print the insurance fee for a declared shipment value.
///
/// # Errors
///
/// Returns an error if the value is not positive.
pub fn insurance(shipment_value: Decimal) -> Result<(), CommandError> {
    let quote = InsuranceQuote::calculate(shipment_value)?;
    info!(
        %shipment_value,
        fee = %quote.insurance_fee,
        "Insurance calculated"
    );
    emit_json(&quote)
}

//! Rate file validation command.
//!
//! Loads the configured rate file exactly as a service would at startup and
//! reports every problem found. Exits non-zero if the file would be refused.
//!
//! # Usage
//!
//! ```bash
//! transdom --rates rates.yaml validate
//! ```

use std::path::Path;

use tracing::info;

use super::{CommandError, load_snapshot};

/// Validate a rate file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if any
/// document is invalid.
pub async fn validate(rates_file: &Path) -> Result<(), CommandError> {
    let snapshot = load_snapshot(rates_file).await?;

    info!("Rate file is valid");
    for table in snapshot.tables() {
        let weights: Vec<String> = table.weights().map(|w| w.to_string()).collect();
        info!(
            "  {}: {} tier(s) in {} / {} [{}]",
            table.zone(),
            table.entries().len(),
            table.currency(),
            table.unit(),
            weights.join(", ")
        );
    }

    Ok(())
}

//! Integration tests for Transdom.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p transdom-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `rate_resolution` - Quoting against a loaded rate file
//! - `rate_config_loading` - Accepting and rejecting rate files
//! - `concurrent_reload` - Readers racing a rate reload
//!
//! Rate files live under `fixtures/` and are loaded with the helpers below.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use transdom_core::{RateConfig, RateConfigError, RateResolver, RateSnapshot};

/// Absolute path of a file under `fixtures/`.
#[must_use]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

/// Read a fixture file to a string.
///
/// # Errors
///
/// Returns an error if the file does not exist or is not UTF-8.
pub fn read_fixture(name: &str) -> std::io::Result<String> {
    std::fs::read_to_string(fixture_path(name))
}

/// Parse a fixture as a rate file, picking the syntax from its extension.
///
/// # Errors
///
/// Returns an error if the file cannot be parsed.
///
/// # Panics
///
/// Panics if the fixture cannot be read; a missing fixture is a broken test.
pub fn load_config(name: &str) -> Result<RateConfig, RateConfigError> {
    let content = read_fixture(name)
        .unwrap_or_else(|e| panic!("fixture {name} should be readable: {e}"));

    if name.ends_with(".json") {
        RateConfig::from_json_str(&content)
    } else {
        RateConfig::from_yaml_str(&content)
    }
}

/// Load and validate a fixture into a snapshot.
///
/// # Errors
///
/// Returns an error if the file cannot be parsed or fails validation.
pub fn load_snapshot(name: &str) -> Result<RateSnapshot, RateConfigError> {
    load_config(name)?.into_snapshot()
}

/// Load a fixture straight into a resolver.
///
/// # Errors
///
/// See [`load_snapshot`].
pub fn load_resolver(name: &str) -> Result<RateResolver, RateConfigError> {
    load_snapshot(name).map(RateResolver::new)
}

//! Configuration file helpers
//!
//! Services resolve their settings with the priority
//! CLI > environment > TOML file > compiled default; the helpers
//! here cover the TOML and environment tiers.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{Error, Result};

/// Read and parse a TOML configuration file.
pub fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("invalid TOML in {}: {}", path.display(), e)))
}

/// Look up an environment variable, treating unset and blank the same.
pub fn non_empty_env(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

/// Parse a numeric environment override, rejecting garbage loudly
/// rather than silently falling back to the default.
pub fn parsed_env<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match non_empty_env(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("{} has invalid value {:?}", name, raw))),
    }
}

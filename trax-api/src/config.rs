//! Configuration resolution for trax-api
//!
//! Every setting resolves with the priority CLI > environment > TOML
//! file > compiled default. The result is an explicit struct handed
//! to the constructors that need it; nothing reads configuration
//! ambiently after startup.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use trax_common::config::{non_empty_env, parsed_env, read_toml};
use trax_common::{Error, Result};

pub const DEFAULT_PORT: u16 = 5730;
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_PAGE_SIZE: u32 = 5;
pub const DEFAULT_MAX_PAGES: u32 = 200;

/// Command-line arguments
#[derive(Debug, Default, Parser)]
#[command(name = "trax-api", about = "Transcript presentation gateway")]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,

    /// Base URL of the upstream processing API
    #[arg(long)]
    pub upstream: Option<String>,

    /// Port to listen on
    #[arg(long)]
    pub port: Option<u16>,
}

/// Optional settings from the TOML tier.
#[derive(Debug, Default, Deserialize)]
pub struct TomlConfig {
    pub upstream_base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub page_size: Option<u32>,
    pub max_pages: Option<u32>,
    pub port: Option<u16>,
}

/// Resolved gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the upstream processing API, e.g. `http://localhost:5731`
    pub upstream_base_url: String,
    /// Per-call deadline for every upstream request
    pub request_timeout: Duration,
    /// Listing page size (`limit` query parameter)
    pub page_size: u32,
    /// Highest page offset to scan; the search fans out over offsets
    /// `0..=max_pages` in one round and never walks further
    pub max_pages: u32,
    /// Address the HTTP server binds
    pub bind_addr: SocketAddr,
}

impl GatewayConfig {
    /// Resolve the configuration from all tiers. The upstream base
    /// URL has no compiled default: starting without one configured
    /// is an error, not a service that fails every request later.
    pub fn resolve(cli: &Cli, toml: &TomlConfig) -> Result<Self> {
        let upstream_base_url = cli
            .upstream
            .clone()
            .or_else(|| non_empty_env("TRAX_UPSTREAM_URL"))
            .or_else(|| toml.upstream_base_url.clone())
            .ok_or_else(|| {
                Error::Config(
                    "upstream base URL not configured; set --upstream, \
                     TRAX_UPSTREAM_URL, or upstream_base_url in the TOML file"
                        .to_string(),
                )
            })?;

        let timeout_secs = parsed_env::<u64>("TRAX_TIMEOUT_SECS")?
            .or(toml.request_timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let page_size = parsed_env::<u32>("TRAX_PAGE_SIZE")?
            .or(toml.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let max_pages = parsed_env::<u32>("TRAX_MAX_PAGES")?
            .or(toml.max_pages)
            .unwrap_or(DEFAULT_MAX_PAGES);

        let port = cli
            .port
            .or(parsed_env::<u16>("TRAX_PORT")?)
            .or(toml.port)
            .unwrap_or(DEFAULT_PORT);

        if page_size == 0 {
            return Err(Error::Config("page_size must be at least 1".to_string()));
        }

        Ok(Self {
            upstream_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            page_size,
            max_pages,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], port)),
        })
    }

    /// Load the TOML tier named on the command line, if any.
    pub fn load_toml(path: Option<&Path>) -> Result<TomlConfig> {
        match path {
            Some(path) => read_toml(path),
            None => Ok(TomlConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env overrides are exercised manually; tests stick to the CLI
    // and TOML tiers so they stay parallel-safe.

    #[test]
    fn cli_tier_wins_over_toml() {
        let cli = Cli {
            config: None,
            upstream: Some("http://cli:1".to_string()),
            port: Some(9000),
        };
        let toml = TomlConfig {
            upstream_base_url: Some("http://toml:2".to_string()),
            port: Some(8000),
            ..Default::default()
        };

        let config = GatewayConfig::resolve(&cli, &toml).unwrap();
        assert_eq!(config.upstream_base_url, "http://cli:1");
        assert_eq!(config.bind_addr.port(), 9000);
    }

    #[test]
    fn toml_tier_fills_unset_values() {
        let cli = Cli::default();
        let toml = TomlConfig {
            upstream_base_url: Some("http://toml:2".to_string()),
            request_timeout_secs: Some(2),
            page_size: Some(10),
            max_pages: Some(50),
            port: None,
        };

        let config = GatewayConfig::resolve(&cli, &toml).unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(2));
        assert_eq!(config.page_size, 10);
        assert_eq!(config.max_pages, 50);
        assert_eq!(config.bind_addr.port(), DEFAULT_PORT);
    }

    #[test]
    fn missing_upstream_url_is_a_startup_error() {
        let err = GatewayConfig::resolve(&Cli::default(), &TomlConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let cli = Cli {
            upstream: Some("http://localhost:1".to_string()),
            ..Default::default()
        };
        let toml = TomlConfig {
            page_size: Some(0),
            ..Default::default()
        };
        assert!(GatewayConfig::resolve(&cli, &toml).is_err());
    }
}

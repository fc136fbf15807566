//! Configuration loading and representation.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

pub const API_URL_VAR: &str = "ROCKETSHOES_API_URL";
pub const DB_PATH_VAR: &str = "ROCKETSHOES_DB_PATH";
pub const HTTP_TIMEOUT_VAR: &str = "ROCKETSHOES_HTTP_TIMEOUT_SECS";

/// Client-side settings for the cart: where the storefront API lives and
/// where the cart snapshot is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    /// Explicit SQLite file; `None` means the per-user default location.
    pub db_path: Option<PathBuf>,
    pub http_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
            db_path: None,
            http_timeout: Self::DEFAULT_HTTP_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub const DEFAULT_API_URL: &'static str = "http://localhost:3333";
    pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        match lookup(API_URL_VAR).filter(|v| !v.trim().is_empty()) {
            Some(url) => config.api_url = url.trim().trim_end_matches('/').to_string(),
            None => tracing::warn!(
                default = Self::DEFAULT_API_URL,
                "{API_URL_VAR} not set; using default storefront API"
            ),
        }

        config.db_path = lookup(DB_PATH_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        if let Some(raw) = lookup(HTTP_TIMEOUT_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.http_timeout = Duration::from_secs(secs),
                _ => tracing::warn!(
                    value = %raw,
                    "invalid {HTTP_TIMEOUT_VAR}; using default timeout"
                ),
            }
        }

        config
    }

    /// The SQLite file holding the cart snapshot.
    pub fn resolved_db_path(&self) -> anyhow::Result<PathBuf> {
        match &self.db_path {
            Some(path) => Ok(path.clone()),
            None => default_db_path(),
        }
    }
}

/// `{app_data_dir}/rocketshoes/cart.db`.
pub fn default_db_path() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    let mut path = base;
    path.push("rocketshoes");
    path.push("cart.db");
    Ok(path)
}

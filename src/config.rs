//! Configuration parsed from environment variables.
//!
//! Graph geometry falls back to the built-in grid when a variable is absent
//! or unparsable. The hook service needs a base URL, from the CLI flag or
//! `REPOGRAPH_BASE_URL`.

use crate::graph::LayoutConfig;
use crate::graph::consts::{POINT_OFFSET, POINT_SIZE, SURFACE_WIDTH, X_SPACE, Y_SPACE};

pub const BASE_URL_VAR: &str = "REPOGRAPH_BASE_URL";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing hook service URL; pass --base-url or set {BASE_URL_VAR}")]
    MissingBaseUrl,
    #[error("invalid hook service URL '{0}' (expected http:// or https://)")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Repository admin URL the hook endpoints hang off.
    pub base_url: String,
    pub timeouts: RequestTimeouts,
}

impl ServiceConfig {
    /// Build the hook service config.
    ///
    /// `base_url` wins over `REPOGRAPH_BASE_URL` when given.
    ///
    /// Optional, zero falls back to the default:
    /// - `REPOGRAPH_REQUEST_TIMEOUT_SECS`: default 30
    /// - `REPOGRAPH_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if no URL is configured or it is not HTTP(S).
    pub fn from_env(base_url: Option<String>) -> Result<Self, ConfigError> {
        let raw = match base_url {
            Some(url) => url,
            None => std::env::var(BASE_URL_VAR).map_err(|_| ConfigError::MissingBaseUrl)?,
        };
        let base_url = raw.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }
        let timeouts = RequestTimeouts {
            request_secs: positive(
                env_parse("REPOGRAPH_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
            connect_secs: positive(
                env_parse("REPOGRAPH_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
                DEFAULT_CONNECT_TIMEOUT_SECS,
            ),
        };
        Ok(Self { base_url, timeouts })
    }
}

/// Graph geometry from the environment.
///
/// - `REPOGRAPH_X_SPACE`: column spacing, default 10
/// - `REPOGRAPH_Y_SPACE`: row spacing, default 20
/// - `REPOGRAPH_SURFACE_WIDTH`: default 750
#[must_use]
pub fn layout_from_env() -> LayoutConfig {
    LayoutConfig {
        x_space: positive(env_parse("REPOGRAPH_X_SPACE", X_SPACE), X_SPACE),
        y_space: positive(env_parse("REPOGRAPH_Y_SPACE", Y_SPACE), Y_SPACE),
        point_offset: POINT_OFFSET,
        point_size: POINT_SIZE,
        surface_width: positive(env_parse("REPOGRAPH_SURFACE_WIDTH", SURFACE_WIDTH), SURFACE_WIDTH),
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match std::env::var(key) {
        Ok(v) => v.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}

fn positive<T: PartialOrd + Default>(value: T, default: T) -> T {
    if value > T::default() { value } else { default }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

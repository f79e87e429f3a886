//! Server configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_POINTS_FILE: &str = "points.json";
pub const DEFAULT_DIAGRAM_MIN_POINTS: usize = 4;
pub const DEFAULT_DIAGRAM_CLIP_PADDING_DEG: f64 = 2.0;
pub const DEFAULT_ENGINE_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ENGINE_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid BIND_ADDR: {0}")]
    InvalidBindAddr(String),
    #[error("invalid DIAGRAM_ENGINE_URL '{0}' (expected http:// or https://)")]
    InvalidEngineUrl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Knobs for diagram generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramSettings {
    /// Fewer stored points than this yields no diagram.
    pub min_points: usize,
    /// Degrees added around the seeds' bounding box before clipping.
    pub clip_padding_deg: f64,
}

impl Default for DiagramSettings {
    fn default() -> Self {
        Self { min_points: DEFAULT_DIAGRAM_MIN_POINTS, clip_padding_deg: DEFAULT_DIAGRAM_CLIP_PADDING_DEG }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub points_file: PathBuf,
    /// Engine endpoint; diagrams are disabled when absent.
    pub engine_url: Option<String>,
    pub engine_timeouts: EngineTimeouts,
    pub diagram: DiagramSettings,
    /// Directory served for unmatched paths (the browser front end).
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 5000
    /// - `BIND_ADDR`: default `0.0.0.0`
    /// - `POINTS_FILE`: default `points.json`
    /// - `DIAGRAM_ENGINE_URL`: diagrams disabled when absent
    /// - `DIAGRAM_MIN_POINTS`: default 4
    /// - `DIAGRAM_CLIP_PADDING_DEG`: default 2.0
    /// - `ENGINE_REQUEST_TIMEOUT_SECS`: default 30
    /// - `ENGINE_CONNECT_TIMEOUT_SECS`: default 5
    /// - `STATIC_DIR`: no static files when absent
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unparseable bind address or a
    /// non-http(s) engine URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(read_var)
    }

    /// Same as [`ServerConfig::from_env`], reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ip = match lookup("BIND_ADDR") {
            Some(raw) => IpAddr::from_str(raw.trim()).map_err(|_| ConfigError::InvalidBindAddr(raw))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        let port = env_parse(&lookup, "PORT", DEFAULT_PORT);

        let engine_url = match lookup("DIAGRAM_ENGINE_URL").map(|raw| raw.trim().to_owned()) {
            Some(url) if url.is_empty() => None,
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => Some(url),
            Some(url) => return Err(ConfigError::InvalidEngineUrl(url)),
            None => None,
        };

        Ok(Self {
            bind: SocketAddr::new(ip, port),
            points_file: lookup("POINTS_FILE").map_or_else(|| PathBuf::from(DEFAULT_POINTS_FILE), PathBuf::from),
            engine_url,
            engine_timeouts: EngineTimeouts {
                request_secs: env_parse(&lookup, "ENGINE_REQUEST_TIMEOUT_SECS", DEFAULT_ENGINE_REQUEST_TIMEOUT_SECS),
                connect_secs: env_parse(&lookup, "ENGINE_CONNECT_TIMEOUT_SECS", DEFAULT_ENGINE_CONNECT_TIMEOUT_SECS),
            },
            diagram: DiagramSettings {
                min_points: env_parse(&lookup, "DIAGRAM_MIN_POINTS", DEFAULT_DIAGRAM_MIN_POINTS),
                clip_padding_deg: env_parse(&lookup, "DIAGRAM_CLIP_PADDING_DEG", DEFAULT_DIAGRAM_CLIP_PADDING_DEG),
            },
            static_dir: lookup("STATIC_DIR").filter(|dir| !dir.trim().is_empty()).map(PathBuf::from),
        })
    }
}

/// Parse `key` via `lookup`, falling back to `default` when absent or invalid.
fn env_parse<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or(default),
        None => default,
    }
}

/// Read one environment variable. Unset is `None`; a value that is not
/// valid unicode is logged and also treated as unset.
fn read_var(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) => Some(value),
        Err(std::env::VarError::NotPresent) => None,
        Err(e) => {
            warn!(key, error = %e, "ignoring unreadable environment variable");
            None
        }
    }
}

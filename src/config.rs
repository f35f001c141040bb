//! Configuration loading from environment variables.

use serde::Deserialize;
use std::env;

/// Default API port for sharebin.
pub const DEFAULT_PORT: u16 = 8080;

/// Default maximum paste length in characters.
pub const DEFAULT_MAX_CONTENT_CHARS: usize = 10_000;

/// Default lower bound for `ttl_seconds` (one minute).
pub const DEFAULT_TTL_MIN_SECS: u64 = 60;

/// Default upper bound for `ttl_seconds` (seven days).
pub const DEFAULT_TTL_MAX_SECS: u64 = 604_800;

/// Default upper bound for `max_views`.
pub const DEFAULT_MAX_VIEWS_LIMIT: u32 = 1_000;

/// Default paste identifier length.
pub const DEFAULT_ID_LENGTH: usize = 8;

/// Default period of the background expiry sweep.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 300;

// Transport-level request cap is derived from the content limit. A paste
// character can expand to a `\uXXXX` escape in the JSON body, plus a fixed
// allowance for the envelope and remaining fields.
const JSON_ESCAPE_BYTES_PER_CHAR: usize = 6;
const BODY_LIMIT_HEADROOM: usize = 1_024;

/// Runtime configuration for sharebin.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub public_base_url: String,
    pub cors_origin: Option<String>,
    pub max_content_chars: usize,
    pub ttl_min_secs: u64,
    pub ttl_max_secs: u64,
    pub max_views_limit: u32,
    pub id_length: usize,
    pub sweep_interval_secs: u64,
}

/// Normalize an origin value read from the environment.
///
/// # Returns
/// The trimmed origin when non-empty, otherwise `None`.
pub fn normalize_origin(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing
    /// or unparseable.
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        Self {
            port,
            public_base_url: env::var("PUBLIC_BASE_URL")
                .ok()
                .and_then(|url| normalize_origin(&url))
                .unwrap_or_else(|| format!("http://localhost:{}", port)),
            cors_origin: env::var("CORS_ORIGIN")
                .ok()
                .and_then(|origin| normalize_origin(&origin)),
            max_content_chars: env::var("MAX_CONTENT_CHARS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(DEFAULT_MAX_CONTENT_CHARS),
            ttl_min_secs: env::var("TTL_MIN_SECS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(DEFAULT_TTL_MIN_SECS),
            ttl_max_secs: env::var("TTL_MAX_SECS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(DEFAULT_TTL_MAX_SECS),
            max_views_limit: env::var("MAX_VIEWS_LIMIT")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(DEFAULT_MAX_VIEWS_LIMIT),
            id_length: env::var("ID_LENGTH")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(DEFAULT_ID_LENGTH),
            sweep_interval_secs: env::var("SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(DEFAULT_SWEEP_INTERVAL_SECS),
        }
    }

    /// Transport byte cap for request bodies, sized from the content limit.
    ///
    /// Oversized-but-decodable payloads are still rejected by handler
    /// validation; this cap only stops bodies that could never validate.
    pub fn request_body_limit(&self) -> usize {
        self.max_content_chars
            .saturating_mul(JSON_ESCAPE_BYTES_PER_CHAR)
            .saturating_add(BODY_LIMIT_HEADROOM)
    }
}

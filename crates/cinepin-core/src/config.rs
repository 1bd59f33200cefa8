//! Configuration module
//!
//! Process-wide configuration for the registration layer, loaded once from the
//! environment at startup and read-only thereafter. Clients receive the values
//! they need by reference at construction time; there is no module-level
//! singleton holding credentials.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::constants::{
    CAMP_CHAIN_ID, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_MAX_FILE_SIZE_MB, DEFAULT_ORIGIN_API_BASE,
    DEFAULT_PINATA_API_BASE,
};

/// Bearer token for the fallback pinning provider.
///
/// The secret is reachable only through [`AuthCredential::expose`]; `Debug` and
/// `Display` print a redacted placeholder so the token cannot leak into logs.
#[derive(Clone)]
pub struct AuthCredential(String);

impl AuthCredential {
    pub fn new(token: impl Into<String>) -> Self {
        AuthCredential(token.into())
    }

    /// The raw token, for building the Authorization header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthCredential(***)")
    }
}

impl fmt::Display for AuthCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Registration layer configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the primary (Origin) registration API.
    pub origin_api_base: String,
    /// Base URL of the fallback (Pinata) pinning API.
    pub pinata_api_base: String,
    /// Bearer token for the fallback provider. Missing means the fallback
    /// provider cannot be constructed.
    pub pinata_jwt: Option<AuthCredential>,
    /// Chain identifier sent with every primary registration.
    pub chain_id: u64,
    /// Maximum upload size in bytes.
    pub max_file_size_bytes: u64,
    /// Allowed content types for uploads. Empty means allow all.
    pub allowed_content_types: Vec<String>,
    /// Per-request timeout applied to every network call.
    pub http_timeout: Duration,
}

impl Config {
    /// Load configuration from the environment (and `.env` if present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let origin_api_base = env::var("ORIGIN_API_BASE")
            .unwrap_or_else(|_| DEFAULT_ORIGIN_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        let pinata_api_base = env::var("PINATA_API_BASE")
            .unwrap_or_else(|_| DEFAULT_PINATA_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        let pinata_jwt = env::var("PINATA_JWT")
            .ok()
            .filter(|t| !t.is_empty())
            .map(AuthCredential::new);

        let chain_id = parse_env("CAMP_CHAIN_ID", CAMP_CHAIN_ID)?;
        let max_file_size_mb: u64 = parse_env("MAX_FILE_SIZE_MB", DEFAULT_MAX_FILE_SIZE_MB)?;
        let http_timeout_secs: u64 = parse_env("HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?;

        let allowed_content_types = env::var("ALLOWED_CONTENT_TYPES")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Config {
            origin_api_base,
            pinata_api_base,
            pinata_jwt,
            chain_id,
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            allowed_content_types,
            http_timeout: Duration::from_secs(http_timeout_secs),
        })
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T, anyhow::Error>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(v) => v
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {}: {}", name, e)),
        Err(_) => Ok(default),
    }
}

//! Registrar abstraction trait
//!
//! One capability contract shared by every content provider. The orchestrator
//! walks an ordered chain of `dyn Registrar` values, stopping at the first
//! success. Adding a provider means implementing this trait and adding it to
//! the chain; no fallback logic changes elsewhere.

use async_trait::async_trait;
use thiserror::Error;

use cinepin_core::{ComposedMetadata, RegistrationResult, UploadError, UploadRequest};

/// Provider error. Clients never retry internally; recovery is the
/// orchestrator's decision.
#[derive(Debug, Error)]
pub enum RegistrarError {
    /// Credential rejected during the provider's preflight probe.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Non-success HTTP status or a network-level failure (timeout,
    /// connection refused, DNS).
    #[error("transport failure{}: {message}", status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default())]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// Success status but the expected identifier field was absent. Retrying
    /// will not fix this.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl RegistrarError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        RegistrarError::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl From<RegistrarError> for UploadError {
    fn from(err: RegistrarError) -> Self {
        match err {
            RegistrarError::Auth(msg) => UploadError::Auth(msg),
            RegistrarError::Transport { .. } => UploadError::Transport(err.to_string()),
            RegistrarError::MalformedResponse(msg) => UploadError::MalformedResponse(msg),
        }
    }
}

/// Result type for registrar operations
pub type RegistrarResult<T> = Result<T, RegistrarError>;

/// Identifies a provider in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Origin,
    Pinata,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Origin => f.write_str("origin"),
            ProviderKind::Pinata => f.write_str("pinata"),
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "origin" => Ok(ProviderKind::Origin),
            "pinata" => Ok(ProviderKind::Pinata),
            other => Err(format!("unknown provider '{}'", other)),
        }
    }
}

/// A content registration provider.
///
/// `register` issues exactly one upload attempt. Implementations must never
/// return a placeholder CID: a response missing the identifier field is a
/// `MalformedResponse`, not an empty result.
#[async_trait]
pub trait Registrar: Send + Sync {
    /// Which provider this client talks to.
    fn provider(&self) -> ProviderKind;

    /// Authentication probe issued before an upload is committed. Providers
    /// without a preflight succeed trivially. A preflight failure means the
    /// upload must not be attempted on this provider.
    async fn preflight(&self) -> RegistrarResult<()> {
        Ok(())
    }

    /// Register the file and return its content identifier plus retrieval
    /// URLs.
    async fn register(
        &self,
        request: &UploadRequest,
        metadata: &ComposedMetadata,
    ) -> RegistrarResult<RegistrationResult>;
}

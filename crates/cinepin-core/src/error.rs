//! Error types module
//!
//! This module provides the error taxonomy for the content registration layer.
//! Validation failures are split out into their own enum because they are
//! decided before any network call and are never retried; everything else is
//! unified under `UploadError`, the single error type the orchestrator
//! surfaces to callers.

/// A pre-flight check on the upload request failed. No network call is made
/// when validation fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("no file provided")]
    MissingFile,

    #[error("file size {size} bytes exceeds limit of {limit} bytes")]
    TooLarge { size: u64, limit: u64 },

    #[error("file type {0} not allowed")]
    DisallowedType(String),
}

/// Terminal error returned by the upload orchestrator.
///
/// Propagation policy: validation and auth failures are never retried;
/// transport failures on the primary provider are recovered via the fallback
/// chain; a transport or malformed-response failure on the last provider in
/// the chain surfaces here verbatim. A result never carries a CID alongside
/// an error.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl UploadError {
    /// Whether re-invoking `upload` with the same request could plausibly
    /// succeed. Malformed responses and validation failures will not fix
    /// themselves on retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, UploadError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::TooLarge {
            size: 600,
            limit: 500,
        };
        assert_eq!(
            err.to_string(),
            "file size 600 bytes exceeds limit of 500 bytes"
        );

        let err = ValidationError::DisallowedType("text/html".to_string());
        assert_eq!(err.to_string(), "file type text/html not allowed");
    }

    #[test]
    fn test_upload_error_recoverability() {
        assert!(UploadError::Transport("timeout".to_string()).is_recoverable());
        assert!(!UploadError::Auth("bad token".to_string()).is_recoverable());
        assert!(!UploadError::MalformedResponse("no cid".to_string()).is_recoverable());
        assert!(!UploadError::from(ValidationError::MissingFile).is_recoverable());
    }
}

//! Pre-flight upload validation.
//!
//! Runs before every upload attempt; failure short-circuits the whole
//! pipeline so no network call is ever issued for an invalid request.

use crate::error::ValidationError;
use crate::models::{UploadRequest, ValidationPolicy};

/// Check an upload request against the policy. Pure and synchronous.
pub fn validate_upload(
    request: &UploadRequest,
    policy: &ValidationPolicy,
) -> Result<(), ValidationError> {
    if request.bytes().is_empty() {
        return Err(ValidationError::MissingFile);
    }

    if request.size() > policy.max_size_bytes {
        return Err(ValidationError::TooLarge {
            size: request.size(),
            limit: policy.max_size_bytes,
        });
    }

    if !policy.allowed_content_types.is_empty()
        && !policy
            .allowed_content_types
            .iter()
            .any(|t| t == request.content_type())
    {
        return Err(ValidationError::DisallowedType(
            request.content_type().to_string(),
        ));
    }

    Ok(())
}

//! Cinepin Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! validation shared across all Cinepin components. It performs no network I/O:
//! the provider clients and the upload orchestrator live in `cinepin-registry`.

pub mod config;
pub mod constants;
pub mod error;
pub mod metadata;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{AuthCredential, Config};
pub use error::{UploadError, ValidationError};
pub use metadata::{compose, ComposedMetadata};
pub use models::{GatewayPreference, RegistrationResult, UploadRequest, ValidationPolicy};
pub use validation::validate_upload;

//! Domain models for the content registration layer.

pub mod gateway;
pub mod upload;

pub use gateway::GatewayPreference;
pub use upload::{RegistrationResult, UploadRequest, ValidationPolicy};

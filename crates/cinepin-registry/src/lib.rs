//! Cinepin Registry Library
//!
//! Provider layer for content registration & retrieval. It defines the
//! `Registrar` capability trait, the primary Origin registrar client, the
//! fallback Pinata pin client, the gateway resolver, and the upload
//! orchestrator that sequences validation, metadata composition, and the
//! primary-then-fallback provider chain.

pub mod factory;
pub mod gateway;
pub mod orchestrator;
pub mod origin;
pub mod pinata;
pub mod traits;

// Re-export commonly used types
pub use factory::{create_orchestrator, create_provider_chain};
pub use gateway::resolve;
pub use orchestrator::UploadOrchestrator;
pub use origin::OriginClient;
pub use pinata::PinataClient;
pub use traits::{ProviderKind, Registrar, RegistrarError, RegistrarResult};

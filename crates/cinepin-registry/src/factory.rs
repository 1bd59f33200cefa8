//! Provider chain construction from configuration.

use std::sync::Arc;

use cinepin_core::{Config, UploadError};

use crate::orchestrator::UploadOrchestrator;
use crate::origin::OriginClient;
use crate::pinata::PinataClient;
use crate::traits::Registrar;

/// Build the default primary→fallback provider chain: the Origin registrar
/// first, the Pinata pin client second. The fallback requires a credential;
/// without one the chain is misconfigured.
pub fn create_provider_chain(config: &Config) -> Result<Vec<Arc<dyn Registrar>>, UploadError> {
    let origin = OriginClient::new(
        config.origin_api_base.clone(),
        config.chain_id,
        config.http_timeout,
    )?;

    let credential = config
        .pinata_jwt
        .as_ref()
        .ok_or_else(|| UploadError::Config("PINATA_JWT not configured".to_string()))?;

    let pinata = PinataClient::new(
        config.pinata_api_base.clone(),
        credential,
        config.http_timeout,
    )?;

    Ok(vec![Arc::new(origin), Arc::new(pinata)])
}

/// Build an orchestrator over the default provider chain.
pub fn create_orchestrator(config: &Config) -> Result<UploadOrchestrator, UploadError> {
    let providers = create_provider_chain(config)?;
    Ok(UploadOrchestrator::new(providers, config.chain_id))
}

//! Primary registrar client for the Origin/Camp registration API.
//!
//! Issues one multipart upload per `register` call, tagged with the chain
//! identifier header. Never retries: recovery via the fallback provider is
//! the orchestrator's responsibility.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use cinepin_core::{
    ComposedMetadata, GatewayPreference, RegistrationResult, UploadError, UploadRequest,
};

use crate::gateway;
use crate::traits::{ProviderKind, Registrar, RegistrarError, RegistrarResult};

const CHAIN_ID_HEADER: &str = "X-Chain-ID";

/// Client for the primary registration provider.
#[derive(Debug, Clone)]
pub struct OriginClient {
    client: reqwest::Client,
    base_url: String,
    chain_id: u64,
}

/// Successful registration response. The identifier arrives as either `cid`
/// or `hash` depending on the API version.
#[derive(Debug, Deserialize)]
struct RegisterResponse {
    cid: Option<String>,
    hash: Option<String>,
    url: Option<String>,
    gateway: Option<String>,
}

impl OriginClient {
    pub fn new(
        base_url: impl Into<String>,
        chain_id: u64,
        timeout: Duration,
    ) -> Result<Self, UploadError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UploadError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(OriginClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            chain_id,
        })
    }

    /// Check whether a CID is known to the network.
    pub async fn verify(&self, cid: &str) -> RegistrarResult<bool> {
        let response = self
            .client
            .get(format!("{}/files/{}/verify", self.base_url, cid))
            .header(CHAIN_ID_HEADER, self.chain_id.to_string())
            .send()
            .await
            .map_err(RegistrarError::from_reqwest)?;

        Ok(response.status().is_success())
    }
}

#[async_trait]
impl Registrar for OriginClient {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Origin
    }

    async fn register(
        &self,
        request: &UploadRequest,
        metadata: &ComposedMetadata,
    ) -> RegistrarResult<RegistrationResult> {
        let file_part = reqwest::multipart::Part::bytes(request.bytes().to_vec())
            .file_name(request.file_name().to_string())
            .mime_str(request.content_type())
            .map_err(RegistrarError::from_reqwest)?;

        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("metadata", metadata.primary_json().to_string());

        let response = self
            .client
            .post(format!("{}/files/register", self.base_url))
            .header(CHAIN_ID_HEADER, self.chain_id.to_string())
            .multipart(form)
            .send()
            .await
            .map_err(RegistrarError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RegistrarError::Transport {
                status: Some(status.as_u16()),
                message: format!("Origin registration failed: {}", error_text),
            });
        }

        let body: RegisterResponse = response.json().await.map_err(|e| {
            RegistrarError::MalformedResponse(format!("Invalid registration response: {}", e))
        })?;

        let cid = body.cid.or(body.hash).filter(|c| !c.is_empty()).ok_or_else(|| {
            RegistrarError::MalformedResponse(
                "No content identifier in registration response".to_string(),
            )
        })?;

        let gateway = body
            .gateway
            .unwrap_or_else(|| gateway::resolve(&cid, GatewayPreference::Origin));
        let url = body
            .url
            .unwrap_or_else(|| format!("{}/files/{}", self.base_url, cid));

        tracing::info!(cid = %cid, provider = %self.provider(), "File registered");

        Ok(RegistrationResult { cid, url, gateway })
    }
}

//! Fallback pin client for the Pinata pinning API.
//!
//! Authentication is probed before any upload is committed: an upload with
//! invalid credentials wastes bandwidth and produces a confusing
//! provider-side error, so a failed preflight aborts the attempt entirely.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use cinepin_core::constants::METADATA_SOURCE;
use cinepin_core::{
    AuthCredential, ComposedMetadata, GatewayPreference, RegistrationResult, UploadError,
    UploadRequest,
};

use crate::gateway;
use crate::traits::{ProviderKind, Registrar, RegistrarError, RegistrarResult};

/// Client for the fallback pinning provider.
#[derive(Debug, Clone)]
pub struct PinataClient {
    client: reqwest::Client,
    base_url: String,
    credential: AuthCredential,
}

#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: Option<String>,
}

impl PinataClient {
    pub fn new(
        base_url: impl Into<String>,
        credential: &AuthCredential,
        timeout: Duration,
    ) -> Result<Self, UploadError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UploadError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(PinataClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credential: credential.clone(),
        })
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.credential.expose())
    }

    /// Pin structured JSON content and return its CID. Shares the success and
    /// error shapes of the file pin.
    pub async fn pin_json(&self, content: &Value, name: &str) -> RegistrarResult<String> {
        let body = json!({
            "pinataContent": content,
            "pinataMetadata": {
                "name": name,
                "keyvalues": {
                    "uploadedAt": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                    "type": "json",
                    "source": METADATA_SOURCE,
                },
            },
            "pinataOptions": { "cidVersion": 1 },
        });

        let response = self
            .client
            .post(format!("{}/pinning/pinJSONToIPFS", self.base_url))
            .header(reqwest::header::AUTHORIZATION, self.bearer())
            .json(&body)
            .send()
            .await
            .map_err(RegistrarError::from_reqwest)?;

        let cid = Self::extract_cid(response).await?;
        tracing::info!(cid = %cid, name = %name, "JSON pinned");
        Ok(cid)
    }

    async fn extract_cid(response: reqwest::Response) -> RegistrarResult<String> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RegistrarError::Transport {
                status: Some(status.as_u16()),
                message: format!("Pinata upload failed: {}", error_text),
            });
        }

        let body: PinResponse = response
            .json()
            .await
            .map_err(|e| RegistrarError::MalformedResponse(format!("Invalid pin response: {}", e)))?;

        body.ipfs_hash
            .filter(|h| !h.is_empty())
            .ok_or_else(|| RegistrarError::MalformedResponse("No IPFS hash returned".to_string()))
    }
}

#[async_trait]
impl Registrar for PinataClient {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Pinata
    }

    /// Lightweight authenticated probe. Failure means `register` must not be
    /// attempted on this provider.
    async fn preflight(&self) -> RegistrarResult<()> {
        let response = self
            .client
            .get(format!("{}/data/testAuthentication", self.base_url))
            .header(reqwest::header::AUTHORIZATION, self.bearer())
            .send()
            .await
            .map_err(|e| RegistrarError::Auth(format!("Authentication probe failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistrarError::Auth(format!(
                "Authentication failed: HTTP {}",
                status.as_u16()
            )));
        }

        tracing::debug!(provider = %self.provider(), "Authentication preflight passed");
        Ok(())
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
            .text("pinataMetadata", metadata.pinata_metadata().to_string())
            .text("pinataOptions", metadata.pinata_options().to_string());

        let response = self
            .client
            .post(format!("{}/pinning/pinFileToIPFS", self.base_url))
            .header(reqwest::header::AUTHORIZATION, self.bearer())
            .multipart(form)
            .send()
            .await
            .map_err(RegistrarError::from_reqwest)?;

        let cid = Self::extract_cid(response).await?;
        let gateway = gateway::resolve(&cid, GatewayPreference::Pinata);

        tracing::info!(cid = %cid, provider = %self.provider(), "File pinned");

        Ok(RegistrationResult {
            url: gateway.clone(),
            gateway,
            cid,
        })
    }
}

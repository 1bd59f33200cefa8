//! Upload orchestration.
//!
//! Sequences validation, metadata composition, and the provider chain.
//! The orchestrator is the only entry point callers invoke; the provider
//! clients are internal collaborators it composes. Within one call the
//! current provider attempt always fully completes before the next begins,
//! and the chain is walked exactly once per request (no backoff, no retries).

use std::sync::Arc;

use chrono::Utc;

use cinepin_core::{
    compose, validate_upload, RegistrationResult, UploadError, UploadRequest, ValidationPolicy,
};

use crate::traits::{ProviderKind, Registrar, RegistrarError};

/// Walks an ordered chain of registration providers, stopping at the first
/// success. Each `upload` call is independent and self-contained; the only
/// state shared across concurrent calls is the read-only provider chain.
pub struct UploadOrchestrator {
    providers: Vec<Arc<dyn Registrar>>,
    chain_id: u64,
}

impl UploadOrchestrator {
    pub fn new(providers: Vec<Arc<dyn Registrar>>, chain_id: u64) -> Self {
        UploadOrchestrator {
            providers,
            chain_id,
        }
    }

    /// Register a file, trying the providers in chain order.
    ///
    /// Validation runs first and a failure returns before any network call.
    /// A preflight failure on any provider is terminal: the upload is not
    /// attempted there and no further provider is tried. Transport and
    /// malformed-response failures fall through to the next provider; on the
    /// last provider they surface to the caller. Yields exactly one
    /// `RegistrationResult` or one terminal error, never both.
    pub async fn upload(
        &self,
        request: &UploadRequest,
        policy: &ValidationPolicy,
        preferred: Option<ProviderKind>,
    ) -> Result<RegistrationResult, UploadError> {
        validate_upload(request, policy)?;

        if self.providers.is_empty() {
            return Err(UploadError::Config("No providers configured".to_string()));
        }

        // composed once, reused verbatim across every provider attempt
        let metadata = compose(request, Utc::now(), self.chain_id);

        let chain = self.ordered_chain(preferred);
        let last = chain.len() - 1;

        for (i, provider) in chain.iter().enumerate() {
            if let Err(err) = provider.preflight().await {
                tracing::warn!(
                    provider = %provider.provider(),
                    error = %err,
                    "Provider preflight failed, aborting upload"
                );
                return Err(err.into());
            }

            match provider.register(request, &metadata).await {
                Ok(result) => {
                    tracing::info!(
                        provider = %provider.provider(),
                        cid = %result.cid,
                        "Upload complete"
                    );
                    return Ok(result);
                }
                Err(err @ RegistrarError::Auth(_)) => return Err(err.into()),
                Err(err) if i == last => return Err(err.into()),
                Err(err) => {
                    tracing::warn!(
                        provider = %provider.provider(),
                        error = %err,
                        "Provider failed, falling back"
                    );
                }
            }
        }

        unreachable!("provider chain is non-empty and the last attempt returns")
    }

    /// Chain order for this call: the preferred provider, when named and
    /// present, moves to the front; the rest keep their configured order as
    /// fallbacks.
    fn ordered_chain(&self, preferred: Option<ProviderKind>) -> Vec<Arc<dyn Registrar>> {
        let mut chain = self.providers.clone();
        if let Some(kind) = preferred {
            if let Some(pos) = chain.iter().position(|p| p.provider() == kind) {
                let head = chain.remove(pos);
                chain.insert(0, head);
            }
        }
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use cinepin_core::ComposedMetadata;

    use crate::traits::RegistrarResult;

    /// What a stub provider should do on each call.
    enum Behavior {
        Succeed(&'static str),
        FailTransport(u16),
        FailMalformed,
        FailPreflight,
    }

    struct StubRegistrar {
        kind: ProviderKind,
        behavior: Behavior,
        preflight_calls: AtomicUsize,
        register_calls: AtomicUsize,
        seen_metadata: Mutex<Option<serde_json::Value>>,
    }

    impl StubRegistrar {
        fn new(kind: ProviderKind, behavior: Behavior) -> Arc<Self> {
            Arc::new(StubRegistrar {
                kind,
                behavior,
                preflight_calls: AtomicUsize::new(0),
                register_calls: AtomicUsize::new(0),
                seen_metadata: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl Registrar for StubRegistrar {
        fn provider(&self) -> ProviderKind {
            self.kind
        }

        async fn preflight(&self) -> RegistrarResult<()> {
            self.preflight_calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::FailPreflight => {
                    Err(RegistrarError::Auth("bad credentials".to_string()))
                }
                _ => Ok(()),
            }
        }

        async fn register(
            &self,
            _request: &UploadRequest,
            metadata: &ComposedMetadata,
        ) -> RegistrarResult<RegistrationResult> {
            self.register_calls.fetch_add(1, Ordering::SeqCst);
            *self.seen_metadata.lock().unwrap() = Some(metadata.primary_json());
            match self.behavior {
                Behavior::Succeed(cid) => Ok(RegistrationResult {
                    cid: cid.to_string(),
                    url: format!("https://example.test/files/{}", cid),
                    gateway: format!("https://gateway.example.test/ipfs/{}", cid),
                }),
                Behavior::FailTransport(status) => Err(RegistrarError::Transport {
                    status: Some(status),
                    message: "upstream failure".to_string(),
                }),
                Behavior::FailMalformed => Err(RegistrarError::MalformedResponse(
                    "no identifier".to_string(),
                )),
                Behavior::FailPreflight => unreachable!("preflight already failed"),
            }
        }
    }

    fn test_request() -> UploadRequest {
        UploadRequest::new("movie.mp4", "video/mp4", vec![0u8; 128])
    }

    fn orchestrator(providers: Vec<Arc<StubRegistrar>>) -> UploadOrchestrator {
        UploadOrchestrator::new(
            providers
                .into_iter()
                .map(|p| p as Arc<dyn Registrar>)
                .collect(),
            42,
        )
    }

    #[tokio::test]
    async fn test_primary_success_never_touches_fallback() {
        let primary = StubRegistrar::new(ProviderKind::Origin, Behavior::Succeed("bafy1"));
        let fallback = StubRegistrar::new(ProviderKind::Pinata, Behavior::Succeed("bafy2"));
        let orch = orchestrator(vec![primary.clone(), fallback.clone()]);

        let result = orch
            .upload(&test_request(), &ValidationPolicy::default(), None)
            .await
            .unwrap();

        assert_eq!(result.cid, "bafy1");
        assert_eq!(fallback.preflight_calls.load(Ordering::SeqCst), 0);
        assert_eq!(fallback.register_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_primary_transport_failure_falls_back_once() {
        let primary = StubRegistrar::new(ProviderKind::Origin, Behavior::FailTransport(500));
        let fallback = StubRegistrar::new(ProviderKind::Pinata, Behavior::Succeed("bafy2"));
        let orch = orchestrator(vec![primary.clone(), fallback.clone()]);

        let result = orch
            .upload(&test_request(), &ValidationPolicy::default(), None)
            .await
            .unwrap();

        assert_eq!(result.cid, "bafy2");
        assert_eq!(primary.register_calls.load(Ordering::SeqCst), 1);
        assert_eq!(fallback.preflight_calls.load(Ordering::SeqCst), 1);
        assert_eq!(fallback.register_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_malformed_primary_response_falls_back() {
        let primary = StubRegistrar::new(ProviderKind::Origin, Behavior::FailMalformed);
        let fallback = StubRegistrar::new(ProviderKind::Pinata, Behavior::Succeed("bafy2"));
        let orch = orchestrator(vec![primary, fallback]);

        let result = orch
            .upload(&test_request(), &ValidationPolicy::default(), None)
            .await
            .unwrap();
        assert_eq!(result.cid, "bafy2");
    }

    #[tokio::test]
    async fn test_fallback_preflight_failure_is_terminal() {
        let primary = StubRegistrar::new(ProviderKind::Origin, Behavior::FailTransport(500));
        let fallback = StubRegistrar::new(ProviderKind::Pinata, Behavior::FailPreflight);
        let orch = orchestrator(vec![primary, fallback.clone()]);

        let result = orch
            .upload(&test_request(), &ValidationPolicy::default(), None)
            .await;

        assert!(matches!(result, Err(UploadError::Auth(_))));
        assert_eq!(fallback.preflight_calls.load(Ordering::SeqCst), 1);
        assert_eq!(fallback.register_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fallback_failure_is_terminal() {
        let primary = StubRegistrar::new(ProviderKind::Origin, Behavior::FailTransport(503));
        let fallback = StubRegistrar::new(ProviderKind::Pinata, Behavior::FailTransport(502));
        let orch = orchestrator(vec![primary.clone(), fallback.clone()]);

        let result = orch
            .upload(&test_request(), &ValidationPolicy::default(), None)
            .await;

        assert!(matches!(result, Err(UploadError::Transport(_))));
        // one attempt each, no second pass over the chain
        assert_eq!(primary.register_calls.load(Ordering::SeqCst), 1);
        assert_eq!(fallback.register_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_validation_failure_makes_no_provider_calls() {
        let primary = StubRegistrar::new(ProviderKind::Origin, Behavior::Succeed("bafy1"));
        let orch = orchestrator(vec![primary.clone()]);

        let policy = ValidationPolicy::new(16, vec![]);
        let result = orch.upload(&test_request(), &policy, None).await;

        assert!(matches!(result, Err(UploadError::Validation(_))));
        assert_eq!(primary.preflight_calls.load(Ordering::SeqCst), 0);
        assert_eq!(primary.register_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fallback_sees_system_set_reserved_keys() {
        let mut caller_metadata = std::collections::BTreeMap::new();
        caller_metadata.insert("uploadedAt".to_string(), serde_json::json!("spoofed"));
        caller_metadata.insert("chainId".to_string(), serde_json::json!(1));
        let request = test_request().with_metadata(caller_metadata);

        let primary = StubRegistrar::new(ProviderKind::Origin, Behavior::FailTransport(500));
        let fallback = StubRegistrar::new(ProviderKind::Pinata, Behavior::Succeed("bafy2"));
        let orch = orchestrator(vec![primary, fallback.clone()]);

        orch.upload(&request, &ValidationPolicy::default(), None)
            .await
            .unwrap();

        let seen = fallback.seen_metadata.lock().unwrap().clone().unwrap();
        assert_eq!(seen["chainId"], 42);
        assert_ne!(seen["uploadedAt"], "spoofed");
    }

    #[tokio::test]
    async fn test_preferred_provider_moves_to_front() {
        let primary = StubRegistrar::new(ProviderKind::Origin, Behavior::Succeed("bafy1"));
        let fallback = StubRegistrar::new(ProviderKind::Pinata, Behavior::Succeed("bafy2"));
        let orch = orchestrator(vec![primary.clone(), fallback.clone()]);

        let result = orch
            .upload(
                &test_request(),
                &ValidationPolicy::default(),
                Some(ProviderKind::Pinata),
            )
            .await
            .unwrap();

        assert_eq!(result.cid, "bafy2");
        assert_eq!(primary.register_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_chain_is_config_error() {
        let orch = UploadOrchestrator::new(Vec::new(), 42);
        let result = orch
            .upload(&test_request(), &ValidationPolicy::default(), None)
            .await;
        assert!(matches!(result, Err(UploadError::Config(_))));
    }
}

use std::collections::BTreeMap;
use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MAX_FILE_SIZE_MB;

/// A file to be registered on content-addressable storage, together with the
/// caller-supplied metadata tags. Immutable once constructed: fields are
/// private and reachable only through accessors.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    file_name: String,
    content_type: String,
    bytes: Bytes,
    metadata: BTreeMap<String, serde_json::Value>,
}

impl UploadRequest {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        UploadRequest {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Attach caller-supplied metadata tags. Reserved keys (`uploadedAt`,
    /// `chainId`) are accepted here but always overwritten at compose time.
    pub fn with_metadata(mut self, metadata: BTreeMap<String, serde_json::Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Read a file from disk into an upload request. The content type is
    /// declared by the caller, not sniffed.
    pub async fn from_path(
        path: impl AsRef<Path>,
        content_type: impl Into<String>,
    ) -> std::io::Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.bin")
            .to_string();

        Ok(UploadRequest::new(file_name, content_type, data))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn metadata(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.metadata
    }
}

/// Size and content-type limits checked before any network call. Configured
/// per call, not persisted.
#[derive(Debug, Clone)]
pub struct ValidationPolicy {
    pub max_size_bytes: u64,
    /// Empty means allow all content types.
    pub allowed_content_types: Vec<String>,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        ValidationPolicy {
            max_size_bytes: DEFAULT_MAX_FILE_SIZE_MB * 1024 * 1024,
            allowed_content_types: Vec::new(),
        }
    }
}

impl ValidationPolicy {
    pub fn new(max_size_bytes: u64, allowed_content_types: Vec<String>) -> Self {
        ValidationPolicy {
            max_size_bytes,
            allowed_content_types,
        }
    }
}

/// Outcome of a successful registration: the content identifier plus where the
/// bytes can be retrieved. Returned at most once per upload request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationResult {
    /// Content identifier, derived from the uploaded bytes by the provider.
    pub cid: String,
    /// Canonical retrieval URL.
    pub url: String,
    /// Gateway URL that serves the content.
    pub gateway: String,
}

//! Metadata composition.
//!
//! Merges caller-supplied tags with request facts and the system-reserved
//! fields into the payload attached to an upload. Deterministic: the
//! timestamp is injected by the caller so the same inputs always produce the
//! same payload.
//!
//! Merge policy: caller values take precedence over the computed defaults
//! (name, type, size) but the reserved keys `uploadedAt` and `chainId` are
//! always system-computed and silently overwrite any caller-supplied value.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::constants::{METADATA_SOURCE, RESERVED_METADATA_KEYS};
use crate::models::UploadRequest;

/// The final metadata for one upload attempt, composed once per request and
/// reused across every provider in the fallback chain.
#[derive(Debug, Clone)]
pub struct ComposedMetadata {
    name: String,
    content_type: String,
    size: u64,
    uploaded_at: DateTime<Utc>,
    chain_id: u64,
    extras: BTreeMap<String, Value>,
}

/// Compose the metadata payload for an upload request.
pub fn compose(request: &UploadRequest, now: DateTime<Utc>, chain_id: u64) -> ComposedMetadata {
    let extras = request
        .metadata()
        .iter()
        .filter(|(k, _)| !RESERVED_METADATA_KEYS.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    ComposedMetadata {
        name: request.file_name().to_string(),
        content_type: request.content_type().to_string(),
        size: request.size(),
        uploaded_at: now,
        chain_id,
        extras,
    }
}

impl ComposedMetadata {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn uploaded_at(&self) -> DateTime<Utc> {
        self.uploaded_at
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn uploaded_at_rfc3339(&self) -> String {
        self.uploaded_at
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Flat JSON object sent as the `metadata` multipart field of a primary
    /// registration. Caller extras override the computed name/type/size but
    /// never the reserved keys, which are written last.
    pub fn primary_json(&self) -> Value {
        let mut map = serde_json::Map::new();
        map.insert("name".to_string(), json!(self.name));
        map.insert("type".to_string(), json!(self.content_type));
        map.insert("size".to_string(), json!(self.size));
        for (k, v) in &self.extras {
            map.insert(k.clone(), v.clone());
        }
        map.insert("uploadedAt".to_string(), json!(self.uploaded_at_rfc3339()));
        map.insert("chainId".to_string(), json!(self.chain_id));
        Value::Object(map)
    }

    /// The `pinataMetadata` block for a fallback pin. Keyvalues are strings
    /// per the provider's API.
    pub fn pinata_metadata(&self) -> Value {
        let mut keyvalues = serde_json::Map::new();
        for (k, v) in &self.extras {
            let rendered = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            keyvalues.insert(k.clone(), json!(rendered));
        }
        keyvalues.insert("uploadedAt".to_string(), json!(self.uploaded_at_rfc3339()));
        keyvalues.insert("chainId".to_string(), json!(self.chain_id.to_string()));
        keyvalues.insert("fileType".to_string(), json!(self.content_type));
        keyvalues.insert("fileSize".to_string(), json!(self.size.to_string()));
        keyvalues.insert("source".to_string(), json!(METADATA_SOURCE));

        json!({
            "name": self.name,
            "keyvalues": Value::Object(keyvalues),
        })
    }

    /// The `pinataOptions` block for a fallback pin. The addressing version
    /// is fixed so identical bytes always produce the same CID form.
    pub fn pinata_options(&self) -> Value {
        json!({ "cidVersion": 1 })
    }
}

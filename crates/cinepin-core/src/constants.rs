//! Shared constants for the content registration layer.

/// Chain identifier for the Camp network.
pub const CAMP_CHAIN_ID: u64 = 123420001114;

/// Default base URL for the Origin registration API.
pub const DEFAULT_ORIGIN_API_BASE: &str = "https://api.origin.camp";

/// Default base URL for the Pinata pinning API.
pub const DEFAULT_PINATA_API_BASE: &str = "https://api.pinata.cloud";

/// Default maximum upload size in megabytes.
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 500;

/// Default per-request HTTP timeout in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Value of the `source` keyvalue attached to pinned content.
pub const METADATA_SOURCE: &str = "decentralized-cinema";

/// Metadata keys that are always system-assigned and cannot be overridden
/// by caller-supplied metadata.
pub const RESERVED_METADATA_KEYS: &[&str] = &["uploadedAt", "chainId"];

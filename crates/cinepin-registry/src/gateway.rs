//! Gateway resolution.
//!
//! Maps a CID plus a gateway preference to a retrieval URL. Pure and total:
//! every input resolves to a valid URL. Adding a mirror is an edit to the
//! host table, nothing else.

use cinepin_core::GatewayPreference;

/// Known gateway hosts, keyed by preference.
const GATEWAY_HOSTS: &[(GatewayPreference, &str)] = &[
    (GatewayPreference::Origin, "gateway.origin.camp"),
    (GatewayPreference::Pinata, "gateway.pinata.cloud"),
    (GatewayPreference::Ipfs, "ipfs.io"),
    (GatewayPreference::Cloudflare, "cloudflare-ipfs.com"),
];

/// The gateway host for a preference.
pub fn host_for(preference: GatewayPreference) -> &'static str {
    GATEWAY_HOSTS
        .iter()
        .find(|(p, _)| *p == preference)
        .map(|(_, host)| *host)
        .unwrap_or(GATEWAY_HOSTS[0].1)
}

/// Resolve a CID to a retrieval URL on the preferred gateway.
pub fn resolve(cid: &str, preference: GatewayPreference) -> String {
    format!("https://{}/ipfs/{}", host_for(preference), cid)
}

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Known IPFS gateway mirrors for CID retrieval. Unrecognized preference
/// strings resolve to the default ([`GatewayPreference::Origin`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GatewayPreference {
    #[default]
    Origin,
    Pinata,
    Ipfs,
    Cloudflare,
}

impl FromStr for GatewayPreference {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "origin" => GatewayPreference::Origin,
            "pinata" => GatewayPreference::Pinata,
            "ipfs" => GatewayPreference::Ipfs,
            "cloudflare" => GatewayPreference::Cloudflare,
            _ => GatewayPreference::default(),
        })
    }
}

impl std::fmt::Display for GatewayPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GatewayPreference::Origin => "origin",
            GatewayPreference::Pinata => "pinata",
            GatewayPreference::Ipfs => "ipfs",
            GatewayPreference::Cloudflare => "cloudflare",
        };
        f.write_str(name)
    }
}

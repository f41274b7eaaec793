use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_RPC_URL: &str = "https://fullnode.devnet.sui.io:443";

/// Connection settings for [`JsonRpcProvider`](crate::JsonRpcProvider).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Full node JSON-RPC endpoint.
    pub rpc_url: String,
    /// Per-request timeout, covering connect and body.
    pub timeout: Duration,
}

impl ProviderConfig {
    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = rpc_url.into();
        self
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_owned(),
            timeout: Duration::from_secs(30),
        }
    }
}

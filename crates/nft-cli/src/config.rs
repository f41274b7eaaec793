use std::path::Path;

use anyhow::Context;
use nft_provider::ProviderConfig;
use nft_sdk::ServiceConfig;
use serde::{Deserialize, Serialize};

/// Contents of the `--config` file. Every section is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub provider: ProviderConfig,
    pub service: ServiceConfig,
}

impl CliConfig {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn with_rpc_url(mut self, rpc_url: Option<String>) -> Self {
        if let Some(url) = rpc_url {
            self.provider = self.provider.with_rpc_url(url);
        }
        self
    }
}

use nft_loader::LoaderConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_GAS_BUDGET: u64 = 5000;
pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";

/// Configuration for an [`NftService`](crate::NftService).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Shared by the artifact and collection loaders.
    pub loader: LoaderConfig,
    pub gas_budget: u64,
    /// Coin type used to pay for purchases.
    pub payment_coin_type: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            loader: LoaderConfig::default(),
            gas_budget: DEFAULT_GAS_BUDGET,
            payment_coin_type: SUI_COIN_TYPE.to_owned(),
        }
    }
}

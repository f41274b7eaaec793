use nft_types::ObjectId;
use thiserror::Error;

use crate::wallet::WalletError;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("cannot resolve item {0}")]
    CannotResolveItem(ObjectId),

    #[error("market not found: {0}")]
    MarketNotFound(ObjectId),

    #[error("market {0} is not live yet")]
    MarketNotLive(ObjectId),

    #[error("market {0} has no sales")]
    NoActiveSale(ObjectId),

    #[error("no {coin_type} coin has a balance of at least {required}")]
    InsufficientBalance { coin_type: String, required: u64 },

    #[error("invalid price: {0:?}")]
    InvalidPrice(String),

    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    #[error("nft {0} does not belong to a collection")]
    MissingCollection(ObjectId),

    #[error("provider error: {0}")]
    Provider(#[from] nft_provider::ProviderError),

    #[error("loader error: {0}")]
    Loader(#[from] nft_loader::LoaderError),

    #[error("wallet error: {0}")]
    Wallet(#[from] WalletError),
}

pub type SdkResult<T> = Result<T, SdkError>;

/// Parse a decimal price in the coin's smallest unit.
pub fn parse_price(price: &str) -> SdkResult<u64> {
    price
        .trim()
        .parse()
        .map_err(|_| SdkError::InvalidPrice(price.to_owned()))
}

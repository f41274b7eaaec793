//! High-level SDK for NFTs on Sui.
//!
//! [`NftService`] is the main entry point. It reads NFTs and collections
//! through batching, caching loaders, answers whether an NFT is listed on a
//! marketplace, and builds the marketplace and launchpad transactions that a
//! [`Wallet`] signs and submits.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use nft_provider::{JsonRpcProvider, ProviderConfig};
//! use nft_sdk::NftService;
//! use nft_types::ObjectId;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = JsonRpcProvider::new(ProviderConfig::default())?;
//! let service = NftService::new(Arc::new(provider));
//! if let Some(nft) = service.get_nft_by_id(&ObjectId::from("0x01"), false).await? {
//!     println!("{} owned by {}", nft.name, nft.owner_address);
//! }
//! # Ok(())
//! # }
//! ```

pub mod calls;
pub mod config;
pub mod error;
pub mod service;
pub mod transaction;
pub mod wallet;

pub use config::{ServiceConfig, DEFAULT_GAS_BUDGET, SUI_COIN_TYPE};
pub use error::{parse_price, SdkError, SdkResult};
pub use service::{CollectionLoader, NftLoader, NftService, ParsedObjectFetch};
pub use transaction::{CallArg, MoveCallTransaction, SignableTransaction};
pub use wallet::{TransactionResponse, Wallet, WalletError};

// Re-export key types
pub use nft_types::{Address, ArtNft, LaunchpadMarket, NftCertificate, NftCollection, ObjectId};

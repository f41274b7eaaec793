//! Object providers for the Sui NFT SDK.
//!
//! A provider answers object reads against a full node. The SDK never talks
//! to the network directly; it goes through [`ObjectProvider`], which lets
//! tests substitute [`InMemoryProvider`] for the real [`JsonRpcProvider`].
//!
//! # Example
//!
//! ```rust,no_run
//! use nft_provider::{InMemoryProvider, ObjectProvider};
//! use nft_types::ObjectId;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = InMemoryProvider::new();
//! let resp = provider.get_object(&ObjectId::from("0x1")).await?;
//! assert!(!resp.is_live());
//! # Ok(())
//! # }
//! ```

pub mod coin;
pub mod config;
pub mod error;
pub mod memory;
pub mod rpc;
pub mod traits;

pub use coin::{coin_balance, is_coin_type, COIN_TYPE_PREFIX};
pub use config::{ProviderConfig, DEFAULT_RPC_URL};
pub use error::{ProviderError, ProviderResult};
pub use memory::InMemoryProvider;
pub use rpc::JsonRpcProvider;
pub use traits::ObjectProvider;

//! Foundation types for the Sui NFT SDK.
//!
//! Every other crate in the workspace depends on `nft-types`.
//!
//! # Key Types
//!
//! - [`ObjectId`]: opaque handle to a remote object, used as cache and loader key
//! - [`Address`]: validated account address
//! - [`ObjectResponse`]: the provider's answer for one ID: live object or missing
//! - [`ArtNft`], [`NftCollection`]: domain records parsed from live objects
//! - [`LaunchpadMarket`], [`NftCertificate`], [`CoinBalance`]: records used by the
//!   transaction builders

pub mod envelope;
pub mod error;
pub mod object;
pub mod record;

pub use envelope::{LiveObject, MoveObject, ObjectRef, ObjectResponse, ObjectStatus, Owner};
pub use error::TypeError;
pub use object::{Address, ObjectId, ADDRESS_HEX_LEN};
pub use record::{
    ArtNft, CoinBalance, Identified, LaunchpadMarket, MarketSale, NftCertificate, NftCollection,
    PackageType,
};

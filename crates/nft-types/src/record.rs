use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::envelope::{LiveObject, Owner};
use crate::object::ObjectId;

/// A record that knows which object it was parsed from.
///
/// Batch fetches may return records in any order; the loader uses this to
/// put each one back on the key that requested it.
pub trait Identified {
    fn object_id(&self) -> &ObjectId;
}

/// The `package::module::Type` triple decomposed from a type descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageType {
    pub package_object_id: ObjectId,
    pub package_module: String,
    pub package_module_class_name: String,
}

impl PackageType {
    /// Fully qualified Move type, as passed in `typeArguments`.
    pub fn qualified(&self) -> String {
        format!(
            "{}::{}::{}",
            self.package_object_id, self.package_module, self.package_module_class_name
        )
    }
}

/// An NFT (`nft::Nft<C, D>`) parsed from a live object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArtNft {
    pub id: ObjectId,
    pub name: String,
    pub url: String,
    pub collection_id: Option<ObjectId>,
    pub attributes: BTreeMap<String, String>,
    pub owner: Owner,
    pub owner_address: String,
    pub data_type: String,
    #[serde(flatten)]
    pub package: PackageType,
    /// Second type parameter as `module::Type`.
    pub nft_type: String,
    pub raw: Arc<LiveObject>,
}

impl ArtNft {
    pub fn collection_type(&self) -> String {
        self.package.qualified()
    }
}

impl Identified for ArtNft {
    fn object_id(&self) -> &ObjectId {
        &self.id
    }
}

/// A collection (`collection::Collection<C, std_collection::StdMeta>`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NftCollection {
    pub id: ObjectId,
    pub name: String,
    pub description: String,
    pub symbol: String,
    pub creators: Vec<String>,
    pub receiver: String,
    pub mint_authority_id: Option<ObjectId>,
    pub tags: Vec<String>,
    pub data_type: String,
    #[serde(flatten)]
    pub package: PackageType,
    pub raw: Arc<LiveObject>,
}

impl NftCollection {
    pub fn collection_type(&self) -> String {
        self.package.qualified()
    }
}

impl Identified for NftCollection {
    fn object_id(&self) -> &ObjectId {
        &self.id
    }
}

/// A launchpad selling a collection at a fixed price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaunchpadMarket {
    pub id: ObjectId,
    pub live: bool,
    pub admin: String,
    pub receiver: String,
    pub sales: Vec<MarketSale>,
    #[serde(flatten)]
    pub package: PackageType,
    pub raw: Arc<LiveObject>,
}

impl LaunchpadMarket {
    pub fn collection_type(&self) -> String {
        self.package.qualified()
    }

    /// The first sale that still has NFTs to sell.
    pub fn active_sale(&self) -> Option<&MarketSale> {
        self.sales.iter().find(|s| !s.nfts.is_empty())
    }
}

impl Identified for LaunchpadMarket {
    fn object_id(&self) -> &ObjectId {
        &self.id
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSale {
    pub id: Option<ObjectId>,
    pub tier_index: u64,
    pub nfts: Vec<ObjectId>,
    pub market_price: u64,
}

/// Proof of purchase from a launchpad, redeemable for one NFT.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NftCertificate {
    pub id: ObjectId,
    pub package_object_id: ObjectId,
    pub launchpad_id: ObjectId,
    pub nft_id: ObjectId,
    pub owner_address: String,
    pub raw: Arc<LiveObject>,
}

impl Identified for NftCertificate {
    fn object_id(&self) -> &ObjectId {
        &self.id
    }
}

/// A coin object and the balance it holds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinBalance {
    pub object_id: ObjectId,
    pub coin_type: String,
    pub balance: u64,
}

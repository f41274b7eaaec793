//! Move calls for the marketplace and launchpad contracts.
//!
//! Pure constructors: resolving the objects involved and submitting the
//! result is the service's job. Gas budgets are filled in on submission.

use nft_types::{Address, ArtNft, CoinBalance, LaunchpadMarket, NftCertificate, ObjectId};

use crate::error::{SdkError, SdkResult};
use crate::transaction::MoveCallTransaction;

const MARKETPLACE: &str = "marketplace";
const FIXED_PRICE: &str = "fixed_price";

/// `marketplace::list<C, Coin>(marketplace, nft, price)`.
pub fn list(
    package: &ObjectId,
    marketplace: &ObjectId,
    nft: &ArtNft,
    price: u64,
    coin_type: &str,
) -> MoveCallTransaction {
    MoveCallTransaction::new(package.clone(), MARKETPLACE, "list")
        .with_arg(marketplace)
        .with_arg(&nft.id)
        .with_arg(price)
        .with_type_arg(nft.collection_type())
        .with_type_arg(coin_type)
}

/// `marketplace::buy_and_take<C, StdMeta, Coin>(marketplace, nft, coin, price, collection)`.
pub fn buy_and_take(
    package: &ObjectId,
    marketplace: &ObjectId,
    nft: &ArtNft,
    coin: &CoinBalance,
    price: u64,
    coin_type: &str,
) -> SdkResult<MoveCallTransaction> {
    let collection = nft
        .collection_id
        .as_ref()
        .ok_or_else(|| SdkError::MissingCollection(nft.id.clone()))?;
    Ok(MoveCallTransaction::new(package.clone(), MARKETPLACE, "buy_and_take")
        .with_arg(marketplace)
        .with_arg(&nft.id)
        .with_arg(&coin.object_id)
        .with_arg(price)
        .with_arg(collection)
        .with_type_arg(nft.collection_type())
        .with_type_arg(format!("{}::std_collection::StdMeta", nft.package.package_object_id))
        .with_type_arg(coin_type))
}

/// `marketplace::delist_and_take<C, D, Coin>(marketplace, nft)`.
pub fn delist_and_take(
    package: &ObjectId,
    marketplace: &ObjectId,
    nft: &ArtNft,
    coin_type: &str,
) -> MoveCallTransaction {
    MoveCallTransaction::new(package.clone(), MARKETPLACE, "delist_and_take")
        .with_arg(marketplace)
        .with_arg(&nft.id)
        .with_type_arg(nft.collection_type())
        .with_type_arg(format!("{}::{}", nft.package.package_object_id, nft.nft_type))
        .with_type_arg(coin_type)
}

/// `fixed_price::buy_nft_certificate<C>(launchpad, coin)`.
pub fn buy_nft_certificate(market: &LaunchpadMarket, coin: &CoinBalance) -> MoveCallTransaction {
    MoveCallTransaction::new(market.package.package_object_id.clone(), FIXED_PRICE, "buy_nft_certificate")
        .with_arg(&market.id)
        .with_arg(&coin.object_id)
        .with_type_arg(market.collection_type())
}

/// `<nft module>::claim_nft_embedded<C>(launchpad, nft, certificate, recipient)`.
///
/// The module is the one defining the NFT's second type parameter.
pub fn claim_nft_embedded(
    certificate: &NftCertificate,
    nft: &ArtNft,
    recipient: &Address,
) -> MoveCallTransaction {
    let module = nft.nft_type.split("::").next().unwrap_or_default();
    MoveCallTransaction::new(nft.package.package_object_id.clone(), module, "claim_nft_embedded")
        .with_arg(&certificate.launchpad_id)
        .with_arg(&nft.id)
        .with_arg(&certificate.id)
        .with_arg(&ObjectId::from(recipient.clone()))
        .with_type_arg(nft.collection_type())
}

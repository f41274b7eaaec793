use std::sync::Arc;

use async_trait::async_trait;
use nft_loader::{BatchFetch, BatchLoader};
use nft_parser::{
    parse_object_owner, ArtNftParser, CertificateParser, CollectionParser, MarketParser,
    ObjectParser,
};
use nft_provider::{ObjectProvider, ProviderError};
use nft_types::{
    Address, ArtNft, CoinBalance, Identified, LaunchpadMarket, NftCertificate, NftCollection,
    ObjectId,
};
use tracing::{debug, warn};

use crate::calls;
use crate::config::ServiceConfig;
use crate::error::{parse_price, SdkError, SdkResult};
use crate::transaction::MoveCallTransaction;
use crate::wallet::{TransactionResponse, Wallet};

/// Batch function that fetches objects through a provider and parses them.
///
/// Objects that are missing or of another type are dropped, so the loader
/// resolves their keys to `None`.
pub struct ParsedObjectFetch<P> {
    provider: Arc<dyn ObjectProvider>,
    parser: P,
}

impl<P> ParsedObjectFetch<P> {
    pub fn new(provider: Arc<dyn ObjectProvider>, parser: P) -> Self {
        Self { provider, parser }
    }
}

#[async_trait]
impl<P> BatchFetch for ParsedObjectFetch<P>
where
    P: ObjectParser,
    P::Output: Identified,
{
    type Value = P::Output;
    type Error = ProviderError;

    async fn fetch(&self, ids: &[ObjectId]) -> Result<Vec<P::Output>, ProviderError> {
        let responses = self.provider.get_objects(ids).await?;
        let records = self.parser.parse_all(&responses);
        debug!(requested = ids.len(), parsed = records.len(), kind = ?self.parser.kind(), "batch parsed");
        Ok(records)
    }
}

pub type NftLoader = BatchLoader<ParsedObjectFetch<ArtNftParser>>;
pub type CollectionLoader = BatchLoader<ParsedObjectFetch<CollectionParser>>;

/// Entry point for reading NFTs and building marketplace transactions.
///
/// Owns one loader for artifacts and one for collections. Clones share both
/// loaders and their caches, so a service built once at startup can be handed
/// to every task that needs it.
#[derive(Clone)]
pub struct NftService {
    provider: Arc<dyn ObjectProvider>,
    config: ServiceConfig,
    nfts: NftLoader,
    collections: CollectionLoader,
}

impl NftService {
    pub fn new(provider: Arc<dyn ObjectProvider>) -> Self {
        Self::with_config(provider, ServiceConfig::default())
    }

    pub fn with_config(provider: Arc<dyn ObjectProvider>, config: ServiceConfig) -> Self {
        let nfts = BatchLoader::new(
            ParsedObjectFetch::new(provider.clone(), ArtNftParser),
            config.loader.clone(),
        );
        let collections = BatchLoader::new(
            ParsedObjectFetch::new(provider.clone(), CollectionParser),
            config.loader.clone(),
        );
        Self { provider, config, nfts, collections }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn provider(&self) -> &Arc<dyn ObjectProvider> {
        &self.provider
    }

    pub fn nft_loader(&self) -> &NftLoader {
        &self.nfts
    }

    pub fn collection_loader(&self) -> &CollectionLoader {
        &self.collections
    }

    // ---- Accessors ----

    /// Every NFT owned by `address`. One listing call, not batched or cached.
    pub async fn get_nfts_by_owner(&self, address: &Address) -> SdkResult<Vec<ArtNft>> {
        let responses = self.provider.get_objects_owned_by_address(address).await?;
        Ok(ArtNftParser.parse_all(&responses))
    }

    /// Load one NFT through the batching loader. With `reload`, the cached
    /// record is dropped first so the node is asked again.
    pub async fn get_nft_by_id(&self, id: &ObjectId, reload: bool) -> SdkResult<Option<Arc<ArtNft>>> {
        let nft = if reload {
            self.nfts.reload(id).await?
        } else {
            self.nfts.load(id).await?
        };
        Ok(nft)
    }

    /// Load many NFTs, in request order. Failures resolve to `None` in place.
    pub async fn get_nfts_by_ids(&self, ids: &[ObjectId]) -> Vec<Option<Arc<ArtNft>>> {
        self.nfts
            .load_many(ids)
            .await
            .into_iter()
            .zip(ids)
            .map(|(result, id)| {
                result.unwrap_or_else(|err| {
                    warn!(nft = %id, error = %err, "nft load failed");
                    None
                })
            })
            .collect()
    }

    pub async fn get_collection(&self, id: &ObjectId) -> SdkResult<Option<Arc<NftCollection>>> {
        Ok(self.collections.load(id).await?)
    }

    /// Whether an NFT sits in `marketplace`.
    ///
    /// A listed NFT is owned by a dynamic field, which is in turn owned by the
    /// marketplace. Two direct reads, bypassing the loaders. A missing NFT or
    /// owner is reported as not listed.
    pub async fn is_nft_listed(&self, nft_id: &ObjectId, marketplace_id: &ObjectId) -> SdkResult<bool> {
        let nft = self.provider.get_object(nft_id).await?;
        let Some(nft) = nft.as_live() else {
            return Ok(false);
        };
        let parent = parse_object_owner(&nft.owner);
        if parent.is_empty() {
            return Ok(false);
        }
        let field = self.provider.get_object(&ObjectId::new(parent)).await?;
        Ok(field
            .as_live()
            .is_some_and(|f| parse_object_owner(&f.owner) == marketplace_id.as_str()))
    }

    pub async fn get_market(&self, id: &ObjectId) -> SdkResult<Option<LaunchpadMarket>> {
        let response = self.provider.get_object(id).await?;
        Ok(MarketParser.parse(&response))
    }

    pub async fn get_certificates_by_owner(&self, address: &Address) -> SdkResult<Vec<NftCertificate>> {
        let responses = self.provider.get_objects_owned_by_address(address).await?;
        Ok(CertificateParser.parse_all(&responses))
    }

    /// The first payment coin owned by `owner` holding at least `amount`.
    pub async fn select_coin(&self, owner: &Address, amount: u64) -> SdkResult<CoinBalance> {
        let coin_type = &self.config.payment_coin_type;
        self.provider
            .get_coin_balances_owned_by_address(owner)
            .await?
            .into_iter()
            .find(|c| &c.coin_type == coin_type && c.balance >= amount)
            .ok_or_else(|| SdkError::InsufficientBalance {
                coin_type: coin_type.clone(),
                required: amount,
            })
    }

    // ---- Transactions ----

    /// List an NFT on a marketplace at `price`.
    pub async fn list_nft(
        &self,
        wallet: &dyn Wallet,
        package: &ObjectId,
        marketplace: &ObjectId,
        nft: &ArtNft,
        price: &str,
    ) -> SdkResult<TransactionResponse> {
        let price = parse_price(price)?;
        let call = calls::list(package, marketplace, nft, price, &self.config.payment_coin_type);
        self.submit(wallet, call).await
    }

    /// Buy a listed NFT, paying with the buyer's first sufficient coin.
    pub async fn buy_nft(
        &self,
        wallet: &dyn Wallet,
        package: &ObjectId,
        marketplace: &ObjectId,
        listing_key: &ObjectId,
        price: &str,
        buyer: &Address,
    ) -> SdkResult<TransactionResponse> {
        let price = parse_price(price)?;
        let nft = self.resolve_item(listing_key).await?;
        let coin = self.select_coin(buyer, price).await?;
        let call = calls::buy_and_take(
            package,
            marketplace,
            &nft,
            &coin,
            price,
            &self.config.payment_coin_type,
        )?;
        self.submit(wallet, call).await
    }

    pub async fn cancel_listing(
        &self,
        wallet: &dyn Wallet,
        package: &ObjectId,
        marketplace: &ObjectId,
        listing_key: &ObjectId,
    ) -> SdkResult<TransactionResponse> {
        let nft = self.resolve_item(listing_key).await?;
        let call = calls::delist_and_take(package, marketplace, &nft, &self.config.payment_coin_type);
        self.submit(wallet, call).await
    }

    /// Buy a certificate from a live launchpad at its active sale's price.
    pub async fn buy_from_launchpad(
        &self,
        wallet: &dyn Wallet,
        launchpad_id: &ObjectId,
        buyer: &Address,
    ) -> SdkResult<TransactionResponse> {
        let market = self
            .get_market(launchpad_id)
            .await?
            .ok_or_else(|| SdkError::MarketNotFound(launchpad_id.clone()))?;
        if !market.live {
            return Err(SdkError::MarketNotLive(market.id));
        }
        let price = market
            .active_sale()
            .map(|sale| sale.market_price)
            .ok_or_else(|| SdkError::NoActiveSale(market.id.clone()))?;
        let coin = self.select_coin(buyer, price).await?;
        self.submit(wallet, calls::buy_nft_certificate(&market, &coin)).await
    }

    /// Redeem the first certificate `address` holds from `package`.
    ///
    /// Returns `Ok(None)` when the address holds no such certificate.
    pub async fn claim_certificate(
        &self,
        wallet: &dyn Wallet,
        address: &Address,
        package: &ObjectId,
    ) -> SdkResult<Option<TransactionResponse>> {
        let certificate = self
            .get_certificates_by_owner(address)
            .await?
            .into_iter()
            .find(|c| &c.package_object_id == package);
        let Some(certificate) = certificate else {
            debug!(%address, %package, "no certificate to claim");
            return Ok(None);
        };
        let nft = self
            .nfts
            .load(&certificate.nft_id)
            .await?
            .ok_or_else(|| SdkError::ObjectNotFound(certificate.nft_id.clone()))?;
        let call = calls::claim_nft_embedded(&certificate, &nft, address);
        Ok(Some(self.submit(wallet, call).await?))
    }

    async fn resolve_item(&self, id: &ObjectId) -> SdkResult<Arc<ArtNft>> {
        self.nfts
            .load(id)
            .await?
            .ok_or_else(|| SdkError::CannotResolveItem(id.clone()))
    }

    async fn submit(&self, wallet: &dyn Wallet, call: MoveCallTransaction) -> SdkResult<TransactionResponse> {
        let call = call.with_gas_budget(self.config.gas_budget);
        debug!(call = %call.target(), args = call.arguments.len(), "submitting move call");
        Ok(wallet.sign_and_execute_transaction(call.into()).await?)
    }
}

impl std::fmt::Debug for NftService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NftService")
            .field("cached_nfts", &self.nfts.cached_len())
            .field("cached_collections", &self.collections.cached_len())
            .finish()
    }
}

use async_trait::async_trait;
use nft_types::{Address, CoinBalance, ObjectId, ObjectResponse};

use crate::error::ProviderResult;

/// Read access to a Sui full node.
///
/// Implementations decide liveness at the boundary: every object comes back
/// as an [`ObjectResponse`], and only failures of the call itself are `Err`.
#[async_trait]
pub trait ObjectProvider: Send + Sync {
    /// Fetch one object.
    async fn get_object(&self, id: &ObjectId) -> ProviderResult<ObjectResponse>;

    /// Fetch many objects in one round trip.
    ///
    /// The result may be in any order and need not cover every ID; callers
    /// match responses to IDs themselves. The default implementation calls
    /// `get_object()` for each ID. Backends should override it.
    async fn get_objects(&self, ids: &[ObjectId]) -> ProviderResult<Vec<ObjectResponse>> {
        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            out.push(self.get_object(id).await?);
        }
        Ok(out)
    }

    /// Every object owned by `address`.
    async fn get_objects_owned_by_address(
        &self,
        address: &Address,
    ) -> ProviderResult<Vec<ObjectResponse>>;

    /// Every coin owned by `address`, with its balance.
    async fn get_coin_balances_owned_by_address(
        &self,
        address: &Address,
    ) -> ProviderResult<Vec<CoinBalance>>;
}

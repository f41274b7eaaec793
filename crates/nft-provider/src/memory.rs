use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use nft_types::{Address, CoinBalance, LiveObject, ObjectId, ObjectResponse};

use crate::coin::coin_balance;
use crate::error::{ProviderError, ProviderResult};
use crate::traits::ObjectProvider;

/// In-memory, HashMap-based provider.
///
/// Intended for tests and embedding. Objects are held behind a `RwLock` and
/// cloned on read. Every batched fetch is recorded so callers can check how
/// many round trips a piece of code made and which IDs each carried.
pub struct InMemoryProvider {
    objects: RwLock<HashMap<ObjectId, LiveObject>>,
    batch_calls: RwLock<Vec<Vec<ObjectId>>>,
    single_calls: RwLock<Vec<ObjectId>>,
    failing: AtomicBool,
}

impl InMemoryProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            batch_calls: RwLock::new(Vec::new()),
            single_calls: RwLock::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    /// Insert or replace an object.
    pub fn insert(&self, object: LiveObject) {
        let id = object.id().clone();
        self.objects.write().expect("lock poisoned").insert(id, object);
    }

    /// Remove an object. Returns `true` if it existed.
    pub fn remove(&self, id: &ObjectId) -> bool {
        self.objects.write().expect("lock poisoned").remove(id).is_some()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    /// While set, every call fails with [`ProviderError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// The ID lists of every `get_objects` call so far, in call order.
    pub fn batch_calls(&self) -> Vec<Vec<ObjectId>> {
        self.batch_calls.read().expect("lock poisoned").clone()
    }

    /// The IDs of every `get_object` call so far, in call order.
    pub fn single_calls(&self) -> Vec<ObjectId> {
        self.single_calls.read().expect("lock poisoned").clone()
    }

    /// Forget the recorded calls.
    pub fn reset_calls(&self) {
        self.batch_calls.write().expect("lock poisoned").clear();
        self.single_calls.write().expect("lock poisoned").clear();
    }

    fn check_available(&self) -> ProviderResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ProviderError::Unavailable("in-memory provider set to fail".into()));
        }
        Ok(())
    }

    fn read(&self, id: &ObjectId) -> ObjectResponse {
        match self.objects.read().expect("lock poisoned").get(id) {
            Some(object) => ObjectResponse::Live(object.clone()),
            None => ObjectResponse::missing(id.clone()),
        }
    }

    fn owned_by(&self, address: &Address) -> Vec<LiveObject> {
        let map = self.objects.read().expect("lock poisoned");
        let mut owned: Vec<LiveObject> = map
            .values()
            .filter(|o| o.owner.address() == address.as_str())
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.id().cmp(b.id()));
        owned
    }
}

impl Default for InMemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectProvider for InMemoryProvider {
    async fn get_object(&self, id: &ObjectId) -> ProviderResult<ObjectResponse> {
        self.single_calls.write().expect("lock poisoned").push(id.clone());
        self.check_available()?;
        Ok(self.read(id))
    }

    async fn get_objects(&self, ids: &[ObjectId]) -> ProviderResult<Vec<ObjectResponse>> {
        self.batch_calls.write().expect("lock poisoned").push(ids.to_vec());
        self.check_available()?;
        Ok(ids.iter().map(|id| self.read(id)).collect())
    }

    async fn get_objects_owned_by_address(
        &self,
        address: &Address,
    ) -> ProviderResult<Vec<ObjectResponse>> {
        self.check_available()?;
        Ok(self.owned_by(address).into_iter().map(ObjectResponse::Live).collect())
    }

    async fn get_coin_balances_owned_by_address(
        &self,
        address: &Address,
    ) -> ProviderResult<Vec<CoinBalance>> {
        self.check_available()?;
        Ok(self.owned_by(address).iter().filter_map(coin_balance).collect())
    }
}

impl std::fmt::Debug for InMemoryProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryProvider")
            .field("object_count", &self.len())
            .finish()
    }
}

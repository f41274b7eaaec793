use async_trait::async_trait;
use nft_types::{Identified, ObjectId};

/// The batch function behind a [`BatchLoader`](crate::BatchLoader).
///
/// Called with each distinct key at most once per batch. The returned values
/// may come back in any order and may omit keys; the loader matches them to
/// keys through [`Identified::object_id`] and resolves the leftovers to
/// `None`. Returning `Err` fails every key in the batch.
#[async_trait]
pub trait BatchFetch: Send + Sync + 'static {
    type Value: Identified + Send + Sync + 'static;
    type Error: std::error::Error + Send + Sync + 'static;

    async fn fetch(&self, ids: &[ObjectId]) -> Result<Vec<Self::Value>, Self::Error>;
}

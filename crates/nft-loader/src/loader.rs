use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lru::LruCache;
use nft_types::{Identified, ObjectId};
use tokio::sync::watch;
use tracing::{debug, trace, warn};

use crate::config::LoaderConfig;
use crate::error::{LoaderError, LoaderResult};
use crate::fetch::BatchFetch;

/// What a settled batch hands to its waiters: every record it found, by key.
type Outcome<V> = LoaderResult<Arc<HashMap<ObjectId, Arc<V>>>>;

/// One batch, shared by every caller waiting on any of its keys.
struct Batch<V> {
    tx: watch::Sender<Option<Outcome<V>>>,
}

impl<V> Batch<V> {
    fn new() -> Arc<Self> {
        let (tx, _) = watch::channel(None);
        Arc::new(Self { tx })
    }
}

/// The batch still collecting keys for the current scheduling turn.
struct PendingBatch<V> {
    batch: Arc<Batch<V>>,
    keys: Vec<ObjectId>,
    seen: HashSet<ObjectId>,
}

struct State<V> {
    cache: LruCache<ObjectId, Arc<V>>,
    pending: Option<PendingBatch<V>>,
    /// Keys of the pending batch and of dispatched, unsettled batches.
    waiting: HashMap<ObjectId, Arc<Batch<V>>>,
}

struct Inner<F: BatchFetch> {
    fetcher: F,
    config: LoaderConfig,
    state: Mutex<State<F::Value>>,
}

/// A caller's claim on one key, taken while holding the state lock.
enum Ticket<V> {
    Ready(Arc<V>),
    Waiting {
        id: ObjectId,
        rx: watch::Receiver<Option<Outcome<V>>>,
    },
}

/// Work a caller picks up while holding the state lock and starts once it
/// has let go of it.
struct Followup<F: BatchFetch> {
    /// The batch this caller opened and is responsible for flushing.
    opened: Option<Arc<Batch<F::Value>>>,
    /// Batches that reached `max_batch_size` and go out right away.
    full: Vec<PendingBatch<F::Value>>,
}

impl<F: BatchFetch> Followup<F> {
    fn new() -> Self {
        Self { opened: None, full: Vec::new() }
    }

    /// Dispatch full batches, then flush the opened one after the rest of
    /// this scheduling turn has had its chance to enqueue.
    async fn run(self, inner: &Arc<Inner<F>>) {
        for pending in self.full {
            inner.dispatch(pending);
        }
        if let Some(batch) = self.opened {
            Flush { inner: Arc::clone(inner), batch: Some(batch) }.after_turn().await;
        }
    }
}

/// Coalescing object loader with a bounded LRU cache.
///
/// Every key requested during one scheduling turn is fetched with a single
/// call to the [`BatchFetch`] function, each distinct key at most once. A key
/// whose batch is already in flight joins that batch instead of being fetched
/// again. Found records are cached; absent ones are not, so a later `load`
/// asks the provider again.
///
/// Cache, pending batch and in-flight table live behind one mutex, which
/// makes enqueue/dispatch atomic with respect to concurrent callers. The
/// caller that opens a batch yields once and then flushes it, so keys from
/// the futures its task polls in the same pass land in that batch whatever
/// the runtime flavor. The fetch itself runs on a spawned task, so loads
/// must be awaited from within a tokio runtime.
pub struct BatchLoader<F: BatchFetch> {
    inner: Arc<Inner<F>>,
}

impl<F: BatchFetch> Clone for BatchLoader<F> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<F: BatchFetch> BatchLoader<F> {
    /// Create a loader with an empty cache around `fetcher`.
    pub fn new(fetcher: F, config: LoaderConfig) -> Self {
        let state = State {
            cache: LruCache::new(config.cache_capacity),
            pending: None,
            waiting: HashMap::new(),
        };
        Self {
            inner: Arc::new(Inner {
                fetcher,
                config,
                state: Mutex::new(state),
            }),
        }
    }

    /// The configuration this loader was built with.
    pub fn config(&self) -> &LoaderConfig {
        &self.inner.config
    }

    /// The batch function behind this loader.
    pub fn fetcher(&self) -> &F {
        &self.inner.fetcher
    }

    /// Resolve one key to its record, or `None` if the provider has none.
    pub async fn load(&self, id: &ObjectId) -> LoaderResult<Option<Arc<F::Value>>> {
        let mut followup = Followup::new();
        let ticket = {
            let mut state = self.inner.lock();
            self.inner.ticket(&mut state, id, &mut followup)
        };
        followup.run(&self.inner).await;
        resolve(ticket).await
    }

    /// Resolve many keys, preserving order.
    ///
    /// All keys are enqueued before anything is awaited, so the misses go out
    /// in one batch (split only by `max_batch_size`). A failed batch shows up
    /// as `Err` in the positions it covered without affecting the others.
    pub async fn load_many(&self, ids: &[ObjectId]) -> Vec<LoaderResult<Option<Arc<F::Value>>>> {
        let mut followup = Followup::new();
        let tickets: Vec<_> = {
            let mut state = self.inner.lock();
            ids.iter()
                .map(|id| self.inner.ticket(&mut state, id, &mut followup))
                .collect()
        };
        followup.run(&self.inner).await;
        let mut results = Vec::with_capacity(tickets.len());
        for ticket in tickets {
            results.push(resolve(ticket).await);
        }
        results
    }

    /// Drop any cached record for `id` and fetch it again.
    pub async fn reload(&self, id: &ObjectId) -> LoaderResult<Option<Arc<F::Value>>> {
        self.clear(id).load(id).await
    }

    /// Forget `id`: the next `load` goes to the provider.
    ///
    /// A batch already carrying `id` still settles for its current waiters,
    /// but its result is not written back to the cache.
    pub fn clear(&self, id: &ObjectId) -> &Self {
        let mut state = self.inner.lock();
        state.cache.pop(id);
        state.waiting.remove(id);
        self
    }

    /// Forget every cached and in-flight key.
    pub fn clear_all(&self) -> &Self {
        let mut state = self.inner.lock();
        state.cache.clear();
        state.waiting.clear();
        self
    }

    /// Seed the cache with a record. An existing entry for the same key wins.
    pub fn prime(&self, value: F::Value) -> &Self {
        let mut state = self.inner.lock();
        let id = value.object_id().clone();
        if !state.cache.contains(&id) {
            state.cache.put(id, Arc::new(value));
        }
        self
    }

    /// Whether `id` is cached. Does not refresh its recency.
    pub fn is_cached(&self, id: &ObjectId) -> bool {
        self.inner.lock().cache.contains(id)
    }

    /// Number of records currently cached.
    pub fn cached_len(&self) -> usize {
        self.inner.lock().cache.len()
    }
}

impl<F: BatchFetch> Inner<F> {
    fn lock(&self) -> MutexGuard<'_, State<F::Value>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ticket(
        &self,
        state: &mut State<F::Value>,
        id: &ObjectId,
        followup: &mut Followup<F>,
    ) -> Ticket<F::Value> {
        if let Some(hit) = state.cache.get(id) {
            trace!(id = %id, "cache hit");
            return Ticket::Ready(Arc::clone(hit));
        }
        let batch = match state.waiting.get(id) {
            Some(batch) => Arc::clone(batch),
            None => self.enqueue(state, id, followup),
        };
        Ticket::Waiting {
            id: id.clone(),
            rx: batch.tx.subscribe(),
        }
    }

    /// Add `id` to the pending batch, opening one if needed.
    fn enqueue(
        &self,
        state: &mut State<F::Value>,
        id: &ObjectId,
        followup: &mut Followup<F>,
    ) -> Arc<Batch<F::Value>> {
        let pending = state.pending.get_or_insert_with(|| {
            let batch = Batch::new();
            followup.opened = Some(Arc::clone(&batch));
            PendingBatch {
                batch,
                keys: Vec::new(),
                seen: HashSet::new(),
            }
        });
        // A key cleared while its batch was still open is already in `keys`.
        if pending.seen.insert(id.clone()) {
            pending.keys.push(id.clone());
        }
        let batch = Arc::clone(&pending.batch);
        state.waiting.insert(id.clone(), Arc::clone(&batch));

        let full = self
            .config
            .max_batch_size
            .is_some_and(|max| pending.keys.len() >= max.get());
        if full {
            if let Some(pending) = state.pending.take() {
                trace!(keys = pending.keys.len(), "batch full, dispatching early");
                followup.full.push(pending);
            }
        }
        batch
    }

    /// Hand `pending` to a fetch task. Must be called without the state lock.
    ///
    /// Outside a runtime the batch settles with [`LoaderError::Dropped`].
    fn dispatch(self: &Arc<Self>, pending: PendingBatch<F::Value>) {
        let dispatch = Dispatch::new(Arc::clone(self), pending);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(dispatch.run());
            }
            Err(_) => drop(dispatch),
        }
    }

    /// Record a batch outcome and wake its waiters.
    fn settle(&self, batch: &Arc<Batch<F::Value>>, keys: &[ObjectId], outcome: Outcome<F::Value>) {
        {
            let mut state = self.lock();
            for key in keys {
                // Keys cleared mid-flight no longer point at this batch.
                let ours = state
                    .waiting
                    .get(key)
                    .is_some_and(|b| Arc::ptr_eq(b, batch));
                if !ours {
                    continue;
                }
                state.waiting.remove(key);
                let Ok(found) = &outcome else { continue };
                if let Some(value) = found.get(key) {
                    if let Some((evicted, _)) = state.cache.push(key.clone(), Arc::clone(value)) {
                        if &evicted != key {
                            trace!(evicted = %evicted, "cache full, evicted least recently used");
                        }
                    }
                }
            }
        }
        batch.tx.send_replace(Some(outcome));
    }
}

/// The opening caller's duty to send its batch off.
///
/// Flushing takes the batch out of the pending slot if it is still there and
/// dispatches it. Dropping an unflushed `Flush` (the caller was cancelled
/// mid-yield) flushes too, so the other waiters on the batch still settle.
struct Flush<F: BatchFetch> {
    inner: Arc<Inner<F>>,
    batch: Option<Arc<Batch<F::Value>>>,
}

impl<F: BatchFetch> Flush<F> {
    async fn after_turn(mut self) {
        tokio::task::yield_now().await;
        self.fire();
    }

    fn fire(&mut self) {
        let Some(batch) = self.batch.take() else { return };
        let pending = {
            let mut state = self.inner.lock();
            let ours = state
                .pending
                .as_ref()
                .is_some_and(|p| Arc::ptr_eq(&p.batch, &batch));
            if ours {
                state.pending.take()
            } else {
                None
            }
        };
        if let Some(pending) = pending {
            self.inner.dispatch(pending);
        }
    }
}

impl<F: BatchFetch> Drop for Flush<F> {
    fn drop(&mut self) {
        self.fire();
    }
}

/// A batch taken off the pending slot and owned by the task fetching it.
///
/// If the task is dropped before the fetch settles (runtime shutdown, panic
/// in the fetcher), the batch settles with [`LoaderError::Dropped`] so no
/// waiter is left hanging.
struct Dispatch<F: BatchFetch> {
    inner: Arc<Inner<F>>,
    batch: Arc<Batch<F::Value>>,
    keys: Vec<ObjectId>,
    settled: bool,
}

impl<F: BatchFetch> Dispatch<F> {
    fn new(inner: Arc<Inner<F>>, pending: PendingBatch<F::Value>) -> Self {
        Self {
            inner,
            batch: pending.batch,
            keys: pending.keys,
            settled: false,
        }
    }

    async fn run(mut self) {
        debug!(keys = self.keys.len(), "dispatching batch");
        let outcome = match self.inner.fetcher.fetch(&self.keys).await {
            Ok(values) => {
                let requested: HashSet<&ObjectId> = self.keys.iter().collect();
                let mut found = HashMap::with_capacity(values.len());
                for value in values {
                    let id = value.object_id();
                    if requested.contains(id) && !found.contains_key(id) {
                        found.insert(id.clone(), Arc::new(value));
                    }
                }
                debug!(
                    requested = self.keys.len(),
                    found = found.len(),
                    "batch resolved"
                );
                Ok(Arc::new(found))
            }
            Err(err) => {
                warn!(keys = self.keys.len(), error = %err, "batch fetch failed");
                Err(LoaderError::fetch(err))
            }
        };
        self.settle(outcome);
    }

    fn settle(&mut self, outcome: Outcome<F::Value>) {
        self.settled = true;
        self.inner.settle(&self.batch, &self.keys, outcome);
    }
}

impl<F: BatchFetch> Drop for Dispatch<F> {
    fn drop(&mut self) {
        if !self.settled {
            warn!(keys = self.keys.len(), "batch dropped before settling");
            self.settle(Err(LoaderError::Dropped));
        }
    }
}

async fn resolve<V>(ticket: Ticket<V>) -> LoaderResult<Option<Arc<V>>> {
    match ticket {
        Ticket::Ready(value) => Ok(Some(value)),
        Ticket::Waiting { id, mut rx } => {
            let outcome = rx
                .wait_for(Option::is_some)
                .await
                .map_err(|_| LoaderError::Dropped)?
                .clone()
                .ok_or(LoaderError::Dropped)?;
            Ok(outcome?.get(&id).cloned())
        }
    }
}

//! Batched object loading for the Sui NFT SDK.
//!
//! [`BatchLoader`] turns many independent `load(id)` calls into as few
//! provider round trips as possible:
//!
//! 1. Keys requested within one scheduling turn are collected into a pending
//!    batch and fetched together, each distinct key once.
//! 2. A key whose batch is already in flight joins it rather than starting
//!    another fetch.
//! 3. Records that were found go into a bounded LRU cache. Absent keys are
//!    never cached, so an object the node has not indexed yet can show up on
//!    the next request.
//! 4. A failed fetch fails every key in that batch, and only that batch.

pub mod config;
pub mod error;
pub mod fetch;
pub mod loader;

pub use config::{LoaderConfig, DEFAULT_CACHE_CAPACITY};
pub use error::{LoaderError, LoaderResult};
pub use fetch::BatchFetch;
pub use loader::BatchLoader;

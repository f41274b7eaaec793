use std::sync::Arc;

use thiserror::Error;

/// Errors delivered to callers waiting on a batch.
///
/// A batch has many waiters and each receives its own copy of the outcome,
/// so the error is cheaply cloneable.
#[derive(Clone, Debug, Error)]
pub enum LoaderError {
    /// The batch fetch itself failed; every key in the batch sees this.
    #[error("batch fetch failed: {0}")]
    Fetch(Arc<dyn std::error::Error + Send + Sync>),

    /// The task driving the batch went away before it settled.
    #[error("batch was dropped before it settled")]
    Dropped,
}

impl LoaderError {
    pub fn fetch<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Fetch(Arc::new(err))
    }
}

pub type LoaderResult<T> = Result<T, LoaderError>;

//! Error classification for load operations.
//!
//! Every load outcome is one of three disjoint kinds: success, cancellation,
//! or failure. Cancellation is a sentinel — it suppresses state transitions
//! and must never land a loadable in `Failed`, whether the cancellation was
//! triggered externally or thrown from inside the load itself.

use thiserror::Error;

/// Error produced by a load operation.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The load was cancelled cooperatively.
    ///
    /// User code may return this from inside a load closure (the pagination
    /// adapter does, when asked for a next page that does not exist); it is
    /// indistinguishable from an externally-triggered cancellation.
    #[error("load cancelled")]
    Cancelled,

    /// The load failed with an ordinary error.
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

impl LoadError {
    /// Wrap an arbitrary error as a load failure.
    pub fn failure(err: impl Into<anyhow::Error>) -> Self {
        LoadError::Failed(err.into())
    }

    /// Whether this error represents cooperative cancellation.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, LoadError::Cancelled)
    }
}

//! Wire-level actions dispatched by load tasks.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::LoadError;

/// Opaque UI hint attached to completion actions at launch time.
///
/// The coordinator stores and forwards it; it never interprets the payload.
#[derive(Clone)]
pub struct LoadHint(Arc<dyn Any + Send + Sync>);

impl LoadHint {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

impl fmt::Debug for LoadHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LoadHint(..)")
    }
}

/// Actions a load task dispatches back into the reducer.
#[derive(Debug)]
pub enum LoadableAction<V> {
    /// The load finished. `Ok(None)` is a legitimate empty result. A
    /// cancellation error never appears here; it is delivered as
    /// [`LoadRequestCancelled`](LoadableAction::LoadRequestCancelled).
    LoadRequestCompleted {
        result: Result<Option<V>, LoadError>,
        hint: Option<LoadHint>,
    },

    /// The load was cancelled; state cleanup already happened when the
    /// cancellation was issued.
    LoadRequestCancelled,
}

impl<V> LoadableAction<V> {
    pub fn completed(result: Result<Option<V>, LoadError>) -> Self {
        LoadableAction::LoadRequestCompleted { result, hint: None }
    }
}

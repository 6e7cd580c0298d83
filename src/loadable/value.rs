//! The four-state lifecycle of an asynchronously loaded value.

/// Lifecycle state of a loadable value.
///
/// Tracks the load sequence: nothing fetched yet → load in flight → load
/// completed (or failed). A reload keeps the previously loaded value in
/// `Loading::prior` so callers can keep displaying it.
///
/// Only `Loaded::value` and `Loading::prior` carry data; `NotLoaded` and
/// `Failed` carry none. `ready_to_load` exists only in `NotLoaded` and
/// `is_stale` only in `Loaded` — together they form the
/// [`requires_loading`](LoadableValue::requires_loading) signal the
/// coordinator inspects after every reduce pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadableValue<V> {
    /// No load has completed. `ready_to_load` asks for a load to begin on
    /// the next pass; `false` is the resting state.
    NotLoaded { ready_to_load: bool },

    /// A load is in flight. `prior` preserves the previously loaded value
    /// during reloads.
    Loading { prior: Option<V> },

    /// A load completed. `value` is `None` when a successful load
    /// legitimately yielded no data. `is_stale` requests a reload without
    /// discarding the value.
    Loaded { value: Option<V>, is_stale: bool },

    /// The most recent load errored (never by cancellation). No error
    /// payload lives here; observers capture it from the completion action.
    Failed,
}

impl<V> Default for LoadableValue<V> {
    fn default() -> Self {
        LoadableValue::NotLoaded {
            ready_to_load: false,
        }
    }
}

impl<V> From<V> for LoadableValue<V> {
    fn from(value: V) -> Self {
        LoadableValue::Loaded {
            value: Some(value),
            is_stale: false,
        }
    }
}

impl<V> LoadableValue<V> {
    /// The value currently available for display: `Loaded::value`, or
    /// `Loading::prior` during a reload.
    pub fn current_value(&self) -> Option<&V> {
        match self {
            LoadableValue::Loaded { value: Some(v), .. } => Some(v),
            LoadableValue::Loading { prior: Some(v) } => Some(v),
            _ => None,
        }
    }

    pub fn current_value_mut(&mut self) -> Option<&mut V> {
        match self {
            LoadableValue::Loaded { value: Some(v), .. } => Some(v),
            LoadableValue::Loading { prior: Some(v) } => Some(v),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadableValue::Loading { .. })
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadableValue::Loaded { .. })
    }

    pub fn is_not_loaded(&self) -> bool {
        matches!(self, LoadableValue::NotLoaded { .. })
    }

    pub fn has_failed(&self) -> bool {
        matches!(self, LoadableValue::Failed)
    }

    /// A load is in flight and a previous value is still available.
    pub fn is_reloading(&self) -> bool {
        self.is_loading() && self.current_value().is_some()
    }

    /// A load is in flight with nothing to display meanwhile.
    pub fn is_performing_initial_load(&self) -> bool {
        self.is_loading() && self.current_value().is_none()
    }

    pub fn is_stale(&self) -> bool {
        matches!(
            self,
            LoadableValue::Loaded { is_stale: true, .. }
        )
    }

    pub fn is_ready_to_load(&self) -> bool {
        matches!(
            self,
            LoadableValue::NotLoaded { ready_to_load: true }
        )
    }

    /// The sole trigger the coordinator inspects to decide whether a
    /// state-driven load is due.
    pub fn requires_loading(&self) -> bool {
        self.is_stale() || self.is_ready_to_load()
    }

    /// Reset to the resting state, discarding any value.
    pub fn unload(&mut self) {
        *self = LoadableValue::NotLoaded {
            ready_to_load: false,
        };
    }

    /// Request a load, discarding any value. To refresh without discarding,
    /// use [`mark_as_stale`](LoadableValue::mark_as_stale).
    pub fn ready_to_load(&mut self) {
        *self = LoadableValue::NotLoaded {
            ready_to_load: true,
        };
    }

    /// Request a reload while keeping the current value available.
    ///
    /// In `Loaded` or `Loading` this keeps the current value and flags it
    /// stale (idempotent when already stale); otherwise it is equivalent to
    /// [`ready_to_load`](LoadableValue::ready_to_load).
    pub fn mark_as_stale(&mut self) {
        if self.is_loaded() || self.is_loading() {
            let current = self.take_current();
            *self = LoadableValue::Loaded {
                value: current,
                is_stale: true,
            };
        } else {
            *self = LoadableValue::NotLoaded {
                ready_to_load: true,
            };
        }
    }

    /// Enter the in-flight state, optionally keeping the current value as
    /// `prior`.
    pub fn loading(&mut self, with_current_value: bool) {
        let prior = if with_current_value {
            self.take_current()
        } else {
            None
        };
        *self = LoadableValue::Loading { prior };
    }

    /// Record a completed load.
    pub fn loaded(&mut self, value: Option<V>) {
        *self = LoadableValue::Loaded {
            value,
            is_stale: false,
        };
    }

    /// Record a failed load.
    pub fn failed(&mut self) {
        *self = LoadableValue::Failed;
    }

    fn take_current(&mut self) -> Option<V> {
        match self {
            LoadableValue::Loaded { value, .. } => value.take(),
            LoadableValue::Loading { prior } => prior.take(),
            _ => None,
        }
    }
}

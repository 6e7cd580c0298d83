//! Containers pairing the value accessor with the full lifecycle state.
//!
//! `Loadable` gives two views of the same slot: `value()` yields the
//! current value while `state()` yields the full union. `ObservedLoadable`
//! adds a notify-on-mutation registrar for UI layers, without hard-coding
//! any reactive framework.

use std::fmt;

use parking_lot::Mutex;

use super::value::LoadableValue;

/// A loadable slot with convenience accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loadable<V> {
    state: LoadableValue<V>,
}

impl<V> Default for Loadable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Loadable<V> {
    /// An empty slot, `NotLoaded` and not yet requesting a load.
    pub fn new() -> Self {
        Self {
            state: LoadableValue::default(),
        }
    }

    /// A slot initialized as already loaded.
    pub fn with_value(value: V) -> Self {
        Self {
            state: LoadableValue::from(value),
        }
    }

    /// The currently available value, if any.
    pub fn value(&self) -> Option<&V> {
        self.state.current_value()
    }

    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.state.current_value_mut()
    }

    /// Assign the inner value directly, forcing `Loaded` and clearing any
    /// stale flag.
    pub fn set_value(&mut self, value: V) {
        self.state = LoadableValue::from(value);
    }

    /// The full lifecycle state.
    pub fn state(&self) -> &LoadableValue<V> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut LoadableValue<V> {
        &mut self.state
    }
}

impl<V> From<V> for Loadable<V> {
    fn from(value: V) -> Self {
        Self::with_value(value)
    }
}

type Observer<V> = Box<dyn Fn(&LoadableValue<V>) + Send + Sync>;

/// A loadable slot that notifies registered observers on every mutation.
///
/// Mutations go through [`mutate`](ObservedLoadable::mutate) or
/// [`set_value`](ObservedLoadable::set_value); each runs every registered
/// observer with the post-mutation state.
pub struct ObservedLoadable<V> {
    state: LoadableValue<V>,
    observers: Mutex<Vec<Observer<V>>>,
}

impl<V> ObservedLoadable<V> {
    pub fn new() -> Self {
        Self {
            state: LoadableValue::default(),
            observers: Mutex::new(Vec::new()),
        }
    }

    pub fn with_value(value: V) -> Self {
        Self {
            state: LoadableValue::from(value),
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Register an observer invoked after every mutation of the state.
    pub fn on_change(&self, observer: impl Fn(&LoadableValue<V>) + Send + Sync + 'static) {
        self.observers.lock().push(Box::new(observer));
    }

    pub fn value(&self) -> Option<&V> {
        self.state.current_value()
    }

    pub fn state(&self) -> &LoadableValue<V> {
        &self.state
    }

    pub fn set_value(&mut self, value: V) {
        self.state = LoadableValue::from(value);
        self.notify();
    }

    /// Mutate the state through a closure, then notify observers.
    pub fn mutate(&mut self, f: impl FnOnce(&mut LoadableValue<V>)) {
        f(&mut self.state);
        self.notify();
    }

    fn notify(&self) {
        for observer in self.observers.lock().iter() {
            observer(&self.state);
        }
    }
}

impl<V> Default for ObservedLoadable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for ObservedLoadable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservedLoadable")
            .field("state", &self.state)
            .field("observers", &self.observers.lock().len())
            .finish()
    }
}

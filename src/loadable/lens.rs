//! First-class access paths into host state and actions.
//!
//! The coordinator never knows the shape of the surrounding state or action
//! types; it reaches its slice of them through a getter/setter pair (lens)
//! and an embed/extract pair (prism) supplied at construction.

use std::sync::Arc;

use super::action::LoadableAction;
use super::value::LoadableValue;

/// Getter/getter-mut pair projecting a [`LoadableValue`] out of host state.
pub struct StateLens<S, V> {
    read: Arc<dyn Fn(&S) -> &LoadableValue<V> + Send + Sync>,
    write: Arc<dyn Fn(&mut S) -> &mut LoadableValue<V> + Send + Sync>,
}

impl<S, V> StateLens<S, V> {
    pub fn new(
        read: impl Fn(&S) -> &LoadableValue<V> + Send + Sync + 'static,
        write: impl Fn(&mut S) -> &mut LoadableValue<V> + Send + Sync + 'static,
    ) -> Self {
        Self {
            read: Arc::new(read),
            write: Arc::new(write),
        }
    }

    pub fn get<'a>(&self, state: &'a S) -> &'a LoadableValue<V> {
        (self.read)(state)
    }

    pub fn get_mut<'a>(&self, state: &'a mut S) -> &'a mut LoadableValue<V> {
        (self.write)(state)
    }
}

impl<S, V> Clone for StateLens<S, V> {
    fn clone(&self) -> Self {
        Self {
            read: Arc::clone(&self.read),
            write: Arc::clone(&self.write),
        }
    }
}

/// Injective mapping between [`LoadableAction`] and the host action type.
pub struct ActionPrism<A, V> {
    embed: Arc<dyn Fn(LoadableAction<V>) -> A + Send + Sync>,
    extract: Arc<dyn Fn(&A) -> Option<&LoadableAction<V>> + Send + Sync>,
}

impl<A, V> ActionPrism<A, V> {
    pub fn new(
        embed: impl Fn(LoadableAction<V>) -> A + Send + Sync + 'static,
        extract: impl Fn(&A) -> Option<&LoadableAction<V>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            embed: Arc::new(embed),
            extract: Arc::new(extract),
        }
    }

    pub fn embed(&self, action: LoadableAction<V>) -> A {
        (self.embed)(action)
    }

    pub fn extract<'a>(&self, action: &'a A) -> Option<&'a LoadableAction<V>> {
        (self.extract)(action)
    }
}

impl<A, V> Clone for ActionPrism<A, V> {
    fn clone(&self) -> Self {
        Self {
            embed: Arc::clone(&self.embed),
            extract: Arc::clone(&self.extract),
        }
    }
}

//! Deferred work descriptions returned by reducers.

use std::borrow::Cow;
use std::fmt;
use std::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;

/// Stable identity of a cancellable task.
///
/// The in-flight task registry is keyed by this value; launching a new task
/// under an existing key aborts the previous one before the new one is
/// registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskKey(Cow<'static, str>);

impl TaskKey {
    pub fn new(key: impl Into<Cow<'static, str>>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TaskKey {
    fn from(key: &'static str) -> Self {
        Self(Cow::Borrowed(key))
    }
}

impl From<String> for TaskKey {
    fn from(key: String) -> Self {
        Self(Cow::Owned(key))
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A deferred description of work that eventually dispatches actions back
/// to the store.
pub enum Effect<A> {
    /// No follow-up work.
    None,

    /// Dispatch a follow-up action synchronously, within the current pass.
    Send(A),

    /// Run an async task producing one action. At most one task per key is
    /// in flight; scheduling replaces (and aborts) any prior task under the
    /// same key.
    Task {
        key: TaskKey,
        future: BoxFuture<'static, A>,
    },

    /// Abort the in-flight task registered under the key, if any.
    Cancel(TaskKey),

    /// Run effects in order.
    Batch(Vec<Effect<A>>),
}

impl<A> Effect<A> {
    pub fn none() -> Self {
        Effect::None
    }

    pub fn send(action: A) -> Self {
        Effect::Send(action)
    }

    pub fn task<F>(key: impl Into<TaskKey>, future: F) -> Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        Effect::Task {
            key: key.into(),
            future: future.boxed(),
        }
    }

    pub fn cancel(key: impl Into<TaskKey>) -> Self {
        Effect::Cancel(key.into())
    }

    pub fn batch(effects: Vec<Effect<A>>) -> Self {
        Effect::Batch(effects)
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Effect::None)
    }

    /// Combine two effects, preserving order and skipping no-ops.
    pub fn merge(self, other: Effect<A>) -> Self {
        match (self, other) {
            (Effect::None, other) => other,
            (this, Effect::None) => this,
            (Effect::Batch(mut effects), other) => {
                effects.push(other);
                Effect::Batch(effects)
            }
            (this, other) => Effect::Batch(vec![this, other]),
        }
    }
}

impl<A> fmt::Debug for Effect<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::None => f.write_str("None"),
            Effect::Send(_) => f.write_str("Send(..)"),
            Effect::Task { key, .. } => f.debug_struct("Task").field("key", key).finish_non_exhaustive(),
            Effect::Cancel(key) => f.debug_tuple("Cancel").field(key).finish(),
            Effect::Batch(effects) => f.debug_tuple("Batch").field(&effects.len()).finish(),
        }
    }
}

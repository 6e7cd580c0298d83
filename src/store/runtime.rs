//! Store runtime: serialized reduce passes plus a keyed task registry.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::effect::{Effect, TaskKey};
use super::reducer::Reducer;

/// Message sent from a spawned task back to the store.
///
/// Completions carry the generation assigned at spawn time so a completion
/// from a superseded task can be recognized and dropped.
enum TaskEvent<A> {
    Completed {
        key: TaskKey,
        generation: u64,
        action: A,
    },
    Faulted {
        key: TaskKey,
        generation: u64,
    },
}

struct RunningTask {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Owns state and a reducer; runs reduce passes serially and executes the
/// effects they return.
///
/// All state mutation happens inside [`Store::send`]. Spawned tasks run on
/// the tokio runtime and re-enter the store only through the completion
/// channel, so the reducer's view of state is serialized.
pub struct Store<R: Reducer> {
    state: R::State,
    reducer: R,
    tasks: HashMap<TaskKey, RunningTask>,
    next_generation: u64,
    event_tx: mpsc::UnboundedSender<TaskEvent<R::Action>>,
    event_rx: mpsc::UnboundedReceiver<TaskEvent<R::Action>>,
}

impl<R> Store<R>
where
    R: Reducer,
    R::Action: Send + 'static,
{
    pub fn new(state: R::State, reducer: R) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            state,
            reducer,
            tasks: HashMap::new(),
            next_generation: 0,
            event_tx,
            event_rx,
        }
    }

    pub fn state(&self) -> &R::State {
        &self.state
    }

    /// Whether a task is registered under the key.
    pub fn has_in_flight(&self, key: &TaskKey) -> bool {
        self.tasks.contains_key(key)
    }

    /// Whether any task is in flight.
    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run one full reduce pass: apply the action, then execute the
    /// returned effect (including any synchronous follow-up actions).
    pub fn send(&mut self, action: R::Action) {
        let effect = self.reducer.reduce(&mut self.state, action);
        self.apply(effect);
    }

    /// Drive the store until no task is in flight, feeding completions
    /// back through the reducer as they arrive.
    pub async fn settle(&mut self) {
        while !self.tasks.is_empty() {
            let Some(event) = self.event_rx.recv().await else {
                break;
            };
            self.deliver(event);
        }
    }

    /// Abort the task registered under the key, if any.
    ///
    /// The entry is removed synchronously; an aborted task never delivers
    /// its completion.
    pub fn cancel(&mut self, key: &TaskKey) {
        if let Some(task) = self.tasks.remove(key) {
            task.handle.abort();
            tracing::debug!(key = %key, generation = task.generation, "task cancelled");
        }
    }

    fn apply(&mut self, effect: Effect<R::Action>) {
        match effect {
            Effect::None => {}
            Effect::Send(action) => self.send(action),
            Effect::Task { key, future } => self.spawn(key, future),
            Effect::Cancel(key) => self.cancel(&key),
            Effect::Batch(effects) => {
                for effect in effects {
                    self.apply(effect);
                }
            }
        }
    }

    fn spawn(&mut self, key: TaskKey, future: futures::future::BoxFuture<'static, R::Action>) {
        // Replace-by-key: the previous task must be gone before the new one
        // is registered, and registration must complete before the new task
        // can deliver anything.
        self.cancel(&key);

        self.next_generation += 1;
        let generation = self.next_generation;
        let event_tx = self.event_tx.clone();
        let event_key = key.clone();
        let handle = tokio::spawn(async move {
            match AssertUnwindSafe(future).catch_unwind().await {
                Ok(action) => {
                    let _ = event_tx.send(TaskEvent::Completed {
                        key: event_key,
                        generation,
                        action,
                    });
                }
                Err(_) => {
                    let _ = event_tx.send(TaskEvent::Faulted {
                        key: event_key,
                        generation,
                    });
                }
            }
        });

        tracing::debug!(key = %key, generation, "task started");
        self.tasks.insert(key, RunningTask { generation, handle });
    }

    fn deliver(&mut self, event: TaskEvent<R::Action>) {
        match event {
            TaskEvent::Completed {
                key,
                generation,
                action,
            } => {
                let current = self.tasks.get(&key).map(|t| t.generation);
                if current == Some(generation) {
                    self.tasks.remove(&key);
                    self.send(action);
                } else {
                    // Superseded or cancelled after completing: the
                    // task-identity token no longer matches, drop it.
                    tracing::debug!(key = %key, generation, "dropping completion from superseded task");
                }
            }
            TaskEvent::Faulted { key, generation } => {
                if self.tasks.get(&key).map(|t| t.generation) == Some(generation) {
                    self.tasks.remove(&key);
                    tracing::error!(key = %key, generation, "task panicked; no completion delivered");
                }
            }
        }
    }
}

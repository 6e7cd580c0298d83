//! Higher-order reducer that drives loads.
//!
//! Wraps any inner reducer. On every pass it applies loadable completion
//! actions, runs the inner reducer, then re-inspects state: a loadable that
//! requires loading (or a configured trigger action) launches a new load
//! task, cancelling any task already in flight for the same loadable; an
//! inner reducer that resets a loading slot gets the in-flight task
//! cancelled and a cancellation action dispatched in its place.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::LoadError;
use crate::store::{Effect, Reducer, TaskKey};

use super::action::{LoadHint, LoadableAction};
use super::lens::{ActionPrism, StateLens};
use super::value::LoadableValue;

pub(crate) type LoadFn<S, V> =
    Arc<dyn Fn(S) -> BoxFuture<'static, Result<Option<V>, LoadError>> + Send + Sync>;
pub(crate) type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Higher-order reducer coordinating one loadable slot.
///
/// At most one load task per loadable is in flight; launching a new one
/// cancels the previous. The load closure receives a by-value snapshot of
/// the surrounding state taken at launch time.
pub struct LoadableReducer<Inner, V>
where
    Inner: Reducer,
{
    inner: Inner,
    lens: StateLens<Inner::State, V>,
    prism: ActionPrism<Inner::Action, V>,
    key: TaskKey,
    trigger: Predicate<Inner::Action>,
    guard: Predicate<Inner::State>,
    hint: Option<LoadHint>,
    load: LoadFn<Inner::State, V>,
}

impl<Inner, V> LoadableReducer<Inner, V>
where
    Inner: Reducer,
    Inner::State: Clone + Send + 'static,
    Inner::Action: Send + 'static,
    V: Clone + Send + 'static,
{
    pub fn new<F, Fut>(
        inner: Inner,
        lens: StateLens<Inner::State, V>,
        prism: ActionPrism<Inner::Action, V>,
        key: impl Into<TaskKey>,
        load: F,
    ) -> Self
    where
        F: Fn(Inner::State) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<V>, LoadError>> + Send + 'static,
    {
        Self::from_parts(inner, lens, prism, key, Arc::new(move |state| load(state).boxed()))
    }

    pub(crate) fn from_parts(
        inner: Inner,
        lens: StateLens<Inner::State, V>,
        prism: ActionPrism<Inner::Action, V>,
        key: impl Into<TaskKey>,
        load: LoadFn<Inner::State, V>,
    ) -> Self {
        Self {
            inner,
            lens,
            prism,
            key: key.into(),
            trigger: Arc::new(|_| false),
            guard: Arc::new(|_| true),
            hint: None,
            load,
        }
    }

    /// Actions that force a load regardless of the loadable's state.
    pub fn performs_load_on(
        mut self,
        trigger: impl Fn(&Inner::Action) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.trigger = Arc::new(trigger);
        self
    }

    /// Precondition consulted before any task is launched. When it returns
    /// false the launch is silent: no task, no state mutation, no action.
    pub fn guard(mut self, guard: impl Fn(&Inner::State) -> bool + Send + Sync + 'static) -> Self {
        self.guard = Arc::new(guard);
        self
    }

    /// Opaque UI hint forwarded on completion actions.
    pub fn hint(mut self, hint: LoadHint) -> Self {
        self.hint = Some(hint);
        self
    }

    pub(crate) fn set_load(&mut self, load: LoadFn<Inner::State, V>) {
        self.load = load;
    }

    pub(crate) fn set_guard(&mut self, guard: Predicate<Inner::State>) {
        self.guard = guard;
    }

    fn apply_loadable_action(&self, state: &mut Inner::State, action: &LoadableAction<V>) {
        match action {
            LoadableAction::LoadRequestCompleted { result, .. } => match result {
                Ok(value) => self.lens.get_mut(state).loaded(value.clone()),
                Err(err) if err.is_cancellation() => {}
                Err(_) => self.lens.get_mut(state).failed(),
            },
            // Cleanup happened when the cancellation was issued.
            LoadableAction::LoadRequestCancelled => {}
        }
    }

    /// Launch a new load task, guard permitting. Sets the slot to
    /// `Loading { current }` synchronously so the launch is visible within
    /// this pass.
    fn launch(&self, state: &mut Inner::State) -> Effect<Inner::Action> {
        if !(self.guard)(state) {
            tracing::trace!(key = %self.key, "load skipped by guard");
            return Effect::none();
        }

        self.lens.get_mut(state).loading(true);
        let snapshot = state.clone();
        let load = Arc::clone(&self.load);
        let prism = self.prism.clone();
        let hint = self.hint.clone();

        tracing::debug!(key = %self.key, "launching load");
        Effect::task(self.key.clone(), async move {
            match load(snapshot).await {
                Err(err) if err.is_cancellation() => {
                    prism.embed(LoadableAction::LoadRequestCancelled)
                }
                result => prism.embed(LoadableAction::LoadRequestCompleted { result, hint }),
            }
        })
    }
}

impl<Inner, V> Reducer for LoadableReducer<Inner, V>
where
    Inner: Reducer,
    Inner::State: Clone + Send + 'static,
    Inner::Action: Send + 'static,
    V: Clone + Send + 'static,
{
    type State = Inner::State;
    type Action = Inner::Action;

    fn reduce(&self, state: &mut Self::State, action: Self::Action) -> Effect<Self::Action> {
        // 1. Apply loadable completion transitions before anything else.
        if let Some(loadable_action) = self.prism.extract(&action) {
            self.apply_loadable_action(state, loadable_action);
        }

        let triggered = (self.trigger)(&action);

        // 2. Remember whether a load was in flight going into the inner
        //    reducer; a reset from Loading back to the resting state is how
        //    the inner reducer requests cancellation.
        let was_loading = self.lens.get(state).is_loading();

        // 3. The inner reducer sees every action, completions included.
        let inner_effect = self.inner.reduce(state, action);

        // 4. Re-inspect and decide.
        let load_effect = if self.lens.get(state).requires_loading() || triggered {
            self.launch(state)
        } else if was_loading
            && matches!(
                self.lens.get(state),
                LoadableValue::NotLoaded {
                    ready_to_load: false
                }
            )
        {
            tracing::debug!(key = %self.key, "load reset by inner reducer; cancelling in-flight task");
            Effect::cancel(self.key.clone()).merge(Effect::send(
                self.prism.embed(LoadableAction::LoadRequestCancelled),
            ))
        } else {
            Effect::none()
        };

        // 5. Inner effects first, then the load decision.
        inner_effect.merge(load_effect)
    }
}

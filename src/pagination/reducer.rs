//! Loadable reducer adapter for paginated collections.
//!
//! Supplies the load closure: a fresh collection is built from the first
//! page, and after that the loading mode decides whether the next page is
//! appended, a fresh first page is merged in at the front, or the aggregate
//! is rebuilt. Asking for the next page when none exists is a cancellation,
//! and the guard is augmented so that case never launches at all.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::LoadError;
use crate::loadable::{ActionPrism, LoadHint, LoadableReducer, StateLens};
use crate::loadable::{LoadFn, Predicate};
use crate::store::{Effect, Reducer, TaskKey};

use super::collection::{LoadingMode, PaginatedCollection};
use super::slice::PageSlice;

type FirstPageFn<P> = Arc<dyn Fn() -> P + Send + Sync>;
type ModeFn<S> = Arc<dyn Fn(&S) -> LoadingMode + Send + Sync>;
type LoadPageFn<S, T, P> =
    Arc<dyn Fn(P, S) -> BoxFuture<'static, Result<PageSlice<T, P>, LoadError>> + Send + Sync>;

/// [`LoadableReducer`] whose load closure walks a paginated collection.
///
/// `first_page` is nullary so the first page may be time-dependent. The
/// loading mode is read from state at launch time, default `UpsertNext`.
pub struct PaginatedLoadableReducer<Inner, C>
where
    Inner: Reducer,
    C: PaginatedCollection,
{
    core: LoadableReducer<Inner, C>,
    lens: StateLens<Inner::State, C>,
    first_page: FirstPageFn<C::PageKey>,
    load_page: LoadPageFn<Inner::State, C::Value, C::PageKey>,
    mode: ModeFn<Inner::State>,
    user_guard: Predicate<Inner::State>,
}

impl<Inner, C> PaginatedLoadableReducer<Inner, C>
where
    Inner: Reducer,
    Inner::State: Clone + Send + 'static,
    Inner::Action: Send + 'static,
    C: PaginatedCollection + Send + 'static,
    C::PageKey: Send + 'static,
    C::Value: Send + 'static,
{
    pub fn new<FP, LP, Fut>(
        inner: Inner,
        lens: StateLens<Inner::State, C>,
        prism: ActionPrism<Inner::Action, C>,
        key: impl Into<TaskKey>,
        first_page: FP,
        load_page: LP,
    ) -> Self
    where
        FP: Fn() -> C::PageKey + Send + Sync + 'static,
        LP: Fn(C::PageKey, Inner::State) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<PageSlice<C::Value, C::PageKey>, LoadError>> + Send + 'static,
    {
        let first_page: FirstPageFn<C::PageKey> = Arc::new(first_page);
        let load_page: LoadPageFn<Inner::State, C::Value, C::PageKey> =
            Arc::new(move |page, state| load_page(page, state).boxed());
        let mode: ModeFn<Inner::State> = Arc::new(|_| LoadingMode::default());
        let user_guard: Predicate<Inner::State> = Arc::new(|_| true);

        let load = build_load(
            lens.clone(),
            Arc::clone(&first_page),
            Arc::clone(&load_page),
            Arc::clone(&mode),
        );
        let guard = build_guard(lens.clone(), Arc::clone(&mode), Arc::clone(&user_guard));

        let mut core = LoadableReducer::from_parts(inner, lens.clone(), prism, key, load);
        core.set_guard(guard);

        Self {
            core,
            lens,
            first_page,
            load_page,
            mode,
            user_guard,
        }
    }

    /// Merge mode derived from state at launch time.
    pub fn mode(
        mut self,
        mode: impl Fn(&Inner::State) -> LoadingMode + Send + Sync + 'static,
    ) -> Self {
        self.mode = Arc::new(mode);
        self.rebuild();
        self
    }

    /// User guard, composed by conjunction with the no-next-page check.
    pub fn guard(mut self, guard: impl Fn(&Inner::State) -> bool + Send + Sync + 'static) -> Self {
        self.user_guard = Arc::new(guard);
        self.rebuild();
        self
    }

    /// Actions that force a load regardless of the loadable's state.
    pub fn performs_load_on(
        mut self,
        trigger: impl Fn(&Inner::Action) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.core = self.core.performs_load_on(trigger);
        self
    }

    /// Opaque UI hint forwarded on completion actions.
    pub fn hint(mut self, hint: LoadHint) -> Self {
        self.core = self.core.hint(hint);
        self
    }

    fn rebuild(&mut self) {
        self.core.set_load(build_load(
            self.lens.clone(),
            Arc::clone(&self.first_page),
            Arc::clone(&self.load_page),
            Arc::clone(&self.mode),
        ));
        self.core.set_guard(build_guard(
            self.lens.clone(),
            Arc::clone(&self.mode),
            Arc::clone(&self.user_guard),
        ));
    }
}

impl<Inner, C> Reducer for PaginatedLoadableReducer<Inner, C>
where
    Inner: Reducer,
    Inner::State: Clone + Send + 'static,
    Inner::Action: Send + 'static,
    C: PaginatedCollection + Send + 'static,
    C::PageKey: Send + 'static,
    C::Value: Send + 'static,
{
    type State = Inner::State;
    type Action = Inner::Action;

    fn reduce(&self, state: &mut Self::State, action: Self::Action) -> Effect<Self::Action> {
        self.core.reduce(state, action)
    }
}

fn build_load<S, C>(
    lens: StateLens<S, C>,
    first_page: FirstPageFn<C::PageKey>,
    load_page: LoadPageFn<S, C::Value, C::PageKey>,
    mode: ModeFn<S>,
) -> LoadFn<S, C>
where
    S: Send + 'static,
    C: PaginatedCollection + Send + 'static,
    C::PageKey: Send + 'static,
    C::Value: Send + 'static,
{
    Arc::new(move |state: S| {
        let mode = (mode)(&state);
        let current: Option<C> = lens.get(&state).current_value().cloned();
        let first_page = Arc::clone(&first_page);
        let load_page = Arc::clone(&load_page);
        async move {
            match current {
                None => {
                    let slice = load_page((first_page)(), state).await?;
                    Ok(Some(C::from_initial(slice)))
                }
                Some(current) => match mode {
                    LoadingMode::UpsertNext => {
                        // No next page: nothing to fetch, surface as a
                        // cancellation rather than a failure.
                        let Some(next) = current.next_page().cloned() else {
                            return Err(LoadError::Cancelled);
                        };
                        let slice = load_page(next, state).await?;
                        Ok(Some(current.upsert_appending(slice)))
                    }
                    LoadingMode::UpsertFirst => {
                        let slice = load_page((first_page)(), state).await?;
                        Ok(Some(current.upsert_prepending(slice)))
                    }
                    LoadingMode::Reload => {
                        let slice = load_page((first_page)(), state).await?;
                        Ok(Some(C::from_initial(slice)))
                    }
                },
            }
        }
        .boxed()
    })
}

fn build_guard<S, C>(
    lens: StateLens<S, C>,
    mode: ModeFn<S>,
    user_guard: Predicate<S>,
) -> Predicate<S>
where
    C: PaginatedCollection + 'static,
    S: 'static,
{
    Arc::new(move |state: &S| {
        if !(user_guard)(state) {
            return false;
        }
        // Appending past the end is a silent no-op; don't even launch.
        if (mode)(state) == LoadingMode::UpsertNext {
            if let Some(current) = lens.get(state).current_value() {
                return current.has_next_page();
            }
        }
        true
    })
}

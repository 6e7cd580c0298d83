//! Opinionated preset for paginated list UIs.
//!
//! Bundles a loadable identified collection with the current merge mode and
//! the actions a list screen dispatches: first appearance, retry,
//! pull-to-refresh, end-of-page, plus in-place removal and update of rows.

use std::future::Future;
use std::marker::PhantomData;

use crate::error::LoadError;
use crate::loadable::{ActionPrism, LoadHint, LoadableAction, LoadableValue, StateLens};
use crate::store::{Effect, Reducer, TaskKey};

use super::collection::LoadingMode;
use super::identified::{Identifiable, IdentifiedPaginatedCollection};
use super::reducer::PaginatedLoadableReducer;
use super::slice::PageSlice;

/// State for a paginated list screen.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedListState<T: Identifiable, P> {
    pub items: LoadableValue<IdentifiedPaginatedCollection<T, P>>,
    pub mode: LoadingMode,
}

impl<T: Identifiable, P> Default for PaginatedListState<T, P> {
    fn default() -> Self {
        Self {
            items: LoadableValue::default(),
            mode: LoadingMode::default(),
        }
    }
}

/// Actions a paginated list screen dispatches.
#[derive(Debug)]
pub enum PaginatedListAction<T: Identifiable, P> {
    /// The list became visible for the first time; load from scratch.
    FirstAppeared,

    /// Retry after a failure; same behavior as first appearance.
    Retry,

    /// Refresh from the top, keeping the current rows visible meanwhile.
    PullToRefresh,

    /// The user scrolled to the end; fetch the next page. A no-op when the
    /// collection is exhausted.
    ReachedEnd,

    /// Remove rows in place. Load state is untouched.
    Removed { ids: Vec<T::Id> },

    /// Replace a row in place, keyed by id. Load state is untouched.
    Updated(T),

    /// Embedded load lifecycle actions.
    Load(LoadableAction<IdentifiedPaginatedCollection<T, P>>),
}

/// Pure handler for the list actions; the load machinery wraps it.
struct ListCore<T, P> {
    _marker: PhantomData<fn() -> (T, P)>,
}

impl<T, P> Default for ListCore<T, P> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T, P> Reducer for ListCore<T, P>
where
    T: Identifiable + Clone,
    P: Clone,
{
    type State = PaginatedListState<T, P>;
    type Action = PaginatedListAction<T, P>;

    fn reduce(&self, state: &mut Self::State, action: Self::Action) -> Effect<Self::Action> {
        match action {
            PaginatedListAction::FirstAppeared | PaginatedListAction::Retry => {
                state.mode = LoadingMode::Reload;
                state.items.ready_to_load();
            }
            PaginatedListAction::PullToRefresh => {
                state.mode = LoadingMode::Reload;
                state.items.mark_as_stale();
            }
            PaginatedListAction::ReachedEnd => {
                state.mode = LoadingMode::UpsertNext;
                state.items.mark_as_stale();
            }
            PaginatedListAction::Removed { ids } => {
                if let Some(items) = state.items.current_value_mut() {
                    items.remove_ids(&ids);
                }
            }
            PaginatedListAction::Updated(value) => {
                if let Some(items) = state.items.current_value_mut() {
                    items.update(value);
                }
            }
            PaginatedListAction::Load(_) => {}
        }
        Effect::none()
    }
}

/// Ready-made reducer for a paginated list screen.
///
/// Every trigger works through the loadable state itself (ready-to-load or
/// stale), so the coordinator picks the launch up in the same pass; a
/// trigger arriving while a load is in flight cancels and relaunches.
pub struct PaginatedListReducer<T: Identifiable + Clone, P: Clone> {
    core: PaginatedLoadableReducer<ListCore<T, P>, IdentifiedPaginatedCollection<T, P>>,
}

impl<T, P> PaginatedListReducer<T, P>
where
    T: Identifiable + Clone + Send + 'static,
    P: Clone + Send + 'static,
{
    pub fn new<FP, LP, Fut>(key: impl Into<TaskKey>, first_page: FP, load_page: LP) -> Self
    where
        FP: Fn() -> P + Send + Sync + 'static,
        LP: Fn(P, PaginatedListState<T, P>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<PageSlice<T, P>, LoadError>> + Send + 'static,
    {
        let lens = StateLens::new(items_of, items_of_mut);
        let prism = ActionPrism::new(PaginatedListAction::Load, load_of);
        let core = PaginatedLoadableReducer::new(
            ListCore::default(),
            lens,
            prism,
            key,
            first_page,
            load_page,
        )
        .mode(|state: &PaginatedListState<T, P>| state.mode);
        Self { core }
    }

    /// Extra precondition on top of the built-in next-page check.
    pub fn guard(
        self,
        guard: impl Fn(&PaginatedListState<T, P>) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            core: self.core.guard(guard),
        }
    }

    /// Opaque UI hint forwarded on completion actions.
    pub fn hint(self, hint: LoadHint) -> Self {
        Self {
            core: self.core.hint(hint),
        }
    }
}

impl<T, P> Reducer for PaginatedListReducer<T, P>
where
    T: Identifiable + Clone + Send + 'static,
    P: Clone + Send + 'static,
{
    type State = PaginatedListState<T, P>;
    type Action = PaginatedListAction<T, P>;

    fn reduce(&self, state: &mut Self::State, action: Self::Action) -> Effect<Self::Action> {
        self.core.reduce(state, action)
    }
}

fn items_of<T: Identifiable, P>(
    state: &PaginatedListState<T, P>,
) -> &LoadableValue<IdentifiedPaginatedCollection<T, P>> {
    &state.items
}

fn items_of_mut<T: Identifiable, P>(
    state: &mut PaginatedListState<T, P>,
) -> &mut LoadableValue<IdentifiedPaginatedCollection<T, P>> {
    &mut state.items
}

fn load_of<T: Identifiable, P>(
    action: &PaginatedListAction<T, P>,
) -> Option<&LoadableAction<IdentifiedPaginatedCollection<T, P>>> {
    match action {
        PaginatedListAction::Load(action) => Some(action),
        _ => None,
    }
}

//! Loadable-state coordination for reducer-driven applications.
//!
//! Models the lifecycle of data that must be fetched asynchronously inside
//! a unidirectional-dataflow application: a four-state machine per loadable
//! value, a higher-order reducer that launches and cancels load tasks, and
//! a pagination overlay that aggregates page responses into a growing,
//! deduplicated collection.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ LoadableReducer ──→ inner Reducer ──→ State
//!               │    ↑                               │
//!               │    └── completion actions          │ requires_loading?
//!               └──────── load task (cancellable) ←──┘
//! ```
//!
//! - **[`LoadableValue`]**: `NotLoaded` / `Loading` / `Loaded` / `Failed`,
//!   preserving prior values across reloads
//! - **[`LoadableReducer`]**: wraps any reducer; inspects state after every
//!   action and keeps at most one load task in flight per loadable
//! - **[`PaginatedLoadableReducer`] / [`PaginatedListReducer`]**: merge page
//!   responses by appending, prepending, or replacing
//!
//! Cancellation is cooperative and never surfaces as a failure: a load that
//! returns [`LoadError::Cancelled`] — or is cancelled from outside — leaves
//! the `Failed` state untouched.

pub mod error;
pub mod loadable;
pub mod pagination;
pub mod store;

pub use error::LoadError;
pub use loadable::{
    ActionPrism, LoadHint, Loadable, LoadableAction, LoadableReducer, LoadableValue,
    ObservedLoadable, StateLens,
};
pub use pagination::{
    Identifiable, IdentifiedPaginatedCollection, LoadingMode, NumberedPage, OffsetPage,
    PageSlice, PaginatedCollection, PaginatedListAction, PaginatedListReducer,
    PaginatedListState, PaginatedLoadableReducer, TimestampedPage, DEFAULT_PAGE_SIZE,
};
pub use store::{Effect, Reducer, Store, TaskKey};

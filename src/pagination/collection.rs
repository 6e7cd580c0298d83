//! Capability contract for page-aggregating collections.

use serde::{Deserialize, Serialize};

use super::slice::PageSlice;

/// How the next page response is merged into the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadingMode {
    /// Append the next page after the existing values.
    #[default]
    UpsertNext,
    /// Merge a fresh first page in at the front, keeping what is already
    /// loaded.
    UpsertFirst,
    /// Discard the aggregate and rebuild from the first page.
    Reload,
}

/// A collection that aggregates a stream of page responses.
///
/// Dispatch is by capability: [`IdentifiedPaginatedCollection`] is one
/// instance, and user-defined aggregates (say, search results with extra
/// metadata) are equally valid.
///
/// [`IdentifiedPaginatedCollection`]: super::IdentifiedPaginatedCollection
pub trait PaginatedCollection: Clone {
    type Value;
    type PageKey: Clone;

    /// Build the aggregate from its first page.
    fn from_initial(slice: PageSlice<Self::Value, Self::PageKey>) -> Self;

    /// Merge a page in at the back. Values whose identity is already
    /// present are updated in place; new values are appended in slice
    /// order. Page bookkeeping is taken from the slice.
    fn upsert_appending(&self, slice: PageSlice<Self::Value, Self::PageKey>) -> Self;

    /// Merge a page in at the front. Values whose identity is already
    /// present are updated in place; new values are inserted in slice
    /// order. The existing `next_page` is preserved, never overwritten by
    /// the slice.
    fn upsert_prepending(&self, slice: PageSlice<Self::Value, Self::PageKey>) -> Self;

    /// The page the most recent slice corresponded to.
    fn last_page(&self) -> &Self::PageKey;

    /// Where the next load should continue, if anywhere.
    fn next_page(&self) -> Option<&Self::PageKey>;

    fn has_next_page(&self) -> bool {
        self.next_page().is_some()
    }

    /// The aggregated values, in order.
    fn values(&self) -> impl Iterator<Item = &Self::Value>;
}

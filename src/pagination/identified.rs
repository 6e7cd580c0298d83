//! Default paginated collection keyed on value identity.

use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;

use super::collection::PaginatedCollection;
use super::slice::PageSlice;

/// A value with a stable identity.
pub trait Identifiable {
    type Id: Hash + Eq + Clone + fmt::Debug + Send + 'static;

    fn id(&self) -> Self::Id;
}

/// Insertion-ordered collection of identified values plus page bookkeeping.
///
/// Upserts are keyed by [`Identifiable::id`]: a value whose id is already
/// present replaces the stored value without moving it; new ids are
/// inserted at the position the merge direction dictates.
#[derive(Clone)]
pub struct IdentifiedPaginatedCollection<T: Identifiable, P> {
    entries: IndexMap<T::Id, T>,
    last_page: P,
    next_page: Option<P>,
}

impl<T, P> IdentifiedPaginatedCollection<T, P>
where
    T: Identifiable,
{
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.entries.contains_key(id)
    }

    /// The stored ids, in order.
    pub fn ids(&self) -> impl Iterator<Item = &T::Id> {
        self.entries.keys()
    }

    /// Remove the given ids, preserving the order of the remainder. Ids not
    /// present are ignored.
    pub fn remove_ids(&mut self, ids: &[T::Id]) {
        for id in ids {
            self.entries.shift_remove(id);
        }
    }

    /// Replace the stored value with a matching id in place. Returns false
    /// (and stores nothing) when the id is not present.
    pub fn update(&mut self, value: T) -> bool {
        match self.entries.get_mut(&value.id()) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

impl<T, P> PaginatedCollection for IdentifiedPaginatedCollection<T, P>
where
    T: Identifiable + Clone,
    P: Clone,
{
    type Value = T;
    type PageKey = P;

    fn from_initial(slice: PageSlice<T, P>) -> Self {
        let mut entries = IndexMap::with_capacity(slice.values.len());
        for value in slice.values {
            entries.insert(value.id(), value);
        }
        Self {
            entries,
            last_page: slice.page,
            next_page: slice.next_page,
        }
    }

    fn upsert_appending(&self, slice: PageSlice<T, P>) -> Self {
        let mut entries = self.entries.clone();
        // IndexMap::insert updates in place for known keys and appends
        // unknown ones, which is exactly the append-upsert contract.
        for value in slice.values {
            entries.insert(value.id(), value);
        }
        Self {
            entries,
            last_page: slice.page,
            next_page: slice.next_page,
        }
    }

    fn upsert_prepending(&self, slice: PageSlice<T, P>) -> Self {
        let mut entries = self.entries.clone();
        // Walk the slice with an insertion cursor anchored at the front:
        // known ids update in place and pull the cursor behind themselves,
        // unknown ids are inserted at the cursor. An all-new slice lands as
        // a plain prepend in slice order.
        let mut cursor = 0;
        for value in slice.values {
            let id = value.id();
            match entries.get_index_of(&id) {
                Some(index) => {
                    entries.insert(id, value);
                    cursor = index + 1;
                }
                None => {
                    entries.shift_insert(cursor, id, value);
                    cursor += 1;
                }
            }
        }
        // The slice described a backfill of the front; the deepest page
        // walked so far is unchanged.
        Self {
            entries,
            last_page: self.last_page.clone(),
            next_page: self.next_page.clone(),
        }
    }

    fn last_page(&self) -> &P {
        &self.last_page
    }

    fn next_page(&self) -> Option<&P> {
        self.next_page.as_ref()
    }

    fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }
}

/// Equality is the ordered id sequence, each corresponding value, and the
/// page bookkeeping. `IndexMap`'s own equality ignores order, which is not
/// what an aggregated page stream means.
impl<T, P> PartialEq for IdentifiedPaginatedCollection<T, P>
where
    T: Identifiable + PartialEq,
    P: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.last_page == other.last_page
            && self.next_page == other.next_page
            && self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|((id_a, a), (id_b, b))| id_a == id_b && a == b)
    }
}

impl<T, P> fmt::Debug for IdentifiedPaginatedCollection<T, P>
where
    T: Identifiable + fmt::Debug,
    P: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentifiedPaginatedCollection")
            .field("entries", &self.entries)
            .field("last_page", &self.last_page)
            .field("next_page", &self.next_page)
            .finish()
    }
}

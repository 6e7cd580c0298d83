//! The response of a single page request.

use serde::{Deserialize, Serialize};

/// One page of results: the values, the page they correspond to, and a
/// pointer to the next page if any.
///
/// Every page load operation produces this; it is the only network-facing
/// contract the coordinator knows about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSlice<V, P> {
    pub values: Vec<V>,
    pub page: P,
    pub next_page: Option<P>,
}

impl<V, P> PageSlice<V, P> {
    pub fn new(values: Vec<V>, page: P, next_page: Option<P>) -> Self {
        Self {
            values,
            page,
            next_page,
        }
    }

    pub fn is_last(&self) -> bool {
        self.next_page.is_none()
    }
}

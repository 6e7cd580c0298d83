//! Concrete page keys.
//!
//! The coordinator never interprets these fields; it stores them and hands
//! them back to the page loader.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Page size used when a numbered page is built from a bare page number.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// 1-based page index with a page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NumberedPage {
    pub number: u32,
    pub size: u32,
}

impl NumberedPage {
    pub fn new(number: u32, size: u32) -> Self {
        Self { number, size }
    }

    /// The page following this one, same size.
    pub fn next(&self) -> Self {
        Self {
            number: self.number + 1,
            size: self.size,
        }
    }
}

impl From<u32> for NumberedPage {
    fn from(number: u32) -> Self {
        Self {
            number,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Index into a flat record space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OffsetPage {
    pub limit: u32,
    pub offset: u32,
}

impl OffsetPage {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }

    /// The window immediately after this one.
    pub fn next(&self) -> Self {
        Self {
            limit: self.limit,
            offset: self.offset + self.limit,
        }
    }
}

/// Window of records extending backward from `end_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimestampedPage {
    pub end_date: DateTime<Utc>,
    pub size: u32,
}

impl TimestampedPage {
    pub fn new(end_date: DateTime<Utc>, size: u32) -> Self {
        Self { end_date, size }
    }

    /// A window ending at the current instant. First pages are produced by
    /// a nullary closure precisely so they can be time-dependent.
    pub fn ending_now(size: u32) -> Self {
        Self {
            end_date: Utc::now(),
            size,
        }
    }
}

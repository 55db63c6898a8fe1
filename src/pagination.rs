//! Keyset pagination shared by every list endpoint.
//!
//! Lists are ordered newest first (`id DESC`). A cursor is the id of the last
//! item the client has seen; the next page holds rows with `id < cursor`.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub cursor: Option<i64>,
    pub limit: i64,
}

impl PageRequest {
    pub fn new(cursor: Option<i64>, limit: i64) -> Self {
        Self { cursor, limit }
    }

    /// Whether a row with this id belongs after the cursor.
    pub fn admits(&self, id: i64) -> bool {
        self.cursor.map_or(true, |cursor| id < cursor)
    }

    pub fn limit_usize(&self) -> usize {
        usize::try_from(self.limit).unwrap_or(0)
    }
}

/// One page of results plus the cursor for the next request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub cursor: Option<i64>,
}

impl<T> Page<T> {
    /// The cursor is the id of the last returned item, or `None` when the
    /// page is empty. A short page still yields a cursor.
    pub fn from_items(items: Vec<T>, id_of: impl Fn(&T) -> i64) -> Self {
        let cursor = items.last().map(&id_of);
        Self { items, cursor }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            cursor: self.cursor,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::pagination::PageRequest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct News {
    pub id: i64,
    pub school_id: i64,
    /// Owner of the school at creation time.
    pub user_id: i64,
    pub title: String,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
    /// Set on soft delete. Rows with a value are invisible to every read.
    pub delete_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNews {
    pub school_id: i64,
    pub user_id: i64,
    pub title: String,
}

/// Filters for a news page. `None` means "do not filter on this column".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListNewsParams {
    pub user_id: Option<i64>,
    pub school_id: Option<i64>,
    pub page: PageRequest,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::pagination::PageRequest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Subscription {
    pub id: i64,
    pub user_id: i64,
    pub school_id: i64,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

/// A subscription joined with the school it points at. `id` is the
/// subscription id, which is also what pages are keyed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SubscriptionSchool {
    pub id: i64,
    pub school_id: i64,
    pub name: String,
    pub region: String,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewSubscription {
    pub user_id: i64,
    pub school_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSubscriptionSchoolsParams {
    pub user_id: i64,
    pub page: PageRequest,
}

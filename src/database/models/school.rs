use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::pagination::PageRequest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct School {
    pub id: i64,
    /// Admin who created the school. Never changes.
    pub user_id: i64,
    pub name: String,
    pub region: String,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchool {
    pub user_id: i64,
    pub name: String,
    pub region: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSchoolsParams {
    pub user_id: Option<i64>,
    pub page: PageRequest,
}

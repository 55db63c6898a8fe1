use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::types::Role;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub user_name: String,
    /// Argon2 PHC string, never the plaintext.
    pub password: String,
    pub role: Role,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

/// Raw `users` row; the role column is free text until parsed.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub user_name: String,
    pub password: String,
    pub user_type: String,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = crate::types::UnknownRole;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_name: row.user_name,
            password: row.password,
            role: row.user_type.parse()?,
            create_date: row.create_date,
            update_date: row.update_date,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub user_name: String,
    pub password_hash: String,
    pub role: Role,
}

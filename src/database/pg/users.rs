use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewUser, User, UserRow};
use crate::database::repository::UserRepository;

const CREATE_USER: &str =
    r#"INSERT INTO users (user_name, password, user_type) VALUES ($1, $2, $3) RETURNING id"#;

const FIND_USER_BY_USER_NAME: &str = r#"
    SELECT id, user_name, password, user_type, create_date, update_date
    FROM users
    WHERE user_name = $1
"#;

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create_user(&self, user: NewUser) -> Result<i64, DatabaseError> {
        let (id,): (i64,) = sqlx::query_as(CREATE_USER)
            .bind(&user.user_name)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn find_user_by_user_name(&self, user_name: &str) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>(FIND_USER_BY_USER_NAME)
            .bind(user_name)
            .fetch_optional(&self.pool)
            .await?;

        row.map(User::try_from)
            .transpose()
            .map_err(|e| DatabaseError::Decode(e.to_string()))
    }
}

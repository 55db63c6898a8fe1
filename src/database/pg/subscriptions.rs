use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    ListSubscriptionSchoolsParams, NewSubscription, Subscription, SubscriptionSchool,
};
use crate::database::repository::SubscriptionRepository;

const CREATE_SUBSCRIPTION: &str =
    r#"INSERT INTO subscriptions (user_id, school_id) VALUES ($1, $2) RETURNING id"#;

const LIST_SUBSCRIPTION_SCHOOLS: &str = r#"
    SELECT subscriptions.id, subscriptions.school_id, schools.name, schools.region,
           subscriptions.create_date, subscriptions.update_date
    FROM subscriptions
    JOIN schools ON schools.id = subscriptions.school_id
    WHERE subscriptions.user_id = $1
      AND ($2::BIGINT IS NULL OR subscriptions.id < $2)
    ORDER BY subscriptions.id DESC
    LIMIT $3
"#;

const FIND_SUBSCRIPTION: &str = r#"
    SELECT id, user_id, school_id, create_date, update_date
    FROM subscriptions
    WHERE user_id = $1 AND school_id = $2
"#;

const DELETE_SUBSCRIPTION: &str = r#"DELETE FROM subscriptions WHERE id = $1"#;

pub struct PgSubscriptionRepository {
    pool: PgPool,
}

impl PgSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    async fn create_subscription(&self, subscription: NewSubscription) -> Result<i64, DatabaseError> {
        let (id,): (i64,) = sqlx::query_as(CREATE_SUBSCRIPTION)
            .bind(subscription.user_id)
            .bind(subscription.school_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn list_subscription_schools(
        &self,
        params: ListSubscriptionSchoolsParams,
    ) -> Result<Vec<SubscriptionSchool>, DatabaseError> {
        let schools = sqlx::query_as::<_, SubscriptionSchool>(LIST_SUBSCRIPTION_SCHOOLS)
            .bind(params.user_id)
            .bind(params.page.cursor)
            .bind(params.page.limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(schools)
    }

    async fn find_subscription(
        &self,
        user_id: i64,
        school_id: i64,
    ) -> Result<Option<Subscription>, DatabaseError> {
        let subscription = sqlx::query_as::<_, Subscription>(FIND_SUBSCRIPTION)
            .bind(user_id)
            .bind(school_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(subscription)
    }

    async fn delete_subscription(&self, subscription_id: i64) -> Result<(), DatabaseError> {
        sqlx::query(DELETE_SUBSCRIPTION)
            .bind(subscription_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

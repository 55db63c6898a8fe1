//! Persistence ports. Services depend on these traits only; the PostgreSQL
//! and in-memory adapters implement them.
//!
//! Lookups return `Ok(None)` for a missing row. Every list method returns rows
//! newest first, honouring the page's cursor and limit.

use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    ListNewsParams, ListSchoolsParams, ListSubscriptionSchoolsParams, NewNews, NewSchool,
    NewSubscription, NewUser, News, School, Subscription, SubscriptionSchool, User,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user and returns its id. Fails with
    /// [`DatabaseError::UniqueViolation`] when the username is taken.
    async fn create_user(&self, user: NewUser) -> Result<i64, DatabaseError>;

    async fn find_user_by_user_name(&self, user_name: &str) -> Result<Option<User>, DatabaseError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SchoolRepository: Send + Sync {
    /// Fails with [`DatabaseError::UniqueViolation`] when (name, region) exists.
    async fn create_school(&self, school: NewSchool) -> Result<i64, DatabaseError>;

    async fn list_schools(&self, params: ListSchoolsParams) -> Result<Vec<School>, DatabaseError>;

    async fn find_school_by_name_and_region(
        &self,
        name: &str,
        region: &str,
    ) -> Result<Option<School>, DatabaseError>;

    async fn find_school_by_id(&self, school_id: i64) -> Result<Option<School>, DatabaseError>;
}

/// News reads never see soft-deleted rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsRepository: Send + Sync {
    async fn create_news(&self, news: NewNews) -> Result<i64, DatabaseError>;

    async fn list_news(&self, params: ListNewsParams) -> Result<Vec<News>, DatabaseError>;

    async fn find_news_by_id(&self, news_id: i64) -> Result<Option<News>, DatabaseError>;

    async fn update_news_title(&self, news_id: i64, title: String) -> Result<(), DatabaseError>;

    /// Sets the deletion marker; the row stays in storage.
    async fn delete_news(&self, news_id: i64) -> Result<(), DatabaseError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Fails with [`DatabaseError::UniqueViolation`] when the user already
    /// subscribes to the school.
    async fn create_subscription(&self, subscription: NewSubscription) -> Result<i64, DatabaseError>;

    async fn list_subscription_schools(
        &self,
        params: ListSubscriptionSchoolsParams,
    ) -> Result<Vec<SubscriptionSchool>, DatabaseError>;

    async fn find_subscription(
        &self,
        user_id: i64,
        school_id: i64,
    ) -> Result<Option<Subscription>, DatabaseError>;

    /// Removes the row for good.
    async fn delete_subscription(&self, subscription_id: i64) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;
}

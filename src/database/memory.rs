//! In-process store implementing every repository port.
//!
//! Mirrors the PostgreSQL schema closely enough for the HTTP surface to behave
//! the same: ids are assigned in insertion order, the same uniqueness
//! constraints raise [`DatabaseError::UniqueViolation`], and soft-deleted news
//! stays in the table but never comes back from a read.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    ListNewsParams, ListSchoolsParams, ListSubscriptionSchoolsParams, NewNews, NewSchool,
    NewSubscription, NewUser, News, School, Subscription, SubscriptionSchool, User,
};
use crate::database::repository::{
    HealthCheck, NewsRepository, SchoolRepository, SubscriptionRepository, UserRepository,
};
use crate::pagination::PageRequest;

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    schools: Vec<School>,
    news: Vec<News>,
    subscriptions: Vec<Subscription>,
    sequences: Sequences,
}

/// Last id handed out per table. Ids are never reused, even after a hard delete.
#[derive(Default)]
struct Sequences {
    users: i64,
    schools: i64,
    news: i64,
    subscriptions: i64,
}

fn next_id(sequence: &mut i64) -> i64 {
    *sequence += 1;
    *sequence
}

/// Walks rows newest first, keeping those past the cursor that match `keep`.
fn page_of<'a, T: Clone + 'a>(
    rows: impl DoubleEndedIterator<Item = &'a T>,
    page: PageRequest,
    id_of: impl Fn(&T) -> i64,
    keep: impl Fn(&T) -> bool,
) -> Vec<T> {
    rows.rev()
        .filter(|row| page.admits(id_of(*row)) && keep(*row))
        .take(page.limit_usize())
        .cloned()
        .collect()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of news rows including soft-deleted ones.
    pub async fn stored_news_count(&self) -> usize {
        self.tables.read().await.news.len()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<i64, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.user_name == user.user_name) {
            return Err(DatabaseError::UniqueViolation("users_user_name_key".to_string()));
        }

        let now = Utc::now();
        let id = next_id(&mut tables.sequences.users);
        tables.users.push(User {
            id,
            user_name: user.user_name,
            password: user.password_hash,
            role: user.role,
            create_date: now,
            update_date: now,
        });
        Ok(id)
    }

    async fn find_user_by_user_name(&self, user_name: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.user_name == user_name).cloned())
    }
}

#[async_trait]
impl SchoolRepository for MemoryStore {
    async fn create_school(&self, school: NewSchool) -> Result<i64, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables
            .schools
            .iter()
            .any(|s| s.name == school.name && s.region == school.region)
        {
            return Err(DatabaseError::UniqueViolation("schools_name_region_key".to_string()));
        }

        let now = Utc::now();
        let id = next_id(&mut tables.sequences.schools);
        tables.schools.push(School {
            id,
            user_id: school.user_id,
            name: school.name,
            region: school.region,
            create_date: now,
            update_date: now,
        });
        Ok(id)
    }

    async fn list_schools(&self, params: ListSchoolsParams) -> Result<Vec<School>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(page_of(tables.schools.iter(), params.page, |s| s.id, |s| {
            params.user_id.map_or(true, |user_id| s.user_id == user_id)
        }))
    }

    async fn find_school_by_name_and_region(
        &self,
        name: &str,
        region: &str,
    ) -> Result<Option<School>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .schools
            .iter()
            .find(|s| s.name == name && s.region == region)
            .cloned())
    }

    async fn find_school_by_id(&self, school_id: i64) -> Result<Option<School>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.schools.iter().find(|s| s.id == school_id).cloned())
    }
}

#[async_trait]
impl NewsRepository for MemoryStore {
    async fn create_news(&self, news: NewNews) -> Result<i64, DatabaseError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let id = next_id(&mut tables.sequences.news);
        tables.news.push(News {
            id,
            school_id: news.school_id,
            user_id: news.user_id,
            title: news.title,
            create_date: now,
            update_date: now,
            delete_date: None,
        });
        Ok(id)
    }

    async fn list_news(&self, params: ListNewsParams) -> Result<Vec<News>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(page_of(tables.news.iter(), params.page, |n| n.id, |n| {
            n.delete_date.is_none()
                && params.user_id.map_or(true, |user_id| n.user_id == user_id)
                && params.school_id.map_or(true, |school_id| n.school_id == school_id)
        }))
    }

    async fn find_news_by_id(&self, news_id: i64) -> Result<Option<News>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .news
            .iter()
            .find(|n| n.id == news_id && n.delete_date.is_none())
            .cloned())
    }

    async fn update_news_title(&self, news_id: i64, title: String) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        if let Some(news) = tables
            .news
            .iter_mut()
            .find(|n| n.id == news_id && n.delete_date.is_none())
        {
            news.title = title;
            news.update_date = Utc::now();
        }
        Ok(())
    }

    async fn delete_news(&self, news_id: i64) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        if let Some(news) = tables
            .news
            .iter_mut()
            .find(|n| n.id == news_id && n.delete_date.is_none())
        {
            let now = Utc::now();
            news.delete_date = Some(now);
            news.update_date = now;
        }
        Ok(())
    }
}

#[async_trait]
impl SubscriptionRepository for MemoryStore {
    async fn create_subscription(&self, subscription: NewSubscription) -> Result<i64, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables
            .subscriptions
            .iter()
            .any(|s| s.user_id == subscription.user_id && s.school_id == subscription.school_id)
        {
            return Err(DatabaseError::UniqueViolation(
                "subscriptions_user_id_school_id_key".to_string(),
            ));
        }

        let now = Utc::now();
        let id = next_id(&mut tables.sequences.subscriptions);
        tables.subscriptions.push(Subscription {
            id,
            user_id: subscription.user_id,
            school_id: subscription.school_id,
            create_date: now,
            update_date: now,
        });
        Ok(id)
    }

    async fn list_subscription_schools(
        &self,
        params: ListSubscriptionSchoolsParams,
    ) -> Result<Vec<SubscriptionSchool>, DatabaseError> {
        let tables = self.tables.read().await;
        let subscriptions = page_of(tables.subscriptions.iter(), params.page, |s| s.id, |s| {
            s.user_id == params.user_id
        });

        Ok(subscriptions
            .into_iter()
            .filter_map(|sub| {
                let school = tables.schools.iter().find(|s| s.id == sub.school_id)?;
                Some(SubscriptionSchool {
                    id: sub.id,
                    school_id: school.id,
                    name: school.name.clone(),
                    region: school.region.clone(),
                    create_date: sub.create_date,
                    update_date: sub.update_date,
                })
            })
            .collect())
    }

    async fn find_subscription(
        &self,
        user_id: i64,
        school_id: i64,
    ) -> Result<Option<Subscription>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .subscriptions
            .iter()
            .find(|s| s.user_id == user_id && s.school_id == school_id)
            .cloned())
    }

    async fn delete_subscription(&self, subscription_id: i64) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.subscriptions.retain(|s| s.id != subscription_id);
        Ok(())
    }
}

#[async_trait]
impl HealthCheck for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

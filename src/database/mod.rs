pub mod manager;
pub mod memory;
pub mod models;
pub mod pg;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryStore;
pub use repository::{
    HealthCheck, NewsRepository, SchoolRepository, SubscriptionRepository, UserRepository,
};

use sqlx::PgPool;
use std::sync::Arc;

/// One handle per port, shared by the services that need them.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub schools: Arc<dyn SchoolRepository>,
    pub news: Arc<dyn NewsRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub health: Arc<dyn HealthCheck>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(pg::PgUserRepository::new(pool.clone())),
            schools: Arc::new(pg::PgSchoolRepository::new(pool.clone())),
            news: Arc::new(pg::PgNewsRepository::new(pool.clone())),
            subscriptions: Arc::new(pg::PgSubscriptionRepository::new(pool.clone())),
            health: Arc::new(pg::PgHealthCheck::new(pool)),
        }
    }

    pub fn memory() -> Self {
        Self::from_store(Arc::new(MemoryStore::new()))
    }

    /// Every port backed by the same store, so tests can inspect it afterwards.
    pub fn from_store(store: Arc<MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            schools: store.clone(),
            news: store.clone(),
            subscriptions: store.clone(),
            health: store,
        }
    }
}

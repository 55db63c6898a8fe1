//! PostgreSQL adapters for the repository ports.

mod news;
mod schools;
mod subscriptions;
mod users;

pub use news::PgNewsRepository;
pub use schools::PgSchoolRepository;
pub use subscriptions::PgSubscriptionRepository;
pub use users::PgUserRepository;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::repository::HealthCheck;

pub struct PgHealthCheck {
    pool: PgPool,
}

impl PgHealthCheck {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthCheck for PgHealthCheck {
    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}

//! Health

use async_trait::async_trait;
use mockall::automock;

use crate::database::Db;

/// Liveness of the services the API depends on.
#[derive(Debug, Clone)]
pub struct PgHealthService {
    db: Db,
}

impl PgHealthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HealthService for PgHealthService {
    async fn check_database(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(self.db.pool()).await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait HealthService: Send + Sync {
    /// Run a trivial query against the pool.
    async fn check_database(&self) -> Result<(), sqlx::Error>;
}

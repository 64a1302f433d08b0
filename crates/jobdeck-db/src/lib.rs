//! Database layer for the jobdeck dashboard service.
//!
//! Provides the job store abstraction, its PostgreSQL and in-memory
//! implementations, and the job factory that assembles dashboards.

pub mod error;
pub mod job_factory;
pub mod store;

pub use error::{DbError, DbResult};
pub use job_factory::JobFactory;
pub use store::{JobScope, JobStore, MemoryJobStore, PgJobStore};

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Create a new database connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> DbResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Run database migrations.
pub async fn run_migrations(pool: &PgPool) -> DbResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

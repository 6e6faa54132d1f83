//! Database layer - repositories and data access

pub mod credentials;
pub mod query_days;
pub mod subqueries;
pub mod traits;

pub use credentials::{AwsCredential, CredentialRepository};
pub use query_days::QueryDayRepository;
pub use subqueries::SubqueryRepository;
pub use traits::{QueryDaySource, SubqueryStore};

use crate::config::DatabaseConfig;
use crate::Result;
use sqlx::postgres::{PgPool, PgPoolOptions};

/// Open the run's store handle.
///
/// The pool is capped at one connection: every statement of a run goes through
/// the same session, one at a time.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .min_connections(0)
        .acquire_timeout(config.connect_timeout())
        .connect_with(config.connect_options()?)
        .await?;

    tracing::info!(
        host = %config.host,
        port = config.port,
        dbname = %config.dbname,
        "Connected to PostgreSQL"
    );

    Ok(pool)
}

/// Create the producer's tables if they are missing.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

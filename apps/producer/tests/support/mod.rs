pub mod fixtures;

use anyhow::Context as _;
use futures::FutureExt as _;
use search_producer::{db, logging, Config};
use sqlx::{postgres::PgPoolOptions, Connection as _, PgConnection, PgPool};
use tokio::sync::OnceCell;
use uuid::Uuid;

pub use fixtures::*;

const TEST_URL_VAR: &str = "SEARCH_PRODUCER__DATABASE__TEST_DATABASE_URL";

static BASE_CONFIG: OnceCell<Config> = OnceCell::const_new();

/// Configuration pointing at the integration test database.
///
/// Fails when no test database is configured; these tests never skip.
async fn base_config() -> anyhow::Result<Config> {
    BASE_CONFIG
        .get_or_try_init(|| async {
            logging::init_simple_logging();
            let mut config = Config::load().context("load Config for tests")?;
            let url = config
                .database
                .test_database_url
                .clone()
                .with_context(|| format!("{TEST_URL_VAR} must be set to run database tests"))?;
            config.database.url = Some(url);
            config.database.application_name = "search-producer-tests".to_string();
            Ok::<_, anyhow::Error>(config)
        })
        .await
        .cloned()
}

/// A throwaway schema with the producer's tables.
pub struct TestDb {
    pub pool: PgPool,
    /// Points at the test schema; `run` against it sees the same tables as `pool`.
    pub config: Config,
    pub schema: String,
    admin: Config,
}

impl TestDb {
    pub async fn new() -> anyhow::Result<Self> {
        let admin = base_config().await?;

        let schema = format!("test_{}", Uuid::new_v4().simple());
        let mut admin_conn = PgConnection::connect_with(&admin.database.connect_options()?)
            .await
            .with_context(|| format!("connect test database (set {TEST_URL_VAR})"))?;
        sqlx::query(&format!(r#"CREATE SCHEMA "{}""#, schema))
            .execute(&mut admin_conn)
            .await
            .context("create test schema")?;
        admin_conn.close().await.ok();

        let mut config = admin.clone();
        config.database.search_path = Some(schema.clone());

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(config.database.connect_options()?)
            .await
            .context("connect test pool")?;
        db::run_migrations(&pool).await.context("run migrations")?;

        Ok(Self {
            pool,
            config,
            schema,
            admin,
        })
    }

    pub async fn cleanup(self) -> anyhow::Result<()> {
        self.pool.close().await;

        let mut admin_conn = PgConnection::connect_with(&self.admin.database.connect_options()?)
            .await
            .context("connect admin db for schema drop")?;
        sqlx::query(&format!(r#"DROP SCHEMA "{}" CASCADE"#, self.schema))
            .execute(&mut admin_conn)
            .await
            .context("drop test schema")?;
        admin_conn.close().await.ok();

        Ok(())
    }
}

/// Run `f` against a fresh schema, dropping it afterwards even if `f` panics.
pub async fn with_test_db<F>(f: F) -> anyhow::Result<()>
where
    F: for<'a> FnOnce(
        &'a TestDb,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = anyhow::Result<()>> + 'a>,
    >,
{
    let test_db = TestDb::new().await?;

    let result = std::panic::AssertUnwindSafe(f(&test_db)).catch_unwind().await;
    let cleanup_result = test_db.cleanup().await;

    if let Err(e) = cleanup_result {
        eprintln!("test schema cleanup failed: {e:?}");
    }

    match result {
        Ok(r) => r,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

//! Configuration for the subquery producer
//!
//! Values are layered in this order (later wins):
//! 1. Built-in defaults
//! 2. `config.{ini,toml,yaml,json}` in the working directory (optional)
//! 3. The file named by `SEARCH_PRODUCER_CONFIG` (optional)
//! 4. `SEARCH_PRODUCER__<SECTION>__<KEY>` environment variables
//!
//! A `.env` file is read first so its variables take part in step 4.

use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use std::str::FromStr;
use std::time::Duration;

const ENV_PREFIX: &str = "SEARCH_PRODUCER";
const CONFIG_PATH_VAR: &str = "SEARCH_PRODUCER_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub queue: QueueConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection URL; when set it replaces host, port, dbname, user and password.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
    /// Reported to PostgreSQL as `application_name`.
    pub application_name: String,
    /// Schema search path for the session, e.g. `producer,public`.
    pub search_path: Option<String>,
    pub connect_timeout_seconds: u64,
    pub statement_timeout_seconds: u64,
    /// Apply the bundled schema migrations before the run.
    pub run_migrations: bool,
    /// Connection URL used by the integration tests instead of `url`.
    pub test_database_url: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            dbname: "search".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
            application_name: "search-producer".to_string(),
            search_path: None,
            connect_timeout_seconds: 30,
            statement_timeout_seconds: 60,
            run_migrations: false,
            test_database_url: None,
        }
    }
}

fn redacted(value: &Option<String>) -> Option<&'static str> {
    value.as_ref().map(|_| "<redacted>")
}

// Hand-written so credentials never reach the logs.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &redacted(&self.url))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("dbname", &self.dbname)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("application_name", &self.application_name)
            .field("search_path", &self.search_path)
            .field("connect_timeout_seconds", &self.connect_timeout_seconds)
            .field("statement_timeout_seconds", &self.statement_timeout_seconds)
            .field("run_migrations", &self.run_migrations)
            .field("test_database_url", &redacted(&self.test_database_url))
            .finish()
    }
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        let base = match &self.url {
            Some(url) => PgConnectOptions::from_str(url)?,
            None => PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .database(&self.dbname)
                .username(&self.user)
                .password(&self.password),
        };

        let mut session = vec![(
            "statement_timeout",
            format!("{}s", self.statement_timeout_seconds),
        )];
        if let Some(search_path) = &self.search_path {
            session.push(("search_path", search_path.clone()));
        }

        Ok(base
            .application_name(&self.application_name)
            .options(session))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Name of the SQS queue the subqueries are published to.
    pub name: String,
    /// Overrides the regional SQS endpoint (local emulators).
    pub endpoint_url: Option<String>,
    /// How long to wait after `PurgeQueue` before sending. SQS needs up to 60
    /// seconds to finish a purge and may delete messages sent in that window.
    pub purge_settle_seconds: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            name: "google_search".to_string(),
            endpoint_url: None,
            purge_settle_seconds: 60,
        }
    }
}

impl QueueConfig {
    pub fn purge_settle(&self) -> Duration {
        Duration::from_secs(self.purge_settle_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    pub file_enabled: bool,
    pub file_directory: String,
    pub file_prefix: String,
    /// One of `daily`, `hourly`, `minutely`, `never`.
    pub file_rotation: String,
    pub service_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file_enabled: false,
            file_directory: "logs".to_string(),
            file_prefix: "search-producer".to_string(),
            file_rotation: "daily".to_string(),
            service_name: "search-producer".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from files and environment.
    pub fn load() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false));

        if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
            builder = builder.add_source(config::File::with_name(&path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| crate::Error::Config(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| crate::Error::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), String> {
        let db = &self.database;
        if let Some(url) = &db.url {
            PgConnectOptions::from_str(url)
                .map_err(|e| format!("database.url is not a valid PostgreSQL URL: {e}"))?;
        }
        if db.host.trim().is_empty() {
            return Err("database.host must not be empty".to_string());
        }
        if db.port == 0 {
            return Err("database.port must be greater than 0".to_string());
        }
        if db.dbname.trim().is_empty() {
            return Err("database.dbname must not be empty".to_string());
        }
        if db.user.trim().is_empty() {
            return Err("database.user must not be empty".to_string());
        }
        if db.connect_timeout_seconds == 0 {
            return Err("database.connect_timeout_seconds must be greater than 0".to_string());
        }
        if db.statement_timeout_seconds == 0 {
            return Err("database.statement_timeout_seconds must be greater than 0".to_string());
        }

        if self.queue.name.trim().is_empty() {
            return Err("queue.name must not be empty".to_string());
        }

        match self.logging.file_rotation.as_str() {
            "daily" | "hourly" | "minutely" | "never" => {}
            other => {
                return Err(format!(
                    "logging.file_rotation must be one of daily, hourly, minutely, never (got '{other}')"
                ))
            }
        }

        Ok(())
    }
}

//! Subquery producer - batch entry point
//!
//! Runs one expand, build, publish pass and exits. Scheduling is left to cron or
//! whatever invokes the binary; there are no command-line arguments.

use anyhow::Context;
use search_producer::{config::Config, logging, producer};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    let _log_guard =
        logging::init_logging(&config.logging).context("Failed to initialize logging")?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting search producer");
    tracing::info!(
        db_host = %config.database.host,
        db_name = %config.database.dbname,
        queue = %config.queue.name,
        "Configuration loaded"
    );

    match producer::run(&config).await {
        Ok(summary) => {
            tracing::info!(
                published = summary.published,
                recorded = summary.recorded,
                "Search producer finished"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                connectivity = e.is_connectivity(),
                "Search producer run failed"
            );
            Err(e).context("Producer run failed")
        }
    }
}

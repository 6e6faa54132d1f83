//! The expand, build, publish run
//!
//! One run purges the queue, expands pending query-days, then handles each
//! record to completion before touching the next one: build its URL, enqueue it,
//! record it. A failure anywhere aborts the rest of the run.

use crate::{
    config::Config,
    db::{
        self, CredentialRepository, QueryDayRepository, QueryDaySource, SubqueryRepository,
        SubqueryStore,
    },
    queue::{SqsQueue, SubqueryQueue},
    Result,
};
use search_url::{build_url, Subquery};
use sqlx::PgPool;
use std::time::Instant;

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Query-days returned by the expansion.
    pub expanded: usize,
    /// Messages sent to the queue.
    pub published: usize,
    /// New subquery rows written.
    pub recorded: usize,
    /// Inserts that found the key already recorded.
    pub already_recorded: usize,
}

/// Enqueues subqueries and records them, in that order.
///
/// Enqueue comes first so a crash in between can only duplicate a message,
/// never record a subquery that was not sent.
pub struct Publisher<'a> {
    queue: &'a dyn SubqueryQueue,
    store: &'a dyn SubqueryStore,
}

impl<'a> Publisher<'a> {
    pub fn new(queue: &'a dyn SubqueryQueue, store: &'a dyn SubqueryStore) -> Self {
        Self { queue, store }
    }

    /// Returns whether a new subquery row was written.
    pub async fn publish(&self, subquery: &Subquery) -> Result<bool> {
        self.queue.send(subquery).await?;
        let inserted = self.store.insert_if_absent(subquery).await?;

        if inserted {
            tracing::debug!(
                query_alias = %subquery.query_alias,
                query_date = %subquery.query_date,
                "Published subquery"
            );
        } else {
            tracing::info!(
                query_alias = %subquery.query_alias,
                query_date = %subquery.query_date,
                "Subquery already recorded, insert skipped"
            );
        }

        Ok(inserted)
    }
}

/// Run the pipeline against already-open handles.
pub async fn produce(
    source: &dyn QueryDaySource,
    queue: &dyn SubqueryQueue,
    store: &dyn SubqueryStore,
) -> Result<RunSummary> {
    let started = Instant::now();

    queue.purge().await?;
    tracing::info!(queue = queue.name(), "Queue purged");

    let query_days = source.pending_query_days().await?;
    tracing::info!(count = query_days.len(), "Expanded pending query-days");

    let publisher = Publisher::new(queue, store);
    let mut summary = RunSummary {
        expanded: query_days.len(),
        ..RunSummary::default()
    };

    for query_day in &query_days {
        let subquery = build_url(query_day);
        if publisher.publish(&subquery).await? {
            summary.recorded += 1;
        } else {
            summary.already_recorded += 1;
        }
        summary.published += 1;
    }

    tracing::info!(
        expanded = summary.expanded,
        published = summary.published,
        recorded = summary.recorded,
        already_recorded = summary.already_recorded,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Run complete"
    );

    Ok(summary)
}

/// Open the store and queue described by `config`, run the pipeline, and
/// release the store connection whether or not the run succeeded.
pub async fn run(config: &Config) -> Result<RunSummary> {
    let pool = db::connect(&config.database).await?;
    let result = run_with_pool(&pool, config).await;
    pool.close().await;
    result
}

async fn run_with_pool(pool: &PgPool, config: &Config) -> Result<RunSummary> {
    if config.database.run_migrations {
        db::run_migrations(pool).await?;
    }

    let credential = CredentialRepository::new(pool.clone()).aws_credential().await?;
    let queue = SqsQueue::connect(&credential, &config.queue).await?;

    let source = QueryDayRepository::new(pool.clone());
    let store = SubqueryRepository::new(pool.clone());

    produce(&source, &queue, &store).await
}

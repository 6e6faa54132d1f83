//! Query expansion - one row per specification and calendar day

use super::traits::QueryDaySource;
use crate::Result;
use async_trait::async_trait;
use search_url::QueryDay;
use sqlx::{postgres::PgRow, PgPool, Row};

/// Expands every specification of an active project into its days and drops
/// the days that already have a successful attempt.
///
/// `generate_series` over timestamps yields nothing when `final_date` precedes
/// `initial_date`, so such specifications expand to no rows.
const PENDING_QUERY_DAYS_SQL: &str = r#"
    SELECT
        q.query_alias,
        q.search_terms,
        q.language_results,
        q.language_interface,
        q.country_results,
        q.sort_by_date,
        q.geo_uule,
        q.geo_tci,
        q.google_domain,
        d.day::date AS query_date
    FROM google_search_query q
    JOIN project p ON p.project_name = q.project_name
    CROSS JOIN LATERAL generate_series(
        q.initial_date::timestamp,
        q.final_date::timestamp,
        interval '1 day'
    ) AS d(day)
    WHERE p.active
      AND NOT EXISTS (
          SELECT 1
          FROM google_search_attempt a
          WHERE a.query_alias = q.query_alias
            AND a.query_date = d.day::date
            AND a.success
      )
"#;

#[derive(Debug, Clone)]
pub struct QueryDayRepository {
    pool: PgPool,
}

impl QueryDayRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueryDaySource for QueryDayRepository {
    async fn pending_query_days(&self) -> Result<Vec<QueryDay>> {
        let rows = sqlx::query(PENDING_QUERY_DAYS_SQL)
            .fetch_all(&self.pool)
            .await
            .map_err(crate::Error::Database)?;

        rows.iter().map(query_day_from_row).collect()
    }
}

fn query_day_from_row(row: &PgRow) -> Result<QueryDay> {
    Ok(QueryDay {
        query_alias: row.try_get("query_alias")?,
        search_terms: row.try_get("search_terms")?,
        language_results: row.try_get("language_results")?,
        language_interface: row.try_get("language_interface")?,
        country_results: row.try_get("country_results")?,
        sort_by_date: row.try_get("sort_by_date")?,
        geo_uule: row.try_get("geo_uule")?,
        geo_tci: row.try_get("geo_tci")?,
        google_domain: row.try_get("google_domain")?,
        query_date: row.try_get("query_date")?,
    })
}

//! Produced subqueries - idempotent record of what was enqueued

use super::traits::SubqueryStore;
use crate::Result;
use async_trait::async_trait;
use search_url::Subquery;
use sqlx::PgPool;

#[derive(Debug, Clone)]
pub struct SubqueryRepository {
    pool: PgPool,
}

impl SubqueryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubqueryStore for SubqueryRepository {
    async fn insert_if_absent(&self, subquery: &Subquery) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO google_search_subquery (query_alias, query_date, query_url)
            VALUES ($1, $2, $3)
            ON CONFLICT (query_alias, query_date) DO NOTHING
            "#,
        )
        .bind(&subquery.query_alias)
        .bind(subquery.query_date)
        .bind(&subquery.query_url)
        .execute(&self.pool)
        .await
        .map_err(crate::Error::Database)?;

        Ok(result.rows_affected() == 1)
    }
}

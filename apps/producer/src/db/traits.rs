//! Storage seams used by the producer pipeline
//!
//! The pipeline only talks to these traits so a run can be driven against
//! PostgreSQL in production and against in-memory fakes in tests.

use crate::Result;
use async_trait::async_trait;
use search_url::{QueryDay, Subquery};

/// Source of query-days that still need a subquery.
#[async_trait]
pub trait QueryDaySource: Send + Sync {
    /// Every (specification, day) pair of an active project, with each day between
    /// `initial_date` and `final_date` inclusive, minus the pairs that already have
    /// a successful search attempt.
    ///
    /// No ordering is guaranteed.
    async fn pending_query_days(&self) -> Result<Vec<QueryDay>>;
}

/// Record of subqueries that were handed to the queue.
#[async_trait]
pub trait SubqueryStore: Send + Sync {
    /// Insert the subquery unless one with the same `(query_alias, query_date)`
    /// exists.
    ///
    /// # Returns
    /// * `Ok(true)` - A new row was written
    /// * `Ok(false)` - The key was already recorded; nothing changed
    async fn insert_if_absent(&self, subquery: &Subquery) -> Result<bool>;
}

use crate::Result;
use async_trait::async_trait;
use search_url::Subquery;

/// Queue the producer publishes subqueries to.
///
/// Only producer-side operations exist here; consuming and acknowledging
/// messages is left to the downstream workers.
#[async_trait]
pub trait SubqueryQueue: Send + Sync {
    /// Queue name for logging
    fn name(&self) -> &str;

    /// Drop every message currently in the queue.
    async fn purge(&self) -> Result<()>;

    /// Enqueue one subquery as a JSON message body.
    async fn send(&self, subquery: &Subquery) -> Result<()>;
}

//! Message queue abstraction for produced subqueries
//!
//! Provides a trait-based interface with an Amazon SQS implementation and an
//! in-memory implementation for tests.

mod inline;
mod models;
mod sqs;
mod traits;

pub use inline::{InlineQueue, QueueEvent};
pub use models::{decode_message, encode_message};
pub use sqs::SqsQueue;
pub use traits::SubqueryQueue;

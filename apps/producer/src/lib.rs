//! Search subquery producer
//!
//! Reads recurring search specifications from PostgreSQL, expands each into one
//! search per calendar day, and publishes the resulting URLs to a message queue:
//! - Daily expansion that skips days with a successful search attempt
//! - Form-encoded search URLs with a single-day date window
//! - Queue purge at the start of every run
//! - Idempotent record of produced subqueries keyed by alias and date

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod producer;
pub mod queue;

pub use config::Config;
pub use error::{Error, Result};
pub use producer::{produce, run, Publisher, RunSummary};

//! In-memory queue that records every operation

use super::{models::encode_message, traits::SubqueryQueue};
use crate::Result;
use async_trait::async_trait;
use search_url::Subquery;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueEvent {
    Purged,
    Sent(String),
}

/// Queue kept in process memory.
///
/// Messages survive `purge` only in the event log, which makes the order of
/// purges and sends observable.
#[derive(Debug, Default)]
pub struct InlineQueue {
    name: String,
    state: Mutex<InlineState>,
}

#[derive(Debug, Default)]
struct InlineState {
    messages: Vec<String>,
    events: Vec<QueueEvent>,
}

impl InlineQueue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Mutex::default(),
        }
    }

    /// Message bodies currently waiting in the queue.
    pub fn messages(&self) -> Vec<String> {
        self.lock().messages.clone()
    }

    /// Every purge and send, in call order.
    pub fn events(&self) -> Vec<QueueEvent> {
        self.lock().events.clone()
    }

    pub fn purge_count(&self) -> usize {
        self.lock()
            .events
            .iter()
            .filter(|e| matches!(e, QueueEvent::Purged))
            .count()
    }

    /// Place a message in the queue without going through `send`.
    pub fn seed(&self, body: impl Into<String>) {
        self.lock().messages.push(body.into());
    }

    fn lock(&self) -> MutexGuard<'_, InlineState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SubqueryQueue for InlineQueue {
    fn name(&self) -> &str {
        &self.name
    }

    async fn purge(&self) -> Result<()> {
        let mut state = self.lock();
        state.messages.clear();
        state.events.push(QueueEvent::Purged);
        Ok(())
    }

    async fn send(&self, subquery: &Subquery) -> Result<()> {
        let body = encode_message(subquery)?;
        let mut state = self.lock();
        state.messages.push(body.clone());
        state.events.push(QueueEvent::Sent(body));
        Ok(())
    }
}

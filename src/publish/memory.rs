//! In-memory [`Publisher`] implementation for tests and dry runs.
//!
//! Records every published message behind a `std::sync::Mutex` instead of
//! touching a broker.

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use super::{Publisher, QueueTarget};

/// A message captured by [`MemoryPublisher`].
#[derive(Debug, Clone)]
pub struct PublishedMessage {
    pub url: String,
    pub queue: String,
    pub body: Value,
}

/// Publisher that records messages in memory.
#[derive(Debug, Default)]
pub struct MemoryPublisher {
    messages: Mutex<Vec<PublishedMessage>>,
}

impl MemoryPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything published so far, in order.
    pub fn published(&self) -> Vec<PublishedMessage> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for MemoryPublisher {
    async fn publish(&self, target: &QueueTarget, body: &Value) -> Result<()> {
        let mut messages = self.messages.lock().unwrap();
        messages.push(PublishedMessage {
            url: target.url.clone(),
            queue: target.queue.clone(),
            body: body.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_records_messages_in_order() {
        let publisher = MemoryPublisher::new();
        let target = QueueTarget::new("amqp://localhost", "q1");
        publisher.publish(&target, &json!({"n": 1})).await.unwrap();
        publisher.publish(&target, &json!({"n": 2})).await.unwrap();

        let published = publisher.published();
        assert_eq!(published.len(), 2);
        assert_eq!(published[0].queue, "q1");
        assert_eq!(published[0].body["n"], 1);
        assert_eq!(published[1].body["n"], 2);
    }
}

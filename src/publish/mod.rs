//! Publishing abstraction for Courier.
//!
//! The [`Publisher`] trait is the single seam between message assembly and
//! transport, enabling pluggable backends (AMQP for production, in-memory
//! for tests and dry runs).
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod amqp;
pub mod memory;

pub use amqp::AmqpPublisher;
pub use memory::MemoryPublisher;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Destination for a single publish: broker URL plus queue name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueTarget {
    /// Broker connection URL (`amqp://` or `amqps://`).
    pub url: String,
    /// Name of the durable queue.
    pub queue: String,
}

impl QueueTarget {
    pub fn new(url: impl Into<String>, queue: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            queue: queue.into(),
        }
    }
}

/// Abstract transport for a validated JSON message.
///
/// A publish call covers the full "declare durable queue, publish one
/// persistent message" operation. Implementations hold no state between
/// calls; each invocation is self-contained.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish one JSON document to the target queue.
    async fn publish(&self, target: &QueueTarget, body: &Value) -> Result<()>;
}

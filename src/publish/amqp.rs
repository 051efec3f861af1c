//! AMQP-backed [`Publisher`] built on `lapin`.
//!
//! One broker connection per publish call, no reuse or pooling: connect,
//! open a channel, declare the queue as durable, publish with persistent
//! delivery, close.

use anyhow::{Context, Result};
use async_trait::async_trait;
use lapin::options::{BasicPublishOptions, QueueDeclareOptions};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Connection, ConnectionProperties};
use serde_json::Value;
use tracing::debug;

use super::{Publisher, QueueTarget};

/// Delivery mode 2 asks the broker to write the message to disk.
const DELIVERY_MODE_PERSISTENT: u8 = 2;

/// Publisher that talks to a real AMQP broker.
#[derive(Debug, Default)]
pub struct AmqpPublisher;

impl AmqpPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Publisher for AmqpPublisher {
    async fn publish(&self, target: &QueueTarget, body: &Value) -> Result<()> {
        let payload = serde_json::to_vec(body).context("failed to serialize message body")?;

        let connection = Connection::connect(&target.url, ConnectionProperties::default())
            .await
            .context("failed to connect to broker")?;
        let channel = connection
            .create_channel()
            .await
            .context("failed to open channel")?;

        channel
            .queue_declare(
                &target.queue,
                QueueDeclareOptions {
                    durable: true,
                    ..QueueDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await
            .with_context(|| format!("failed to declare queue '{}'", target.queue))?;
        debug!(queue = %target.queue, "queue declared as durable");

        channel
            .basic_publish(
                "",
                &target.queue,
                BasicPublishOptions::default(),
                &payload,
                BasicProperties::default().with_delivery_mode(DELIVERY_MODE_PERSISTENT),
            )
            .await
            .context("failed to publish message")?
            .await
            .context("broker did not accept message")?;
        debug!(queue = %target.queue, bytes = payload.len(), "message published");

        connection
            .close(200, "")
            .await
            .context("failed to close connection")?;
        Ok(())
    }
}

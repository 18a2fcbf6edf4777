//! Kafka delivery client.
//!
//! [`AlertProducer`] owns the single broker connection for the lifetime of a
//! run. Sends wait for acknowledgement from all in-sync replicas, librdkafka
//! applies the bounded retry budget internally, and at most one request is in
//! flight per connection so retries cannot reorder messages.
//!
//! The orchestrator talks to the narrow [`AlertSink`] trait rather than this
//! struct directly, so tests substitute a fake sink without a real broker.

use crate::{config::ProducerConfig, Error, Result};
use async_trait::async_trait;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;
use rdkafka::ClientConfig;
use std::time::Duration;
use tracing::{debug, info};

/// Capability to deliver one payload to a topic and report the outcome.
#[async_trait]
pub trait AlertSink {
    /// Blocks until the broker acknowledges the write or the retry/timeout
    /// budget is exhausted. A per-message failure is an `Err`, not a panic.
    async fn send(&self, topic: &str, key: &str, payload: &str) -> Result<()>;
}

pub struct AlertProducer {
    producer: FutureProducer,
    message_timeout: Duration,
}

impl AlertProducer {
    /// Create the producer and probe broker metadata.
    ///
    /// A probe failure means the broker is unreachable; that is fatal at
    /// startup, before any send is attempted.
    pub fn connect(broker: &str, config: &ProducerConfig) -> Result<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", broker)
            .set("compression.type", &config.compression)
            .set("acks", &config.acks)
            .set("retries", config.retries.to_string())
            .set(
                "max.in.flight.requests.per.connection",
                config.max_in_flight.to_string(),
            )
            .set("message.timeout.ms", config.message_timeout_ms.to_string())
            .create()
            .map_err(Error::Kafka)?;

        producer
            .client()
            .fetch_metadata(None, Duration::from_secs(config.connect_timeout_secs))
            .map_err(|e| Error::Connection(format!("failed to reach broker {broker}: {e}")))?;

        info!("Connected to Kafka broker: {}", broker);
        Ok(Self {
            producer,
            message_timeout: Duration::from_millis(config.message_timeout_ms),
        })
    }

    /// Flush buffered messages. Idempotent; safe to call more than once.
    pub fn close(&self) -> Result<()> {
        self.producer.flush(Timeout::After(self.message_timeout))?;
        debug!("Kafka producer flushed and closed");
        Ok(())
    }
}

#[async_trait]
impl AlertSink for AlertProducer {
    async fn send(&self, topic: &str, key: &str, payload: &str) -> Result<()> {
        let record = FutureRecord::to(topic).payload(payload).key(key);

        // Delivery timeout is enforced by message.timeout.ms; the future
        // resolves once the broker acknowledges or librdkafka gives up.
        self.producer
            .send(record, Timeout::Never)
            .await
            .map_err(|(e, _)| Error::Kafka(e))?;

        Ok(())
    }
}

/// Tuning knobs for the Kafka producer.
///
/// Defaults mirror a reliability-first publisher: every send waits for all
/// in-sync replicas, at most one request is in flight per connection (so
/// retries cannot reorder messages), and a bounded retry budget is applied
/// before a send is reported as failed.
#[derive(Debug, Clone)]
pub struct ProducerConfig {
    pub compression: String,
    pub acks: String,
    pub retries: u32,
    pub max_in_flight: u32,
    pub message_timeout_ms: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            compression: "gzip".to_string(),
            acks: "all".to_string(),
            retries: 3,
            max_in_flight: 1,
            message_timeout_ms: 10_000,
            connect_timeout_secs: 10,
        }
    }
}

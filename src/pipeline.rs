//! Batch orchestration and delivery statistics.
//!
//! The orchestrator replays a corpus strictly in order: it never issues a
//! second send before the prior one's outcome is known, so the topic sees
//! messages in exactly the corpus order. Per-record failures are counted and
//! the loop continues; only a startup connection failure aborts a run.

use crate::corpus::{corpus_path, load_corpus};
use crate::kafka::{message_key, AlertSink};
use crate::synth::{AlertKind, AlertRecord};
use crate::{Error, Result};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{info, warn};

/// Success/failure accounting for one batch, merged into a run-wide total.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryStats {
    pub total: u64,
    pub success: u64,
    pub failed: u64,
}

impl DeliveryStats {
    pub fn record_success(&mut self) {
        self.total += 1;
        self.success += 1;
    }

    pub fn record_failure(&mut self) {
        self.total += 1;
        self.failed += 1;
    }

    pub fn merge(&mut self, other: &DeliveryStats) {
        self.total += other.total;
        self.success += other.success;
        self.failed += other.failed;
    }

    /// Fraction of successful sends, or `None` when nothing was attempted.
    /// An empty batch is "no data", never an arithmetic fault.
    pub fn success_rate(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.success as f64 / self.total as f64)
    }
}

/// Options for one publish run, assembled from the CLI.
#[derive(Debug, Clone)]
pub struct PublishOptions {
    /// Kinds to process, in order.
    pub kinds: Vec<AlertKind>,
    /// Process only the first K records of each corpus.
    pub limit: Option<usize>,
    /// Pause between messages. Load shaping only, not needed for correctness.
    pub delay: Duration,
    /// Directory holding the corpus files.
    pub data_dir: PathBuf,
}

/// Send `records` to `topic` in order, one outstanding send at a time.
///
/// A failed acknowledgement is counted and the loop moves on to the next
/// record. The shutdown flag stops further sends promptly; the stats
/// returned then cover the records attempted so far.
pub async fn send_batch<S: AlertSink + ?Sized>(
    sink: &S,
    topic: &str,
    records: &[AlertRecord],
    delay: Duration,
    shutdown: &AtomicBool,
) -> DeliveryStats {
    let mut stats = DeliveryStats::default();
    info!("Sending {} messages to topic {}", records.len(), topic);

    for (position, record) in records.iter().enumerate() {
        if shutdown.load(Ordering::Relaxed) {
            warn!(
                "Interrupted after {}/{} messages on topic {}",
                position,
                records.len(),
                topic
            );
            break;
        }

        let key = message_key(record, position);
        let payload = match serde_json::to_string(record) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to serialize record {}: {}", key, e);
                stats.record_failure();
                continue;
            }
        };

        match sink.send(topic, &key, &payload).await {
            Ok(()) => {
                stats.record_success();
                if (position + 1) % 100 == 0 {
                    info!("Progress: {}/{} messages sent", position + 1, records.len());
                }
            }
            Err(e) => {
                warn!("Failed to send message {}: {}", key, e);
                stats.record_failure();
            }
        }

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    info!(
        "Completed topic {}: {} success, {} failed",
        topic, stats.success, stats.failed
    );
    stats
}

/// Replay the corpora for the selected kinds and aggregate run-wide stats.
///
/// A missing or malformed corpus file skips that kind; the run continues and
/// the final summary reflects only processed kinds. The summary is always
/// logged, including after an interrupt.
pub async fn run_publish<S: AlertSink + ?Sized>(
    opts: &PublishOptions,
    sink: &S,
    shutdown: &AtomicBool,
) -> Result<DeliveryStats> {
    let mut total = DeliveryStats::default();

    for kind in &opts.kinds {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        let path = corpus_path(&opts.data_dir, *kind);
        info!(
            kind = kind.description(),
            topic = kind.topic(),
            file = %path.display(),
            "Processing alert kind"
        );

        let mut records = match load_corpus(&path).await {
            Ok(records) => records,
            Err(Error::CorpusNotFound { path }) => {
                warn!("Corpus file not found, skipping kind: {}", path);
                continue;
            }
            Err(Error::Serialization(e)) => {
                warn!(
                    "Malformed corpus for {}, skipping kind: {}",
                    kind.description(),
                    e
                );
                continue;
            }
            Err(e) => return Err(e),
        };

        if let Some(limit) = opts.limit {
            if records.len() > limit {
                info!("Limited to first {} messages", limit);
                records.truncate(limit);
            }
        }

        let stats = send_batch(sink, kind.topic(), &records, opts.delay, shutdown).await;
        total.merge(&stats);
    }

    match total.success_rate() {
        Some(rate) => info!(
            total = total.total,
            success = total.success,
            failed = total.failed,
            "Summary: success rate {:.2}%",
            rate * 100.0
        ),
        None => info!("Summary: no records were published"),
    }

    Ok(total)
}

use alert_replay::corpus::{self, CorpusBuilder};
use alert_replay::kafka::AlertSink;
use alert_replay::{run_publish, AlertKind, PublishOptions, Result};
use async_trait::async_trait;
use std::sync::atomic::AtomicBool;
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

/// In-memory sink standing in for the Kafka producer.
struct RecordingSink {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl AlertSink for RecordingSink {
    async fn send(&self, topic: &str, key: &str, _payload: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((topic.to_string(), key.to_string()));
        Ok(())
    }
}

#[tokio::test]
async fn test_corpus_survives_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = corpus::corpus_path(temp_dir.path(), AlertKind::HostBehavior);

    let mut builder = CorpusBuilder::new(Some(99));
    let records = builder.build(AlertKind::HostBehavior, 50);
    corpus::write_corpus(&path, &records).await.unwrap();

    let loaded = corpus::load_corpus(&path).await.unwrap();
    assert_eq!(loaded, records, "reload must be field-for-field identical");
}

#[tokio::test]
async fn test_missing_kind_is_skipped_and_run_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    let mut builder = CorpusBuilder::new(Some(3));

    // Two corpora on disk, host-behavior deliberately missing.
    for kind in [AlertKind::NetworkAttack, AlertKind::MaliciousSample] {
        let records = builder.build(kind, 4);
        corpus::write_corpus(corpus::corpus_path(temp_dir.path(), kind), &records)
            .await
            .unwrap();
    }

    let sink = RecordingSink::new();
    let shutdown = AtomicBool::new(false);
    let opts = PublishOptions {
        kinds: AlertKind::all().to_vec(),
        limit: None,
        delay: Duration::ZERO,
        data_dir: temp_dir.path().to_path_buf(),
    };

    let stats = run_publish(&opts, &sink, &shutdown).await.unwrap();

    // Summary excludes the missing kind entirely.
    assert_eq!(stats.total, 8);
    assert_eq!(stats.success, 8);
    assert_eq!(stats.failed, 0);

    let sent = sink.sent();
    assert!(sent
        .iter()
        .all(|(topic, _)| topic.as_str() != "host-behavior-alerts"));
}

#[tokio::test]
async fn test_malformed_corpus_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let mut builder = CorpusBuilder::new(Some(3));

    let records = builder.build(AlertKind::NetworkAttack, 2);
    corpus::write_corpus(
        corpus::corpus_path(temp_dir.path(), AlertKind::NetworkAttack),
        &records,
    )
    .await
    .unwrap();
    tokio::fs::write(
        corpus::corpus_path(temp_dir.path(), AlertKind::MaliciousSample),
        b"[{broken",
    )
    .await
    .unwrap();

    let sink = RecordingSink::new();
    let shutdown = AtomicBool::new(false);
    let opts = PublishOptions {
        kinds: vec![AlertKind::NetworkAttack, AlertKind::MaliciousSample],
        limit: None,
        delay: Duration::ZERO,
        data_dir: temp_dir.path().to_path_buf(),
    };

    let stats = run_publish(&opts, &sink, &shutdown).await.unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.failed, 0);
}

#[tokio::test]
async fn test_limit_truncates_each_kind_before_sending() {
    let temp_dir = TempDir::new().unwrap();
    let mut builder = CorpusBuilder::new(Some(8));

    let records = builder.build(AlertKind::MaliciousSample, 10);
    corpus::write_corpus(
        corpus::corpus_path(temp_dir.path(), AlertKind::MaliciousSample),
        &records,
    )
    .await
    .unwrap();

    let sink = RecordingSink::new();
    let shutdown = AtomicBool::new(false);
    let opts = PublishOptions {
        kinds: vec![AlertKind::MaliciousSample],
        limit: Some(3),
        delay: Duration::ZERO,
        data_dir: temp_dir.path().to_path_buf(),
    };

    let stats = run_publish(&opts, &sink, &shutdown).await.unwrap();
    assert_eq!(stats.total, 3);

    // The prefix of the corpus, in corpus order.
    let sent = sink.sent();
    let expected: Vec<String> = records[..3].iter().map(|r| r.alarm_id.clone()).collect();
    let got: Vec<String> = sent.iter().map(|(_, key)| key.clone()).collect();
    assert_eq!(got, expected);
}

#[tokio::test]
async fn test_all_kinds_publish_to_their_topics() {
    let temp_dir = TempDir::new().unwrap();
    let mut builder = CorpusBuilder::new(Some(21));

    for kind in AlertKind::all() {
        let records = builder.build(kind, 2);
        corpus::write_corpus(corpus::corpus_path(temp_dir.path(), kind), &records)
            .await
            .unwrap();
    }

    let sink = RecordingSink::new();
    let shutdown = AtomicBool::new(false);
    let opts = PublishOptions {
        kinds: AlertKind::all().to_vec(),
        limit: None,
        delay: Duration::ZERO,
        data_dir: temp_dir.path().to_path_buf(),
    };

    let stats = run_publish(&opts, &sink, &shutdown).await.unwrap();
    assert_eq!(stats.total, 6);
    assert_eq!(stats.success_rate(), Some(1.0));

    let sent = sink.sent();
    for kind in AlertKind::all() {
        let count = sent
            .iter()
            .filter(|(topic, _)| topic.as_str() == kind.topic())
            .count();
        assert_eq!(count, 2, "topic {} should see its own records", kind.topic());
    }
}

//! Corpus generation and persistence.
//!
//! A corpus is a JSON array of [`AlertRecord`]s for one kind, written with
//! stable field presence so it round-trips field-for-field. Writes are
//! atomic (temp file + rename): a corpus is unusable if partially written,
//! so a write failure is fatal and no partial recovery is attempted.
//!
//! # Example
//!
//! ```rust,no_run
//! use alert_replay::corpus::{self, CorpusBuilder};
//! use alert_replay::synth::AlertKind;
//!
//! #[tokio::main]
//! async fn main() -> alert_replay::Result<()> {
//!     let mut builder = CorpusBuilder::new(Some(42));
//!     let records = builder.build(AlertKind::NetworkAttack, 10_000);
//!     corpus::write_corpus("network_attack_mock_data.json", &records).await?;
//!     Ok(())
//! }
//! ```

use crate::synth::{synthesize, AlertKind, AlertRecord};
use crate::{Error, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Progress is reported every this many generated records.
const PROGRESS_INTERVAL: u64 = 1000;

/// Drives the synthesizer to materialize whole corpora.
///
/// Holds the single random stream the synthesizer consumes; an explicit seed
/// makes the produced corpus reproducible.
pub struct CorpusBuilder {
    rng: StdRng,
}

impl CorpusBuilder {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Produce records for indices `1..=count`, in order.
    pub fn build(&mut self, kind: AlertKind, count: u64) -> Vec<AlertRecord> {
        info!("Generating {} {} records", count, kind.description());

        let mut records = Vec::with_capacity(count as usize);
        for index in 1..=count {
            records.push(synthesize(kind, index, &mut self.rng));
            if index % PROGRESS_INTERVAL == 0 {
                info!("Generated {}/{} records", index, count);
            }
        }
        records
    }
}

/// Persists a corpus as a pretty-printed UTF-8 JSON array, atomically.
pub async fn write_corpus(path: impl AsRef<Path>, records: &[AlertRecord]) -> Result<()> {
    let path = path.as_ref();
    debug!("Writing {} records to {:?}", records.len(), path);

    let temp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(records)?;
    let mut file = fs::File::create(&temp_path).await?;
    file.write_all(json.as_bytes()).await?;
    file.sync_all().await?;
    fs::rename(&temp_path, path).await?;

    info!("Wrote {} records to {:?}", records.len(), path);
    Ok(())
}

/// Loads a corpus back from disk.
///
/// A missing file surfaces as [`Error::CorpusNotFound`] and malformed JSON as
/// [`Error::Serialization`], so the publisher can treat both as a per-kind
/// skip rather than a fatal failure.
pub async fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<AlertRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::CorpusNotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path).await?;
    let records: Vec<AlertRecord> = serde_json::from_str(&content)?;
    info!("Loaded {} records from {:?}", records.len(), path);
    Ok(records)
}

/// Path of one kind's corpus file inside a data directory.
pub fn corpus_path(data_dir: &Path, kind: AlertKind) -> PathBuf {
    data_dir.join(kind.corpus_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_corpus_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("corpus.json");

        let mut builder = CorpusBuilder::new(Some(42));
        let records = builder.build(AlertKind::MaliciousSample, 25);
        write_corpus(&path, &records).await.unwrap();

        let loaded = load_corpus(&path).await.unwrap();
        assert_eq!(loaded, records);
    }

    #[tokio::test]
    async fn test_missing_corpus_is_distinguishable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("does_not_exist.json");

        match load_corpus(&path).await {
            Err(Error::CorpusNotFound { .. }) => {}
            other => panic!("expected CorpusNotFound, got {:?}", other.map(|r| r.len())),
        }
    }

    #[tokio::test]
    async fn test_malformed_corpus_is_distinguishable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("corrupt.json");
        fs::write(&path, b"{not json").await.unwrap();

        match load_corpus(&path).await {
            Err(Error::Serialization(_)) => {}
            other => panic!("expected Serialization, got {:?}", other.map(|r| r.len())),
        }
    }

    #[tokio::test]
    async fn test_write_is_atomic_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("corpus.json");

        let mut builder = CorpusBuilder::new(Some(1));
        let first = builder.build(AlertKind::NetworkAttack, 5);
        write_corpus(&path, &first).await.unwrap();

        let second = builder.build(AlertKind::NetworkAttack, 3);
        write_corpus(&path, &second).await.unwrap();

        let loaded = load_corpus(&path).await.unwrap();
        assert_eq!(loaded.len(), 3);
        assert!(!path.with_extension("tmp").exists());
    }
}

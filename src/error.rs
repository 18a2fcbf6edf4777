//! Error types and result handling for alert-replay.
//!
//! This module defines the main error type [`Error`] and a convenience
//! [`Result`] type alias used throughout the crate.
//!
//! # Example
//!
//! ```rust
//! use alert_replay::{Error, Result};
//!
//! fn connect_to_broker() -> Result<()> {
//!     // Simulating a connection error
//!     Err(Error::Connection("Failed to connect".to_string()))
//! }
//!
//! match connect_to_broker() {
//!     Ok(()) => println!("Connected"),
//!     Err(Error::Connection(msg)) => eprintln!("Connection error: {}", msg),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use thiserror::Error;

/// The main error type for alert-replay operations.
///
/// This enum represents all possible errors that can occur while
/// generating corpora or replaying them to Kafka, from configuration
/// issues to runtime failures.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error, typically from invalid CLI arguments.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Kafka client or producer error.
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    /// JSON serialization error when encoding records or corpora.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error, typically from corpus file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic connection error not covered by specific types.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A corpus file for a kind was not found at the expected path.
    #[error("Corpus file not found: {path}")]
    CorpusNotFound {
        /// Path that was probed
        path: String,
    },
}

/// A convenient Result type alias for alert-replay operations.
///
/// This is equivalent to `std::result::Result<T, alert_replay::Error>`.
///
/// # Example
///
/// ```rust
/// use alert_replay::Result;
///
/// fn do_something() -> Result<String> {
///     Ok("Success".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

pub mod config;
pub mod corpus;
pub mod error;
pub mod pipeline;

pub mod kafka;
pub mod synth;

pub use config::ProducerConfig;
pub use error::{Error, Result};
pub use pipeline::{run_publish, send_batch, DeliveryStats, PublishOptions};
pub use synth::{synthesize, AlertKind, AlertRecord};

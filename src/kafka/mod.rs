pub mod key;
pub mod producer;


pub use key::message_key;
pub use producer::{AlertProducer, AlertSink};

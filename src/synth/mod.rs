pub mod generator;
pub mod random;
pub mod record;
pub mod taxonomy;

pub use generator::synthesize;
pub use record::{AlertPayload, AlertRecord, NetworkIndicators, RegistryArtifacts};
pub use taxonomy::AlertKind;

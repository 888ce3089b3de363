pub mod errors;
pub mod inputs;
pub mod service;

pub use errors::{Entity, LoadError};
pub use inputs::SnapshotInputs;
pub use service::{LoadSummary, SchemaLoader};

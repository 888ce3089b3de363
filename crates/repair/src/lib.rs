pub mod errors;
pub mod lines;

pub use errors::RepairError;
pub use lines::{default_output_path, repair_file, repair_text, RepairReport, Repaired};

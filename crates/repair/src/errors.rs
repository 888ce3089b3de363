use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RepairError {
    #[error("no such file or directory: '{}'", .0.display())]
    SourceNotFound(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, RepairError>;

use std::fmt;
use std::io;
use std::path::PathBuf;

use db::DbError;
use normalizer::NormalizeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Receipt,
    Brand,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::User => "user",
            Entity::Receipt => "receipt",
            Entity::Brand => "brand",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("no such file or directory: '{}'", .0.display())]
    FileNotFound(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("{} is not a JSON array: {source}", path.display())]
    NotAnArray {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{entity} record #{index}: {source}")]
    Record {
        entity: Entity,
        index: usize,
        source: NormalizeError,
    },
    #[error(transparent)]
    Database(#[from] DbError),
}

impl LoadError {
    pub fn record(entity: Entity, index: usize) -> impl FnOnce(NormalizeError) -> Self {
        move |source| Self::Record {
            entity,
            index,
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;

use std::fs;
use std::path::{Path, PathBuf};

use common::config::SnapshotConfig;
use serde_json::Value;

use crate::errors::{LoadError, Result};

/// The three repaired export arrays one load consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotInputs {
    pub users: PathBuf,
    pub receipts: PathBuf,
    pub brands: PathBuf,
}

impl SnapshotInputs {
    pub fn new(
        users: impl Into<PathBuf>,
        receipts: impl Into<PathBuf>,
        brands: impl Into<PathBuf>,
    ) -> Self {
        Self {
            users: users.into(),
            receipts: receipts.into(),
            brands: brands.into(),
        }
    }

    pub fn from_config(config: &SnapshotConfig) -> Self {
        Self::new(&config.users, &config.receipts, &config.brands)
    }

    /// Fails on the first path, in users/receipts/brands order, that does
    /// not exist.
    pub fn verify(&self) -> Result<()> {
        for path in [&self.users, &self.receipts, &self.brands] {
            if !path.exists() {
                return Err(LoadError::FileNotFound(path.clone()));
            }
        }
        Ok(())
    }
}

pub fn read_array(path: &Path) -> Result<Vec<Value>> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| LoadError::NotAnArray {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_names_the_first_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let users = dir.path().join("users.json");
        fs::write(&users, "[]").unwrap();
        let inputs = SnapshotInputs::new(
            &users,
            dir.path().join("receipts.json"),
            dir.path().join("brands.json"),
        );

        match inputs.verify() {
            Err(LoadError::FileNotFound(path)) => {
                assert_eq!(path, dir.path().join("receipts.json"))
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn object_documents_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brands.json");
        fs::write(&path, "{\"barcode\": \"1\"}").unwrap();

        assert!(matches!(
            read_array(&path),
            Err(LoadError::NotAnArray { .. })
        ));
    }
}

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::errors::{AppError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::load_from_path(".")
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        dotenvy::dotenv().ok();

        let config: Self = Config::builder()
            .add_source(
                File::with_name(
                    path.as_ref()
                        .join("config/default")
                        .to_string_lossy()
                        .as_ref(),
                )
                .required(false),
            )
            .add_source(
                File::with_name(
                    path.as_ref()
                        .join("config/local")
                        .to_string_lossy()
                        .as_ref(),
                )
                .required(false),
            )
            .add_source(Environment::default().separator("__"))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.url.is_some() {
            return Ok(());
        }
        if self.database.port == 0 {
            return Err(AppError::invalid("database.port must be non-zero"));
        }
        if self.database.name.trim().is_empty() {
            return Err(AppError::invalid("database.name must not be empty"));
        }
        if self.database.host.trim().is_empty() {
            return Err(AppError::invalid("database.host must not be empty"));
        }
        Ok(())
    }
}

/// Connection parameters for the destination database. `url`, when present,
/// takes precedence over the discrete fields.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "DatabaseConfig::default_host")]
    pub host: String,
    #[serde(default = "DatabaseConfig::default_port")]
    pub port: u16,
    #[serde(default = "DatabaseConfig::default_name")]
    pub name: String,
    #[serde(default = "DatabaseConfig::default_user")]
    pub user: String,
    #[serde(default)]
    pub password: String,
}

impl DatabaseConfig {
    fn default_host() -> String {
        "localhost".to_string()
    }

    const fn default_port() -> u16 {
        5434
    }

    fn default_name() -> String {
        "fetch_db".to_string()
    }

    fn default_user() -> String {
        "postgres".to_string()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: Self::default_host(),
            port: Self::default_port(),
            name: Self::default_name(),
            user: Self::default_user(),
            password: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotConfig {
    #[serde(default = "SnapshotConfig::default_users")]
    pub users: PathBuf,
    #[serde(default = "SnapshotConfig::default_receipts")]
    pub receipts: PathBuf,
    #[serde(default = "SnapshotConfig::default_brands")]
    pub brands: PathBuf,
}

impl SnapshotConfig {
    fn default_users() -> PathBuf {
        PathBuf::from("data/formatted_users.json")
    }

    fn default_receipts() -> PathBuf {
        PathBuf::from("data/formatted_receipts.json")
    }

    fn default_brands() -> PathBuf {
        PathBuf::from("data/formatted_brands.json")
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            users: Self::default_users(),
            receipts: Self::default_receipts(),
            brands: Self::default_brands(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_local_snapshot_database() {
        let config = AppConfig::default();
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 5434);
        assert_eq!(config.database.name, "fetch_db");
        assert_eq!(config.database.user, "postgres");
        assert!(config.database.url.is_none());
        assert_eq!(
            config.snapshot.receipts,
            PathBuf::from("data/formatted_receipts.json")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_layer_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("config")).unwrap();
        std::fs::write(
            dir.path().join("config/default.toml"),
            "[database]\nport = 6543\nname = \"snapshots\"\n\n[snapshot]\nbrands = \"exports/brands.json\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from_path(dir.path()).unwrap();
        assert_eq!(config.database.port, 6543);
        assert_eq!(config.database.name, "snapshots");
        assert_eq!(config.snapshot.brands, PathBuf::from("exports/brands.json"));
        assert_eq!(
            config.snapshot.users,
            PathBuf::from("data/formatted_users.json")
        );
    }

    #[test]
    fn zero_port_is_rejected_without_url() {
        let mut config = AppConfig::default();
        config.database.port = 0;
        assert!(matches!(config.validate(), Err(AppError::Invalid(_))));

        config.database.url = Some("postgres://localhost/fetch_db".into());
        assert!(config.validate().is_ok());
    }
}

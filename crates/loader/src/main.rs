use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use common::config::SnapshotConfig;
use common::{logging, AppConfig};
use loader::{SchemaLoader, SnapshotInputs};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "schema-loader")]
#[command(about = "Recreate the snapshot tables and load users, receipts and brands", long_about = None)]
struct Args {
    /// Directory holding config/default.* and config/local.*
    #[arg(long, default_value = ".")]
    config_dir: PathBuf,

    /// Repaired users array (overrides snapshot.users)
    #[arg(long)]
    users: Option<PathBuf>,

    /// Repaired receipts array (overrides snapshot.receipts)
    #[arg(long)]
    receipts: Option<PathBuf>,

    /// Repaired brands array (overrides snapshot.brands)
    #[arg(long)]
    brands: Option<PathBuf>,
}

impl Args {
    fn apply(self, snapshot: &mut SnapshotConfig) {
        if let Some(users) = self.users {
            snapshot.users = users;
        }
        if let Some(receipts) = self.receipts {
            snapshot.receipts = receipts;
        }
        if let Some(brands) = self.brands {
            snapshot.brands = brands;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::init_logging("info");
    let args = Args::parse();
    let mut config = AppConfig::load_from_path(&args.config_dir)?;
    args.apply(&mut config.snapshot);

    let loader = SchemaLoader::new(SnapshotInputs::from_config(&config.snapshot));
    let summary = loader.run(&config.database).await?;
    info!(
        users = summary.users_inserted,
        duplicate_users = summary.users_skipped,
        receipts = summary.receipts_inserted,
        receipt_items = summary.receipt_items_inserted,
        brands = summary.brands_inserted,
        duplicate_brands = summary.brands_skipped,
        "snapshot loaded"
    );
    Ok(())
}

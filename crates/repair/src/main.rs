use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use common::logging;
use repair::{default_output_path, repair_file};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "repair-lines")]
#[command(about = "Turn a one-object-per-line JSON export into a JSON array", long_about = None)]
struct Args {
    /// Line-delimited export to repair
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Destination file (defaults to formatted_<name> next to the input)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    logging::init_logging("info");
    let args = Args::parse();
    let output = args
        .output
        .unwrap_or_else(|| default_output_path(&args.input));

    let report = repair_file(&args.input, &output)?;
    info!(
        lines = report.lines,
        objects = report.objects,
        framed = report.framed,
        "export repaired"
    );
    println!("Fixed JSON file written to {}", output.display());
    Ok(())
}

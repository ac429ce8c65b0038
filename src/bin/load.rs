use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use shop_ledger::ingest::InputSources;
use shop_ledger::utils::config::{Overrides, Settings};
use shop_ledger::utils::logging;
use shop_ledger::LoadError;

/// Rebuilds the shop database from customers, products, orders,
/// order_items and payments CSV files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the five CSV files
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Database file to (re)create
    #[arg(long)]
    db_path: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    logging::init();
    let args = Args::parse();

    let settings = Settings::resolve(Overrides {
        data_dir: args.data_dir,
        db_path: args.db_path,
    })?;
    info!("Input: {:?}", settings.data_dir);
    info!("DB: {:?}", settings.db_path);

    let sources = InputSources::in_dir(&settings.data_dir);
    match shop_ledger::load(&sources, &settings.db_path) {
        Ok(summary) => {
            println!("Import complete. Database created at: {}", summary.db_path.display());
            print!("{}", summary);
            Ok(ExitCode::SUCCESS)
        }
        Err(LoadError::MissingInputs(missing)) => {
            println!("Missing CSV files: {:?}", missing);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(anyhow::Error::new(e).context(format!("Failed to load {:?}", settings.db_path))),
    }
}

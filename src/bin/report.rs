use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use shop_ledger::database::Store;
use shop_ledger::utils::config::{Overrides, Settings};
use shop_ledger::utils::logging;
use shop_ledger::{Reporter, RowOrder};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Tuple,
    Json,
}

/// Prints every paid order line: customer, order, product, quantity,
/// unit price, payment status and line total.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Database file written by shop-load
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Sort by order id, then product id
    #[arg(long)]
    sorted: bool,

    #[arg(short, long, value_enum, default_value_t = Format::Tuple)]
    format: Format,
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();

    let settings = Settings::resolve(Overrides {
        data_dir: None,
        db_path: args.db_path,
    })?;

    let store = Store::open_read_only(&settings.db_path)
        .with_context(|| format!("Failed to open database {:?}", settings.db_path))?;

    let order = if args.sorted {
        RowOrder::OrderThenProduct
    } else {
        RowOrder::Store
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let emitted = Reporter::new(store.connection())
        .for_each(order, |row| -> Result<()> {
            match args.format {
                Format::Tuple => writeln!(out, "{}", row)?,
                Format::Json => writeln!(out, "{}", serde_json::to_string(&row)?)?,
            }
            Ok(())
        })
        .context("Failed to run report")?;
    out.flush()?;

    info!("Report finished with {} rows", emitted);
    Ok(())
}

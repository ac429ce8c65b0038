use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

pub const DEFAULT_DB_FILE: &str = "ecommerce.db";
pub const DATA_DIR_KEY: &str = "SHOP_DATA_DIR";
pub const DB_PATH_KEY: &str = "SHOP_DB_PATH";

/// Where the loader reads its CSV files and where the store lives.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
}

/// Values that may come from the command line or a `.env` file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub db_path: Option<PathBuf>,
}

impl Settings {
    /// Command line first, then `.env` in the working directory, then defaults:
    /// the working directory for data and `ecommerce.db` inside it.
    pub fn resolve(cli: Overrides) -> Result<Self> {
        let env_path = Path::new(".env");
        let from_env = if env_path.exists() {
            let loaded = load_from_env(env_path)?;
            info!("Loaded settings from .env");
            loaded
        } else {
            Overrides::default()
        };

        let cwd = std::env::current_dir().context("Failed to read working directory")?;
        Ok(Self::merge(cli, from_env, cwd))
    }

    fn merge(cli: Overrides, env: Overrides, cwd: PathBuf) -> Self {
        let data_dir = cli.data_dir.or(env.data_dir).unwrap_or(cwd);
        let db_path = cli
            .db_path
            .or(env.db_path)
            .unwrap_or_else(|| data_dir.join(DEFAULT_DB_FILE));
        debug!("Data dir {:?}, database {:?}", data_dir, db_path);
        Self { data_dir, db_path }
    }
}

fn load_from_env(path: &Path) -> Result<Overrides> {
    let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    let reader = BufReader::new(file);

    let mut overrides = Overrides::default();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.trim() {
                DATA_DIR_KEY => overrides.data_dir = Some(PathBuf::from(value)),
                DB_PATH_KEY => overrides.db_path = Some(PathBuf::from(value)),
                _ => {}
            }
        }
    }

    Ok(overrides)
}

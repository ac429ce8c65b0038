use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::LoadError;
use crate::tables::Table;

/// The five input files, one per table, resolved against a data directory.
#[derive(Debug, Clone)]
pub struct InputSources {
    dir: PathBuf,
}

impl InputSources {
    pub fn in_dir(dir: &Path) -> Self {
        Self { dir: dir.to_path_buf() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, table: Table) -> PathBuf {
        self.dir.join(table.file_name())
    }

    /// Fails with the names of every missing input, or failing that, every
    /// input that cannot be opened for reading. Touches nothing on disk.
    pub fn verify(&self) -> Result<(), LoadError> {
        let mut missing = Vec::new();
        let mut unreadable = Vec::new();
        for table in Table::ALL {
            let path = self.path(table);
            if !path.is_file() {
                missing.push(table.name().to_string());
            } else if let Err(e) = File::open(&path) {
                unreadable.push(format!("{} ({})", table.name(), e));
            }
        }

        if !missing.is_empty() {
            return Err(LoadError::MissingInputs(missing));
        }
        if !unreadable.is_empty() {
            return Err(LoadError::UnreadableInputs(unreadable));
        }
        debug!("All input files readable in {:?}", self.dir);
        Ok(())
    }
}

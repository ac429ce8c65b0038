use std::path::PathBuf;

use thiserror::Error;

use crate::tables::Table;

/// A field that could not be turned into its column type.
#[derive(Debug, Error)]
#[error("{table} line {line}: column `{column}` has invalid value {value:?}: {reason}")]
pub struct CoercionError {
    pub table: Table,
    /// 1-based data row, not counting the header.
    pub line: usize,
    pub column: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Missing CSV files: {0:?}")]
    MissingInputs(Vec<String>),

    #[error("Unreadable CSV files: {}", .0.join("; "))]
    UnreadableInputs(Vec<String>),

    #[error("Could not remove existing database {path:?}: {source}")]
    RemoveStore {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{file:?} is missing required column `{column}`")]
    MissingColumn { file: PathBuf, column: &'static str },

    #[error("Failed to read {file:?}: {source}")]
    Csv {
        file: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Coercion(#[from] CoercionError),

    #[error("Failed to insert into {table}: {source}")]
    Insert {
        table: Table,
        #[source]
        source: rusqlite::Error,
    },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl LoadError {
    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            LoadError::Insert { source, .. } | LoadError::Sqlite(source) => matches!(
                source,
                rusqlite::Error::SqliteFailure(e, _)
                    if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
            ),
            _ => false,
        }
    }
}

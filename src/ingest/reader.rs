use std::fs::File;
use std::path::Path;

use tracing::debug;

use crate::error::LoadError;
use crate::model::FromRaw;

/// Reads every row of a header + rows CSV file into typed records.
///
/// The header must name all of the table's required columns. Rows are
/// coerced in file order and the first bad row aborts the read.
pub fn read_records<T: FromRaw>(path: &Path) -> Result<Vec<T>, LoadError> {
    let csv_err = |source: csv::Error| LoadError::Csv {
        file: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(|e| csv_err(csv::Error::from(e)))?;
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers = reader.headers().map_err(csv_err)?.clone();
    for &column in T::TABLE.required_columns() {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn {
                file: path.to_path_buf(),
                column,
            });
        }
    }

    let mut records = Vec::new();
    for (i, row) in reader.deserialize::<T::Raw>().enumerate() {
        let raw = row.map_err(csv_err)?;
        records.push(T::from_raw(i + 1, raw)?);
    }

    debug!("Parsed {} rows from {:?}", records.len(), path);
    Ok(records)
}

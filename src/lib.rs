//! Loads the shop's CSV exports into a SQLite store and runs the
//! order/payment report against it.

pub mod database;
pub mod error;
pub mod ingest;
pub mod loader;
pub mod model;
pub mod report;
pub mod tables;
pub mod utils;

pub use error::{CoercionError, LoadError};
pub use loader::{load, LoadSummary};
pub use report::{ReportRow, Reporter, RowOrder};
pub use tables::Table;

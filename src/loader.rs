use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::database::{Insertable, LoadTransaction, Store};
use crate::error::LoadError;
use crate::ingest::{read_records, InputSources};
use crate::model::{Customer, FromRaw, Order, OrderItem, Payment, Product};
use crate::tables::Table;

/// What a finished load reports back.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadSummary {
    pub db_path: PathBuf,
    pub replaced_existing: bool,
    pub counts: Vec<(Table, i64)>,
}

impl LoadSummary {
    pub fn count(&self, table: Table) -> Option<i64> {
        self.counts.iter().find(|(t, _)| *t == table).map(|(_, c)| *c)
    }
}

impl fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (table, count) in &self.counts {
            writeln!(f, "{}: {}", table, count)?;
        }
        Ok(())
    }
}

struct Dataset {
    customers: Vec<Customer>,
    products: Vec<Product>,
    orders: Vec<Order>,
    order_items: Vec<OrderItem>,
    payments: Vec<Payment>,
}

impl Dataset {
    fn read(sources: &InputSources) -> Result<Self, LoadError> {
        Ok(Self {
            customers: read_table(sources)?,
            products: read_table(sources)?,
            orders: read_table(sources)?,
            order_items: read_table(sources)?,
            payments: read_table(sources)?,
        })
    }

    fn write(&self, tx: &mut LoadTransaction<'_>) -> Result<(), LoadError> {
        insert(tx, &self.customers)?;
        insert(tx, &self.products)?;
        insert(tx, &self.orders)?;
        insert(tx, &self.order_items)?;
        insert(tx, &self.payments)?;
        Ok(())
    }
}

fn read_table<T: FromRaw>(sources: &InputSources) -> Result<Vec<T>, LoadError> {
    let rows = read_records::<T>(&sources.path(T::TABLE))?;
    info!("Read {} rows for {}", rows.len(), T::TABLE);
    Ok(rows)
}

fn insert<T: Insertable>(tx: &mut LoadTransaction<'_>, rows: &[T]) -> Result<(), LoadError> {
    tx.insert_batch(rows)?;
    Ok(())
}

/// Replaces whatever is at `db_path` with a fresh store built from `sources`.
///
/// Missing inputs are reported before anything on disk is touched. Schema
/// and rows are written in one transaction, so a bad row or a dangling
/// foreign key leaves no tables behind.
pub fn load(sources: &InputSources, db_path: &Path) -> Result<LoadSummary, LoadError> {
    sources.verify()?;

    let (mut store, replaced_existing) = Store::recreate(db_path)?;

    let dataset = Dataset::read(sources)?;

    let mut tx = store.begin()?;
    tx.create_schema()?;
    dataset.write(&mut tx)?;
    tx.commit()?;
    info!("Import complete. Database created at: {:?}", db_path);

    let counts = store.table_counts()?;
    Ok(LoadSummary {
        db_path: db_path.to_path_buf(),
        replaced_existing,
        counts,
    })
}

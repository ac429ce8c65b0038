use std::path::Path;

use rusqlite::{params, Connection, OpenFlags, Statement, Transaction};
use tracing::{debug, warn};

use crate::database::schema::SCHEMA;
use crate::error::LoadError;
use crate::model::{Customer, Order, OrderItem, Payment, Product};
use crate::tables::Table;

/// A row type that can be written into its table with one prepared statement.
pub trait Insertable {
    const TARGET: Table;
    const INSERT_SQL: &'static str;

    fn execute(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize>;
}

impl Insertable for Customer {
    const TARGET: Table = Table::Customers;
    const INSERT_SQL: &'static str = "INSERT INTO customers (id, name, email) VALUES (?1, ?2, ?3)";

    fn execute(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![self.id, self.name, self.email])
    }
}

impl Insertable for Product {
    const TARGET: Table = Table::Products;
    const INSERT_SQL: &'static str =
        "INSERT INTO products (id, name, category, price) VALUES (?1, ?2, ?3, ?4)";

    fn execute(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![self.id, self.name, self.category, self.price])
    }
}

impl Insertable for Order {
    const TARGET: Table = Table::Orders;
    const INSERT_SQL: &'static str =
        "INSERT INTO orders (order_id, customer_id, date) VALUES (?1, ?2, ?3)";

    fn execute(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![self.order_id, self.customer_id, self.date])
    }
}

impl Insertable for OrderItem {
    const TARGET: Table = Table::OrderItems;
    const INSERT_SQL: &'static str =
        "INSERT INTO order_items (order_id, product_id, quantity) VALUES (?1, ?2, ?3)";

    fn execute(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![self.order_id, self.product_id, self.quantity])
    }
}

impl Insertable for Payment {
    const TARGET: Table = Table::Payments;
    const INSERT_SQL: &'static str =
        "INSERT INTO payments (payment_id, order_id, amount, status) VALUES (?1, ?2, ?3, ?4)";

    fn execute(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![self.payment_id, self.order_id, self.amount, self.status])
    }
}

/// Owns the SQLite connection. Dropping the store closes it.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Deletes any existing database at `path` and opens an empty one with
    /// foreign key enforcement switched on.
    ///
    /// Returns the store and whether an old file was replaced.
    pub fn recreate(path: &Path) -> Result<(Self, bool), LoadError> {
        let replaced = path.exists();
        if replaced {
            warn!("Overwriting existing database at {:?}", path);
            std::fs::remove_file(path).map_err(|source| LoadError::RemoveStore {
                path: path.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path)?;
        let store = Self::with_foreign_keys(conn)?;
        Ok((store, replaced))
    }

    /// Opens an existing database without write access. A missing file is an
    /// error rather than an empty new database.
    pub fn open_read_only(path: &Path) -> rusqlite::Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, LoadError> {
        Self::with_foreign_keys(Connection::open_in_memory()?)
    }

    fn with_foreign_keys(conn: Connection) -> Result<Self, LoadError> {
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn begin(&mut self) -> Result<LoadTransaction<'_>, LoadError> {
        let tx = self.conn.transaction()?;
        Ok(LoadTransaction { tx })
    }

    pub fn table_counts(&self) -> rusqlite::Result<Vec<(Table, i64)>> {
        Table::ALL
            .iter()
            .map(|&t| {
                let count: i64 = self.conn.query_row(
                    &format!("SELECT COUNT(*) FROM {}", t.name()),
                    [],
                    |row| row.get(0),
                )?;
                Ok((t, count))
            })
            .collect()
    }
}

/// One all-or-nothing load. Nothing is visible until [`commit`](Self::commit);
/// dropping it rolls everything back.
pub struct LoadTransaction<'a> {
    tx: Transaction<'a>,
}

impl LoadTransaction<'_> {
    pub fn create_schema(&self) -> Result<(), LoadError> {
        self.tx.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Inserts all rows of one table inside a savepoint. A failing row undoes
    /// the whole batch and the error is returned.
    pub fn insert_batch<T: Insertable>(&mut self, rows: &[T]) -> Result<usize, LoadError> {
        let insert_err = |source: rusqlite::Error| LoadError::Insert {
            table: T::TARGET,
            source,
        };

        let sp = self.tx.savepoint()?;
        {
            let mut stmt = sp.prepare(T::INSERT_SQL).map_err(insert_err)?;
            for row in rows {
                row.execute(&mut stmt).map_err(insert_err)?;
            }
        }
        sp.commit()?;

        debug!("Inserted {} rows into {}", rows.len(), T::TARGET);
        Ok(rows.len())
    }

    pub fn commit(self) -> Result<(), LoadError> {
        self.tx.commit()?;
        Ok(())
    }
}

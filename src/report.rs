//! The order/payment report: one inner join across all five tables.
//!
//! An order only shows up when it has at least one payment, and an item only
//! shows up when its product exists. Orders with several payments repeat
//! their items once per payment.

use std::fmt::{self, Write};

use rusqlite::{Connection, Row};
use serde::Serialize;

const REPORT_QUERY: &str = "
    SELECT
        c.name AS customer_name,
        o.order_id,
        p.name AS product_name,
        oi.quantity,
        p.price,
        pay.status AS payment_status,
        (oi.quantity * p.price) AS total_amount
    FROM customers c
    JOIN orders o ON c.id = o.customer_id
    JOIN order_items oi ON o.order_id = oi.order_id
    JOIN products p ON oi.product_id = p.id
    JOIN payments pay ON pay.order_id = o.order_id";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowOrder {
    /// Whatever order SQLite produces. Not stable across query plans.
    #[default]
    Store,
    OrderThenProduct,
}

impl RowOrder {
    fn clause(self) -> &'static str {
        match self {
            RowOrder::Store => "",
            RowOrder::OrderThenProduct => " ORDER BY o.order_id, p.id, oi.order_item_id, pay.payment_id",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub customer_name: String,
    pub order_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub price: f64,
    pub payment_status: String,
    pub total_amount: f64,
}

impl ReportRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            customer_name: row.get(0)?,
            order_id: row.get(1)?,
            product_name: row.get(2)?,
            quantity: row.get(3)?,
            price: row.get(4)?,
            payment_status: row.get(5)?,
            total_amount: row.get(6)?,
        })
    }
}

/// Renders the row as a tuple: `('Alice', 1, 'Widget', 3, 10.0, 'paid', 30.0)`.
impl fmt::Display for ReportRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {}, {}, {}, {})",
            Quoted(&self.customer_name),
            self.order_id,
            Quoted(&self.product_name),
            self.quantity,
            Decimal(self.price),
            Quoted(&self.payment_status),
            Decimal(self.total_amount),
        )
    }
}

/// Single quotes unless the text holds a single quote and no double quote.
/// Backslashes, control whitespace and the chosen quote are escaped.
struct Quoted<'a>(&'a str);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quote = if self.0.contains('\'') && !self.0.contains('"') {
            '"'
        } else {
            '\''
        };

        f.write_char(quote)?;
        for c in self.0.chars() {
            match c {
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                c if c == quote => write!(f, "\\{}", c)?,
                c => f.write_char(c)?,
            }
        }
        f.write_char(quote)
    }
}

/// Whole values keep a fractional part (`30.0`). Magnitudes from 1e16 up or
/// below 1e-4 use exponent form with a signed two-digit exponent (`1e+16`).
struct Decimal(f64);

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_nan() {
            return f.write_str("nan");
        }
        if v.is_infinite() {
            return f.write_str(if v > 0.0 { "inf" } else { "-inf" });
        }

        let magnitude = v.abs();
        if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
            let sci = format!("{:e}", v);
            let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
            let exp: i32 = exp.parse().map_err(|_| fmt::Error)?;
            let sign = if exp < 0 { '-' } else { '+' };
            write!(f, "{}e{}{:02}", mantissa, sign, exp.abs())
        } else if v.fract() == 0.0 {
            write!(f, "{:.1}", v)
        } else {
            write!(f, "{}", v)
        }
    }
}

/// Runs the report against a connection owned by the caller.
pub struct Reporter<'a> {
    conn: &'a Connection,
}

impl<'a> Reporter<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Streams rows to `f` as SQLite produces them. Stops at the first error
    /// from either side.
    pub fn for_each<F, E>(&self, order: RowOrder, mut f: F) -> Result<usize, E>
    where
        F: FnMut(ReportRow) -> Result<(), E>,
        E: From<rusqlite::Error>,
    {
        let sql = format!("{}{}", REPORT_QUERY, order.clause());
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], ReportRow::from_row)?;

        let mut emitted = 0;
        for row in rows {
            f(row?)?;
            emitted += 1;
        }
        Ok(emitted)
    }

    pub fn rows(&self, order: RowOrder) -> rusqlite::Result<Vec<ReportRow>> {
        let mut out = Vec::new();
        self.for_each(order, |row| {
            out.push(row);
            Ok::<(), rusqlite::Error>(())
        })?;
        Ok(out)
    }
}

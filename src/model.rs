//! Typed entity records and the coercion rules that build them from raw CSV text.
//!
//! Raw records keep every field as text so that a bad value surfaces as a
//! [`CoercionError`] naming the table, row and column instead of a generic
//! deserialization failure.

use serde::{Deserialize, Deserializer};

use crate::error::CoercionError;
use crate::tables::Table;

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_id: i64,
    pub customer_id: i64,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub payment_id: String,
    pub order_id: i64,
    pub amount: f64,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct RawCustomer {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct RawProduct {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "present")]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawOrder {
    pub order_id: String,
    pub customer_id: String,
    #[serde(default, deserialize_with = "present")]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawOrderItem {
    pub order_id: String,
    pub product_id: String,
    pub quantity: String,
}

#[derive(Debug, Deserialize)]
pub struct RawPayment {
    pub payment_id: String,
    pub order_id: String,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// `None` only when the column is missing from the header. A blank cell in a
/// present column stays `Some("")`.
fn present<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    String::deserialize(d).map(Some)
}

/// Ties a raw record to its typed entity and table.
pub trait FromRaw: Sized {
    type Raw: for<'de> Deserialize<'de>;
    const TABLE: Table;

    fn from_raw(line: usize, raw: Self::Raw) -> Result<Self, CoercionError>;
}

struct Field {
    table: Table,
    line: usize,
}

impl Field {
    fn int(&self, column: &'static str, value: &str) -> Result<i64, CoercionError> {
        value
            .trim()
            .parse::<i64>()
            .map_err(|e| self.error(column, value, e.to_string()))
    }

    fn decimal(&self, column: &'static str, value: Option<&str>) -> Result<f64, CoercionError> {
        match value {
            None | Some("") => Ok(0.0),
            Some(v) => v
                .trim()
                .parse::<f64>()
                .map_err(|e| self.error(column, v, e.to_string())),
        }
    }

    fn error(&self, column: &'static str, value: &str, reason: String) -> CoercionError {
        CoercionError {
            table: self.table,
            line: self.line,
            column,
            value: value.to_string(),
            reason,
        }
    }
}

impl FromRaw for Customer {
    type Raw = RawCustomer;
    const TABLE: Table = Table::Customers;

    fn from_raw(line: usize, raw: RawCustomer) -> Result<Self, CoercionError> {
        let f = Field { table: Self::TABLE, line };
        Ok(Customer {
            id: f.int("id", &raw.id)?,
            name: raw.name,
            email: raw.email,
        })
    }
}

impl FromRaw for Product {
    type Raw = RawProduct;
    const TABLE: Table = Table::Products;

    fn from_raw(line: usize, raw: RawProduct) -> Result<Self, CoercionError> {
        let f = Field { table: Self::TABLE, line };
        Ok(Product {
            id: f.int("id", &raw.id)?,
            name: raw.name,
            category: raw.category,
            price: f.decimal("price", raw.price.as_deref())?,
        })
    }
}

impl FromRaw for Order {
    type Raw = RawOrder;
    const TABLE: Table = Table::Orders;

    fn from_raw(line: usize, raw: RawOrder) -> Result<Self, CoercionError> {
        let f = Field { table: Self::TABLE, line };
        Ok(Order {
            order_id: f.int("order_id", &raw.order_id)?,
            customer_id: f.int("customer_id", &raw.customer_id)?,
            date: raw.date,
        })
    }
}

impl FromRaw for OrderItem {
    type Raw = RawOrderItem;
    const TABLE: Table = Table::OrderItems;

    fn from_raw(line: usize, raw: RawOrderItem) -> Result<Self, CoercionError> {
        let f = Field { table: Self::TABLE, line };
        Ok(OrderItem {
            order_id: f.int("order_id", &raw.order_id)?,
            product_id: f.int("product_id", &raw.product_id)?,
            quantity: f.int("quantity", &raw.quantity)?,
        })
    }
}

impl FromRaw for Payment {
    type Raw = RawPayment;
    const TABLE: Table = Table::Payments;

    fn from_raw(line: usize, raw: RawPayment) -> Result<Self, CoercionError> {
        let f = Field { table: Self::TABLE, line };
        Ok(Payment {
            payment_id: raw.payment_id,
            order_id: f.int("order_id", &raw.order_id)?,
            amount: f.decimal("amount", raw.amount.as_deref())?,
            status: raw.status.unwrap_or_default(),
        })
    }
}

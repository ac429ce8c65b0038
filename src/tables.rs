use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Customers,
    Products,
    Orders,
    OrderItems,
    Payments,
}

impl Table {
    /// Insertion order. Every table comes after the tables its foreign keys point at.
    pub const ALL: [Table; 5] = [
        Table::Customers,
        Table::Products,
        Table::Orders,
        Table::OrderItems,
        Table::Payments,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Table::Customers => "customers",
            Table::Products => "products",
            Table::Orders => "orders",
            Table::OrderItems => "order_items",
            Table::Payments => "payments",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.csv", self.name())
    }

    /// Columns that must appear in the header. `category`, `price`, `date`,
    /// `amount` and `status` fall back to defaults when absent.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            Table::Customers => &["id", "name", "email"],
            Table::Products => &["id", "name"],
            Table::Orders => &["order_id", "customer_id"],
            Table::OrderItems => &["order_id", "product_id", "quantity"],
            Table::Payments => &["payment_id", "order_id"],
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

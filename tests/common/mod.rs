#![allow(dead_code)]

use std::fs;
use std::path::Path;

pub const CUSTOMERS: &str = "id,name,email\n1,Alice,alice@example.com\n2,Bob,bob@example.com\n";
pub const PRODUCTS: &str = "id,name,category,price\n1,Widget,Tools,10.0\n2,Gadget,,\n";
pub const ORDERS: &str = "order_id,customer_id,date\n1,1,2024-01-05\n2,2,\n";
pub const ORDER_ITEMS: &str = "order_id,product_id,quantity\n1,1,3\n2,2,1\n";
pub const PAYMENTS: &str = "payment_id,order_id,amount,status\nP1,1,30.0,paid\n";

/// Writes the five input files. Pass `None` to leave one out.
pub fn write_inputs(dir: &Path, files: [(&str, Option<&str>); 5]) {
    for (name, body) in files {
        if let Some(body) = body {
            fs::write(dir.join(name), body).unwrap();
        }
    }
}

pub fn write_default_inputs(dir: &Path) {
    write_inputs(
        dir,
        [
            ("customers.csv", Some(CUSTOMERS)),
            ("products.csv", Some(PRODUCTS)),
            ("orders.csv", Some(ORDERS)),
            ("order_items.csv", Some(ORDER_ITEMS)),
            ("payments.csv", Some(PAYMENTS)),
        ],
    );
}

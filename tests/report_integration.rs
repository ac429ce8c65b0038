mod common;

use std::fs;

use rusqlite::Connection;
use shop_ledger::database::schema::SCHEMA;
use shop_ledger::database::Store;
use shop_ledger::ingest::InputSources;
use shop_ledger::{load, ReportRow, Reporter, RowOrder};

fn load_fixture(payments: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    common::write_inputs(
        dir.path(),
        [
            ("customers.csv", Some("id,name,email\n1,Alice,alice@example.com\n")),
            ("products.csv", Some("id,name,category,price\n1,Widget,Tools,10.0\n")),
            ("orders.csv", Some("order_id,customer_id,date\n1,1,2024-01-05\n")),
            ("order_items.csv", Some("order_id,product_id,quantity\n1,1,3\n")),
            ("payments.csv", Some(payments)),
        ],
    );
    let db = dir.path().join("ecommerce.db");
    load(&InputSources::in_dir(dir.path()), &db).unwrap();
    (dir, db)
}

#[test]
fn test_single_paid_order() {
    let (_dir, db) = load_fixture("payment_id,order_id,amount,status\nP1,1,30.0,paid\n");
    let store = Store::open_read_only(&db).unwrap();

    let rows = Reporter::new(store.connection()).rows(RowOrder::Store).unwrap();
    assert_eq!(
        rows,
        vec![ReportRow {
            customer_name: "Alice".to_string(),
            order_id: 1,
            product_name: "Widget".to_string(),
            quantity: 3,
            price: 10.0,
            payment_status: "paid".to_string(),
            total_amount: 30.0,
        }]
    );
    assert_eq!(rows[0].to_string(), "('Alice', 1, 'Widget', 3, 10.0, 'paid', 30.0)");
}

#[test]
fn test_unpaid_order_is_excluded() {
    let (_dir, db) = load_fixture("payment_id,order_id,amount,status\n");
    let store = Store::open_read_only(&db).unwrap();

    let rows = Reporter::new(store.connection()).rows(RowOrder::Store).unwrap();
    assert!(rows.iter().all(|r| r.order_id != 1));
    assert!(rows.is_empty());
}

#[test]
fn test_each_payment_repeats_the_items() {
    let (_dir, db) = load_fixture(
        "payment_id,order_id,amount,status\nP2,1,10.0,refunded\nP1,1,30.0,paid\n",
    );
    let store = Store::open_read_only(&db).unwrap();

    let rows = Reporter::new(store.connection())
        .rows(RowOrder::OrderThenProduct)
        .unwrap();
    let statuses: Vec<_> = rows.iter().map(|r| r.payment_status.as_str()).collect();
    assert_eq!(statuses, vec!["paid", "refunded"]);
}

#[test]
fn test_item_without_product_is_excluded() {
    // Foreign keys are off on a plain connection, so an orphan item can exist.
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(SCHEMA).unwrap();
    conn.execute_batch(
        "INSERT INTO customers VALUES (1, 'Alice', 'alice@example.com');
         INSERT INTO products VALUES (1, 'Widget', NULL, 2.5);
         INSERT INTO orders VALUES (1, 1, NULL);
         INSERT INTO order_items (order_id, product_id, quantity) VALUES (1, 1, 2);
         INSERT INTO order_items (order_id, product_id, quantity) VALUES (1, 42, 5);
         INSERT INTO payments VALUES ('P1', 1, 5.0, 'paid');",
    )
    .unwrap();

    let rows = Reporter::new(&conn).rows(RowOrder::Store).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total_amount, 5.0);
}

#[test]
fn test_for_each_stops_on_callback_error() {
    let (_dir, db) = load_fixture(
        "payment_id,order_id,amount,status\nP1,1,30.0,paid\nP2,1,0,pending\n",
    );
    let store = Store::open_read_only(&db).unwrap();

    let mut seen = 0;
    let result: anyhow::Result<usize> =
        Reporter::new(store.connection()).for_each(RowOrder::Store, |_| {
            seen += 1;
            anyhow::bail!("stop")
        });
    assert!(result.is_err());
    assert_eq!(seen, 1);
}

#[test]
fn test_missing_store_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Store::open_read_only(&dir.path().join("ecommerce.db")).is_err());
}

#[test]
fn test_store_without_schema_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("empty.db");
    fs::write(&db, b"").unwrap();

    let store = Store::open_read_only(&db).unwrap();
    assert!(Reporter::new(store.connection()).rows(RowOrder::Store).is_err());
}

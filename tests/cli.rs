mod common;

use std::process::Command;

#[test]
fn test_load_then_report() {
    let dir = tempfile::tempdir().unwrap();
    common::write_default_inputs(dir.path());

    let load = Command::new(env!("CARGO_BIN_EXE_shop-load"))
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(load.status.success());
    let stdout = String::from_utf8_lossy(&load.stdout);
    assert!(stdout.contains("Import complete."));
    assert!(stdout.contains("order_items: 2"));

    let report = Command::new(env!("CARGO_BIN_EXE_shop-report"))
        .current_dir(dir.path())
        .arg("--sorted")
        .output()
        .unwrap();
    assert!(report.status.success());
    assert_eq!(
        String::from_utf8_lossy(&report.stdout),
        "('Alice', 1, 'Widget', 3, 10.0, 'paid', 30.0)\n"
    );
}

#[test]
fn test_load_reports_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("customers.csv"), common::CUSTOMERS).unwrap();

    let load = Command::new(env!("CARGO_BIN_EXE_shop-load"))
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(!load.status.success());
    assert!(String::from_utf8_lossy(&load.stdout).contains(
        "Missing CSV files: [\"products\", \"orders\", \"order_items\", \"payments\"]"
    ));
    assert!(!dir.path().join("ecommerce.db").exists());
}

#[test]
fn test_report_without_store_fails() {
    let dir = tempfile::tempdir().unwrap();

    let report = Command::new(env!("CARGO_BIN_EXE_shop-report"))
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(!report.status.success());
}

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn hoa(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("hoa").unwrap();
    cmd.env("HOA_LEDGER_DATA_DIR", data_dir.path());
    cmd
}

fn create_invoice(data_dir: &TempDir) {
    hoa(data_dir)
        .args([
            "invoice",
            "create",
            "Green Lawns",
            "--total",
            "100",
            "--number",
            "GL-204",
            "--date",
            "2025-03-01",
            "--gl",
            "5100",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created invoice: GL-204"));
}

#[test]
fn init_creates_settings() {
    let data_dir = TempDir::new().unwrap();

    hoa(&data_dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));
    assert!(data_dir.path().join("config.json").exists());
    assert!(data_dir.path().join("data").join("invoices.json").exists());

    hoa(&data_dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already initialized"));
}

#[test]
fn line_edits_keep_invoice_balanced() {
    let data_dir = TempDir::new().unwrap();
    create_invoice(&data_dir);

    hoa(&data_dir)
        .args(["invoice", "add-line", "GL-204"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added line 1 to GL-204"));

    hoa(&data_dir)
        .args(["invoice", "set", "GL-204", "1", "amount", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("70.00"))
        .stdout(predicate::str::contains("Balanced"));

    hoa(&data_dir)
        .args(["invoice", "total", "GL-204", "120"])
        .assert()
        .success()
        .stdout(predicate::str::contains("changed from 100.00 to 120.00"))
        .stdout(predicate::str::contains("90.00"));

    hoa(&data_dir)
        .args(["invoice", "set", "GL-204", "1", "amount", "-5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("125.00"));

    hoa(&data_dir)
        .args(["invoice", "reconcile", "GL-204"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already balanced"));

    hoa(&data_dir)
        .args(["invoice", "remove-line", "GL-204", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("120.00"));

    hoa(&data_dir)
        .args(["invoice", "remove-line", "GL-204", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing removed"));
}

#[test]
fn approved_invoice_is_locked() {
    let data_dir = TempDir::new().unwrap();
    create_invoice(&data_dir);

    hoa(&data_dir)
        .args(["invoice", "approve", "GL-204"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Approved invoice: GL-204"));

    hoa(&data_dir)
        .args(["invoice", "add-line", "GL-204"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("locked"));

    hoa(&data_dir)
        .args(["invoice", "reopen", "GL-204"])
        .assert()
        .success();

    hoa(&data_dir)
        .args(["invoice", "add-line", "GL-204"])
        .assert()
        .success();
}

#[test]
fn list_show_and_export() {
    let data_dir = TempDir::new().unwrap();
    create_invoice(&data_dir);

    hoa(&data_dir)
        .args(["invoice", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GL-204"))
        .stdout(predicate::str::contains("Green Lawns"));

    hoa(&data_dir)
        .args(["invoice", "show", "gl-204"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vendor:      Green Lawns"))
        .stdout(predicate::str::contains("Balancing line:       100.00"));

    hoa(&data_dir)
        .args(["invoice", "export", "GL-204", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "GL-204,Green Lawns,0,true,5100,Operating,,,100.00",
        ));

    let output = data_dir.path().join("gl-204.json");
    hoa(&data_dir)
        .args(["invoice", "export", "GL-204", "--format", "json", "--output"])
        .arg(&output)
        .assert()
        .success();
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["invoice"]["invoice_number"], "GL-204");
    assert_eq!(json["balance"]["is_balanced"], true);
}

#[test]
fn delete_requires_force() {
    let data_dir = TempDir::new().unwrap();
    create_invoice(&data_dir);

    hoa(&data_dir)
        .args(["invoice", "delete", "GL-204"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Use --force"));

    hoa(&data_dir)
        .args(["invoice", "delete", "GL-204", "--force"])
        .assert()
        .success();

    hoa(&data_dir)
        .args(["invoice", "show", "GL-204"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn invalid_total_is_rejected() {
    let data_dir = TempDir::new().unwrap();

    hoa(&data_dir)
        .args(["invoice", "create", "Green Lawns", "--total", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid total"));
}

#[test]
fn duplicate_scan_reports_groups() {
    let data_dir = TempDir::new().unwrap();
    let march = data_dir.path().join("march.csv");
    let april = data_dir.path().join("april.csv");
    fs::write(&march, "vendor,number,amount\nGreen Lawns,GL-1,100\nPool Pros,PP-9,40\n").unwrap();
    fs::write(&april, "number,vendor,amount\nGL-1,GREEN LAWNS,100\n").unwrap();

    hoa(&data_dir)
        .args(["duplicates", "scan"])
        .arg(&march)
        .arg(&april)
        .assert()
        .success()
        .stdout(predicate::str::contains("Scanned 3 records in 2 file(s)"))
        .stdout(predicate::str::contains("Found 1 duplicate group(s)"))
        .stdout(predicate::str::contains("april.csv row 1"));

    hoa(&data_dir)
        .args(["duplicates", "scan", "--strict"])
        .arg(&march)
        .arg(&april)
        .assert()
        .success()
        .stdout(predicate::str::contains("No duplicates found."));

    hoa(&data_dir)
        .args(["duplicates", "scan", "--threshold", "2"])
        .arg(&march)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Confidence threshold"));
}

#[test]
fn audit_lists_changes() {
    let data_dir = TempDir::new().unwrap();
    create_invoice(&data_dir);

    hoa(&data_dir)
        .args(["invoice", "total", "GL-204", "150"])
        .assert()
        .success();

    hoa(&data_dir)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Invoice"))
        .stdout(predicate::str::contains("UPDATE Invoice"))
        .stdout(predicate::str::contains("total: 100.0 -> 150.0"));
}

#[test]
fn reconcile_repairs_invoice_stored_without_lines() {
    let data_dir = TempDir::new().unwrap();
    create_invoice(&data_dir);

    let invoices_file = data_dir.path().join("data").join("invoices.json");
    let mut data: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&invoices_file).unwrap()).unwrap();
    data["invoices"][0].as_object_mut().unwrap().remove("lines");
    fs::write(&invoices_file, data.to_string()).unwrap();

    hoa(&data_dir)
        .args(["invoice", "show", "GL-204"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NOT BALANCED"));

    hoa(&data_dir)
        .args(["invoice", "reconcile", "GL-204"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Balancing line of GL-204 set to 100.00"));

    hoa(&data_dir)
        .args(["invoice", "total", "GL-204", "150"])
        .assert()
        .success()
        .stdout(predicate::str::contains("150.00"))
        .stdout(predicate::str::contains("Balanced"));
}

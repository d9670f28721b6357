#![cfg(not(feature = "storage-rocksdb"))]

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn test_corrupted_chain_file_reads_as_empty() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("pdfx_mock_chain.json"), "{ not json").unwrap();

    let mut cmd = Command::new(cargo_bin!("pdfx-sandbox"));
    cmd.args(["chain", "list"]).arg("--db-path").arg(dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::eq("id,type,timestamp,payload\n"));
}

#[test]
fn test_run_recovers_from_corrupted_payments_file() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("pdfx_mock_payments.json"), "[{\"id\": 1").unwrap();

    let mut cmd = Command::new(cargo_bin!("pdfx-sandbox"));
    cmd.args(["run", "--preset", "pay-to-view"])
        .arg("--db-path")
        .arg(dir.path());
    cmd.assert().success();

    let mut list = Command::new(cargo_bin!("pdfx-sandbox"));
    list.args(["payments", "list"]).arg("--db-path").arg(dir.path());
    list.assert()
        .success()
        .stdout(predicate::str::contains(",1000,usd,pending,"));
}

#[test]
fn test_unknown_session_cannot_be_failed() {
    let dir = tempdir().unwrap();

    let mut cmd = Command::new(cargo_bin!("pdfx-sandbox"));
    cmd.args(["payments", "fail", "mockpay_missing"])
        .arg("--db-path")
        .arg(dir.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No pending payment session mockpay_missing"));
}

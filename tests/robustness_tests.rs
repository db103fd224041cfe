use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_malformed_scenario_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("malformed.csv");
    let mut wtr = csv::Writer::from_path(&path).unwrap();
    wtr.write_record(["at", "kind", "value"]).unwrap();

    // Valid payment
    wtr.write_record(["0", "payment", "PAYMENT_OK,ok"]).unwrap();
    // Unknown step kind
    wtr.write_record(["10", "jump", "1"]).unwrap();
    // Non-numeric timestamp
    wtr.write_record(["soon", "press", "1"]).unwrap();
    // Channel out of range
    wtr.write_record(["20", "press", "9"]).unwrap();
    // Valid press
    wtr.write_record(["100", "press", "1"]).unwrap();
    wtr.flush().unwrap();
    drop(wtr);

    let mut cmd = Command::new(cargo_bin!("relaygate"));
    cmd.arg(&path);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading scenario row"))
        .stderr(predicate::str::contains("Skipping scenario step"))
        .stdout(predicate::str::contains("-relay1on30,ok."))
        .stdout(predicate::str::contains("-relay1off,ok."));
}

#[test]
fn test_unrecognized_payment_lines() {
    let mut cmd = assert_cmd::Command::new(cargo_bin!("relaygate"));
    cmd.write_stdin("HELLO\npayment_ok\n\nPAYMENT_OK:-10,\npress 0\npress 1\n");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Ignoring console line"))
        .stdout(predicate::str::contains("unrecognized message: HELLO"))
        .stdout(predicate::str::contains("unrecognized message: payment_ok"))
        .stdout(predicate::str::contains("-relay1on0."))
        .stdout(predicate::str::contains("-relay1off."));
}

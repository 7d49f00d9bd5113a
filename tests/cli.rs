use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn tendies(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tendies").unwrap();
    cmd.env("HOME", home).env("NO_COLOR", "1").env_remove("TENDIES_LOG");
    cmd
}

fn write_submission(dir: &Path, json: &str) -> String {
    let path = dir.join("submission.json");
    std::fs::write(&path, json).unwrap();
    path.to_string_lossy().into_owned()
}

const TWO_ROWS: &str = r#"[
    ["description.1", "Lunch"],
    ["category.1", "Eating Out"],
    ["date.1", "2026-10-18"],
    ["payer.1", "Self"],
    ["amount.1", "12.50"],
    ["description.2", "Rent"],
    ["category.2", "Housing"],
    ["date.2", "2026-10-01"],
    ["payer.2", "Self"],
    ["amount.2", "1500"]
]"#;

#[test]
fn test_budget_check_accepts_full_split() {
    let home = tempfile::tempdir().unwrap();
    tendies(home.path())
        .args(["budget", "check", "--amount", "5200", "--share", "Food=60", "--share", "Rent=40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Weekly amount: $100.00"))
        .stdout(predicate::str::contains("$3,120.00"))
        .stdout(predicate::str::contains("add up to 100%"));
}

#[test]
fn test_budget_check_rejects_partial_split() {
    let home = tempfile::tempdir().unwrap();
    tendies(home.path())
        .args(["budget", "check", "--amount", "5200", "--share", "Food=60", "--share", "Rent=30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Your spend categories budgets add up to 90% and it must be equal to 100%",
        ));
}

#[test]
fn test_budget_check_ignores_unchecked_categories() {
    let home = tempfile::tempdir().unwrap();
    tendies(home.path())
        .args([
            "budget", "check", "--amount", "1000", "--share", "Food=100", "--unchecked", "Travel",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Travel").not());
}

#[test]
fn test_budget_years_marks_existing() {
    let home = tempfile::tempdir().unwrap();
    tendies(home.path())
        .args(["budget", "years", "--existing", "2021"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* 2021"))
        .stdout(predicate::str::contains("  2020"));
}

#[test]
fn test_init_seeds_data_dir() {
    let home = tempfile::tempdir().unwrap();
    let data = home.path().join("books");
    tendies(home.path())
        .args(["init", "--data-dir", data.to_str().unwrap(), "--name", "Sam"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Data directory:"));

    assert!(data.join("categories.json").exists());
    assert!(data.join("payers.json").exists());
    assert!(data.join("submissions").is_dir());
    let settings =
        std::fs::read_to_string(home.path().join(".config/tendies/settings.json")).unwrap();
    assert!(settings.contains("Sam"));
}

#[test]
fn test_decode_prints_table_with_total() {
    let home = tempfile::tempdir().unwrap();
    let file = write_submission(home.path(), TWO_ROWS);
    tendies(home.path())
        .args(["decode", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lunch"))
        .stdout(predicate::str::contains("Total: $1,512.50"));
}

#[test]
fn test_decode_csv() {
    let home = tempfile::tempdir().unwrap();
    let file = write_submission(home.path(), TWO_ROWS);
    tendies(home.path())
        .args(["decode", &file, "--csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("description,category,date,payer,amount\n"))
        .stdout(predicate::str::contains("Rent,Housing,2026-10-01,Self,1500.00"));
}

#[test]
fn test_decode_checks_category_list() {
    let home = tempfile::tempdir().unwrap();
    let file = write_submission(home.path(), TWO_ROWS);
    let categories = home.path().join("categories.json");
    std::fs::write(&categories, r#"[{"name": "Eating Out"}]"#).unwrap();
    let payers = home.path().join("payers.json");
    std::fs::write(&payers, "[]").unwrap();

    tendies(home.path())
        .args([
            "decode",
            &file,
            "--categories",
            categories.to_str().unwrap(),
            "--payers",
            payers.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Housing"));
}

#[test]
fn test_decode_rejects_gap_in_rows() {
    let home = tempfile::tempdir().unwrap();
    let file = write_submission(
        home.path(),
        r#"[
            ["description.2", "Rent"],
            ["category.2", "Housing"],
            ["date.2", "2026-10-01"],
            ["payer.2", "Self"],
            ["amount.2", "1500"]
        ]"#,
    );
    tendies(home.path())
        .args(["decode", &file])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));
}

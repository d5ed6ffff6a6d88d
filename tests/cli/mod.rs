//! Argument handling, file validation and connection failures
//!
//! None of these runs may reach the database, so most of them check that
//! the database file was never created.

use crate::helpers::{sqlbatch, Fixture};

use predicates::prelude::*;

#[test]
fn test_no_files_is_usage_error() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = Fixture::new()?;

    fixture
        .command()?
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Usage"));

    assert!(!fixture.db_path().exists());
    Ok(())
}

#[test]
fn test_missing_dburl_is_usage_error() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = Fixture::new()?;
    let file = fixture.sql_file("a.sql", "SELECT 1;")?;

    sqlbatch()?
        .arg(file)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--dburl"));
    Ok(())
}

#[test]
fn test_dburl_from_environment() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = Fixture::new()?;
    let file = fixture.sql_file("a.sql", "SELECT 1 AS one;")?;

    sqlbatch()?
        .env("SQLBATCH_DBURL", fixture.url())
        .arg("-q")
        .arg(file)
        .assert()
        .success()
        .stdout("one\n1\n");
    Ok(())
}

#[test]
fn test_directory_is_rejected_before_connecting() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = Fixture::new()?;

    fixture
        .command()?
        .arg(fixture.dir())
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("was not a file"));

    assert!(!fixture.db_path().exists());
    Ok(())
}

#[test]
fn test_missing_file_is_rejected_before_connecting() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = Fixture::new()?;
    let good = fixture.sql_file("good.sql", "CREATE TABLE t (x);")?;
    let missing = fixture.dir().join("missing.sql");

    fixture
        .command()?
        .arg(good)
        .arg(&missing)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing.sql"));

    assert!(!fixture.db_path().exists());
    Ok(())
}

#[test]
fn test_invalid_tx_fails_before_file_validation() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = Fixture::new()?;
    let missing = fixture.dir().join("missing.sql");

    fixture
        .command()?
        .args(["--tx", "all"])
        .arg(&missing)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid value"))
        .stderr(predicate::str::contains("was not a file").not());

    assert!(!fixture.db_path().exists());
    Ok(())
}

#[test]
fn test_unknown_driver_exit_code() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = Fixture::new()?;
    let file = fixture.sql_file("a.sql", "SELECT 1;")?;

    sqlbatch()?
        .args(["-d", "postgres://localhost/db"])
        .arg(file)
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("Error loading driver"));
    Ok(())
}

#[test]
fn test_connection_failure_runs_no_file() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = Fixture::new()?;
    let file = fixture.sql_file("a.sql", "SELECT 1;")?;
    let unreachable = fixture.dir().join("no").join("such").join("dir.db");

    sqlbatch()?
        .arg("-d")
        .arg(format!("sqlite:{}", unreachable.display()))
        .arg(file)
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("Error connecting to url"));
    Ok(())
}

#[test]
fn test_password_is_never_logged() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = Fixture::new()?;
    let file = fixture.sql_file("a.sql", "SELECT 1;")?;

    fixture
        .command()?
        .args(["-u", "scott", "-p", "s3cr3t-value"])
        .arg(file)
        .assert()
        .success()
        .stderr(predicate::str::contains("with username: scott"))
        .stderr(predicate::str::contains("password: <omitted>"))
        .stderr(predicate::str::contains("s3cr3t-value").not());
    Ok(())
}

#[test]
fn test_quiet_suppresses_logging_only() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = Fixture::new()?;
    let file = fixture.sql_file("a.sql", "SELECT 2 AS two;")?;

    fixture
        .command()?
        .arg("-q")
        .arg(file)
        .assert()
        .success()
        .stdout("two\n2\n")
        .stderr("");
    Ok(())
}

#[test]
fn test_logs_stay_off_stdout() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = Fixture::new()?;
    let file = fixture.sql_file("a.sql", "SELECT 2 AS two;")?;

    fixture
        .command()?
        .arg(file)
        .assert()
        .success()
        .stdout("two\n2\n")
        .stderr(predicate::str::contains("Executing command"))
        .stderr(predicate::str::contains("Using Transaction Type: NONE"));
    Ok(())
}

#[test]
fn test_help_lists_options() -> Result<(), Box<dyn std::error::Error>> {
    sqlbatch()?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dburl"))
        .stdout(predicate::str::contains("--tx"))
        .stdout(predicate::str::contains("--nocolumns"));
    Ok(())
}

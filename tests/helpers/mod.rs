//! Test helpers for sqlbatch integration tests
//!
//! Each test gets its own temporary directory holding a SQLite database and
//! the SQL files to run against it. The database is inspected afterwards with
//! a separate rusqlite connection, so only committed changes are visible.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use rusqlite::Connection;
use tempfile::TempDir;

/// A scratch database plus a place to put SQL files
pub struct Fixture {
    dir: TempDir,
    db_path: PathBuf,
}

impl Fixture {
    /// Create an empty fixture; the database file does not exist yet
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let dir = create_temp_dir()?;
        let db_path = dir.path().join("test.db");
        Ok(Fixture { dir, db_path })
    }

    /// Create a fixture whose database already has a `log (marker TEXT)` table
    pub fn with_log_table() -> Result<Self, Box<dyn std::error::Error>> {
        let fixture = Fixture::new()?;
        fixture.setup("CREATE TABLE log (marker TEXT NOT NULL);")?;
        Ok(fixture)
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Connection URL for the fixture database
    pub fn url(&self) -> String {
        format!("sqlite:{}", self.db_path.display())
    }

    /// Run SQL directly against the database, committed immediately
    pub fn setup(&self, sql: &str) -> Result<(), Box<dyn std::error::Error>> {
        let conn = Connection::open(&self.db_path)?;
        conn.execute_batch(sql)?;
        Ok(())
    }

    /// Write a SQL file into the fixture directory and return its path
    pub fn sql_file(&self, name: &str, sql: &str) -> Result<String, Box<dyn std::error::Error>> {
        let path = self.dir.path().join(name);
        fs::write(&path, sql)?;
        Ok(path.to_str().ok_or("non-UTF-8 temp path")?.to_string())
    }

    /// File that appends `marker` to the log table
    pub fn marker_file(&self, marker: &str) -> Result<String, Box<dyn std::error::Error>> {
        self.sql_file(
            &format!("{marker}.sql"),
            &format!("INSERT INTO log (marker) VALUES ('{marker}');"),
        )
    }

    /// File whose command always fails
    pub fn failing_file(&self) -> Result<String, Box<dyn std::error::Error>> {
        self.sql_file("fail.sql", "INSERT INTO no_such_table VALUES (1);")
    }

    /// Committed markers in insertion order
    pub fn markers(&self) -> Result<Vec<String>, Box<dyn std::error::Error>> {
        let conn = Connection::open(&self.db_path)?;
        let mut stmt = conn.prepare("SELECT marker FROM log ORDER BY rowid")?;
        let markers = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(markers)
    }

    /// The sqlbatch binary pointed at the fixture database
    pub fn command(&self) -> Result<Command, Box<dyn std::error::Error>> {
        let mut cmd = sqlbatch()?;
        cmd.arg("--dburl").arg(self.url());
        Ok(cmd)
    }
}

/// The sqlbatch binary with no configuration inherited from the environment
pub fn sqlbatch() -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("sqlbatch")?;
    cmd.env_remove("SQLBATCH_DBURL")
        .env_remove("SQLBATCH_USERNAME")
        .env_remove("SQLBATCH_PASSWORD")
        .env_remove("RUST_LOG");
    Ok(cmd)
}

/// Helper function to create a temp directory for tests, respecting CARGO_TARGET_TMPDIR if set
pub fn create_temp_dir() -> Result<TempDir, Box<dyn std::error::Error>> {
    if let Ok(cargo_target_tmpdir) = env::var("CARGO_TARGET_TMPDIR") {
        fs::create_dir_all(&cargo_target_tmpdir)?;
        Ok(TempDir::new_in(cargo_target_tmpdir)?)
    } else {
        Ok(TempDir::new()?)
    }
}

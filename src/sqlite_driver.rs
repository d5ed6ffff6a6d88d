//! SQLite driver for sqlbatch
//!
//! Accepted URL forms:
//!
//! - `sqlite::memory:` for a private in-memory database
//! - `sqlite:path/to/file.db` or `sqlite://path/to/file.db`
//! - `jdbc:sqlite:path/to/file.db`
//!
//! SQLite has no notion of users, so credentials are accepted and ignored.
//!
//! Manual-commit mode is an open deferred transaction. Committing or rolling
//! back immediately opens the next one, so the session never falls back to
//! auto-commit while the run is in progress. Closing the connection with the
//! transaction still open discards it.

use rusqlite::types::ValueRef;
use tracing::debug;

use crate::connection::{Connection, Driver, Statement};
use crate::error::{DbError, DbResult};
use crate::outcome::ExecutionOutcome;

const MEMORY_DATABASE: &str = ":memory:";

/// Driver for `sqlite:` and `jdbc:sqlite:` URLs
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDriver;

impl SqliteDriver {
    /// The database location named by a URL, if the URL is a SQLite one
    pub fn database_path(url: &str) -> Option<&str> {
        let rest = url.strip_prefix("jdbc:").unwrap_or(url);
        let rest = rest.strip_prefix("sqlite:")?;
        Some(rest.strip_prefix("//").unwrap_or(rest))
    }
}

impl Driver for SqliteDriver {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn accepts(&self, url: &str) -> bool {
        SqliteDriver::database_path(url).is_some()
    }

    fn connect(
        &self,
        url: &str,
        username: Option<&str>,
        password: Option<&str>,
    ) -> DbResult<Box<dyn Connection>> {
        let path = SqliteDriver::database_path(url)
            .filter(|path| !path.is_empty())
            .ok_or_else(|| DbError::UnsupportedUrl(url.to_string()))?;

        if username.is_some() || password.is_some() {
            debug!("sqlite ignores credentials");
        }

        let conn = if path == MEMORY_DATABASE {
            rusqlite::Connection::open_in_memory()?
        } else {
            rusqlite::Connection::open(path)?
        };

        Ok(Box::new(SqliteConnection {
            conn,
            manual_commit: false,
        }))
    }
}

/// An open SQLite session
pub struct SqliteConnection {
    conn: rusqlite::Connection,
    manual_commit: bool,
}

impl SqliteConnection {
    /// Re-open a transaction if the session is in manual-commit mode but
    /// none is active, e.g. after a submitted command ran its own COMMIT
    fn ensure_transaction(&self) -> DbResult<()> {
        if self.manual_commit && self.conn.is_autocommit() {
            self.conn.execute_batch("BEGIN")?;
        }
        Ok(())
    }

    /// End the active transaction, if any, and start the next one
    fn finish_transaction(&self, verb: &str) -> DbResult<()> {
        if !self.conn.is_autocommit() {
            self.conn.execute_batch(verb)?;
        }
        self.ensure_transaction()
    }

    fn total_changes(&self) -> DbResult<u64> {
        let total: i64 = self
            .conn
            .query_row("SELECT total_changes()", [], |row| row.get(0))?;
        Ok(total.max(0) as u64)
    }
}

impl Connection for SqliteConnection {
    fn disable_auto_commit(&mut self) -> DbResult<()> {
        if self.conn.is_autocommit() {
            self.conn.execute_batch("BEGIN")?;
        }
        self.manual_commit = true;
        Ok(())
    }

    fn create_statement(&self) -> DbResult<Box<dyn Statement + '_>> {
        Ok(Box::new(SqliteStatement { connection: self }))
    }

    fn commit(&self) -> DbResult<()> {
        self.finish_transaction("COMMIT")
    }

    fn rollback(&self) -> DbResult<()> {
        self.finish_transaction("ROLLBACK")
    }

    fn close(self: Box<Self>) -> DbResult<()> {
        self.conn.close().map_err(|(_, err)| DbError::from(err))
    }
}

/// Submits commands on a borrowed SQLite session
pub struct SqliteStatement<'c> {
    connection: &'c SqliteConnection,
}

impl Statement for SqliteStatement<'_> {
    /// Run every statement in `command`, in order
    ///
    /// The outcome is the result set of the last row-returning statement, or
    /// the total number of rows changed when no statement returned rows.
    fn execute(&mut self, command: &str) -> DbResult<ExecutionOutcome> {
        let connection = self.connection;
        connection.ensure_transaction()?;

        let mut result_set = None;
        let mut changed = 0;
        let mut batch = rusqlite::Batch::new(&connection.conn, command);
        while let Some(mut stmt) = batch.next()? {
            if stmt.column_count() > 0 {
                result_set = Some(query_rows(&mut stmt)?);
                continue;
            }

            let before = connection.total_changes()?;
            let count = stmt.execute([])?;
            // changes() is stale after DDL, so only trust it when something changed
            if connection.total_changes()? > before {
                changed += count as u64;
            }
        }

        Ok(result_set.unwrap_or(ExecutionOutcome::RowCount(changed)))
    }
}

fn query_rows(stmt: &mut rusqlite::Statement<'_>) -> DbResult<ExecutionOutcome> {
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();

    let mut rows = Vec::new();
    let mut results = stmt.query([])?;
    while let Some(row) = results.next()? {
        let mut values = Vec::with_capacity(columns.len());
        for idx in 0..columns.len() {
            values.push(render_value(row.get_ref(idx)?));
        }
        rows.push(values);
    }

    Ok(ExecutionOutcome::ResultSet { columns, rows })
}

/// Render a SQLite value the way it is printed in result rows
fn render_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "null".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

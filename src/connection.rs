//! Database connections for sqlbatch
//!
//! This module defines the interface between the execution engine and a
//! database driver, and the connection manager that picks a driver for a
//! URL and opens the single connection a run uses.
//!
//! Connections handed out by [`connect`] are always in manual-commit mode;
//! the engine decides every commit and the reporter every rollback.

use tracing::{debug, info};

use crate::error::{BatchError, BatchResult, DbError, DbResult};
use crate::outcome::ExecutionOutcome;
use crate::sqlite_driver::SqliteDriver;

/// A database driver that can open connections for some URLs
pub trait Driver {
    /// Short driver name for diagnostics
    fn name(&self) -> &'static str;

    /// Whether this driver understands the URL
    fn accepts(&self, url: &str) -> bool;

    /// Open a connection
    ///
    /// # Arguments
    /// * `url` - A URL for which `accepts` returned true
    /// * `username` - Optional user name
    /// * `password` - Optional password
    fn connect(
        &self,
        url: &str,
        username: Option<&str>,
        password: Option<&str>,
    ) -> DbResult<Box<dyn Connection>>;
}

/// An open database session
pub trait Connection {
    /// Switch to manual-commit mode for the rest of the session
    fn disable_auto_commit(&mut self) -> DbResult<()>;

    /// Create a handle for submitting commands
    fn create_statement(&self) -> DbResult<Box<dyn Statement + '_>>;

    /// Make all changes since the last commit durable
    fn commit(&self) -> DbResult<()>;

    /// Discard all changes since the last commit
    fn rollback(&self) -> DbResult<()>;

    /// Close the session
    fn close(self: Box<Self>) -> DbResult<()>;
}

/// A handle for submitting commands on a connection
pub trait Statement {
    /// Submit `command` verbatim as one command
    ///
    /// The driver decides whether the text is one statement, several, or
    /// invalid.
    fn execute(&mut self, command: &str) -> DbResult<ExecutionOutcome>;
}

/// The drivers available to a run, in lookup order
pub struct DriverRegistry {
    drivers: Vec<Box<dyn Driver>>,
}

impl DriverRegistry {
    /// An empty registry
    pub fn new() -> Self {
        DriverRegistry {
            drivers: Vec::new(),
        }
    }

    /// A registry holding every driver built into this binary
    pub fn with_builtin_drivers() -> Self {
        let mut registry = DriverRegistry::new();
        registry.register(Box::new(SqliteDriver));
        registry
    }

    /// Add a driver after those already registered
    pub fn register(&mut self, driver: Box<dyn Driver>) {
        self.drivers.push(driver);
    }

    /// The first registered driver that accepts `url`
    pub fn driver_for(&self, url: &str) -> BatchResult<&dyn Driver> {
        self.drivers
            .iter()
            .find(|driver| driver.accepts(url))
            .map(|driver| &**driver)
            .ok_or_else(|| BatchError::DriverNotFound {
                url: url.to_string(),
                available: self.names(),
            })
    }

    fn names(&self) -> String {
        let names: Vec<&str> = self.drivers.iter().map(|driver| driver.name()).collect();
        if names.is_empty() {
            "none".to_string()
        } else {
            names.join(", ")
        }
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        DriverRegistry::with_builtin_drivers()
    }
}

/// Resolve a driver for `url` and open a manual-commit connection
///
/// # Returns
/// * `Ok(Box<dyn Connection>)` with auto-commit disabled
/// * `Err(BatchError::DriverNotFound)` if no driver accepts the URL
/// * `Err(BatchError::Connect)` if opening or configuring the connection fails
pub fn connect(
    registry: &DriverRegistry,
    url: &str,
    username: Option<&str>,
    password: Option<&str>,
) -> BatchResult<Box<dyn Connection>> {
    info!(
        "Connecting to database url: \"{}\"{}{}",
        url,
        username
            .map(|user| format!(" with username: {user}"))
            .unwrap_or_default(),
        if password.is_some() {
            ", password: <omitted>"
        } else {
            ""
        }
    );

    let driver = registry.driver_for(url)?;
    debug!(driver = driver.name(), "resolved driver");

    let connect_error = |source: DbError| BatchError::Connect {
        url: url.to_string(),
        source,
    };

    let mut connection = driver
        .connect(url, username, password)
        .map_err(connect_error)?;
    connection.disable_auto_commit().map_err(connect_error)?;

    Ok(connection)
}

//! Configuration module for sqlbatch
//!
//! This module provides a centralized configuration structure for a run.
//! It is built once at startup and passed by reference to every component
//! that needs a setting, so nothing in the crate reads global state.

use std::fmt;

use crate::transaction::TransactionMode;

/// Settings for one run
///
/// The `Debug` output never includes the password.
#[derive(Clone)]
pub struct RunConfig {
    /// Connection URL
    db_url: String,

    /// Optional database user name
    username: Option<String>,

    /// Optional database password
    password: Option<String>,

    /// SQL files in execution order
    files: Vec<String>,

    /// When to commit
    tx_mode: TransactionMode,

    /// Whether to emit diagnostic logging
    verbose: bool,

    /// Whether to print a header line before result rows
    print_columns: bool,

    /// Whether to quote values that contain delimiters
    quote: bool,
}

impl RunConfig {
    /// Create a configuration with defaults for everything but the URL and files
    ///
    /// Defaults: no credentials, `NONE` transactions, verbose logging,
    /// column headers on, no quoting.
    pub fn new(db_url: impl Into<String>, files: Vec<String>) -> Self {
        Self {
            db_url: db_url.into(),
            username: None,
            password: None,
            files,
            tx_mode: TransactionMode::None,
            verbose: true,
            print_columns: true,
            quote: false,
        }
    }

    /// Set the credentials
    pub fn with_credentials(mut self, username: Option<String>, password: Option<String>) -> Self {
        self.username = username;
        self.password = password;
        self
    }

    /// Set the transaction mode
    pub fn with_tx_mode(mut self, tx_mode: TransactionMode) -> Self {
        self.tx_mode = tx_mode;
        self
    }

    /// Set whether diagnostic logging is enabled
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set whether the header line is printed
    pub fn with_print_columns(mut self, print_columns: bool) -> Self {
        self.print_columns = print_columns;
        self
    }

    /// Set whether values are quoted when needed
    pub fn with_quote(mut self, quote: bool) -> Self {
        self.quote = quote;
        self
    }

    /// Get the connection URL
    pub fn db_url(&self) -> &str {
        &self.db_url
    }

    /// Get the user name
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Get the password
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Get the file paths
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Get the transaction mode
    pub fn tx_mode(&self) -> TransactionMode {
        self.tx_mode
    }

    /// Get the verbose flag
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Get whether column names are printed
    pub fn print_columns(&self) -> bool {
        self.print_columns
    }

    /// Get whether values are quoted
    pub fn quote(&self) -> bool {
        self.quote
    }
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("db_url", &self.db_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<omitted>"))
            .field("files", &self.files)
            .field("tx_mode", &self.tx_mode)
            .field("verbose", &self.verbose)
            .field("print_columns", &self.print_columns)
            .field("quote", &self.quote)
            .finish()
    }
}

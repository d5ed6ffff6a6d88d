//! Error handling for sqlbatch
//!
//! This module defines the error types for the sqlbatch application.
//! There are two layers:
//!
//! - [`DbError`] is what a database driver reports. It knows nothing about
//!   files, runs or exit codes.
//! - [`BatchError`] is the run-level taxonomy. Every failure a run can end in
//!   is one variant, and every variant maps to exactly one process exit code
//!   through [`BatchError::exit_code`].
//!
//! The module uses thiserror to minimize boilerplate code and keep messages
//! consistent throughout the codebase.

use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by a database driver
#[derive(Error, Debug)]
pub enum DbError {
    /// Error raised by the SQLite engine
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// The URL was handed to a driver that cannot interpret it
    #[error("unsupported connection url '{0}'")]
    UnsupportedUrl(String),

    /// Any other driver-specific failure
    #[error("{0}")]
    Other(String),
}

/// Result type alias for driver operations
pub type DbResult<T> = std::result::Result<T, DbError>;

/// BatchError represents every way a sqlbatch run can fail
///
/// The variants follow the order in which a run can fail: argument and file
/// validation, driver resolution and connection, statement creation, the
/// per-file read/execute/commit cycle, and finally cleanup.
#[derive(Error, Debug)]
pub enum BatchError {
    /// Bad or missing command-line arguments
    #[error("{0}")]
    Usage(String),

    /// No file paths were supplied
    #[error("No files were specified")]
    NoFiles,

    /// A path that does not resolve to an existing regular file
    #[error("File \"{0}\" was not a file.")]
    NotAFile(String),

    /// A regular file that cannot be opened for reading
    #[error("File \"{path}\" was not readable.")]
    NotReadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// No registered driver accepts the connection URL
    #[error("Error loading driver for url: \"{url}\". Is the driver for this url scheme built in? Available drivers: {available}")]
    DriverNotFound { url: String, available: String },

    /// The driver failed to open the connection
    #[error("Error connecting to url: \"{url}\".")]
    Connect {
        url: String,
        #[source]
        source: DbError,
    },

    /// The connection could not hand out a statement handle
    #[error("Error while creating DB statement.")]
    CreateStatement(#[source] DbError),

    /// A source file could not be read
    #[error("Error while reading file \"{path}\".")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file's command failed to execute, or its outcome failed to render
    #[error("Error while executing command in file \"{path}\".")]
    Execute {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A per-file commit (IDV mode) failed
    #[error("Error while committing transaction for file \"{path}\".")]
    CommitFile {
        path: PathBuf,
        #[source]
        source: DbError,
    },

    /// The single commit after the last file (ALL mode) failed
    #[error("Error while committing all transactions")]
    CommitAll(#[source] DbError),

    /// Rolling back after an earlier failure failed
    #[error("Error while rolling back transaction")]
    Rollback(#[source] DbError),

    /// Closing the connection failed
    #[error("Error while closing DB connection")]
    Close(#[source] DbError),
}

impl BatchError {
    /// The process exit code reported for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            BatchError::Usage(_)
            | BatchError::NoFiles
            | BatchError::NotAFile(_)
            | BatchError::NotReadable { .. } => 1,
            BatchError::DriverNotFound { .. } | BatchError::Connect { .. } => 2,
            BatchError::CreateStatement(_) => 4,
            BatchError::FileRead { .. } => 5,
            BatchError::Execute { .. } => 6,
            BatchError::CommitFile { .. } | BatchError::CommitAll(_) => 7,
            BatchError::Rollback(_) => 8,
            BatchError::Close(_) => 9,
        }
    }

    /// Render the error and every underlying cause, outermost first
    pub fn cause_chain(&self) -> String {
        let mut chain = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            chain.push_str(": ");
            chain.push_str(&cause.to_string());
            source = cause.source();
        }
        chain
    }
}

/// Result type alias for run-level operations
pub type BatchResult<T> = std::result::Result<T, BatchError>;

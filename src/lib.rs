//! sqlbatch library crate
//!
//! This is the library component of sqlbatch, a batch SQL runner. Given a
//! connection URL and a list of SQL files, a run:
//!
//! 1. Validates that every file exists and is readable
//! 2. Opens one connection in manual-commit mode
//! 3. Submits each file's full text as a single command, in order
//! 4. Commits according to the transaction mode (none, per file, or once at the end)
//! 5. Prints result sets as CSV and other commands as an affected-row count
//! 6. Rolls back on failure, always closes the connection, and maps the
//!    outcome to an exit code
//!
//! No SQL is parsed here. How a file with several statements behaves is
//! entirely up to the database driver.

pub mod cli;
pub mod config;
pub mod connection;
pub mod engine;
pub mod error;
pub mod logging;
pub mod outcome;
pub mod renderer;
pub mod reporter;
pub mod runner;
pub mod source_file;
pub mod sqlite_driver;
pub mod transaction;

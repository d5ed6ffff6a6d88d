//! CLI argument parsing module for sqlbatch
//!
//! This module handles parsing command-line arguments using the clap crate.
//! Any parse failure becomes a usage error (exit code 1) before anything
//! touches the file system or the database. `--help` and `--version` print
//! and exit successfully as usual.

use std::ffi::OsString;

use clap::Parser;

use crate::config::RunConfig;
use crate::error::{BatchError, BatchResult};
use crate::transaction::TransactionMode;

/// Command-line arguments for sqlbatch
#[derive(Parser)]
#[clap(
    author,
    version,
    about = "Run SQL files against a database and print results as CSV"
)]
pub struct BatchArgs {
    /// SQL files to execute, in order
    ///
    /// Each file's entire contents are submitted to the database as a single
    /// command. Files run in the order given.
    #[clap(required = true, value_name = "FILE", help = "SQL files to execute in order")]
    pub files: Vec<String>,

    /// Database connection URL, e.g. sqlite:data.db
    #[clap(
        short = 'd',
        long = "dburl",
        value_name = "URL",
        env = "SQLBATCH_DBURL",
        help = "Database connection URL"
    )]
    pub db_url: String,

    /// Database user name
    #[clap(
        short,
        long,
        env = "SQLBATCH_USERNAME",
        help = "Database username"
    )]
    pub username: Option<String>,

    /// Database password
    ///
    /// Prefer the environment variable so the password stays out of shell
    /// history and process listings.
    #[clap(
        short,
        long,
        env = "SQLBATCH_PASSWORD",
        hide_env_values = true,
        help = "Database password"
    )]
    pub password: Option<String>,

    /// Transaction mode
    ///
    /// NONE never commits, ALL commits once after the last file, IDV commits
    /// after each file.
    #[clap(
        short = 't',
        long = "tx",
        value_enum,
        value_name = "TxType",
        default_value_t = TransactionMode::None,
        help = "NONE (default): no commits. ALL: one commit after all files. IDV: commit after each file"
    )]
    pub tx: TransactionMode,

    /// Suppress all diagnostic logging
    #[clap(short, long, help = "Suppress all INFO/ERROR logging output")]
    pub quiet: bool,

    /// Do not print the header line of column names
    #[clap(short = 'c', long = "nocolumns", help = "Suppress printing of column names")]
    pub no_columns: bool,

    /// Quote values containing commas, quotes or newlines
    #[clap(long, help = "Quote values that contain delimiters")]
    pub quote: bool,
}

impl BatchArgs {
    /// Fold the arguments into the run configuration
    pub fn into_config(self) -> RunConfig {
        RunConfig::new(self.db_url, self.files)
            .with_credentials(self.username, self.password)
            .with_tx_mode(self.tx)
            .with_verbose(!self.quiet)
            .with_print_columns(!self.no_columns)
            .with_quote(self.quote)
    }
}

/// Parse the process arguments
///
/// # Returns
/// * `Ok(BatchArgs)` - Arguments parsed successfully
/// * `Err(BatchError::Usage)` - Message and usage text to print on stderr
///
/// `--help` and `--version` print and exit the process directly.
pub fn parse_args() -> BatchResult<BatchArgs> {
    parse_args_from(std::env::args_os())
}

/// Parse an explicit argument list; the first item is the program name
pub fn parse_args_from<I, T>(args: I) -> BatchResult<BatchArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    BatchArgs::try_parse_from(args).map_err(|err| {
        if !err.use_stderr() {
            err.exit();
        }
        BatchError::Usage(err.render().to_string())
    })
}

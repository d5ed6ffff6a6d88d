//! Transaction policy for sqlbatch
//!
//! The connection always runs in manual-commit mode, so nothing is durable
//! until the engine commits. This module decides *when* the engine commits.
//! It holds no state beyond the mode itself.

use std::fmt;

use clap::ValueEnum;

/// When the engine issues commits
///
/// The command-line names are case-sensitive: `NONE`, `ALL`, `IDV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TransactionMode {
    /// Never commit. Writes are lost when the connection closes.
    #[default]
    #[value(name = "NONE")]
    None,

    /// Commit once, after every file has executed successfully
    #[value(name = "ALL")]
    All,

    /// Commit after each file's command has executed
    #[value(name = "IDV", alias = "PER_FILE")]
    PerFile,
}

impl TransactionMode {
    /// Whether to commit right after a file's command succeeds
    pub fn commits_after_each_file(self) -> bool {
        self == TransactionMode::PerFile
    }

    /// Whether to commit once after the last file succeeds
    pub fn commits_at_end(self) -> bool {
        self == TransactionMode::All
    }
}

impl fmt::Display for TransactionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionMode::None => "NONE",
            TransactionMode::All => "ALL",
            TransactionMode::PerFile => "IDV",
        };
        f.write_str(name)
    }
}
